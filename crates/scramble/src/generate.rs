//! Per-variant scramble generation.

use rand::Rng;
use shared::domain::PuzzleVariant;

use crate::moves::{Axis, ClockPin, Face, Modifier, MoveToken, Scramble, Tip, WideFace};

const LEN_2X2: usize = 9;
const LEN_3X3: usize = 20;
const LEN_4X4: usize = 40;
const PYRAMINX_FACE_MOVES: usize = 6;
const PYRAMINX_TIP_MOVES: usize = 4;
const LEN_SKEWB: usize = 9;
const LEN_SQUARE1: usize = 12;
const BLINDFOLD_CORE_LEN: usize = 20;

/// Generate a fresh scramble for `variant` from the process RNG.
pub fn generate(variant: PuzzleVariant) -> Scramble {
    generate_with(variant, &mut rand::rng())
}

/// Generate a scramble from a caller-supplied RNG. Pure in everything but
/// entropy consumption; always returns a non-empty sequence satisfying the
/// variant's structural constraint.
pub fn generate_with<R: Rng + ?Sized>(variant: PuzzleVariant, rng: &mut R) -> Scramble {
    let tokens = match variant {
        PuzzleVariant::TwoByTwo => face_turns(rng, LEN_2X2),
        PuzzleVariant::ThreeByThree => face_turns(rng, LEN_3X3),
        PuzzleVariant::FourByFour => face_turns(rng, LEN_4X4),
        PuzzleVariant::Pyraminx => pyraminx(rng),
        PuzzleVariant::Skewb => skewb(rng),
        PuzzleVariant::Clock => clock(rng),
        PuzzleVariant::Square1 => square1(rng),
        PuzzleVariant::Blindfold => blindfold(rng),
    };
    Scramble { variant, tokens }
}

/// Face-turn sequence for the NxN cubes: reject any candidate repeating the
/// previous face or the previous axis pair. At most two of the six faces are
/// excluded per draw, so the rejection loop needs O(1) expected retries.
fn face_turns<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Vec<MoveToken> {
    let mut tokens = Vec::with_capacity(len);
    let mut last: Option<(Face, Axis)> = None;
    for _ in 0..len {
        let face = loop {
            let candidate = Face::ALL[rng.random_range(0..Face::ALL.len())];
            match last {
                Some((prev_face, prev_axis))
                    if candidate == prev_face || candidate.axis() == prev_axis => {}
                _ => break candidate,
            }
        };
        let modifier = Modifier::ALL[rng.random_range(0..Modifier::ALL.len())];
        tokens.push(MoveToken::FaceTurn { face, modifier });
        last = Some((face, face.axis()));
    }
    tokens
}

/// Six base moves then four tip moves, all drawn independently. Unlike the
/// NxN cubes, pyraminx base moves carry no adjacency constraint.
fn pyraminx<R: Rng + ?Sized>(rng: &mut R) -> Vec<MoveToken> {
    let mut tokens = Vec::with_capacity(PYRAMINX_FACE_MOVES + PYRAMINX_TIP_MOVES);
    for _ in 0..PYRAMINX_FACE_MOVES {
        tokens.push(MoveToken::FaceTurn {
            face: Face::PYRAMINX[rng.random_range(0..Face::PYRAMINX.len())],
            modifier: Modifier::QUARTER[rng.random_range(0..Modifier::QUARTER.len())],
        });
    }
    for _ in 0..PYRAMINX_TIP_MOVES {
        tokens.push(MoveToken::Tip {
            tip: Tip::ALL[rng.random_range(0..Tip::ALL.len())],
            modifier: Modifier::QUARTER[rng.random_range(0..Modifier::QUARTER.len())],
        });
    }
    tokens
}

/// Skewb only forbids repeating the previous face; the axis concept does not
/// apply.
fn skewb<R: Rng + ?Sized>(rng: &mut R) -> Vec<MoveToken> {
    let mut tokens = Vec::with_capacity(LEN_SKEWB);
    let mut last: Option<Face> = None;
    for _ in 0..LEN_SKEWB {
        let face = loop {
            let candidate = Face::SKEWB[rng.random_range(0..Face::SKEWB.len())];
            if last != Some(candidate) {
                break candidate;
            }
        };
        tokens.push(MoveToken::FaceTurn {
            face,
            modifier: Modifier::QUARTER[rng.random_range(0..Modifier::QUARTER.len())],
        });
        last = Some(face);
    }
    tokens
}

/// One dial per pin in the fixed pin order, each amount drawn independently.
fn clock<R: Rng + ?Sized>(rng: &mut R) -> Vec<MoveToken> {
    ClockPin::ALL
        .into_iter()
        .map(|pin| MoveToken::ClockDial {
            pin,
            amount: rng.random_range(1..=6),
        })
        .collect()
}

/// Twelve independent (top, bottom) twists in [-3, 3]. Real square-1
/// scrambles need slice-twist tracking to stay parity-valid; this generator
/// intentionally does not enforce that.
fn square1<R: Rng + ?Sized>(rng: &mut R) -> Vec<MoveToken> {
    (0..LEN_SQUARE1)
        .map(|_| MoveToken::PairTwist {
            top: rng.random_range(-3..=3),
            bottom: rng.random_range(-3..=3),
        })
        .collect()
}

/// A full 3x3 core followed by one to three wide moves drawn with
/// replacement. The appended moves are exempt from every adjacency rule,
/// including against each other and against the last core move.
fn blindfold<R: Rng + ?Sized>(rng: &mut R) -> Vec<MoveToken> {
    let mut tokens = face_turns(rng, BLINDFOLD_CORE_LEN);
    let wide_count = rng.random_range(1..=3);
    for _ in 0..wide_count {
        tokens.push(MoveToken::Wide {
            face: WideFace::ALL[rng.random_range(0..WideFace::ALL.len())],
            modifier: Modifier::ALL[rng.random_range(0..Modifier::ALL.len())],
        });
    }
    tokens
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    const SEEDS: [u64; 8] = [1, 7, 42, 1337, 0xDEAD, 0xBEEF, 987_654_321, u64::MAX];

    fn face_of(token: &MoveToken) -> Face {
        match token {
            MoveToken::FaceTurn { face, .. } => *face,
            other => panic!("expected a face turn, got {other}"),
        }
    }

    fn assert_no_face_or_axis_repeat(tokens: &[MoveToken]) {
        for pair in tokens.windows(2) {
            let (prev, next) = (face_of(&pair[0]), face_of(&pair[1]));
            assert_ne!(prev, next, "consecutive moves on the same face");
            assert_ne!(
                prev.axis(),
                next.axis(),
                "consecutive moves on the same axis pair"
            );
        }
    }

    #[test]
    fn nxn_lengths_match_the_variant_table() {
        let mut rng = StdRng::seed_from_u64(9);
        assert_eq!(generate_with(PuzzleVariant::TwoByTwo, &mut rng).len(), 9);
        assert_eq!(generate_with(PuzzleVariant::ThreeByThree, &mut rng).len(), 20);
        assert_eq!(generate_with(PuzzleVariant::FourByFour, &mut rng).len(), 40);
        assert_eq!(generate_with(PuzzleVariant::Pyraminx, &mut rng).len(), 10);
        assert_eq!(generate_with(PuzzleVariant::Skewb, &mut rng).len(), 9);
        assert_eq!(generate_with(PuzzleVariant::Clock, &mut rng).len(), 9);
        assert_eq!(generate_with(PuzzleVariant::Square1, &mut rng).len(), 12);
    }

    #[test]
    fn nxn_scrambles_never_repeat_a_face_or_axis() {
        for seed in SEEDS {
            let mut rng = StdRng::seed_from_u64(seed);
            for variant in [
                PuzzleVariant::TwoByTwo,
                PuzzleVariant::ThreeByThree,
                PuzzleVariant::FourByFour,
            ] {
                let scramble = generate_with(variant, &mut rng);
                assert_no_face_or_axis_repeat(&scramble.tokens);
            }
        }
    }

    #[test]
    fn skewb_never_repeats_a_face_but_may_repeat_an_axis() {
        for seed in SEEDS {
            let mut rng = StdRng::seed_from_u64(seed);
            let scramble = generate_with(PuzzleVariant::Skewb, &mut rng);
            for pair in scramble.tokens.windows(2) {
                assert_ne!(face_of(&pair[0]), face_of(&pair[1]));
            }
            for token in &scramble.tokens {
                assert!(Face::SKEWB.contains(&face_of(token)));
            }
        }
    }

    #[test]
    fn pyraminx_draws_six_faces_then_four_tips() {
        for seed in SEEDS {
            let mut rng = StdRng::seed_from_u64(seed);
            let scramble = generate_with(PuzzleVariant::Pyraminx, &mut rng);
            assert_eq!(scramble.len(), 10);
            for token in &scramble.tokens[..6] {
                match token {
                    MoveToken::FaceTurn { face, modifier } => {
                        assert!(Face::PYRAMINX.contains(face));
                        assert_ne!(*modifier, Modifier::Double);
                    }
                    other => panic!("expected face turn in pyraminx prefix, got {other}"),
                }
            }
            for token in &scramble.tokens[6..] {
                match token {
                    MoveToken::Tip { modifier, .. } => assert_ne!(*modifier, Modifier::Double),
                    other => panic!("expected tip move in pyraminx suffix, got {other}"),
                }
            }
        }
    }

    #[test]
    fn clock_dials_every_pin_exactly_once_in_order() {
        for seed in SEEDS {
            let mut rng = StdRng::seed_from_u64(seed);
            let scramble = generate_with(PuzzleVariant::Clock, &mut rng);
            assert_eq!(scramble.len(), ClockPin::ALL.len());
            for (token, expected_pin) in scramble.tokens.iter().zip(ClockPin::ALL) {
                match token {
                    MoveToken::ClockDial { pin, amount } => {
                        assert_eq!(*pin, expected_pin);
                        assert!((1..=6).contains(amount));
                    }
                    other => panic!("expected clock dial, got {other}"),
                }
            }
        }
    }

    #[test]
    fn square1_pairs_stay_in_range() {
        for seed in SEEDS {
            let mut rng = StdRng::seed_from_u64(seed);
            let scramble = generate_with(PuzzleVariant::Square1, &mut rng);
            assert_eq!(scramble.len(), 12);
            for token in &scramble.tokens {
                match token {
                    MoveToken::PairTwist { top, bottom } => {
                        assert!((-3..=3).contains(top));
                        assert!((-3..=3).contains(bottom));
                    }
                    other => panic!("expected pair twist, got {other}"),
                }
            }
        }
    }

    #[test]
    fn blindfold_appends_one_to_three_unconstrained_wide_moves() {
        for seed in SEEDS {
            let mut rng = StdRng::seed_from_u64(seed);
            let scramble = generate_with(PuzzleVariant::Blindfold, &mut rng);
            assert!((21..=23).contains(&scramble.len()));
            assert_no_face_or_axis_repeat(&scramble.tokens[..20]);
            for token in &scramble.tokens[20..] {
                assert!(matches!(token, MoveToken::Wide { .. }));
            }
        }
    }

    #[test]
    fn consecutive_calls_are_independent_and_valid() {
        let first = generate(PuzzleVariant::ThreeByThree);
        let second = generate(PuzzleVariant::ThreeByThree);
        assert_eq!(first.len(), 20);
        assert_eq!(second.len(), 20);
        assert_no_face_or_axis_repeat(&first.tokens);
        assert_no_face_or_axis_repeat(&second.tokens);
    }

    #[test]
    fn scramble_text_is_space_separated_notation() {
        let mut rng = StdRng::seed_from_u64(3);
        let text = generate_with(PuzzleVariant::ThreeByThree, &mut rng).to_string();
        assert_eq!(text.split(' ').count(), 20);
        assert!(!text.starts_with(' ') && !text.ends_with(' '));
    }
}
