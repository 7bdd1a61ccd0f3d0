//! Move-token vocabulary shared by every puzzle variant.

use std::fmt;

use shared::domain::PuzzleVariant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    U,
    D,
    L,
    R,
    F,
    B,
}

impl Face {
    pub const ALL: [Face; 6] = [Face::U, Face::D, Face::L, Face::R, Face::F, Face::B];

    /// Faces drawn for pyraminx base moves.
    pub const PYRAMINX: [Face; 4] = [Face::U, Face::L, Face::R, Face::B];

    /// Faces drawn for skewb moves.
    pub const SKEWB: [Face; 4] = [Face::R, Face::L, Face::U, Face::B];

    /// Opposite-face pairing used to forbid redundant back-to-back moves.
    pub fn axis(self) -> Axis {
        match self {
            Face::U | Face::D => Axis::Ud,
            Face::L | Face::R => Axis::Lr,
            Face::F | Face::B => Axis::Fb,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Face::U => 'U',
            Face::D => 'D',
            Face::L => 'L',
            Face::R => 'R',
            Face::F => 'F',
            Face::B => 'B',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Ud,
    Lr,
    Fb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Plain,
    Prime,
    Double,
}

impl Modifier {
    pub const ALL: [Modifier; 3] = [Modifier::Plain, Modifier::Prime, Modifier::Double];

    /// Pyraminx and skewb moves only come plain or inverted.
    pub const QUARTER: [Modifier; 2] = [Modifier::Plain, Modifier::Prime];

    pub fn suffix(self) -> &'static str {
        match self {
            Modifier::Plain => "",
            Modifier::Prime => "'",
            Modifier::Double => "2",
        }
    }
}

/// Pyraminx tip, rendered lowercase to distinguish it from the base face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tip {
    U,
    L,
    R,
    B,
}

impl Tip {
    pub const ALL: [Tip; 4] = [Tip::U, Tip::L, Tip::R, Tip::B];

    pub fn letter(self) -> char {
        match self {
            Tip::U => 'u',
            Tip::L => 'l',
            Tip::R => 'r',
            Tip::B => 'b',
        }
    }
}

/// Wide faces appended to blindfold scrambles (Fw/Uw/Rw families).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WideFace {
    F,
    U,
    R,
}

impl WideFace {
    pub const ALL: [WideFace; 3] = [WideFace::F, WideFace::U, WideFace::R];

    pub fn letter(self) -> char {
        match self {
            WideFace::F => 'F',
            WideFace::U => 'U',
            WideFace::R => 'R',
        }
    }
}

/// Clock pins in their fixed enumeration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClockPin {
    Ur,
    Dr,
    Dl,
    Ul,
    U,
    R,
    D,
    L,
    All,
}

impl ClockPin {
    pub const ALL: [ClockPin; 9] = [
        ClockPin::Ur,
        ClockPin::Dr,
        ClockPin::Dl,
        ClockPin::Ul,
        ClockPin::U,
        ClockPin::R,
        ClockPin::D,
        ClockPin::L,
        ClockPin::All,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ClockPin::Ur => "UR",
            ClockPin::Dr => "DR",
            ClockPin::Dl => "DL",
            ClockPin::Ul => "UL",
            ClockPin::U => "U",
            ClockPin::R => "R",
            ClockPin::D => "D",
            ClockPin::L => "L",
            ClockPin::All => "ALL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveToken {
    FaceTurn { face: Face, modifier: Modifier },
    Tip { tip: Tip, modifier: Modifier },
    Wide { face: WideFace, modifier: Modifier },
    ClockDial { pin: ClockPin, amount: u8 },
    PairTwist { top: i8, bottom: i8 },
}

impl fmt::Display for MoveToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            MoveToken::FaceTurn { face, modifier } => {
                write!(f, "{}{}", face.letter(), modifier.suffix())
            }
            MoveToken::Tip { tip, modifier } => {
                write!(f, "{}{}", tip.letter(), modifier.suffix())
            }
            MoveToken::Wide { face, modifier } => {
                write!(f, "{}w{}", face.letter(), modifier.suffix())
            }
            MoveToken::ClockDial { pin, amount } => write!(f, "{}+{}", pin.label(), amount),
            MoveToken::PairTwist { top, bottom } => write!(f, "({},{})", top, bottom),
        }
    }
}

/// An ordered move sequence for one puzzle variant. Immutable once produced;
/// the display layer consumes it read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scramble {
    pub variant: PuzzleVariant,
    pub tokens: Vec<MoveToken>,
}

impl Scramble {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl fmt::Display for Scramble {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, token) in self.tokens.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}
