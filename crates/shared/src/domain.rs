use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ParsePenaltyError, ParseVariantError};

/// Upper bound on simultaneous players sharing one device.
pub const MAX_PLAYERS: usize = 4;

/// Milliseconds added to a solve's final time by a +2 penalty.
pub const PLUS_TWO_MS: u64 = 2_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PuzzleVariant {
    #[serde(rename = "2x2")]
    TwoByTwo,
    #[default]
    #[serde(rename = "3x3")]
    ThreeByThree,
    #[serde(rename = "4x4")]
    FourByFour,
    #[serde(rename = "pyraminx")]
    Pyraminx,
    #[serde(rename = "skewb")]
    Skewb,
    #[serde(rename = "clock")]
    Clock,
    #[serde(rename = "square1")]
    Square1,
    #[serde(rename = "blindfold")]
    Blindfold,
}

impl PuzzleVariant {
    pub const ALL: [PuzzleVariant; 8] = [
        PuzzleVariant::TwoByTwo,
        PuzzleVariant::ThreeByThree,
        PuzzleVariant::FourByFour,
        PuzzleVariant::Pyraminx,
        PuzzleVariant::Skewb,
        PuzzleVariant::Clock,
        PuzzleVariant::Square1,
        PuzzleVariant::Blindfold,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            PuzzleVariant::TwoByTwo => "2x2",
            PuzzleVariant::ThreeByThree => "3x3",
            PuzzleVariant::FourByFour => "4x4",
            PuzzleVariant::Pyraminx => "pyraminx",
            PuzzleVariant::Skewb => "skewb",
            PuzzleVariant::Clock => "clock",
            PuzzleVariant::Square1 => "square1",
            PuzzleVariant::Blindfold => "blindfold",
        }
    }

    /// Lenient tag resolution for external inputs: any unrecognized tag
    /// selects the 3x3 variant instead of failing.
    pub fn from_tag_lossy(tag: &str) -> Self {
        tag.parse().unwrap_or_default()
    }
}

impl fmt::Display for PuzzleVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for PuzzleVariant {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|variant| variant.tag() == s)
            .ok_or_else(|| ParseVariantError { tag: s.to_string() })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Penalty {
    #[default]
    #[serde(rename = "none")]
    None,
    #[serde(rename = "+2")]
    PlusTwo,
    #[serde(rename = "DNF")]
    Dnf,
}

impl Penalty {
    pub fn tag(self) -> &'static str {
        match self {
            Penalty::None => "none",
            Penalty::PlusTwo => "+2",
            Penalty::Dnf => "DNF",
        }
    }
}

impl fmt::Display for Penalty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Penalty {
    type Err = ParsePenaltyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Penalty::None),
            "+2" => Ok(Penalty::PlusTwo),
            "DNF" => Ok(Penalty::Dnf),
            _ => Err(ParsePenaltyError { tag: s.to_string() }),
        }
    }
}

/// Ranking key for a completed solve. Every finite time orders before DNF,
/// so a DNF can never win against a finished solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FinalTime {
    Finite(u64),
    Dnf,
}

impl FinalTime {
    pub fn is_dnf(self) -> bool {
        matches!(self, FinalTime::Dnf)
    }
}

/// One player's outcome for one round. The raw time is what the timer
/// captured at the stop gesture; penalties only affect the derived
/// final time, never the stored raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveResult {
    pub raw_ms: u64,
    pub penalty: Penalty,
}

impl SolveResult {
    pub fn new(raw_ms: u64, penalty: Penalty) -> Self {
        Self { raw_ms, penalty }
    }

    pub fn final_time(&self) -> FinalTime {
        match self.penalty {
            Penalty::Dnf => FinalTime::Dnf,
            Penalty::PlusTwo => FinalTime::Finite(self.raw_ms + PLUS_TWO_MS),
            Penalty::None => FinalTime::Finite(self.raw_ms),
        }
    }
}
