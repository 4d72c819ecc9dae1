//! Rank-tier labels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Skill-tier label, ordered ascending from C- to S+.
///
/// Record fields keep band values as free strings (the store does not
/// validate them), so this enum mostly serves the fixed display ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RateBand {
    #[serde(rename = "C-")]
    CMinus,
    C,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "B-")]
    BMinus,
    B,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "A-")]
    AMinus,
    A,
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "S-")]
    SMinus,
    S,
    #[serde(rename = "S+")]
    SPlus,
}

impl RateBand {
    /// Declared domain ordering, lowest tier first.
    pub const ASCENDING: [RateBand; 12] = [
        RateBand::CMinus,
        RateBand::C,
        RateBand::CPlus,
        RateBand::BMinus,
        RateBand::B,
        RateBand::BPlus,
        RateBand::AMinus,
        RateBand::A,
        RateBand::APlus,
        RateBand::SMinus,
        RateBand::S,
        RateBand::SPlus,
    ];

    /// Display ordering: highest tier first.
    pub fn descending() -> impl Iterator<Item = RateBand> {
        Self::ASCENDING.iter().rev().copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RateBand::CMinus => "C-",
            RateBand::C => "C",
            RateBand::CPlus => "C+",
            RateBand::BMinus => "B-",
            RateBand::B => "B",
            RateBand::BPlus => "B+",
            RateBand::AMinus => "A-",
            RateBand::A => "A",
            RateBand::APlus => "A+",
            RateBand::SMinus => "S-",
            RateBand::S => "S",
            RateBand::SPlus => "S+",
        }
    }
}

impl fmt::Display for RateBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RateBand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ASCENDING
            .iter()
            .find(|band| band.as_str() == s)
            .copied()
            .ok_or_else(|| format!("unknown rate band: {}", s))
    }
}
