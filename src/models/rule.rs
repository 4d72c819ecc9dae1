//! Match rule variants.
//!
//! A rule combines singles/doubles with the fever-racket mechanic being on
//! or off. Capability flags are derived by exhaustive match, never inferred
//! from which record fields happen to be populated.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the four fixed match formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    SinglesFeverOn,
    SinglesFeverOff,
    DoublesFeverOn,
    DoublesFeverOff,
}

impl Rule {
    /// Enumeration order used for trend series and overview rows.
    pub const ALL: [Rule; 4] = [
        Rule::SinglesFeverOn,
        Rule::SinglesFeverOff,
        Rule::DoublesFeverOn,
        Rule::DoublesFeverOff,
    ];

    /// Whether partner fields apply.
    pub fn is_doubles(self) -> bool {
        match self {
            Rule::SinglesFeverOn | Rule::SinglesFeverOff => false,
            Rule::DoublesFeverOn | Rule::DoublesFeverOff => true,
        }
    }

    /// Whether racket fields apply.
    pub fn has_fever_racket(self) -> bool {
        match self {
            Rule::SinglesFeverOn | Rule::DoublesFeverOn => true,
            Rule::SinglesFeverOff | Rule::DoublesFeverOff => false,
        }
    }

    /// Persistence identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Rule::SinglesFeverOn => "singles_fever_on",
            Rule::SinglesFeverOff => "singles_fever_off",
            Rule::DoublesFeverOn => "doubles_fever_on",
            Rule::DoublesFeverOff => "doubles_fever_off",
        }
    }

    /// Short display label.
    pub fn label(self) -> &'static str {
        match self {
            Rule::SinglesFeverOn => "Singles / F+",
            Rule::SinglesFeverOff => "Singles / F-",
            Rule::DoublesFeverOn => "Doubles / F+",
            Rule::DoublesFeverOff => "Doubles / F-",
        }
    }

    /// Chart color assigned to this rule's trend series.
    pub fn trend_color(self) -> &'static str {
        match self {
            Rule::SinglesFeverOn => "#2e7d32",
            Rule::SinglesFeverOff => "#1565c0",
            Rule::DoublesFeverOn => "#ef6c00",
            Rule::DoublesFeverOff => "#6a1b9a",
        }
    }
}

impl Default for Rule {
    fn default() -> Self {
        Rule::SinglesFeverOn
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Rule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "singles_fever_on" => Ok(Rule::SinglesFeverOn),
            "singles_fever_off" => Ok(Rule::SinglesFeverOff),
            "doubles_fever_on" => Ok(Rule::DoublesFeverOn),
            "doubles_fever_off" => Ok(Rule::DoublesFeverOff),
            other => Err(format!("unknown rule: {}", other)),
        }
    }
}
