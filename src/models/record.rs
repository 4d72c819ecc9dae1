//! Logged match record.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::datetime;

use super::Rule;

/// Outcome of a match, computed by the store from the score pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MatchResult {
    Win,
    Loss,
    Draw,
}

impl MatchResult {
    /// How the store derives the result from a score pair.
    pub fn from_scores(my_score: i64, opponent_score: i64) -> Self {
        if my_score > opponent_score {
            MatchResult::Win
        } else if my_score < opponent_score {
            MatchResult::Loss
        } else {
            MatchResult::Draw
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MatchResult::Win => "WIN",
            MatchResult::Loss => "LOSS",
            MatchResult::Draw => "DRAW",
        }
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One logged match.
///
/// Optional fields use the empty string for "not applicable": partner fields
/// are empty unless the rule is doubles, racket fields are empty unless the
/// rule has fever rackets. Numeric fields (`my_score`, `opponent_score`,
/// `my_rate`) are held as text because that is how they are edited; they are
/// parsed on demand and anything unparsable is excluded from numeric
/// aggregates rather than coerced to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Store-assigned identifier, immutable and unique.
    pub id: i64,

    /// When the record was inserted into the store. Tie-breaker when
    /// `played_at` values collide.
    pub created_at: String,

    /// When the match occurred, datetime-local minutes precision.
    /// User-editable, not necessarily monotonic with `created_at`.
    pub played_at: String,

    pub rule: Rule,
    pub stage: String,

    pub my_score: String,
    pub opponent_score: String,

    pub my_character: String,
    pub my_partner_character: String,
    pub opponent_character: String,
    pub opponent_partner_character: String,

    pub my_racket: String,
    pub my_partner_racket: String,
    pub opponent_racket: String,
    pub opponent_partner_racket: String,

    /// Skill rating at the time of the match.
    pub my_rate: String,

    /// Store-computed outcome; not client-settable.
    pub result: MatchResult,

    pub my_rate_band: String,
    pub my_partner_rate_band: String,
    pub opponent_rate_band: String,
    pub opponent_partner_rate_band: String,

    pub opponent_player_name: String,
    pub my_partner_player_name: String,
    pub opponent_partner_player_name: String,
}

impl MatchRecord {
    /// Epoch milliseconds of `played_at`; 0 when unparsable.
    pub fn played_at_timestamp(&self) -> i64 {
        datetime::parse_timestamp_millis(&self.played_at)
    }

    /// Epoch milliseconds of `created_at`; 0 when unparsable.
    pub fn created_at_timestamp(&self) -> i64 {
        datetime::parse_timestamp_millis(&self.created_at)
    }

    /// Rating as an integer, if it parses.
    pub fn my_rate_value(&self) -> Option<i64> {
        self.my_rate.trim().parse().ok()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Minimal singles record for stats/filter tests.
    pub fn record(id: i64, rule: Rule, played_at: &str, my_rate: &str, result: MatchResult) -> MatchRecord {
        MatchRecord {
            id,
            created_at: format!("2026-01-01T00:{:02}", id.rem_euclid(60)),
            played_at: played_at.to_string(),
            rule,
            stage: "スタジアム ハード".to_string(),
            my_score: "7".to_string(),
            opponent_score: "5".to_string(),
            my_character: "Mario".to_string(),
            my_partner_character: String::new(),
            opponent_character: "Luigi".to_string(),
            opponent_partner_character: String::new(),
            my_racket: String::new(),
            my_partner_racket: String::new(),
            opponent_racket: String::new(),
            opponent_partner_racket: String::new(),
            my_rate: my_rate.to_string(),
            result,
            my_rate_band: "A".to_string(),
            my_partner_rate_band: String::new(),
            opponent_rate_band: "A".to_string(),
            opponent_partner_rate_band: String::new(),
            opponent_player_name: String::new(),
            my_partner_player_name: String::new(),
            opponent_partner_player_name: String::new(),
        }
    }
}
