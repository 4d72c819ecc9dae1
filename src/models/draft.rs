//! User-entered record values and their validation.

use thiserror::Error;

use super::{is_valid_score_pair, Rule};

/// Validation errors raised before any network call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field is empty: {0}")]
    MissingField(&'static str),

    #[error("Rate must be a non-negative integer")]
    InvalidRate,

    #[error("Score must be an integer between 0 and 8: {0}")]
    InvalidScore(String),

    #[error("Score pair {my}-{opponent} is not a valid set result")]
    InvalidScorePair { my: u8, opponent: u8 },
}

/// Editable values of a match record, as they appear in the entry form.
///
/// Everything is text; `normalize` is the single place where requiredness,
/// numeric shape and rule capabilities are enforced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchRecordDraft {
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
    pub my_rate: String,
    pub my_rate_band: String,
    pub my_partner_rate_band: String,
    pub opponent_rate_band: String,
    pub opponent_partner_rate_band: String,
    pub opponent_player_name: String,
    pub my_partner_player_name: String,
    pub opponent_partner_player_name: String,
}

impl MatchRecordDraft {
    /// Trim all fields, enforce required values and the scoring rule, and
    /// blank out fields the selected rule does not support.
    pub fn normalize(&self) -> Result<MatchRecordDraft, ValidationError> {
        let mut draft = MatchRecordDraft {
            played_at: self.played_at.trim().to_string(),
            rule: self.rule,
            stage: self.stage.trim().to_string(),
            my_score: self.my_score.trim().to_string(),
            opponent_score: self.opponent_score.trim().to_string(),
            my_character: self.my_character.trim().to_string(),
            my_partner_character: self.my_partner_character.trim().to_string(),
            opponent_character: self.opponent_character.trim().to_string(),
            opponent_partner_character: self.opponent_partner_character.trim().to_string(),
            my_racket: self.my_racket.trim().to_string(),
            my_partner_racket: self.my_partner_racket.trim().to_string(),
            opponent_racket: self.opponent_racket.trim().to_string(),
            opponent_partner_racket: self.opponent_partner_racket.trim().to_string(),
            my_rate: self.my_rate.trim().to_string(),
            my_rate_band: self.my_rate_band.trim().to_string(),
            my_partner_rate_band: self.my_partner_rate_band.trim().to_string(),
            opponent_rate_band: self.opponent_rate_band.trim().to_string(),
            opponent_partner_rate_band: self.opponent_partner_rate_band.trim().to_string(),
            opponent_player_name: self.opponent_player_name.trim().to_string(),
            my_partner_player_name: self.my_partner_player_name.trim().to_string(),
            opponent_partner_player_name: self.opponent_partner_player_name.trim().to_string(),
        };

        if draft.played_at.is_empty() {
            return Err(ValidationError::MissingField("played_at"));
        }
        if draft.stage.is_empty() {
            return Err(ValidationError::MissingField("stage"));
        }
        if draft.my_character.is_empty() {
            return Err(ValidationError::MissingField("my_character"));
        }
        if draft.opponent_character.is_empty() {
            return Err(ValidationError::MissingField("opponent_character"));
        }
        if draft.my_rate_band.is_empty() {
            return Err(ValidationError::MissingField("my_rate_band"));
        }
        if draft.opponent_rate_band.is_empty() {
            return Err(ValidationError::MissingField("opponent_rate_band"));
        }

        if draft.my_rate.is_empty() || !draft.my_rate.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidRate);
        }
        // Canonicalize: strip leading zeros.
        draft.my_rate = draft
            .my_rate
            .parse::<u64>()
            .map_err(|_| ValidationError::InvalidRate)?
            .to_string();

        let my_score = parse_score(&draft.my_score)?;
        let opponent_score = parse_score(&draft.opponent_score)?;
        if !is_valid_score_pair(my_score, opponent_score) {
            return Err(ValidationError::InvalidScorePair {
                my: my_score,
                opponent: opponent_score,
            });
        }

        if !draft.rule.is_doubles() {
            draft.my_partner_character.clear();
            draft.opponent_partner_character.clear();
            draft.my_partner_racket.clear();
            draft.opponent_partner_racket.clear();
            draft.my_partner_rate_band.clear();
            draft.opponent_partner_rate_band.clear();
            draft.my_partner_player_name.clear();
            draft.opponent_partner_player_name.clear();
        }
        if !draft.rule.has_fever_racket() {
            draft.my_racket.clear();
            draft.opponent_racket.clear();
            draft.my_partner_racket.clear();
            draft.opponent_partner_racket.clear();
        }

        Ok(draft)
    }
}

fn parse_score(value: &str) -> Result<u8, ValidationError> {
    value
        .parse::<u8>()
        .ok()
        .filter(|score| *score <= 8)
        .ok_or_else(|| ValidationError::InvalidScore(value.to_string()))
}
