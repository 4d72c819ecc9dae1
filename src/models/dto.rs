//! Wire encoding for the record store.
//!
//! The store speaks snake_case JSON with `null` for absent optional fields
//! and integers for numeric fields. In memory the client uses empty strings
//! and text-edited numbers, so decode maps `null` to `""` and encode maps
//! `""` back to `null` (never an empty string on the wire).

use serde::{Deserialize, Serialize};

use crate::datetime;

use super::{MatchRecord, MatchRecordDraft, MatchResult, Rule, ValidationError};

/// Record as returned by `GET /records`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecordDto {
    pub id: i64,
    pub created_at: String,
    pub played_at: String,
    pub rule: Rule,
    pub stage: String,
    pub my_score: i64,
    pub opponent_score: i64,
    pub my_character: String,
    pub my_partner_character: Option<String>,
    pub opponent_character: String,
    pub opponent_partner_character: Option<String>,
    pub my_racket: Option<String>,
    pub my_partner_racket: Option<String>,
    pub opponent_racket: Option<String>,
    pub opponent_partner_racket: Option<String>,
    pub my_rate: i64,
    pub result: MatchResult,
    pub my_rate_band: String,
    pub my_partner_rate_band: Option<String>,
    pub opponent_rate_band: String,
    pub opponent_partner_rate_band: Option<String>,
    pub opponent_player_name: Option<String>,
    pub my_partner_player_name: Option<String>,
    pub opponent_partner_player_name: Option<String>,
}

/// Body for `POST /records` and `PUT /records/{id}`.
///
/// Same shape as the DTO minus the store-owned fields (`id`, `result`,
/// `created_at`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecordPayload {
    pub played_at: String,
    pub rule: Rule,
    pub stage: String,
    pub my_score: i64,
    pub opponent_score: i64,
    pub my_character: String,
    pub my_partner_character: Option<String>,
    pub opponent_character: String,
    pub opponent_partner_character: Option<String>,
    pub my_racket: Option<String>,
    pub my_partner_racket: Option<String>,
    pub opponent_racket: Option<String>,
    pub opponent_partner_racket: Option<String>,
    pub my_rate: i64,
    pub my_rate_band: String,
    pub my_partner_rate_band: Option<String>,
    pub opponent_rate_band: String,
    pub opponent_partner_rate_band: Option<String>,
    pub opponent_player_name: Option<String>,
    pub my_partner_player_name: Option<String>,
    pub opponent_partner_player_name: Option<String>,
}

fn or_empty(value: Option<String>) -> String {
    value.unwrap_or_default()
}

fn none_if_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl From<MatchRecordDto> for MatchRecord {
    fn from(dto: MatchRecordDto) -> Self {
        MatchRecord {
            id: dto.id,
            created_at: dto.created_at,
            played_at: datetime::to_datetime_local(&dto.played_at),
            rule: dto.rule,
            stage: dto.stage,
            my_score: dto.my_score.to_string(),
            opponent_score: dto.opponent_score.to_string(),
            my_character: dto.my_character,
            my_partner_character: or_empty(dto.my_partner_character),
            opponent_character: dto.opponent_character,
            opponent_partner_character: or_empty(dto.opponent_partner_character),
            my_racket: or_empty(dto.my_racket),
            my_partner_racket: or_empty(dto.my_partner_racket),
            opponent_racket: or_empty(dto.opponent_racket),
            opponent_partner_racket: or_empty(dto.opponent_partner_racket),
            my_rate: dto.my_rate.to_string(),
            result: dto.result,
            my_rate_band: dto.my_rate_band,
            my_partner_rate_band: or_empty(dto.my_partner_rate_band),
            opponent_rate_band: dto.opponent_rate_band,
            opponent_partner_rate_band: or_empty(dto.opponent_partner_rate_band),
            opponent_player_name: or_empty(dto.opponent_player_name),
            my_partner_player_name: or_empty(dto.my_partner_player_name),
            opponent_partner_player_name: or_empty(dto.opponent_partner_player_name),
        }
    }
}

impl MatchRecordPayload {
    /// Normalize a draft and encode it for the wire.
    pub fn from_draft(draft: &MatchRecordDraft) -> Result<Self, ValidationError> {
        let draft = draft.normalize()?;

        let my_score = draft
            .my_score
            .parse()
            .map_err(|_| ValidationError::InvalidScore(draft.my_score.clone()))?;
        let opponent_score = draft
            .opponent_score
            .parse()
            .map_err(|_| ValidationError::InvalidScore(draft.opponent_score.clone()))?;
        let my_rate = draft.my_rate.parse().map_err(|_| ValidationError::InvalidRate)?;

        Ok(MatchRecordPayload {
            played_at: draft.played_at.clone(),
            rule: draft.rule,
            stage: draft.stage.clone(),
            my_score,
            opponent_score,
            my_character: draft.my_character.clone(),
            my_partner_character: none_if_empty(&draft.my_partner_character),
            opponent_character: draft.opponent_character.clone(),
            opponent_partner_character: none_if_empty(&draft.opponent_partner_character),
            my_racket: none_if_empty(&draft.my_racket),
            my_partner_racket: none_if_empty(&draft.my_partner_racket),
            opponent_racket: none_if_empty(&draft.opponent_racket),
            opponent_partner_racket: none_if_empty(&draft.opponent_partner_racket),
            my_rate,
            my_rate_band: draft.my_rate_band.clone(),
            my_partner_rate_band: none_if_empty(&draft.my_partner_rate_band),
            opponent_rate_band: draft.opponent_rate_band.clone(),
            opponent_partner_rate_band: none_if_empty(&draft.opponent_partner_rate_band),
            opponent_player_name: none_if_empty(&draft.opponent_player_name),
            my_partner_player_name: none_if_empty(&draft.my_partner_player_name),
            opponent_partner_player_name: none_if_empty(&draft.opponent_partner_player_name),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dto() -> MatchRecordDto {
        MatchRecordDto {
            id: 42,
            created_at: "2026-01-15T11:30:05+00:00".to_string(),
            played_at: "2026-01-15T20:30:00".to_string(),
            rule: Rule::SinglesFeverOff,
            stage: "フォレストコート".to_string(),
            my_score: 7,
            opponent_score: 5,
            my_character: "Mario".to_string(),
            my_partner_character: None,
            opponent_character: "Boo".to_string(),
            opponent_partner_character: None,
            my_racket: None,
            my_partner_racket: None,
            opponent_racket: None,
            opponent_partner_racket: None,
            my_rate: 1500,
            result: MatchResult::Win,
            my_rate_band: "A".to_string(),
            my_partner_rate_band: None,
            opponent_rate_band: "A+".to_string(),
            opponent_partner_rate_band: None,
            opponent_player_name: Some("Rival".to_string()),
            my_partner_player_name: None,
            opponent_partner_player_name: None,
        }
    }

    #[test]
    fn test_decode_null_becomes_empty_string() {
        let record: MatchRecord = dto().into();

        assert_eq!(record.id, 42);
        assert_eq!(record.my_partner_character, "");
        assert_eq!(record.my_racket, "");
        assert_eq!(record.opponent_player_name, "Rival");
        assert_eq!(record.my_score, "7");
        assert_eq!(record.my_rate, "1500");
    }

    #[test]
    fn test_decode_reformats_played_at() {
        let record: MatchRecord = dto().into();
        assert_eq!(record.played_at, "2026-01-15T20:30");
    }

    #[test]
    fn test_encode_empty_becomes_null() {
        let draft = MatchRecordDraft {
            played_at: "2026-01-15T20:30".to_string(),
            rule: Rule::SinglesFeverOff,
            stage: "フォレストコート".to_string(),
            my_score: "7".to_string(),
            opponent_score: "5".to_string(),
            my_character: "Mario".to_string(),
            opponent_character: "Boo".to_string(),
            my_rate: "1500".to_string(),
            my_rate_band: "A".to_string(),
            opponent_rate_band: "A+".to_string(),
            ..Default::default()
        };

        let payload = MatchRecordPayload::from_draft(&draft).unwrap();
        assert_eq!(payload.my_partner_character, None);
        assert_eq!(payload.my_racket, None);
        assert_eq!(payload.opponent_player_name, None);
        assert_eq!(payload.my_score, 7);
        assert_eq!(payload.my_rate, 1500);

        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains("\"my_racket\":null"));
        assert!(!json.contains("\"my_racket\":\"\""));
    }

    #[test]
    fn test_numeric_round_trip() {
        for rate in [0, 1, 999, 1500, 9999] {
            let mut d = dto();
            d.my_rate = rate;
            let record: MatchRecord = d.into();
            assert_eq!(record.my_rate_value(), Some(rate));
        }
    }

    #[test]
    fn test_invalid_draft_rejected_before_encode() {
        let draft = MatchRecordDraft::default();
        assert!(MatchRecordPayload::from_draft(&draft).is_err());
    }

    #[test]
    fn test_dto_json_shape() {
        let json = serde_json::to_string(&dto()).unwrap();
        let parsed: MatchRecordDto = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, 42);
        assert_eq!(parsed.rule, Rule::SinglesFeverOff);
        assert!(json.contains("\"my_rate\":1500"));
        assert!(json.contains("\"result\":\"WIN\""));
    }
}
