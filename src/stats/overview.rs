//! Per-rule current and best rating.

use serde::Serialize;

use crate::models::{MatchRecord, Rule};

/// Current and maximum rating observed for one rule. All four rules are
/// always reported; a rule with no valid samples carries `None`s.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleRateOverview {
    pub rule: Rule,
    pub current_rate: Option<i64>,
    pub current_rate_band: Option<String>,
    pub max_rate: Option<i64>,
    pub max_rate_band: Option<String>,
}

/// Compute the overview for every rule from the full record set.
pub fn rate_overview(records: &[MatchRecord]) -> Vec<RuleRateOverview> {
    Rule::ALL
        .into_iter()
        .map(|rule| overview_for_rule(records, rule))
        .collect()
}

fn overview_for_rule(records: &[MatchRecord], rule: Rule) -> RuleRateOverview {
    struct Sample<'a> {
        played_at: i64,
        created_at: i64,
        id: i64,
        rate: i64,
        rate_band: &'a str,
    }

    let mut samples: Vec<Sample> = records
        .iter()
        .filter(|record| record.rule == rule)
        .filter_map(|record| {
            let played_at = record.played_at_timestamp();
            if played_at <= 0 {
                return None;
            }
            let rate = record.my_rate_value()?;
            Some(Sample {
                played_at,
                created_at: record.created_at_timestamp(),
                id: record.id,
                rate,
                rate_band: record.my_rate_band.trim(),
            })
        })
        .collect();

    samples.sort_by(|left, right| {
        left.played_at
            .cmp(&right.played_at)
            .then_with(|| left.created_at.cmp(&right.created_at))
            .then_with(|| left.id.cmp(&right.id))
    });

    let Some(latest) = samples.last() else {
        return RuleRateOverview {
            rule,
            current_rate: None,
            current_rate_band: None,
            max_rate: None,
            max_rate_band: None,
        };
    };

    let max_rate = samples.iter().map(|sample| sample.rate).max();
    // When several samples tie for the max, the most recent one supplies
    // the band.
    let max_rate_band = max_rate.and_then(|max| {
        samples
            .iter()
            .rev()
            .find(|sample| sample.rate == max)
            .map(|sample| sample.rate_band.to_string())
    });

    RuleRateOverview {
        rule,
        current_rate: Some(latest.rate),
        current_rate_band: Some(latest.rate_band.to_string()),
        max_rate,
        max_rate_band,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_support::record;
    use crate::models::MatchResult;

    #[test]
    fn test_all_rules_reported() {
        let overview = rate_overview(&[]);
        assert_eq!(overview.len(), 4);
        assert!(overview.iter().all(|o| o.current_rate.is_none()));
        assert!(overview.iter().all(|o| o.max_rate.is_none()));
    }

    #[test]
    fn test_current_is_chronologically_last() {
        let mut a = record(1, Rule::SinglesFeverOn, "2026-01-10T10:00", "1500", MatchResult::Win);
        a.my_rate_band = "A-".to_string();
        let mut b = record(2, Rule::SinglesFeverOn, "2026-01-12T10:00", "1480", MatchResult::Loss);
        b.my_rate_band = "A".to_string();
        let mut c = record(3, Rule::SinglesFeverOn, "2026-01-11T10:00", "1530", MatchResult::Win);
        c.my_rate_band = "A+".to_string();

        let overview = rate_overview(&[a, b, c]);
        let singles = &overview[0];
        assert_eq!(singles.rule, Rule::SinglesFeverOn);
        assert_eq!(singles.current_rate, Some(1480));
        assert_eq!(singles.current_rate_band.as_deref(), Some("A"));
        assert_eq!(singles.max_rate, Some(1530));
        assert_eq!(singles.max_rate_band.as_deref(), Some("A+"));
    }

    #[test]
    fn test_max_tie_prefers_most_recent_sample() {
        // Non-adjacent days tie at 1530: the later day's band wins.
        let mut a = record(1, Rule::SinglesFeverOn, "2026-01-10T10:00", "1530", MatchResult::Win);
        a.my_rate_band = "A-".to_string();
        let mut b = record(2, Rule::SinglesFeverOn, "2026-01-12T10:00", "1500", MatchResult::Loss);
        b.my_rate_band = "A".to_string();
        let mut c = record(3, Rule::SinglesFeverOn, "2026-01-14T10:00", "1530", MatchResult::Win);
        c.my_rate_band = "A+".to_string();

        let overview = rate_overview(&[a, b, c]);
        let singles = &overview[0];
        assert_eq!(singles.max_rate, Some(1530));
        assert_eq!(singles.max_rate_band.as_deref(), Some("A+"));
        assert_eq!(singles.current_rate, Some(1530));
    }

    #[test]
    fn test_invalid_samples_excluded() {
        let a = record(1, Rule::SinglesFeverOn, "not a date", "1600", MatchResult::Win);
        let b = record(2, Rule::SinglesFeverOn, "2026-01-10T10:00", "bad", MatchResult::Win);
        let c = record(3, Rule::SinglesFeverOn, "2026-01-11T10:00", "1500", MatchResult::Win);

        let overview = rate_overview(&[a, b, c]);
        let singles = &overview[0];
        // 1600 has no valid timestamp and the 'bad' rate never parses.
        assert_eq!(singles.current_rate, Some(1500));
        assert_eq!(singles.max_rate, Some(1500));
    }

    #[test]
    fn test_rules_independent() {
        let a = record(1, Rule::SinglesFeverOn, "2026-01-10T10:00", "1500", MatchResult::Win);
        let b = record(2, Rule::DoublesFeverOff, "2026-01-10T10:00", "1400", MatchResult::Win);

        let overview = rate_overview(&[a, b]);
        assert_eq!(overview[0].current_rate, Some(1500));
        assert_eq!(overview[1].current_rate, None); // singles_fever_off
        assert_eq!(overview[3].current_rate, Some(1400)); // doubles_fever_off
    }
}
