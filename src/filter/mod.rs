//! Selection predicates over the record set.
//!
//! A filter narrows the full record array to the working subset every
//! aggregate view is computed from, and produces "what-if" counts telling
//! the UI how many records each candidate option value would match.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{MatchRecord, RateBand, Rule, CHARACTER_OPTIONS, RACKET_OPTIONS, STAGE_OPTIONS};

/// Inclusive bounds on `played_at`, epoch milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<i64>,
    pub to: Option<i64>,
}

impl DateRange {
    pub fn contains(&self, timestamp_millis: i64) -> bool {
        if let Some(from) = self.from {
            if timestamp_millis < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if timestamp_millis > to {
                return false;
            }
        }
        true
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

/// Date-range presets offered by the filter panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFilterPreset {
    All,
    Last30Days,
    Custom { from: Option<i64>, to: Option<i64> },
}

impl DateFilterPreset {
    /// Resolve to concrete bounds against the given "now".
    pub fn resolve(self, now_millis: i64) -> DateRange {
        const THIRTY_DAYS_MS: i64 = 30 * 24 * 60 * 60 * 1000;
        match self {
            DateFilterPreset::All => DateRange::default(),
            DateFilterPreset::Last30Days => DateRange {
                from: Some(now_millis - THIRTY_DAYS_MS),
                to: None,
            },
            DateFilterPreset::Custom { from, to } => DateRange { from, to },
        }
    }
}

/// Filterable record dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterDimension {
    Rule,
    Stage,
    MyCharacter,
    MyRacket,
    OpponentCharacter,
    OpponentRacket,
    OpponentRateBand,
}

impl FilterDimension {
    pub const ALL: [FilterDimension; 7] = [
        FilterDimension::Rule,
        FilterDimension::Stage,
        FilterDimension::MyCharacter,
        FilterDimension::MyRacket,
        FilterDimension::OpponentCharacter,
        FilterDimension::OpponentRacket,
        FilterDimension::OpponentRateBand,
    ];

    /// The record's value on this dimension.
    pub fn value_of(self, record: &MatchRecord) -> &str {
        match self {
            FilterDimension::Rule => record.rule.as_str(),
            FilterDimension::Stage => &record.stage,
            FilterDimension::MyCharacter => &record.my_character,
            FilterDimension::MyRacket => &record.my_racket,
            FilterDimension::OpponentCharacter => &record.opponent_character,
            FilterDimension::OpponentRacket => &record.opponent_racket,
            FilterDimension::OpponentRateBand => &record.opponent_rate_band,
        }
    }
}

/// Active filter selections. An empty selection on a dimension means no
/// constraint on that dimension.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub rules: Vec<Rule>,
    pub stages: Vec<String>,
    pub my_characters: Vec<String>,
    pub my_rackets: Vec<String>,
    pub opponent_characters: Vec<String>,
    pub opponent_rackets: Vec<String>,
    pub opponent_rate_bands: Vec<String>,
    pub date_range: DateRange,
}

impl FilterState {
    /// Whether the record satisfies every active constraint.
    pub fn matches(&self, record: &MatchRecord) -> bool {
        self.matches_ignoring(record, None)
    }

    /// Like `matches`, but with one dimension's own selection ignored.
    /// The date range is always honored, even during what-if counting.
    pub fn matches_ignoring(&self, record: &MatchRecord, ignore: Option<FilterDimension>) -> bool {
        if ignore != Some(FilterDimension::Rule)
            && !self.rules.is_empty()
            && !self.rules.contains(&record.rule)
        {
            return false;
        }

        const STRING_DIMENSIONS: [FilterDimension; 6] = [
            FilterDimension::Stage,
            FilterDimension::MyCharacter,
            FilterDimension::MyRacket,
            FilterDimension::OpponentCharacter,
            FilterDimension::OpponentRacket,
            FilterDimension::OpponentRateBand,
        ];
        for dimension in STRING_DIMENSIONS {
            if Some(dimension) == ignore {
                continue;
            }
            let selection = self.selection(dimension);
            if !selection.is_empty() {
                let value = dimension.value_of(record);
                if !selection.iter().any(|selected| selected == value) {
                    return false;
                }
            }
        }

        self.date_range.contains(record.played_at_timestamp())
    }

    fn selection(&self, dimension: FilterDimension) -> &[String] {
        match dimension {
            // The rule selection is typed; handled in `matches_ignoring`.
            FilterDimension::Rule => &[],
            FilterDimension::Stage => &self.stages,
            FilterDimension::MyCharacter => &self.my_characters,
            FilterDimension::MyRacket => &self.my_rackets,
            FilterDimension::OpponentCharacter => &self.opponent_characters,
            FilterDimension::OpponentRacket => &self.opponent_rackets,
            FilterDimension::OpponentRateBand => &self.opponent_rate_bands,
        }
    }

    /// Reduce to the matching subset, preserving input (store) order.
    pub fn apply<'a>(&self, records: &'a [MatchRecord]) -> Vec<&'a MatchRecord> {
        records.iter().filter(|record| self.matches(record)).collect()
    }

    /// Number of constrained dimensions, counting the date range as one.
    pub fn active_count(&self) -> usize {
        let mut count = [
            !self.rules.is_empty(),
            !self.stages.is_empty(),
            !self.my_characters.is_empty(),
            !self.my_rackets.is_empty(),
            !self.opponent_characters.is_empty(),
            !self.opponent_rackets.is_empty(),
            !self.opponent_rate_bands.is_empty(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count();
        if !self.date_range.is_unbounded() {
            count += 1;
        }
        count
    }

    /// What-if counts for every dimension: how many records would match if
    /// that dimension's selection were replaced by the counted value, with
    /// every other active constraint still applied.
    pub fn option_counts(&self, records: &[MatchRecord]) -> FilterOptionCounts {
        let mut counts = FilterOptionCounts::default();
        for record in records {
            for dimension in FilterDimension::ALL {
                if self.matches_ignoring(record, Some(dimension)) {
                    let value = dimension.value_of(record).to_string();
                    *counts.by_dimension.entry(dimension).or_default().entry(value).or_insert(0) += 1;
                }
            }
        }
        counts
    }
}

/// Per-(dimension, value) what-if record counts.
#[derive(Debug, Clone, Default)]
pub struct FilterOptionCounts {
    by_dimension: HashMap<FilterDimension, HashMap<String, usize>>,
}

impl FilterOptionCounts {
    pub fn count(&self, dimension: FilterDimension, value: &str) -> usize {
        self.by_dimension
            .get(&dimension)
            .and_then(|counts| counts.get(value))
            .copied()
            .unwrap_or(0)
    }

    /// Sum of counts across every value of a dimension.
    pub fn total(&self, dimension: FilterDimension) -> usize {
        self.by_dimension
            .get(&dimension)
            .map(|counts| counts.values().sum())
            .unwrap_or(0)
    }
}

/// A selectable filter option with its display label and what-if count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
    pub count: usize,
}

fn unique_in_order<I: IntoIterator<Item = String>>(values: I) -> Vec<String> {
    let mut seen = Vec::new();
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}

/// Candidate values for a dimension: the fixed option set extended with any
/// non-empty values already present in the data, first occurrence order.
pub fn candidate_values(dimension: FilterDimension, records: &[MatchRecord]) -> Vec<String> {
    let fixed: Vec<String> = match dimension {
        FilterDimension::Rule => Rule::ALL.iter().map(|rule| rule.as_str().to_string()).collect(),
        FilterDimension::Stage => STAGE_OPTIONS.iter().map(|s| s.to_string()).collect(),
        FilterDimension::MyCharacter | FilterDimension::OpponentCharacter => {
            CHARACTER_OPTIONS.iter().map(|o| o.value.to_string()).collect()
        }
        FilterDimension::MyRacket | FilterDimension::OpponentRacket => {
            RACKET_OPTIONS.iter().map(|s| s.to_string()).collect()
        }
        FilterDimension::OpponentRateBand => RateBand::descending()
            .map(|band| band.as_str().to_string())
            .collect(),
    };

    unique_in_order(
        fixed.into_iter().chain(
            records
                .iter()
                .map(|record| dimension.value_of(record).trim().to_string())
                .filter(|value| !value.is_empty()),
        ),
    )
}

/// Build the displayed option list for a dimension: what-if count descending,
/// ties by display label ascending.
pub fn sorted_options(
    dimension: FilterDimension,
    records: &[MatchRecord],
    counts: &FilterOptionCounts,
) -> Vec<FilterOption> {
    let mut options: Vec<FilterOption> = candidate_values(dimension, records)
        .into_iter()
        .map(|value| {
            let label = display_label(dimension, &value);
            let count = counts.count(dimension, &value);
            FilterOption { value, label, count }
        })
        .collect();

    options.sort_by(|left, right| {
        right
            .count
            .cmp(&left.count)
            .then_with(|| left.label.cmp(&right.label))
    });
    options
}

fn display_label(dimension: FilterDimension, value: &str) -> String {
    match dimension {
        FilterDimension::Rule => value
            .parse::<Rule>()
            .map(|rule| rule.label().to_string())
            .unwrap_or_else(|_| value.to_string()),
        FilterDimension::MyCharacter | FilterDimension::OpponentCharacter => {
            crate::models::character_label(value).to_string()
        }
        _ => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_support::record;
    use crate::models::MatchResult;

    fn sample_records() -> Vec<MatchRecord> {
        let mut a = record(1, Rule::SinglesFeverOn, "2026-01-10T10:00", "1500", MatchResult::Win);
        a.stage = "スタジアム グラス".to_string();
        a.opponent_character = "Boo".to_string();
        let mut b = record(2, Rule::SinglesFeverOff, "2026-01-11T10:00", "1510", MatchResult::Loss);
        b.stage = "スタジアム ハード".to_string();
        let mut c = record(3, Rule::DoublesFeverOn, "2026-01-12T10:00", "1490", MatchResult::Win);
        c.stage = "スタジアム グラス".to_string();
        c.my_character = "Peach".to_string();
        vec![a, b, c]
    }

    #[test]
    fn test_empty_filter_matches_all_in_order() {
        let records = sample_records();
        let filter = FilterState::default();
        let filtered = filter.apply(&records);
        let ids: Vec<i64> = filtered.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let records = sample_records();
        let filter = FilterState {
            stages: vec!["スタジアム グラス".to_string()],
            ..Default::default()
        };

        let once: Vec<MatchRecord> = filter.apply(&records).into_iter().cloned().collect();
        let twice: Vec<MatchRecord> = filter.apply(&once).into_iter().cloned().collect();
        assert_eq!(once, twice);
        assert_eq!(once.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_rule_selection() {
        let records = sample_records();
        let filter = FilterState {
            rules: vec![Rule::SinglesFeverOn, Rule::DoublesFeverOn],
            ..Default::default()
        };
        let ids: Vec<i64> = filter.apply(&records).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_date_bounds_inclusive() {
        let records = sample_records();
        let from = crate::datetime::parse_timestamp_millis("2026-01-11T10:00");
        let to = crate::datetime::parse_timestamp_millis("2026-01-12T10:00");
        let filter = FilterState {
            date_range: DateRange {
                from: Some(from),
                to: Some(to),
            },
            ..Default::default()
        };
        let ids: Vec<i64> = filter.apply(&records).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_unparsable_played_at_fails_lower_bound() {
        let mut records = sample_records();
        records[0].played_at = "garbage".to_string();
        let filter = FilterState {
            date_range: DateRange {
                from: Some(1),
                to: None,
            },
            ..Default::default()
        };
        let ids: Vec<i64> = filter.apply(&records).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_what_if_ignores_own_dimension() {
        let records = sample_records();
        let filter = FilterState {
            stages: vec!["スタジアム ハード".to_string()],
            ..Default::default()
        };
        let counts = filter.option_counts(&records);

        // Stage counts ignore the stage selection itself.
        assert_eq!(counts.count(FilterDimension::Stage, "スタジアム グラス"), 2);
        assert_eq!(counts.count(FilterDimension::Stage, "スタジアム ハード"), 1);

        // Other dimensions honor the stage constraint.
        assert_eq!(counts.count(FilterDimension::MyCharacter, "Mario"), 1);
        assert_eq!(counts.count(FilterDimension::MyCharacter, "Peach"), 0);
    }

    #[test]
    fn test_what_if_counts_sum_to_other_filter_total() {
        let records = sample_records();
        let filter = FilterState {
            stages: vec!["スタジアム グラス".to_string()],
            rules: vec![Rule::SinglesFeverOn, Rule::DoublesFeverOn],
            ..Default::default()
        };
        let counts = filter.option_counts(&records);

        // Each record has exactly one value per dimension, so summing a
        // dimension's what-if counts equals the number of records matching
        // every other filter.
        let without_stage = records
            .iter()
            .filter(|r| filter.matches_ignoring(r, Some(FilterDimension::Stage)))
            .count();
        assert_eq!(counts.total(FilterDimension::Stage), without_stage);

        let without_rule = records
            .iter()
            .filter(|r| filter.matches_ignoring(r, Some(FilterDimension::Rule)))
            .count();
        assert_eq!(counts.total(FilterDimension::Rule), without_rule);
    }

    #[test]
    fn test_what_if_still_honors_date_range() {
        let records = sample_records();
        let filter = FilterState {
            date_range: DateRange {
                from: Some(crate::datetime::parse_timestamp_millis("2026-01-11T00:00")),
                to: None,
            },
            ..Default::default()
        };
        let counts = filter.option_counts(&records);
        // Record 1 (Jan 10) is outside the date range, so it never counts.
        assert_eq!(counts.count(FilterDimension::Stage, "スタジアム グラス"), 1);
    }

    #[test]
    fn test_candidate_values_extend_fixed_set() {
        let mut records = sample_records();
        records[1].stage = "カスタムコート".to_string();
        let values = candidate_values(FilterDimension::Stage, &records);
        assert!(values.contains(&"カスタムコート".to_string()));
        assert_eq!(values[0], STAGE_OPTIONS[0]);
        // No duplicates for stages already in the fixed set.
        let grass = values.iter().filter(|v| *v == "スタジアム グラス").count();
        assert_eq!(grass, 1);
    }

    #[test]
    fn test_sorted_options_count_desc_then_label() {
        let records = sample_records();
        let filter = FilterState::default();
        let counts = filter.option_counts(&records);
        let options = sorted_options(FilterDimension::Stage, &records, &counts);

        assert_eq!(options[0].value, "スタジアム グラス");
        assert_eq!(options[0].count, 2);
        assert_eq!(options[1].value, "スタジアム ハード");
        assert_eq!(options[1].count, 1);
        // Zero-count options keep label order among themselves.
        assert!(options[2].count == 0);
    }

    #[test]
    fn test_date_preset_resolution() {
        let now = 100 * 24 * 60 * 60 * 1000;
        assert!(DateFilterPreset::All.resolve(now).is_unbounded());

        let last30 = DateFilterPreset::Last30Days.resolve(now);
        assert_eq!(last30.from, Some(70 * 24 * 60 * 60 * 1000));
        assert_eq!(last30.to, None);

        let custom = DateFilterPreset::Custom {
            from: None,
            to: Some(5),
        }
        .resolve(now);
        assert_eq!(custom.to, Some(5));
    }

    #[test]
    fn test_active_count() {
        let mut filter = FilterState::default();
        assert_eq!(filter.active_count(), 0);
        filter.rules = vec![Rule::SinglesFeverOn];
        filter.stages = vec!["スタジアム グラス".to_string()];
        filter.date_range.from = Some(1);
        assert_eq!(filter.active_count(), 3);
    }
}
