//! Win-rate aggregation over the filtered record set.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{character_label, MatchRecord, MatchResult, RateBand};

/// Overall totals for the filtered set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub win_count: usize,
    /// Percentage, `None` when the set is empty (not 0%).
    pub win_rate: Option<f64>,
}

/// Compute overall totals.
pub fn summarize(filtered: &[&MatchRecord]) -> Summary {
    let total = filtered.len();
    let win_count = filtered
        .iter()
        .filter(|record| record.result == MatchResult::Win)
        .count();
    let win_rate = if total > 0 {
        Some(win_count as f64 / total as f64 * 100.0)
    } else {
        None
    };
    Summary {
        total,
        win_count,
        win_rate,
    }
}

/// Win stats against one opponent rank band.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateBandWinStat {
    pub rate_band: String,
    pub total: usize,
    pub wins: usize,
    pub win_rate: f64,
}

/// Win stats per opponent rank band, highest band first.
/// Bands with no matching records are omitted, never emitted as 0% rows.
pub fn win_stats_by_opponent_band(filtered: &[&MatchRecord]) -> Vec<RateBandWinStat> {
    RateBand::descending()
        .filter_map(|band| {
            let targets: Vec<_> = filtered
                .iter()
                .filter(|record| record.opponent_rate_band == band.as_str())
                .collect();
            if targets.is_empty() {
                return None;
            }
            let total = targets.len();
            let wins = targets
                .iter()
                .filter(|record| record.result == MatchResult::Win)
                .count();
            Some(RateBandWinStat {
                rate_band: band.as_str().to_string(),
                total,
                wins,
                win_rate: wins as f64 / total as f64 * 100.0,
            })
        })
        .collect()
}

/// Win stats for one character value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacterWinStat {
    pub character: String,
    pub label: String,
    pub total: usize,
    pub wins: usize,
    pub win_rate: f64,
}

fn win_stats_by_character<F>(filtered: &[&MatchRecord], character_of: F) -> Vec<CharacterWinStat>
where
    F: Fn(&MatchRecord) -> &str,
{
    let mut by_character: HashMap<&str, (usize, usize)> = HashMap::new();
    for record in filtered {
        let entry = by_character.entry(character_of(record)).or_insert((0, 0));
        entry.0 += 1;
        if record.result == MatchResult::Win {
            entry.1 += 1;
        }
    }

    let mut stats: Vec<CharacterWinStat> = by_character
        .into_iter()
        .map(|(character, (total, wins))| CharacterWinStat {
            character: character.to_string(),
            label: character_label(character).to_string(),
            total,
            wins,
            win_rate: wins as f64 / total as f64 * 100.0,
        })
        .collect();

    stats.sort_by(|left, right| {
        right
            .win_rate
            .partial_cmp(&left.win_rate)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| left.label.cmp(&right.label))
    });
    stats
}

/// Win stats grouped by own character, win rate descending.
pub fn win_stats_by_my_character(filtered: &[&MatchRecord]) -> Vec<CharacterWinStat> {
    win_stats_by_character(filtered, |record| &record.my_character)
}

/// Win stats grouped by opponent character, win rate descending.
pub fn win_stats_by_opponent_character(filtered: &[&MatchRecord]) -> Vec<CharacterWinStat> {
    win_stats_by_character(filtered, |record| &record.opponent_character)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_support::record;
    use crate::models::Rule;

    fn refs(records: &[MatchRecord]) -> Vec<&MatchRecord> {
        records.iter().collect()
    }

    #[test]
    fn test_summary_empty_set_has_no_rate() {
        let summary = summarize(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.win_rate, None);
    }

    #[test]
    fn test_summary_win_rate() {
        let records = vec![
            record(1, Rule::SinglesFeverOn, "2026-01-10T10:00", "1500", MatchResult::Win),
            record(2, Rule::SinglesFeverOn, "2026-01-11T10:00", "1520", MatchResult::Loss),
        ];
        let summary = summarize(&refs(&records));
        assert_eq!(summary.total, 2);
        assert_eq!(summary.win_count, 1);
        assert_eq!(summary.win_rate, Some(50.0));
    }

    #[test]
    fn test_band_stats_highest_first_and_omit_empty() {
        let mut a = record(1, Rule::SinglesFeverOn, "2026-01-10T10:00", "1500", MatchResult::Win);
        a.opponent_rate_band = "A".to_string();
        let mut b = record(2, Rule::SinglesFeverOn, "2026-01-11T10:00", "1520", MatchResult::Loss);
        b.opponent_rate_band = "S".to_string();
        let mut c = record(3, Rule::SinglesFeverOn, "2026-01-12T10:00", "1510", MatchResult::Loss);
        c.opponent_rate_band = "A".to_string();
        let records = vec![a, b, c];

        let stats = win_stats_by_opponent_band(&refs(&records));
        // Only bands with data appear, descending order: S before A.
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].rate_band, "S");
        assert_eq!(stats[0].total, 1);
        assert_eq!(stats[0].win_rate, 0.0);
        assert_eq!(stats[1].rate_band, "A");
        assert_eq!(stats[1].total, 2);
        assert_eq!(stats[1].win_rate, 50.0);
        assert!(!stats.iter().any(|s| s.rate_band == "C-"));
    }

    #[test]
    fn test_character_stats_sorted_by_win_rate() {
        let mut a = record(1, Rule::SinglesFeverOn, "2026-01-10T10:00", "1500", MatchResult::Win);
        a.my_character = "Mario".to_string();
        let mut b = record(2, Rule::SinglesFeverOn, "2026-01-11T10:00", "1520", MatchResult::Loss);
        b.my_character = "Mario".to_string();
        let mut c = record(3, Rule::SinglesFeverOn, "2026-01-12T10:00", "1510", MatchResult::Win);
        c.my_character = "Peach".to_string();
        let records = vec![a, b, c];

        let stats = win_stats_by_my_character(&refs(&records));
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].character, "Peach");
        assert_eq!(stats[0].win_rate, 100.0);
        assert_eq!(stats[1].character, "Mario");
        assert_eq!(stats[1].win_rate, 50.0);
    }

    #[test]
    fn test_character_stats_tie_breaks_on_label() {
        let mut a = record(1, Rule::SinglesFeverOn, "2026-01-10T10:00", "1500", MatchResult::Win);
        a.my_character = "Yoshi".to_string(); // ヨッシー
        let mut b = record(2, Rule::SinglesFeverOn, "2026-01-11T10:00", "1520", MatchResult::Win);
        b.my_character = "Mario".to_string(); // マリオ
        let records = vec![a, b];

        let stats = win_stats_by_my_character(&refs(&records));
        assert_eq!(stats[0].character, "Mario"); // マリオ sorts before ヨッシー
        assert_eq!(stats[1].character, "Yoshi");
    }

    #[test]
    fn test_character_stats_empty_groups_never_appear() {
        let records = vec![record(
            1,
            Rule::SinglesFeverOn,
            "2026-01-10T10:00",
            "1500",
            MatchResult::Win,
        )];
        let stats = win_stats_by_opponent_character(&refs(&records));
        assert_eq!(stats.len(), 1);
        assert!(stats.iter().all(|s| s.total >= 1));
    }
}
