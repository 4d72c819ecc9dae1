//! Character usage rates over the filtered record set.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{character_label, MatchRecord};

/// How often a character appears in the filtered set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacterUsageStat {
    pub character: String,
    pub label: String,
    pub count: usize,
    /// Percentage of the filtered set.
    pub usage_rate: f64,
}

fn usage_by_character<F>(filtered: &[&MatchRecord], character_of: F) -> Vec<CharacterUsageStat>
where
    F: Fn(&MatchRecord) -> &str,
{
    let total = filtered.len();
    if total == 0 {
        return Vec::new();
    }

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in filtered {
        *counts.entry(character_of(record)).or_insert(0) += 1;
    }

    let mut stats: Vec<CharacterUsageStat> = counts
        .into_iter()
        .map(|(character, count)| CharacterUsageStat {
            character: character.to_string(),
            label: character_label(character).to_string(),
            count,
            usage_rate: count as f64 / total as f64 * 100.0,
        })
        .collect();

    stats.sort_by(|left, right| {
        right
            .usage_rate
            .partial_cmp(&left.usage_rate)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| left.label.cmp(&right.label))
    });
    stats
}

/// Usage of own characters, rate descending, ties by label.
pub fn usage_by_my_character(filtered: &[&MatchRecord]) -> Vec<CharacterUsageStat> {
    usage_by_character(filtered, |record| &record.my_character)
}

/// Usage of opponent characters, rate descending, ties by label.
pub fn usage_by_opponent_character(filtered: &[&MatchRecord]) -> Vec<CharacterUsageStat> {
    usage_by_character(filtered, |record| &record.opponent_character)
}
