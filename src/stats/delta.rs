//! Per-record rate delta.
//!
//! Annotates each record with its rate change versus the immediately
//! preceding match of the same rule, not the previous row in display order.

use std::collections::HashMap;

use crate::models::MatchRecord;

/// Rate delta per record id. `None` means no prior reference exists for the
/// record (first of its rule group) or a rate on either side failed to
/// parse.
pub fn rate_deltas(records: &[MatchRecord]) -> HashMap<i64, Option<i64>> {
    let mut deltas = HashMap::with_capacity(records.len());

    let mut by_rule: HashMap<crate::models::Rule, Vec<&MatchRecord>> = HashMap::new();
    for record in records {
        by_rule.entry(record.rule).or_default().push(record);
    }

    for group in by_rule.values_mut() {
        // Ranking within a rule is played_at, then created_at, then id;
        // without all three levels same-minute entries would be ambiguous.
        group.sort_by(|left, right| {
            left.played_at_timestamp()
                .cmp(&right.played_at_timestamp())
                .then_with(|| left.created_at_timestamp().cmp(&right.created_at_timestamp()))
                .then_with(|| left.id.cmp(&right.id))
        });

        for (index, record) in group.iter().enumerate() {
            let delta = if index == 0 {
                None
            } else {
                match (record.my_rate_value(), group[index - 1].my_rate_value()) {
                    (Some(current), Some(previous)) => Some(current - previous),
                    _ => None,
                }
            };
            deltas.insert(record.id, delta);
        }
    }

    deltas
}
