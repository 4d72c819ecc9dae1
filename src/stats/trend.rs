//! Rate-over-time series construction.
//!
//! All three renderings are driven by the unfiltered full record set: the
//! trend panel intentionally ignores the filter panel.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::datetime;
use crate::models::{MatchRecord, Rule};

/// Which trend rendering is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendViewMode {
    Line,
    Step,
    Candlestick,
}

impl Default for TrendViewMode {
    fn default() -> Self {
        TrendViewMode::Line
    }
}

/// One record reduced to its trend-relevant fields.
#[derive(Debug, Clone, PartialEq)]
pub struct RateSample {
    pub id: i64,
    pub rule: Rule,
    /// Epoch milliseconds of `played_at`.
    pub timestamp: i64,
    pub played_at: String,
    pub rate: i64,
    pub rate_band: String,
}

/// Reduce records to valid samples, sorted by (timestamp, id) ascending.
///
/// Records with an unparsable `played_at` or rate are discarded. The id
/// tie-break keeps ordering deterministic when several matches share a
/// timestamp to the minute, since ids follow insertion order.
pub fn collect_samples(records: &[MatchRecord]) -> Vec<RateSample> {
    let mut samples: Vec<RateSample> = records
        .iter()
        .filter_map(|record| {
            let timestamp = record.played_at_timestamp();
            if timestamp <= 0 {
                return None;
            }
            let rate = record.my_rate_value()?;
            Some(RateSample {
                id: record.id,
                rule: record.rule,
                timestamp,
                played_at: record.played_at.clone(),
                rate,
                rate_band: record.my_rate_band.trim().to_string(),
            })
        })
        .collect();

    samples.sort_by(|left, right| {
        left.timestamp
            .cmp(&right.timestamp)
            .then_with(|| left.id.cmp(&right.id))
    });
    samples
}

/// A point in a line or step series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub id: i64,
    pub timestamp: i64,
    pub played_at: String,
    pub rate: i64,
    pub rate_band: String,
}

/// Chronological rate series for one rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateTrendSeries {
    pub rule: Rule,
    pub label: &'static str,
    pub color: &'static str,
    pub points: Vec<TrendPoint>,
}

/// Line view: one series per rule in enumeration order, exact match points,
/// no resampling. Series without points are dropped.
pub fn line_series(records: &[MatchRecord]) -> Vec<RateTrendSeries> {
    let samples = collect_samples(records);

    Rule::ALL
        .into_iter()
        .filter_map(|rule| {
            let points: Vec<TrendPoint> = samples
                .iter()
                .filter(|sample| sample.rule == rule)
                .map(|sample| TrendPoint {
                    id: sample.id,
                    timestamp: sample.timestamp,
                    played_at: sample.played_at.clone(),
                    rate: sample.rate,
                    rate_band: sample.rate_band.clone(),
                })
                .collect();
            if points.is_empty() {
                return None;
            }
            Some(RateTrendSeries {
                rule,
                label: rule.label(),
                color: rule.trend_color(),
                points,
            })
        })
        .collect()
}

/// Step view: one point per calendar day per rule, carrying the day's last
/// observed rate, anchored at the day's 00:00.
pub fn step_series(records: &[MatchRecord]) -> Vec<RateTrendSeries> {
    let samples = collect_samples(records);

    Rule::ALL
        .into_iter()
        .filter_map(|rule| {
            // Samples arrive sorted, so each insert leaves the day's last
            // sample as the representative.
            let mut by_day: BTreeMap<NaiveDate, &RateSample> = BTreeMap::new();
            for sample in samples.iter().filter(|sample| sample.rule == rule) {
                if let Some(day) = datetime::date_key(sample.timestamp) {
                    by_day.insert(day, sample);
                }
            }
            if by_day.is_empty() {
                return None;
            }

            let points = by_day
                .into_iter()
                .map(|(day, sample)| TrendPoint {
                    id: sample.id,
                    timestamp: datetime::day_start_millis(day),
                    played_at: sample.played_at.clone(),
                    rate: sample.rate,
                    rate_band: sample.rate_band.clone(),
                })
                .collect();
            Some(RateTrendSeries {
                rule,
                label: rule.label(),
                color: rule.trend_color(),
                points,
            })
        })
        .collect()
}

/// One calendar day's rate summary for the candlestick view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRateCandle {
    pub date: NaiveDate,
    pub open: i64,
    pub high: i64,
    pub low: i64,
    pub close: i64,
    pub matches: usize,
}

/// Candlestick view: per-day OHLC for a single selected rule, days in
/// chronological order.
pub fn daily_candles(records: &[MatchRecord], rule: Rule) -> Vec<DailyRateCandle> {
    let samples = collect_samples(records);

    let mut by_day: BTreeMap<NaiveDate, DailyRateCandle> = BTreeMap::new();
    for sample in samples.iter().filter(|sample| sample.rule == rule) {
        let Some(day) = datetime::date_key(sample.timestamp) else {
            continue;
        };
        match by_day.get_mut(&day) {
            None => {
                by_day.insert(
                    day,
                    DailyRateCandle {
                        date: day,
                        open: sample.rate,
                        high: sample.rate,
                        low: sample.rate,
                        close: sample.rate,
                        matches: 1,
                    },
                );
            }
            Some(candle) => {
                candle.high = candle.high.max(sample.rate);
                candle.low = candle.low.min(sample.rate);
                candle.matches += 1;
                // Sorted iteration: the latest sample always wins the close,
                // including last-write-wins under equal timestamps.
                candle.close = sample.rate;
            }
        }
    }

    by_day.into_values().collect()
}
