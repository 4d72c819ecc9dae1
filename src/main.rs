use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mfstat::config::AppConfig;
use mfstat::filter::{self, DateFilterPreset, DateRange, FilterDimension, FilterState};
use mfstat::models::{MatchRecord, MatchRecordDraft, Rule};
use mfstat::prefs::UiPreferences;
use mfstat::stats;
use mfstat::stats::TrendViewMode;
use mfstat::store::RecordStore;
use mfstat::tracker::Tracker;

#[derive(Parser)]
#[command(name = "mfstat")]
#[command(about = "Personal match-record tracker for Mario Tennis Fever ranked play")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Filter flags shared by record-listing commands.
#[derive(Args)]
struct FilterArgs {
    /// Restrict to a rule (repeatable)
    #[arg(long = "rule")]
    rules: Vec<String>,

    /// Restrict to a stage (repeatable)
    #[arg(long = "stage")]
    stages: Vec<String>,

    /// Restrict to own character (repeatable)
    #[arg(long = "my-character")]
    my_characters: Vec<String>,

    /// Restrict to own racket (repeatable)
    #[arg(long = "my-racket")]
    my_rackets: Vec<String>,

    /// Restrict to opponent character (repeatable)
    #[arg(long = "opponent-character")]
    opponent_characters: Vec<String>,

    /// Restrict to opponent racket (repeatable)
    #[arg(long = "opponent-racket")]
    opponent_rackets: Vec<String>,

    /// Restrict to opponent rank band (repeatable)
    #[arg(long = "opponent-band")]
    opponent_rate_bands: Vec<String>,

    /// Earliest match date, inclusive (YYYY-MM-DD)
    #[arg(long)]
    from: Option<String>,

    /// Latest match date, inclusive (YYYY-MM-DD)
    #[arg(long)]
    to: Option<String>,

    /// Only matches from the last 30 days
    #[arg(long)]
    last_30_days: bool,
}

impl FilterArgs {
    fn into_state(self) -> Result<FilterState> {
        let rules = self
            .rules
            .iter()
            .map(|raw| raw.parse::<Rule>().map_err(anyhow::Error::msg))
            .collect::<Result<Vec<Rule>>>()?;

        let date_range = if self.last_30_days {
            if self.from.is_some() || self.to.is_some() {
                bail!("--last-30-days cannot be combined with --from/--to");
            }
            DateFilterPreset::Last30Days.resolve(chrono::Utc::now().timestamp_millis())
        } else {
            DateRange {
                from: self.from.as_deref().map(parse_date_bound_start).transpose()?,
                to: self.to.as_deref().map(parse_date_bound_end).transpose()?,
            }
        };

        Ok(FilterState {
            rules,
            stages: self.stages,
            my_characters: self.my_characters,
            my_rackets: self.my_rackets,
            opponent_characters: self.opponent_characters,
            opponent_rackets: self.opponent_rackets,
            opponent_rate_bands: self.opponent_rate_bands,
            date_range,
        })
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List records matching the active filters
    List {
        #[command(flatten)]
        filter: FilterArgs,

        /// Show per-option what-if counts instead of records
        #[arg(long)]
        options: bool,
    },

    /// Log a new match record
    Add {
        /// When the match was played (YYYY-MM-DDTHH:MM)
        #[arg(long)]
        played_at: String,

        /// Match rule: singles_fever_on, singles_fever_off, doubles_fever_on, doubles_fever_off
        #[arg(long, default_value = "singles_fever_on")]
        rule: String,

        #[arg(long)]
        stage: String,

        #[arg(long)]
        my_score: String,

        #[arg(long)]
        opponent_score: String,

        #[arg(long)]
        my_character: String,

        #[arg(long)]
        opponent_character: String,

        /// Own rating after the match
        #[arg(long)]
        my_rate: String,

        /// Own rank band (C- through S+)
        #[arg(long)]
        my_rate_band: String,

        /// Opponent rank band (C- through S+)
        #[arg(long)]
        opponent_rate_band: String,

        #[arg(long, default_value = "")]
        my_racket: String,

        #[arg(long, default_value = "")]
        opponent_racket: String,

        #[arg(long, default_value = "")]
        my_partner_character: String,

        #[arg(long, default_value = "")]
        opponent_partner_character: String,

        #[arg(long, default_value = "")]
        my_partner_racket: String,

        #[arg(long, default_value = "")]
        opponent_partner_racket: String,

        #[arg(long, default_value = "")]
        my_partner_rate_band: String,

        #[arg(long, default_value = "")]
        opponent_partner_rate_band: String,

        #[arg(long, default_value = "")]
        opponent_player_name: String,

        #[arg(long, default_value = "")]
        my_partner_player_name: String,

        #[arg(long, default_value = "")]
        opponent_partner_player_name: String,
    },

    /// Edit an existing record; unspecified fields keep their current value
    Edit {
        /// Record id
        id: i64,

        #[arg(long)]
        played_at: Option<String>,

        #[arg(long)]
        rule: Option<String>,

        #[arg(long)]
        stage: Option<String>,

        #[arg(long)]
        my_score: Option<String>,

        #[arg(long)]
        opponent_score: Option<String>,

        #[arg(long)]
        my_character: Option<String>,

        #[arg(long)]
        opponent_character: Option<String>,

        #[arg(long)]
        my_rate: Option<String>,

        #[arg(long)]
        my_rate_band: Option<String>,

        #[arg(long)]
        opponent_rate_band: Option<String>,

        #[arg(long)]
        my_racket: Option<String>,

        #[arg(long)]
        opponent_racket: Option<String>,

        #[arg(long)]
        my_partner_character: Option<String>,

        #[arg(long)]
        opponent_partner_character: Option<String>,

        #[arg(long)]
        opponent_player_name: Option<String>,
    },

    /// Delete a record
    Delete {
        /// Record id
        id: i64,
    },

    /// Win-rate and usage statistics over the filtered set
    Stats {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Rate-over-time trend (always over the full record set)
    Trend {
        /// View: line, step, candlestick (defaults to the saved preference)
        #[arg(long)]
        view: Option<String>,

        /// Rule for the candlestick view (defaults to the saved preference)
        #[arg(long)]
        rule: Option<String>,
    },

    /// Current and best rating per rule
    Overview,

    /// Show the record store's application version
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting mfstat v{}", env!("CARGO_PKG_VERSION"));

    let config_path = PathBuf::from(&cli.config);
    let config = if config_path.exists() {
        AppConfig::from_file(&config_path)
            .with_context(|| format!("Failed to load config from {}", cli.config))?
    } else {
        AppConfig::default()
    };

    let store = RecordStore::new(config.base_url()?);
    let mut tracker = Tracker::new(store);

    match cli.command {
        Commands::List { filter, options } => {
            let filter = filter.into_state()?;
            tracker.refresh().await?;

            if options {
                print_filter_options(&filter, tracker.records());
            } else {
                let filtered = filter.apply(tracker.records());
                let deltas = stats::rate_deltas(tracker.records());

                println!(
                    "=== Records ({} of {}, {} filter(s) active) ===\n",
                    filtered.len(),
                    tracker.records().len(),
                    filter.active_count()
                );
                for record in &filtered {
                    let delta = deltas
                        .get(&record.id)
                        .copied()
                        .flatten()
                        .map(|d| format!("{:+}", d))
                        .unwrap_or_else(|| "-".to_string());
                    println!(
                        "  #{:<5} {}  {:<12}  {:<4}  {}-{}  rate {} ({})  vs {} [{}]",
                        record.id,
                        record.played_at,
                        record.rule.label(),
                        record.result,
                        record.my_score,
                        record.opponent_score,
                        record.my_rate,
                        delta,
                        display_or_dash(&record.opponent_character),
                        display_or_dash(&record.opponent_rate_band),
                    );
                }
            }
        }
        Commands::Add {
            played_at,
            rule,
            stage,
            my_score,
            opponent_score,
            my_character,
            opponent_character,
            my_rate,
            my_rate_band,
            opponent_rate_band,
            my_racket,
            opponent_racket,
            my_partner_character,
            opponent_partner_character,
            my_partner_racket,
            opponent_partner_racket,
            my_partner_rate_band,
            opponent_partner_rate_band,
            opponent_player_name,
            my_partner_player_name,
            opponent_partner_player_name,
        } => {
            let draft = MatchRecordDraft {
                played_at,
                rule: rule.parse::<Rule>().map_err(anyhow::Error::msg)?,
                stage,
                my_score,
                opponent_score,
                my_character,
                my_partner_character,
                opponent_character,
                opponent_partner_character,
                my_racket,
                my_partner_racket,
                opponent_racket,
                opponent_partner_racket,
                my_rate,
                my_rate_band,
                my_partner_rate_band,
                opponent_rate_band,
                opponent_partner_rate_band,
                opponent_player_name,
                my_partner_player_name,
                opponent_partner_player_name,
            };

            let created = tracker.create(&draft).await?;
            println!(
                "Created record #{} ({} {} {})",
                created.id,
                created.played_at,
                created.rule.label(),
                created.result
            );
        }
        Commands::Edit {
            id,
            played_at,
            rule,
            stage,
            my_score,
            opponent_score,
            my_character,
            opponent_character,
            my_rate,
            my_rate_band,
            opponent_rate_band,
            my_racket,
            opponent_racket,
            my_partner_character,
            opponent_partner_character,
            opponent_player_name,
        } => {
            tracker.refresh().await?;
            let existing = tracker
                .records()
                .iter()
                .find(|record| record.id == id)
                .with_context(|| format!("No record with id {}", id))?;

            let mut draft = draft_from_record(existing);
            if let Some(value) = played_at {
                draft.played_at = value;
            }
            if let Some(value) = rule {
                draft.rule = value.parse::<Rule>().map_err(anyhow::Error::msg)?;
            }
            if let Some(value) = stage {
                draft.stage = value;
            }
            if let Some(value) = my_score {
                draft.my_score = value;
            }
            if let Some(value) = opponent_score {
                draft.opponent_score = value;
            }
            if let Some(value) = my_character {
                draft.my_character = value;
            }
            if let Some(value) = opponent_character {
                draft.opponent_character = value;
            }
            if let Some(value) = my_rate {
                draft.my_rate = value;
            }
            if let Some(value) = my_rate_band {
                draft.my_rate_band = value;
            }
            if let Some(value) = opponent_rate_band {
                draft.opponent_rate_band = value;
            }
            if let Some(value) = my_racket {
                draft.my_racket = value;
            }
            if let Some(value) = opponent_racket {
                draft.opponent_racket = value;
            }
            if let Some(value) = my_partner_character {
                draft.my_partner_character = value;
            }
            if let Some(value) = opponent_partner_character {
                draft.opponent_partner_character = value;
            }
            if let Some(value) = opponent_player_name {
                draft.opponent_player_name = value;
            }

            let updated = tracker.update(id, &draft).await?;
            println!(
                "Updated record #{} ({} {} {})",
                updated.id,
                updated.played_at,
                updated.rule.label(),
                updated.result
            );
        }
        Commands::Delete { id } => {
            tracker.delete(id).await?;
            println!("Deleted record #{}", id);
        }
        Commands::Stats { filter } => {
            let filter = filter.into_state()?;
            tracker.refresh().await?;
            let filtered = filter.apply(tracker.records());

            let summary = stats::summarize(&filtered);
            println!("=== Stats ({} filter(s) active) ===\n", filter.active_count());
            println!("Matches:  {}", summary.total);
            println!("Wins:     {}", summary.win_count);
            match summary.win_rate {
                Some(rate) => println!("Win rate: {:.1}%", rate),
                None => println!("Win rate: -"),
            }

            let band_stats = stats::win_stats_by_opponent_band(&filtered);
            if !band_stats.is_empty() {
                println!("\nBy opponent rank band:");
                for stat in &band_stats {
                    println!(
                        "  {:<3} {:>5.1}%  ({}/{})",
                        stat.rate_band, stat.win_rate, stat.wins, stat.total
                    );
                }
            }

            let my_stats = stats::win_stats_by_my_character(&filtered);
            if !my_stats.is_empty() {
                println!("\nBy own character:");
                for stat in &my_stats {
                    println!(
                        "  {:<12} {:>5.1}%  ({}/{})",
                        stat.label, stat.win_rate, stat.wins, stat.total
                    );
                }
            }

            let opponent_stats = stats::win_stats_by_opponent_character(&filtered);
            if !opponent_stats.is_empty() {
                println!("\nBy opponent character:");
                for stat in &opponent_stats {
                    println!(
                        "  {:<12} {:>5.1}%  ({}/{})",
                        stat.label, stat.win_rate, stat.wins, stat.total
                    );
                }
            }

            let usage = stats::usage_by_my_character(&filtered);
            if !usage.is_empty() {
                println!("\nOwn character usage:");
                for stat in &usage {
                    println!("  {:<12} {:>5.1}%  ({})", stat.label, stat.usage_rate, stat.count);
                }
            }

            let opponent_usage = stats::usage_by_opponent_character(&filtered);
            if !opponent_usage.is_empty() {
                println!("\nOpponent character usage:");
                for stat in &opponent_usage {
                    println!("  {:<12} {:>5.1}%  ({})", stat.label, stat.usage_rate, stat.count);
                }
            }
        }
        Commands::Trend { view, rule } => {
            let mut prefs = UiPreferences::load(&config.prefs_path);
            let mut prefs_changed = false;

            if let Some(raw) = view {
                prefs.trend_view = match raw.as_str() {
                    "line" => TrendViewMode::Line,
                    "step" => TrendViewMode::Step,
                    "candlestick" => TrendViewMode::Candlestick,
                    other => bail!("unknown trend view: {} (expected line, step or candlestick)", other),
                };
                prefs_changed = true;
            }
            if let Some(raw) = rule {
                prefs.trend_rule = raw.parse::<Rule>().map_err(anyhow::Error::msg)?;
                prefs_changed = true;
            }

            tracker.refresh().await?;

            match prefs.trend_view {
                TrendViewMode::Line => {
                    println!("=== Rate Trend (line) ===\n");
                    print_series(&stats::line_series(tracker.records()));
                }
                TrendViewMode::Step => {
                    println!("=== Rate Trend (step, daily last) ===\n");
                    print_series(&stats::step_series(tracker.records()));
                }
                TrendViewMode::Candlestick => {
                    let candles = stats::daily_candles(tracker.records(), prefs.trend_rule);
                    println!(
                        "=== Rate Trend (candlestick, {}) ===\n",
                        prefs.trend_rule.label()
                    );
                    if candles.is_empty() {
                        println!("  (no rated matches for this rule)");
                    }
                    for candle in &candles {
                        println!(
                            "  {}  open {:>5}  high {:>5}  low {:>5}  close {:>5}  ({} match(es))",
                            candle.date, candle.open, candle.high, candle.low, candle.close, candle.matches
                        );
                    }
                }
            }

            if prefs_changed {
                prefs.save(&config.prefs_path)?;
            }
        }
        Commands::Overview => {
            tracker.refresh().await?;
            let overview = stats::rate_overview(tracker.records());

            println!("=== Rating Overview ===\n");
            for row in &overview {
                let current = match (row.current_rate, &row.current_rate_band) {
                    (Some(rate), Some(band)) => format!("{} [{}]", rate, band),
                    _ => "-".to_string(),
                };
                let max = match (row.max_rate, &row.max_rate_band) {
                    (Some(rate), Some(band)) => format!("{} [{}]", rate, band),
                    _ => "-".to_string(),
                };
                println!(
                    "  {:<12}  current {:<12}  best {}",
                    row.rule.label(),
                    current,
                    max
                );
            }
        }
        Commands::Version => {
            let store = RecordStore::new(config.base_url()?);
            match store.app_version().await? {
                Some(version) => println!("Record store version: {}", version),
                None => println!("Record store version: unknown"),
            }
        }
    }

    Ok(())
}

/// Inclusive lower date bound (the day's 00:00) in epoch milliseconds.
fn parse_date_bound_start(raw: &str) -> Result<i64> {
    let millis = mfstat::datetime::parse_timestamp_millis(&format!("{}T00:00", raw.trim()));
    if millis <= 0 {
        bail!("Invalid date (expected YYYY-MM-DD): {}", raw);
    }
    Ok(millis)
}

/// Inclusive upper date bound (the day's 23:59) in epoch milliseconds.
fn parse_date_bound_end(raw: &str) -> Result<i64> {
    let millis = mfstat::datetime::parse_timestamp_millis(&format!("{}T23:59", raw.trim()));
    if millis <= 0 {
        bail!("Invalid date (expected YYYY-MM-DD): {}", raw);
    }
    Ok(millis)
}

fn display_or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

/// Rebuild an editable draft from a stored record.
fn draft_from_record(record: &MatchRecord) -> MatchRecordDraft {
    MatchRecordDraft {
        played_at: record.played_at.clone(),
        rule: record.rule,
        stage: record.stage.clone(),
        my_score: record.my_score.clone(),
        opponent_score: record.opponent_score.clone(),
        my_character: record.my_character.clone(),
        my_partner_character: record.my_partner_character.clone(),
        opponent_character: record.opponent_character.clone(),
        opponent_partner_character: record.opponent_partner_character.clone(),
        my_racket: record.my_racket.clone(),
        my_partner_racket: record.my_partner_racket.clone(),
        opponent_racket: record.opponent_racket.clone(),
        opponent_partner_racket: record.opponent_partner_racket.clone(),
        my_rate: record.my_rate.clone(),
        my_rate_band: record.my_rate_band.clone(),
        my_partner_rate_band: record.my_partner_rate_band.clone(),
        opponent_rate_band: record.opponent_rate_band.clone(),
        opponent_partner_rate_band: record.opponent_partner_rate_band.clone(),
        opponent_player_name: record.opponent_player_name.clone(),
        my_partner_player_name: record.my_partner_player_name.clone(),
        opponent_partner_player_name: record.opponent_partner_player_name.clone(),
    }
}

fn print_series(series: &[stats::RateTrendSeries]) {
    if series.is_empty() {
        println!("  (no rated matches)");
        return;
    }
    for s in series {
        println!("{} ({} point(s)):", s.label, s.points.len());
        for point in &s.points {
            println!("  {}  {:>5} [{}]", point.played_at, point.rate, point.rate_band);
        }
        println!();
    }
}

fn print_filter_options(filter: &FilterState, records: &[MatchRecord]) {
    let counts = filter.option_counts(records);
    println!(
        "=== Filter Options ({} filter(s) active) ===\n",
        filter.active_count()
    );
    for dimension in FilterDimension::ALL {
        let options = filter::sorted_options(dimension, records, &counts);
        println!("{:?}:", dimension);
        for option in options.iter().filter(|option| option.count > 0) {
            println!("  {:<24} {}", option.label, option.count);
        }
        println!();
    }
}
