//! UI preference slots.
//!
//! Column layout and trend-view choices survive restarts via a small JSON
//! file: load once at startup, save on change. A missing or corrupt file
//! falls back to defaults rather than failing startup. The stats engine
//! never reads these ambiently; whatever needs a preference takes it as an
//! argument.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::models::Rule;
use crate::stats::TrendViewMode;

/// Errors writing preferences. Reads never fail; they fall back.
#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("Failed to write preferences: {0}")]
    Write(#[from] std::io::Error),

    #[error("Failed to encode preferences: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Persisted UI state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiPreferences {
    /// Grid columns explicitly shown/hidden, keyed by field name.
    pub column_visibility: BTreeMap<String, bool>,

    /// Grid column order, field names left to right.
    pub column_order: Vec<String>,

    /// Selected trend rendering.
    pub trend_view: TrendViewMode,

    /// Rule shown in the candlestick view.
    pub trend_rule: Rule,
}

impl UiPreferences {
    /// Load preferences, falling back to defaults when the file is missing
    /// or does not parse.
    pub fn load(path: &Path) -> UiPreferences {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(_) => return UiPreferences::default(),
        };

        match serde_json::from_str(&contents) {
            Ok(prefs) => prefs,
            Err(error) => {
                warn!("Ignoring unreadable preferences file {}: {}", path.display(), error);
                UiPreferences::default()
            }
        }
    }

    /// Persist preferences, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), PrefsError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
