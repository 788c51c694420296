//! Study configuration, read from a TOML file
//!
//! ```toml
//! correct-interval-minutes = 1440
//! incorrect-interval-minutes = 1
//! reschedule-from = "now"        # or "due-date"
//! skip-malformed-lines = false
//! max-reviews-per-session = 500
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::flashcards::algorithm::RescheduleFrom;
use crate::flashcards::storage::ParsePolicy;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Interval '{field}' must be positive, got {value}")]
    InvalidInterval { field: &'static str, value: i64 },

    #[error("Interval '{field}' must be at most {max} minutes, got {value}")]
    IntervalTooLarge {
        field: &'static str,
        value: i64,
        max: i64,
    },

    #[error("max-reviews-per-session must be at least 1")]
    InvalidReviewLimit,

    #[error("Could not determine the config directory")]
    ConfigDirNotFound,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Longest review interval accepted from a config file (100 years)
pub const MAX_INTERVAL_MINUTES: i64 = 100 * 365 * 24 * 60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct StudyConfig {
    /// Minutes until a correctly answered card is due again
    pub correct_interval_minutes: i64,
    /// Minutes until an incorrectly answered card is due again
    pub incorrect_interval_minutes: i64,
    pub reschedule_from: RescheduleFrom,
    /// Skip deck lines that fail to parse instead of aborting the load
    pub skip_malformed_lines: bool,
    /// Upper bound on reviews in one pass over the due cards
    pub max_reviews_per_session: usize,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            correct_interval_minutes: 24 * 60,
            incorrect_interval_minutes: 1,
            reschedule_from: RescheduleFrom::Now,
            skip_malformed_lines: false,
            max_reviews_per_session: 500,
        }
    }
}

impl StudyConfig {
    /// Default config location, e.g. `~/.config/flashdue/config.toml`
    pub fn default_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join("flashdue").join("config.toml"))
            .ok_or(ConfigError::ConfigDirNotFound)
    }

    /// Load from `path`, falling back to defaults if the file doesn't exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        log::info!("Loaded study config from {:?}", path);
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: StudyConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        check_interval("correct-interval-minutes", self.correct_interval_minutes)?;
        check_interval("incorrect-interval-minutes", self.incorrect_interval_minutes)?;
        if self.max_reviews_per_session == 0 {
            return Err(ConfigError::InvalidReviewLimit);
        }
        Ok(())
    }

    pub fn parse_policy(&self) -> ParsePolicy {
        if self.skip_malformed_lines {
            ParsePolicy::Skip
        } else {
            ParsePolicy::Strict
        }
    }
}

fn check_interval(field: &'static str, value: i64) -> Result<()> {
    if value <= 0 {
        return Err(ConfigError::InvalidInterval { field, value });
    }
    if value > MAX_INTERVAL_MINUTES || chrono::Duration::try_minutes(value).is_none() {
        return Err(ConfigError::IntervalTooLarge {
            field,
            value,
            max: MAX_INTERVAL_MINUTES,
        });
    }
    Ok(())
}
