//! Configuration management for the CLI.

use fcfg_engine::{DuplicatePolicy, FieldSet, ReconcileOptions};
use std::env;

/// CLI configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Handling of repeated (fc, fg) keys within one collection
    pub duplicates: DuplicatePolicy,
    /// Compare discussion threads as well as scalar fields
    pub include_discussion: bool,
    /// Pretty-print JSON output
    pub pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            duplicates: DuplicatePolicy::Reject,
            include_discussion: false,
            pretty: true,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let duplicates = match lookup("FCFG_DUPLICATES") {
            Some(value) => parse_duplicates(&value)?,
            None => defaults.duplicates,
        };

        let include_discussion = match lookup("FCFG_INCLUDE_DISCUSSION") {
            Some(value) => parse_bool("FCFG_INCLUDE_DISCUSSION", &value)?,
            None => defaults.include_discussion,
        };

        let pretty = match lookup("FCFG_PRETTY") {
            Some(value) => parse_bool("FCFG_PRETTY", &value)?,
            None => defaults.pretty,
        };

        Ok(Self {
            duplicates,
            include_discussion,
            pretty,
        })
    }

    /// Engine options derived from this configuration.
    pub fn reconcile_options(&self) -> ReconcileOptions {
        let fields = if self.include_discussion {
            FieldSet::WithDiscussion
        } else {
            FieldSet::Primary
        };
        ReconcileOptions::default()
            .with_duplicates(self.duplicates)
            .with_fields(fields)
    }
}

fn parse_duplicates(value: &str) -> Result<DuplicatePolicy, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "reject" => Ok(DuplicatePolicy::Reject),
        "last-wins" | "last_wins" | "lastwins" => Ok(DuplicatePolicy::LastWins),
        _ => Err(ConfigError::InvalidDuplicatePolicy(value.to_string())),
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key,
            value: value.to_string(),
        }),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid FCFG_DUPLICATES value: {0} (expected reject or last-wins)")]
    InvalidDuplicatePolicy(String),

    #[error("Invalid boolean for {key}: {value}")]
    InvalidBool { key: &'static str, value: String },
}
