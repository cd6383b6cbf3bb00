//! Severity levels for the leveled logger
//!
//! Levels are ordered from most restrictive to most permissive. The current
//! threshold admits every message at or below it, so raising the threshold
//! towards `Verbose` shows more output.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Severity of a log message.
///
/// `None` is only meaningful as a threshold, where it silences all output;
/// it is never a valid level for an individual message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    None,
    Error,
    Warning,
    Debug,
    Info,
    Success,
    Verbose,
}

impl LogLevel {
    /// Get the display name for this level
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::None => "none",
            LogLevel::Error => "error",
            LogLevel::Warning => "warning",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Success => "success",
            LogLevel::Verbose => "verbose",
        }
    }

    /// Check whether a message at this level passes the given threshold
    pub fn visible_under(self, threshold: LogLevel) -> bool {
        self != LogLevel::None && threshold >= self
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown level name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown log level: {0}")]
pub struct ParseLevelError(String);

impl FromStr for LogLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(LogLevel::None),
            "error" => Ok(LogLevel::Error),
            "warning" => Ok(LogLevel::Warning),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "success" => Ok(LogLevel::Success),
            "verbose" => Ok(LogLevel::Verbose),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}
