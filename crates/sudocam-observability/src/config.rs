// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Observability configuration types

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format
    pub format: LogFormat,
}

/// Log format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Full human readable lines
    Text,
    /// Single line, abbreviated
    Compact,
}

/// Errors turning textual settings into logging configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ObservabilityConfigError {
    #[error("Unknown log format '{0}', expected 'text' or 'compact'")]
    UnknownLogFormat(String),
    #[error("Unknown log level '{0}'")]
    UnknownLogLevel(String),
}

impl FromStr for LogFormat {
    type Err = ObservabilityConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "compact" => Ok(LogFormat::Compact),
            _ => Err(ObservabilityConfigError::UnknownLogFormat(s.to_string())),
        }
    }
}

impl LoggingConfig {
    /// Build from the textual `level` and `format` values found in configuration files
    pub fn from_parts(level: &str, format: &str) -> Result<Self, ObservabilityConfigError> {
        let level = level.trim().to_ascii_lowercase();
        if tracing::Level::from_str(&level).is_err() {
            return Err(ObservabilityConfigError::UnknownLogLevel(level));
        }
        Ok(LoggingConfig {
            level,
            format: format.parse()?,
        })
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}
