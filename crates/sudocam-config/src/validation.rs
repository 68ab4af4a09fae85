// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! Checks that the merged configuration describes a board the pipeline can actually
//! partition, and that the remaining values are within their legal ranges.

use crate::{ConfigError, ConfigResult, SudocamConfig};

/// Validation errors that can occur during config validation
#[derive(Debug, Clone)]
pub enum ConfigValidationError {
    DegenerateCrop { axis: &'static str, start: u32, end: u32 },
    IndivisibleBoard { axis: &'static str, extent: u32, grid_size: u32 },
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DegenerateCrop { axis, start, end } => {
                write!(
                    f,
                    "Crop along {} is empty or inverted ({}..{})",
                    axis, start, end
                )
            }
            Self::IndivisibleBoard {
                axis,
                extent,
                grid_size,
            } => {
                write!(
                    f,
                    "Board {} of {} px cannot be split into {} equal cells",
                    axis, extent, grid_size
                )
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// Checks for:
/// - Non-empty crop rectangle
/// - Grid size of at least one, dividing the board evenly on both axes
/// - Threshold within the u8 range
/// - Known log level and format
/// - Non-zero ASCII sampling step
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` with details if validation fails
pub fn validate_config(config: &SudocamConfig) -> ConfigResult<()> {
    let mut errors = Vec::new();

    validate_board(config, &mut errors);
    validate_value_ranges(config, &mut errors);

    if !errors.is_empty() {
        let error_messages = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        return Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages
        )));
    }

    Ok(())
}

fn validate_board(config: &SudocamConfig, errors: &mut Vec<ConfigValidationError>) {
    let board = &config.board;
    let mut crop_ok = true;

    if board.crop_right <= board.crop_left {
        crop_ok = false;
        errors.push(ConfigValidationError::DegenerateCrop {
            axis: "x",
            start: board.crop_left,
            end: board.crop_right,
        });
    }
    if board.crop_bottom <= board.crop_top {
        crop_ok = false;
        errors.push(ConfigValidationError::DegenerateCrop {
            axis: "y",
            start: board.crop_top,
            end: board.crop_bottom,
        });
    }

    if board.grid_size == 0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "board.grid_size".to_string(),
            reason: "must be at least 1".to_string(),
        });
        return;
    }

    if !crop_ok {
        return;
    }

    let width = board.crop_right - board.crop_left;
    let height = board.crop_bottom - board.crop_top;
    if width < board.grid_size || width % board.grid_size != 0 {
        errors.push(ConfigValidationError::IndivisibleBoard {
            axis: "width",
            extent: width,
            grid_size: board.grid_size,
        });
    }
    if height < board.grid_size || height % board.grid_size != 0 {
        errors.push(ConfigValidationError::IndivisibleBoard {
            axis: "height",
            extent: height,
            grid_size: board.grid_size,
        });
    }
}

fn validate_value_ranges(config: &SudocamConfig, errors: &mut Vec<ConfigValidationError>) {
    if config.preprocessing.low_contrast_threshold > u8::MAX as u16 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "preprocessing.low_contrast_threshold".to_string(),
            reason: "must be between 0 and 255".to_string(),
        });
    }

    if config.diagnostics.ascii_step == 0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "diagnostics.ascii_step".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let level = config.logging.level.to_ascii_lowercase();
    if !matches!(level.as_str(), "trace" | "debug" | "info" | "warn" | "error") {
        errors.push(ConfigValidationError::InvalidValue {
            field: "logging.level".to_string(),
            reason: "must be one of trace, debug, info, warn, error".to_string(),
        });
    }

    let format = config.logging.format.to_ascii_lowercase();
    if format != "text" && format != "compact" {
        errors.push(ConfigValidationError::InvalidValue {
            field: "logging.format".to_string(),
            reason: "must be 'text' or 'compact'".to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SudocamConfig::default();
        let result = validate_config(&config);
        if let Err(e) = &result {
            eprintln!("Validation error: {}", e);
        }
        assert!(result.is_ok());
    }

    #[test]
    fn test_inverted_crop() {
        let mut config = SudocamConfig::default();
        config.board.crop_right = config.board.crop_left;

        let result = validate_config(&config);
        assert!(result.is_err());

        if let Err(ConfigError::ValidationError(msg)) = result {
            assert!(msg.contains("empty or inverted"));
        }
    }

    #[test]
    fn test_zero_grid_size() {
        let mut config = SudocamConfig::default();
        config.board.grid_size = 0;

        let result = validate_config(&config);
        assert!(result.is_err());

        if let Err(ConfigError::ValidationError(msg)) = result {
            assert!(msg.contains("board.grid_size"));
        }
    }

    #[test]
    fn test_indivisible_board() {
        let mut config = SudocamConfig::default();
        config.board.grid_size = 7;

        let result = validate_config(&config);
        assert!(result.is_err());

        if let Err(ConfigError::ValidationError(msg)) = result {
            assert!(msg.contains("width"));
            assert!(msg.contains("height"));
        }
    }

    #[test]
    fn test_threshold_out_of_range() {
        let mut config = SudocamConfig::default();
        config.preprocessing.low_contrast_threshold = 256;

        let result = validate_config(&config);
        assert!(result.is_err());

        if let Err(ConfigError::ValidationError(msg)) = result {
            assert!(msg.contains("low_contrast_threshold"));
        }
    }

    #[test]
    fn test_unknown_log_level() {
        let mut config = SudocamConfig::default();
        config.logging.level = "verbose".to_string();

        let result = validate_config(&config);
        assert!(result.is_err());

        if let Err(ConfigError::ValidationError(msg)) = result {
            assert!(msg.contains("logging.level"));
        }
    }
}
