// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! This module defines all configuration structs that map to sections in
//! `sudocam_configuration.toml`. Every default equals the device's build-time reference
//! constants, so an empty file reproduces the device exactly.

use serde::{Deserialize, Serialize};
use sudocam_structures::constants;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SudocamConfig {
    pub board: BoardConfig,
    pub preprocessing: PreprocessingConfig,
    pub diagnostics: DiagnosticsConfig,
    pub logging: LoggingConfig,
}

/// Board crop rectangle (in sensor pixels, `right`/`bottom` exclusive) and grid size
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct BoardConfig {
    pub crop_left: u32,
    pub crop_right: u32,
    pub crop_top: u32,
    pub crop_bottom: u32,
    pub grid_size: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            crop_left: constants::CROP_LEFT,
            crop_right: constants::CROP_RIGHT,
            crop_top: constants::CROP_TOP,
            crop_bottom: constants::CROP_BOTTOM,
            grid_size: constants::GRID_SIZE,
        }
    }
}

/// Cell normalization settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PreprocessingConfig {
    /// Cells whose intensity spread is below this value are treated as empty.
    /// Stored as u16 so out of range values reach validation instead of failing to parse.
    pub low_contrast_threshold: u16,
}

impl Default for PreprocessingConfig {
    fn default() -> Self {
        Self {
            low_contrast_threshold: constants::LOW_CONTRAST_THRESHOLD as u16,
        }
    }
}

/// Which diagnostic text dumps are emitted during an activation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    pub dump_cropped_board: bool,
    pub dump_board_ascii: bool,
    pub dump_corner_cells: bool,
    pub dump_cell_ascii: bool,
    pub dump_model_input: bool,
    pub dump_final_grid: bool,
    /// Sampling step for the ASCII board render
    pub ascii_step: u32,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            dump_cropped_board: false,
            dump_board_ascii: false,
            dump_corner_cells: false,
            dump_cell_ascii: false,
            dump_model_input: false,
            dump_final_grid: true,
            ascii_step: 4,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (text or compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}
