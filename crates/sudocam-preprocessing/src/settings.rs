// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use sudocam_structures::constants::{reference_board_geometry, LOW_CONTRAST_THRESHOLD};
use sudocam_structures::descriptors::BoardGeometry;

#[cfg(feature = "config")]
use sudocam_config::SudocamConfig;
#[cfg(feature = "config")]
use sudocam_structures::descriptors::{CornerPoints, GridSize};
#[cfg(feature = "config")]
use sudocam_structures::SudocamDataError;

/// Which diagnostic text blocks an activation emits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticsSettings {
    /// Full hex dump and down-sampled hex image of the cropped board
    pub dump_cropped_board: bool,
    pub dump_board_ascii: bool,
    /// Hex dumps of the four corner cells' canonical buffers
    pub dump_corner_cells: bool,
    pub dump_cell_ascii: bool,
    pub dump_model_input: bool,
    pub dump_final_grid: bool,
    pub ascii_step: u32,
}

impl DiagnosticsSettings {
    pub fn silent() -> Self {
        DiagnosticsSettings {
            dump_final_grid: false,
            ..Self::default()
        }
    }

    pub fn everything() -> Self {
        DiagnosticsSettings {
            dump_cropped_board: true,
            dump_board_ascii: true,
            dump_corner_cells: true,
            dump_cell_ascii: true,
            dump_model_input: true,
            dump_final_grid: true,
            ascii_step: 4,
        }
    }
}

impl Default for DiagnosticsSettings {
    fn default() -> Self {
        DiagnosticsSettings {
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

/// Everything a scanner needs besides its sensor and classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineSettings {
    pub geometry: BoardGeometry,
    pub low_contrast_threshold: u8,
    pub diagnostics: DiagnosticsSettings,
}

impl PipelineSettings {
    /// The device's build-time configuration
    pub fn reference() -> Self {
        PipelineSettings {
            geometry: reference_board_geometry(),
            low_contrast_threshold: LOW_CONTRAST_THRESHOLD,
            diagnostics: DiagnosticsSettings::default(),
        }
    }
}

#[cfg(feature = "config")]
impl TryFrom<&SudocamConfig> for PipelineSettings {
    type Error = SudocamDataError;

    fn try_from(config: &SudocamConfig) -> Result<Self, Self::Error> {
        let board = &config.board;
        let crop = CornerPoints::from_boundaries(
            board.crop_left,
            board.crop_right,
            board.crop_top,
            board.crop_bottom,
        )?;
        let geometry = BoardGeometry::new(crop, GridSize::new(board.grid_size)?)?;

        let low_contrast_threshold = u8::try_from(config.preprocessing.low_contrast_threshold)
            .map_err(|_| {
                SudocamDataError::BadParameters(format!(
                    "Low contrast threshold {} does not fit in a byte!",
                    config.preprocessing.low_contrast_threshold
                ))
            })?;

        if config.diagnostics.ascii_step == 0 {
            return Err(SudocamDataError::BadParameters("ASCII step cannot be 0!".into()));
        }
        let dumps = &config.diagnostics;
        Ok(PipelineSettings {
            geometry,
            low_contrast_threshold,
            diagnostics: DiagnosticsSettings {
                dump_cropped_board: dumps.dump_cropped_board,
                dump_board_ascii: dumps.dump_board_ascii,
                dump_corner_cells: dumps.dump_corner_cells,
                dump_cell_ascii: dumps.dump_cell_ascii,
                dump_model_input: dumps.dump_model_input,
                dump_final_grid: dumps.dump_final_grid,
                ascii_step: dumps.ascii_step,
            },
        })
    }
}
