// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Human-oriented text dumps of intermediate buffers.
//!
//! Renderers are pure and return the whole block including its start/end markers; [`emit`]
//! writes a block to the `sudocam::diagnostics` tracing target.

use ndarray::ArrayView2;
use sudocam_structures::constants::CANONICAL_CELL_SIDE;
use sudocam_structures::descriptors::{CellCoordinate, GridSize};

use crate::data_types::PredictionGrid;

/// Tracing target every diagnostic block is written to
pub const DIAGNOSTICS_TARGET: &str = "sudocam::diagnostics";

pub fn emit(block: &str) {
    tracing::info!(target: DIAGNOSTICS_TARGET, "{}", block);
}

//region Ramps

fn intensity_glyph(value: u8) -> char {
    match value {
        201..=255 => '#',
        151..=200 => 'O',
        101..=150 => 'o',
        51..=100 => '.',
        _ => ' ',
    }
}

fn model_input_glyph(value: i8) -> char {
    match value {
        41..=127 => '#',
        21..=40 => 'O',
        6..=20 => 'o',
        -4..=5 => '.',
        _ => ' ',
    }
}

//endregion

//region Board

/// Every board pixel as comma separated `0xNN`, row-major
pub fn render_cropped_hex(board: ArrayView2<'_, u8>) -> String {
    let (height, width) = board.dim();
    let pixels: Vec<String> = board.iter().map(|v| format!("0x{:02X}", v)).collect();
    format!(
        "=== CROPPED_HEX_START ===\nW={},H={}\n{}\n=== CROPPED_HEX_END ===",
        width,
        height,
        pixels.join(",")
    )
}

/// Every `step`-th pixel of every `step`-th row, one hex row per sampled row
pub fn render_cropped_downsampled(board: ArrayView2<'_, u8>, step: usize) -> String {
    let step = step.max(1);
    let (height, width) = board.dim();
    let mut out = String::from("===== CROPPED_IMAGE_START =====\n");
    out.push_str(&format!("SIZE {}x{}\n", width.div_ceil(step), height.div_ceil(step)));
    for row in board.outer_iter().step_by(step) {
        out.extend(row.iter().step_by(step).map(|v| format!("{:02X}", v)));
        out.push('\n');
    }
    out.push_str("===== CROPPED_IMAGE_END =====");
    out
}

/// Low resolution ASCII picture of the board, sampling every `step` pixels
pub fn render_board_ascii(board: ArrayView2<'_, u8>, step: usize) -> String {
    let step = step.max(1);
    let mut out = String::from("=== CROPPED BOARD (ASCII) ===\n");
    for row in board.outer_iter().step_by(step) {
        out.extend(row.iter().step_by(step).map(|v| intensity_glyph(*v)));
        out.push('\n');
    }
    out.push_str("============================");
    out
}

//endregion

//region Cells

/// Corner name used in canonical cell dump markers, `None` for non-corner cells
pub fn corner_label(coordinate: CellCoordinate, grid_size: GridSize) -> Option<&'static str> {
    if !coordinate.is_corner(grid_size) {
        return None;
    }
    let last = *grid_size - 1;
    Some(match (*coordinate.row == 0, *coordinate.column == last) {
        (true, false) => "TOP_LEFT",
        (true, true) => "TOP_RIGHT",
        (false, false) => "BOTTOM_LEFT",
        (false, true) => "BOTTOM_RIGHT",
    })
}

pub fn render_cell_hex(label: &str, canonical: ArrayView2<'_, u8>) -> String {
    let pixels: Vec<String> = canonical.iter().map(|v| format!("0x{:02X}", v)).collect();
    format!(
        "=== CELL28_{label}_START ===\n{}\n=== CELL28_{label}_END ===",
        pixels.join(","),
        label = label
    )
}

pub fn render_cell_ascii(coordinate: CellCoordinate, canonical: ArrayView2<'_, u8>) -> String {
    let mut out = format!(
        "=== CELL ({},{}) {}x{} ===\n",
        coordinate.row, coordinate.column, CANONICAL_CELL_SIDE, CANONICAL_CELL_SIDE
    );
    for row in canonical.outer_iter() {
        out.extend(row.iter().map(|v| intensity_glyph(*v)));
        out.push('\n');
    }
    out.push_str("========================");
    out
}

/// ASCII picture of the quantized tensor exactly as handed to the classifier
pub fn render_model_input_ascii(coordinate: CellCoordinate, tensor: &[i8]) -> String {
    let mut out = format!(
        "=== MODEL INPUT ({},{}) INT8 ===\n",
        coordinate.row, coordinate.column
    );
    for row in tensor.chunks(CANONICAL_CELL_SIDE) {
        out.extend(row.iter().map(|v| model_input_glyph(*v)));
        out.push('\n');
    }
    out.push_str("===============================");
    out
}

//endregion

pub fn render_prediction_grid(grid: &PredictionGrid) -> String {
    format!("=== FINAL PREDICTION GRID ===\n{}", grid)
}
