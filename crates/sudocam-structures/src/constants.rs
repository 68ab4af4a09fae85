// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Reference build-time configuration of the device.
//!
//! The crop rectangle is hand calibrated against the mounted camera and must lie inside the
//! sensor's QVGA (320x240) frame. `right` and `bottom` are exclusive.

use crate::descriptors::{BoardGeometry, CornerPoints, GridSize, ImageXYPoint};

pub const CROP_LEFT: u32 = 68;
pub const CROP_RIGHT: u32 = 248;
pub const CROP_TOP: u32 = 28;
pub const CROP_BOTTOM: u32 = 208;

pub const CROP_WIDTH: u32 = CROP_RIGHT - CROP_LEFT;
pub const CROP_HEIGHT: u32 = CROP_BOTTOM - CROP_TOP;

/// Cells per board row and per board column.
pub const GRID_SIZE: u32 = 4;

/// Side of the square canonical cell fed to the classifier.
pub const CANONICAL_CELL_SIDE: usize = 28;
pub const CANONICAL_CELL_ELEMENTS: usize = CANONICAL_CELL_SIDE * CANONICAL_CELL_SIDE;

/// Cells whose `max - min` intensity spread is below this are treated as empty.
pub const LOW_CONTRAST_THRESHOLD: u8 = 30;

/// Sampling step of the down-sampled cropped board diagnostic dump.
pub const DIAGNOSTIC_DOWNSAMPLE: u32 = 3;

const _: () = assert!(CROP_RIGHT > CROP_LEFT && CROP_BOTTOM > CROP_TOP);
const _: () = assert!(CROP_WIDTH % GRID_SIZE == 0 && CROP_HEIGHT % GRID_SIZE == 0);

/// The calibrated crop rectangle.
pub const REFERENCE_CROP: CornerPoints = CornerPoints {
    upper_left: ImageXYPoint::new(CROP_LEFT, CROP_TOP),
    lower_right: ImageXYPoint::new(CROP_RIGHT, CROP_BOTTOM),
};

/// Board geometry built from the reference constants.
pub fn reference_board_geometry() -> BoardGeometry {
    // The const asserts above guarantee both constructors succeed
    match GridSize::new(GRID_SIZE).and_then(|grid| BoardGeometry::new(REFERENCE_CROP, grid)) {
        Ok(geometry) => geometry,
        Err(_) => unreachable!("reference board constants are verified at compile time"),
    }
}
