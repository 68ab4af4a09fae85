// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Descriptors and parameter structures for sudocam data.
//!
//! This module provides the small value types describing image geometry, the board grid
//! and the classifier's input quantization.

use crate::{define_index, define_xy_coordinates, define_xy_dimensions, SudocamDataError};
use std::fmt::Display;

//region Images

//region Image XY

define_xy_coordinates!(ImageXYPoint, u32, "ImageXYPoint", "Represents a coordinate on an image. +x goes to the right, +y goes downward. (0,0) is in the top_left");

define_xy_dimensions!(
    ImageXYResolution,
    u32,
    "ImageXYResolution",
    0,
    "Describes the resolution of the image (width and height)"
);

//endregion

//region Corner Points
/// Holds pixel coordinates for cropping. `lower_right` is exclusive.
#[derive(Debug, PartialEq, Eq, Clone, Copy, serde::Serialize)]
pub struct CornerPoints {
    pub upper_left: ImageXYPoint,
    pub lower_right: ImageXYPoint,
}

impl<'de> serde::Deserialize<'de> for CornerPoints {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Fields {
            upper_left: ImageXYPoint,
            lower_right: ImageXYPoint,
        }

        let fields = Fields::deserialize(deserializer)?;
        CornerPoints::new(fields.upper_left, fields.lower_right).map_err(serde::de::Error::custom)
    }
}

impl CornerPoints {
    pub fn new(
        upper_left: ImageXYPoint,
        lower_right: ImageXYPoint,
    ) -> Result<Self, SudocamDataError> {
        if lower_right.x <= upper_left.x || lower_right.y <= upper_left.y {
            return Err(SudocamDataError::BadParameters(
                "Given Points are not forming a proper rectangle!".into(),
            ));
        }
        Ok(CornerPoints {
            upper_left,
            lower_right,
        })
    }

    /// Builds the rectangle from the four boundary constants used by the board calibration.
    pub fn from_boundaries(left: u32, right: u32, top: u32, bottom: u32) -> Result<Self, SudocamDataError> {
        CornerPoints::new(ImageXYPoint::new(left, top), ImageXYPoint::new(right, bottom))
    }

    pub fn get_width(&self) -> u32 {
        self.lower_right.x - self.upper_left.x
    }

    pub fn get_height(&self) -> u32 {
        self.lower_right.y - self.upper_left.y
    }

    pub fn enclosed_area_width_height(&self) -> ImageXYResolution {
        // Width and height are non zero by construction
        ImageXYResolution {
            width: self.get_width(),
            height: self.get_height(),
        }
    }

    pub fn verify_fits_in_resolution(
        &self,
        resolution: ImageXYResolution,
    ) -> Result<(), SudocamDataError> {
        if self.lower_right.x > resolution.width || self.lower_right.y > resolution.height {
            return Err(SudocamDataError::BadParameters(format!(
                "Corner Points {} do not fit in given resolution {}!",
                self, resolution
            )));
        }
        Ok(())
    }
}

impl Display for CornerPoints {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "CornerPoints(Upper Left: {}, Lower Right: {})",
            self.upper_left, self.lower_right
        )
    }
}

//endregion

//endregion

//region Grid

/// Number of rows (and columns) the board is split into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct GridSize(u32);

impl GridSize {
    pub fn new(size: u32) -> Result<Self, SudocamDataError> {
        if size == 0 {
            return Err(SudocamDataError::BadParameters("Grid size must be greater than 0!".into()));
        }
        Ok(GridSize(size))
    }

    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Total number of cells (N × N).
    pub fn number_cells(&self) -> usize {
        self.0 as usize * self.0 as usize
    }

    /// All cell coordinates in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = CellCoordinate> {
        let size = self.0;
        (0..size).flat_map(move |row| (0..size).map(move |column| CellCoordinate::new(row.into(), column.into())))
    }
}

impl std::ops::Deref for GridSize {
    type Target = u32;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl TryFrom<u32> for GridSize {
    type Error = SudocamDataError;
    fn try_from(value: u32) -> Result<Self, Self::Error> {
        GridSize::new(value)
    }
}

impl From<GridSize> for u32 {
    fn from(value: GridSize) -> Self {
        value.0
    }
}

impl Display for GridSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GridSize<{}x{}>", self.0, self.0)
    }
}

define_index!(GridRowIndex, u32, "Row of a cell within the board grid. Row 0 is the first row of the sensor image.");
define_index!(GridColumnIndex, u32, "Column of a cell within the board grid. Column 0 is the leftmost column.");

/// Position of a single cell in the board grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct CellCoordinate {
    pub row: GridRowIndex,
    pub column: GridColumnIndex,
}

impl CellCoordinate {
    pub const fn new(row: GridRowIndex, column: GridColumnIndex) -> Self {
        CellCoordinate { row, column }
    }

    pub fn verify_within_grid(&self, grid_size: GridSize) -> Result<(), SudocamDataError> {
        if *self.row >= *grid_size || *self.column >= *grid_size {
            return Err(SudocamDataError::BadParameters(format!(
                "{} is outside of {}!",
                self, grid_size
            )));
        }
        Ok(())
    }

    /// Row index counted from the opposite edge (N-1-row).
    pub fn inverted_row(&self, grid_size: GridSize) -> Result<GridRowIndex, SudocamDataError> {
        self.verify_within_grid(grid_size)?;
        Ok(GridRowIndex::from(*grid_size - 1 - *self.row))
    }

    /// True for the four corner cells of the grid.
    pub fn is_corner(&self, grid_size: GridSize) -> bool {
        let last = *grid_size - 1;
        (*self.row == 0 || *self.row == last) && (*self.column == 0 || *self.column == last)
    }
}

impl Display for CellCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cell({}, {})", self.row, self.column)
    }
}

impl From<(u32, u32)> for CellCoordinate {
    fn from(value: (u32, u32)) -> Self {
        CellCoordinate::new(value.0.into(), value.1.into())
    }
}

/// The calibrated board rectangle together with the grid it is split into.
///
/// Guarantees the board dimensions divide evenly by the grid size, so every cell has the
/// same non-zero resolution and no pixel of the board is left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct BoardGeometry {
    crop: CornerPoints,
    grid_size: GridSize,
}

impl<'de> serde::Deserialize<'de> for BoardGeometry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Fields {
            crop: CornerPoints,
            grid_size: GridSize,
        }

        let fields = Fields::deserialize(deserializer)?;
        BoardGeometry::new(fields.crop, fields.grid_size).map_err(serde::de::Error::custom)
    }
}

impl BoardGeometry {
    pub fn new(crop: CornerPoints, grid_size: GridSize) -> Result<Self, SudocamDataError> {
        let (width, height) = (crop.get_width(), crop.get_height());
        if width < *grid_size || height < *grid_size {
            return Err(SudocamDataError::BadParameters(format!(
                "Board of {}x{} is too small for {}!",
                width, height, grid_size
            )));
        }
        if width % *grid_size != 0 || height % *grid_size != 0 {
            return Err(SudocamDataError::BadParameters(format!(
                "Board of {}x{} is not evenly divisible by {}!",
                width, height, grid_size
            )));
        }
        Ok(BoardGeometry { crop, grid_size })
    }

    pub fn get_crop(&self) -> CornerPoints {
        self.crop
    }

    pub fn get_grid_size(&self) -> GridSize {
        self.grid_size
    }

    pub fn get_board_resolution(&self) -> ImageXYResolution {
        self.crop.enclosed_area_width_height()
    }

    pub fn get_cell_resolution(&self) -> ImageXYResolution {
        ImageXYResolution {
            width: self.crop.get_width() / *self.grid_size,
            height: self.crop.get_height() / *self.grid_size,
        }
    }
}

impl Display for BoardGeometry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BoardGeometry({}, {}, cell {})", self.crop, self.grid_size, self.get_cell_resolution())
    }
}

//endregion

//region Quantization

/// Affine quantization of the classifier's int8 input tensor: `real = scale * (q - zero_point)`.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct QuantizationParameters {
    scale: f32,
    zero_point: i32,
}

impl<'de> serde::Deserialize<'de> for QuantizationParameters {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Fields {
            scale: f32,
            zero_point: i32,
        }

        let fields = Fields::deserialize(deserializer)?;
        QuantizationParameters::new(fields.scale, fields.zero_point).map_err(serde::de::Error::custom)
    }
}

impl QuantizationParameters {
    pub fn new(scale: f32, zero_point: i32) -> Result<Self, SudocamDataError> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(SudocamDataError::BadParameters(format!(
                "Quantization scale must be a positive finite number, got {}!",
                scale
            )));
        }
        if zero_point < i8::MIN as i32 || zero_point > i8::MAX as i32 {
            return Err(SudocamDataError::BadParameters(format!(
                "Quantization zero point must be within [-128, 127], got {}!",
                zero_point
            )));
        }
        Ok(QuantizationParameters { scale, zero_point })
    }

    pub fn get_scale(&self) -> f32 {
        self.scale
    }

    pub fn get_zero_point(&self) -> i32 {
        self.zero_point
    }
}

impl Display for QuantizationParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "QuantizationParameters(scale: {}, zero_point: {})", self.scale, self.zero_point)
    }
}

//endregion
