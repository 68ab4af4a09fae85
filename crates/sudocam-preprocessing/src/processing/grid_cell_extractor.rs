// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use ndarray::{s, ArrayView2};
use sudocam_structures::descriptors::{CellCoordinate, GridSize, ImageXYResolution};
use sudocam_structures::SudocamDataError;

/// Splits a board into an N x N grid and copies out single cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCellExtractor {
    grid_size: GridSize,
}

impl GridCellExtractor {
    pub fn new(grid_size: GridSize) -> Self {
        GridCellExtractor { grid_size }
    }

    pub fn get_grid_size(&self) -> GridSize {
        self.grid_size
    }

    /// Cell resolution for a board, by floor division. Trailing remainder pixels belong to no cell.
    pub fn cell_resolution(&self, board_width: usize, board_height: usize) -> Result<ImageXYResolution, SudocamDataError> {
        let n = *self.grid_size as usize;
        ImageXYResolution::new((board_width / n) as u32, (board_height / n) as u32).map_err(|_| {
            SudocamDataError::BadParameters(format!(
                "Board of {}x{} is too small for {}!",
                board_width, board_height, self.grid_size
            ))
        })
    }

    /// Copy cell `coordinate` of `board` pixel for pixel into the front of `destination`
    /// (row-major, tightly packed). Returns the cell's resolution.
    pub fn extract(
        &self,
        board: ArrayView2<'_, u8>,
        coordinate: CellCoordinate,
        destination: &mut [u8],
    ) -> Result<ImageXYResolution, SudocamDataError> {
        coordinate.verify_within_grid(self.grid_size)?;
        let (board_height, board_width) = board.dim();
        let resolution = self.cell_resolution(board_width, board_height)?;

        let cell_width = resolution.width as usize;
        let cell_height = resolution.height as usize;
        let elements = resolution.number_elements();
        if destination.len() < elements {
            return Err(SudocamDataError::DimensionMismatch {
                expected: elements,
                actual: destination.len(),
            });
        }

        let y0 = *coordinate.row as usize * cell_height;
        let x0 = *coordinate.column as usize * cell_width;
        let cell = board.slice(s![y0..y0 + cell_height, x0..x0 + cell_width]);
        for (target, source) in destination[..elements].iter_mut().zip(cell.iter()) {
            *target = *source;
        }
        Ok(resolution)
    }
}
