// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Fixed-size buffers reused by every cell of every activation.
//!
//! Allocated once from the board geometry. Each stage overwrites its buffer for the next cell,
//! so a cell's output has to be consumed before the next cell is extracted. One activation at a
//! time: the arena is borrowed mutably for the whole activation.

use ndarray::{Array2, ArrayView2, ArrayViewMut2};
use sudocam_structures::constants::CANONICAL_CELL_SIDE;
use sudocam_structures::descriptors::{BoardGeometry, ImageXYResolution};
use sudocam_structures::SudocamDataError;

/// Buffers for the per-cell stages: raw cell pixels and the canonical cell
#[derive(Debug, Clone)]
pub struct CellScratch {
    raw: Vec<u8>,
    canonical: Array2<u8>,
}

impl CellScratch {
    pub fn new(cell_resolution: ImageXYResolution) -> Self {
        CellScratch {
            raw: vec![0; cell_resolution.number_elements()],
            canonical: Array2::zeros((CANONICAL_CELL_SIDE, CANONICAL_CELL_SIDE)),
        }
    }

    pub fn get_raw_capacity(&self) -> usize {
        self.raw.len()
    }

    pub fn get_canonical_view(&self) -> ArrayView2<'_, u8> {
        self.canonical.view()
    }

    /// Raw cell buffer, its first `resolution` pixels as a 2D view
    pub fn get_raw_view(&self, resolution: ImageXYResolution) -> Result<ArrayView2<'_, u8>, SudocamDataError> {
        let elements = resolution.number_elements();
        let pixels = self.raw.get(..elements).ok_or(SudocamDataError::DimensionMismatch {
            expected: elements,
            actual: self.raw.len(),
        })?;
        ArrayView2::from_shape((resolution.height as usize, resolution.width as usize), pixels)
            .map_err(|err| SudocamDataError::InternalError(err.to_string()))
    }

    pub(crate) fn raw_mut(&mut self) -> &mut [u8] {
        &mut self.raw
    }

    /// Raw cell view and writable canonical view at the same time
    pub(crate) fn normalize_views(
        &mut self,
        resolution: ImageXYResolution,
    ) -> Result<(ArrayView2<'_, u8>, ArrayViewMut2<'_, u8>), SudocamDataError> {
        let elements = resolution.number_elements();
        let pixels = self.raw.get(..elements).ok_or(SudocamDataError::DimensionMismatch {
            expected: elements,
            actual: self.raw.len(),
        })?;
        let raw = ArrayView2::from_shape((resolution.height as usize, resolution.width as usize), pixels)
            .map_err(|err| SudocamDataError::InternalError(err.to_string()))?;
        Ok((raw, self.canonical.view_mut()))
    }

    pub(crate) fn canonical_mut(&mut self) -> ArrayViewMut2<'_, u8> {
        self.canonical.view_mut()
    }
}

/// All scratch storage of one scanner: the cropped board plus the per-cell buffers
#[derive(Debug, Clone)]
pub struct ScratchArena {
    board: Array2<u8>,
    cell: CellScratch,
}

impl ScratchArena {
    pub fn new(geometry: &BoardGeometry) -> Self {
        let board_resolution = geometry.get_board_resolution();
        ScratchArena {
            board: Array2::zeros((board_resolution.height as usize, board_resolution.width as usize)),
            cell: CellScratch::new(geometry.get_cell_resolution()),
        }
    }

    pub fn get_board_view(&self) -> ArrayView2<'_, u8> {
        self.board.view()
    }

    pub fn get_board_view_mut(&mut self) -> ArrayViewMut2<'_, u8> {
        self.board.view_mut()
    }

    pub fn get_cell_scratch(&self) -> &CellScratch {
        &self.cell
    }

    /// The finished board together with the cell buffers the assembler writes into
    pub fn split_for_cells(&mut self) -> (ArrayView2<'_, u8>, &mut CellScratch) {
        (self.board.view(), &mut self.cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sudocam_structures::constants::reference_board_geometry;

    #[test]
    fn test_reference_arena_sizes() {
        let arena = ScratchArena::new(&reference_board_geometry());
        assert_eq!(arena.get_board_view().dim(), (180, 180));
        assert_eq!(arena.get_cell_scratch().get_raw_capacity(), 45 * 45);
        assert_eq!(arena.get_cell_scratch().get_canonical_view().dim(), (28, 28));
    }

    #[test]
    fn test_raw_view_larger_than_capacity_is_rejected() {
        let scratch = CellScratch::new(ImageXYResolution::new(4, 4).unwrap());
        assert!(scratch.get_raw_view(ImageXYResolution::new(4, 4).unwrap()).is_ok());
        assert!(scratch.get_raw_view(ImageXYResolution::new(5, 4).unwrap()).is_err());
    }
}
