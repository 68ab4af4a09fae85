// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use ndarray::ArrayView2;
use sudocam_hal::DigitClassifier;
use sudocam_structures::descriptors::{CellCoordinate, GridSize};
use sudocam_structures::SudocamDataError;
use tracing::{debug, error};

use crate::data_types::PredictionGrid;
use crate::diagnostics;
use crate::processing::{CellContrast, CellNormalizer, GridCellExtractor, OrientationCorrector, Quantizer};
use crate::scratch::CellScratch;
use crate::settings::{DiagnosticsSettings, PipelineSettings};
use crate::ScanError;

/// Runs extract → normalize → flip → quantize → classify for every cell of a board.
///
/// Cells are visited row-major. The label of raw cell (row, col) is stored at
/// `(N - 1 - row, col)` so that row 0 of the grid is the top of the board as a person sees it.
#[derive(Debug, Clone, Copy)]
pub struct PredictionAssembler {
    extractor: GridCellExtractor,
    normalizer: CellNormalizer,
    diagnostics: DiagnosticsSettings,
}

impl PredictionAssembler {
    pub fn new(settings: &PipelineSettings) -> Self {
        PredictionAssembler {
            extractor: GridCellExtractor::new(settings.geometry.get_grid_size()),
            normalizer: CellNormalizer::new(settings.low_contrast_threshold),
            diagnostics: settings.diagnostics,
        }
    }

    pub fn get_grid_size(&self) -> GridSize {
        self.extractor.get_grid_size()
    }

    /// Run the numeric stages for one cell and write its quantized tensor into `tensor`.
    ///
    /// The canonical (flipped) cell stays in `scratch` until the next call.
    pub fn prepare_cell(
        &self,
        board: ArrayView2<'_, u8>,
        coordinate: CellCoordinate,
        scratch: &mut CellScratch,
        quantizer: &Quantizer,
        tensor: &mut [i8],
    ) -> Result<CellContrast, SudocamDataError> {
        let resolution = self.extractor.extract(board, coordinate, scratch.raw_mut())?;
        let contrast = {
            let (raw, canonical) = scratch.normalize_views(resolution)?;
            self.normalizer.normalize(raw, canonical)?
        };
        OrientationCorrector::flip_vertical(scratch.canonical_mut());
        quantizer.quantize_into(scratch.get_canonical_view(), tensor)?;
        Ok(contrast)
    }

    /// Classify every cell of `board`.
    ///
    /// Stops at the first cell the classifier fails on; no grid is returned in that case.
    pub fn assemble<C: DigitClassifier>(
        &self,
        board: ArrayView2<'_, u8>,
        scratch: &mut CellScratch,
        classifier: &mut C,
    ) -> Result<PredictionGrid, ScanError> {
        let grid_size = self.get_grid_size();
        let quantizer = Quantizer::new(classifier.input_quantization());
        let mut grid = PredictionGrid::new(grid_size);

        for coordinate in grid_size.iter_cells() {
            let contrast = self.prepare_cell(
                board,
                coordinate,
                scratch,
                &quantizer,
                classifier.input_tensor_mut(),
            )?;
            self.emit_cell_diagnostics(coordinate, scratch, classifier.input_tensor_mut());

            if let Err(err) = classifier.predict() {
                error!("Inference failed on {}: {}", coordinate, err);
                return Err(ScanError::InferenceFailed {
                    row: *coordinate.row,
                    col: *coordinate.column,
                    reason: err.to_string(),
                });
            }

            let label = classifier.predicted_class();
            grid.set(coordinate.inverted_row(grid_size)?, coordinate.column, label)?;
            debug!(
                "{} -> {} (contrast {}..{}{})",
                coordinate,
                label,
                contrast.min,
                contrast.max,
                if contrast.blank { ", blank" } else { "" }
            );
        }

        Ok(grid)
    }

    fn emit_cell_diagnostics(&self, coordinate: CellCoordinate, scratch: &CellScratch, tensor: &[i8]) {
        if self.diagnostics.dump_corner_cells {
            if let Some(label) = diagnostics::corner_label(coordinate, self.get_grid_size()) {
                diagnostics::emit(&diagnostics::render_cell_hex(label, scratch.get_canonical_view()));
            }
        }
        if self.diagnostics.dump_cell_ascii {
            diagnostics::emit(&diagnostics::render_cell_ascii(coordinate, scratch.get_canonical_view()));
        }
        if self.diagnostics.dump_model_input {
            diagnostics::emit(&diagnostics::render_model_input_ascii(coordinate, tensor));
        }
    }
}
