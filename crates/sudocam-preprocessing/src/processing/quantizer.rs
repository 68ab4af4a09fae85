// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use ndarray::ArrayView2;
use sudocam_structures::constants::{CANONICAL_CELL_ELEMENTS, CANONICAL_CELL_SIDE};
use sudocam_structures::descriptors::QuantizationParameters;
use sudocam_structures::SudocamDataError;

/// Maps canonical 0..=255 intensities to the classifier's int8 input:
/// `q = round((v / 255) / scale) + zero_point`, clamped to [-128, 127].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantizer {
    parameters: QuantizationParameters,
}

impl Quantizer {
    pub fn new(parameters: QuantizationParameters) -> Self {
        Quantizer { parameters }
    }

    pub fn get_parameters(&self) -> QuantizationParameters {
        self.parameters
    }

    #[inline]
    pub fn quantize_value(&self, value: u8) -> i8 {
        let normalized = value as f32 / 255.0;
        // `as i32` saturates for tiny scales, so the zero point is added saturating too
        let q = ((normalized / self.parameters.get_scale()).round() as i32)
            .saturating_add(self.parameters.get_zero_point());
        q.clamp(i8::MIN as i32, i8::MAX as i32) as i8
    }

    /// Quantize a 28x28 canonical cell into `destination` in row-major order
    pub fn quantize_into(
        &self,
        canonical: ArrayView2<'_, u8>,
        destination: &mut [i8],
    ) -> Result<(), SudocamDataError> {
        if canonical.dim() != (CANONICAL_CELL_SIDE, CANONICAL_CELL_SIDE) {
            return Err(SudocamDataError::DimensionMismatch {
                expected: CANONICAL_CELL_ELEMENTS,
                actual: canonical.len(),
            });
        }
        if destination.len() != CANONICAL_CELL_ELEMENTS {
            return Err(SudocamDataError::DimensionMismatch {
                expected: CANONICAL_CELL_ELEMENTS,
                actual: destination.len(),
            });
        }
        for (target, value) in destination.iter_mut().zip(canonical.iter()) {
            *target = self.quantize_value(*value);
        }
        Ok(())
    }
}
