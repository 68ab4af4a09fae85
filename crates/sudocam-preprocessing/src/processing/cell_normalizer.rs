// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use ndarray::{s, ArrayView2, ArrayViewMut2};
use serde::Serialize;
use sudocam_structures::constants::CANONICAL_CELL_SIDE;
use sudocam_structures::SudocamDataError;

/// Intensity statistics of one raw cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellContrast {
    pub min: u8,
    pub max: u8,
    /// Spread below the low-contrast threshold, the canonical cell was zeroed
    pub blank: bool,
}

impl CellContrast {
    pub fn spread(&self) -> u8 {
        self.max - self.min
    }
}

/// Contrast-stretches a raw cell and box-filters it to the canonical 28x28 resolution.
///
/// Each canonical pixel averages the stretched values of its source bucket
/// (stretch first, then average). Flat cells and cells whose spread is below the threshold
/// become all zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellNormalizer {
    low_contrast_threshold: u8,
}

impl CellNormalizer {
    pub fn new(low_contrast_threshold: u8) -> Self {
        CellNormalizer {
            low_contrast_threshold,
        }
    }

    pub fn get_low_contrast_threshold(&self) -> u8 {
        self.low_contrast_threshold
    }

    pub fn normalize(
        &self,
        cell: ArrayView2<'_, u8>,
        mut canonical: ArrayViewMut2<'_, u8>,
    ) -> Result<CellContrast, SudocamDataError> {
        if canonical.dim() != (CANONICAL_CELL_SIDE, CANONICAL_CELL_SIDE) {
            return Err(SudocamDataError::DimensionMismatch {
                expected: CANONICAL_CELL_SIDE * CANONICAL_CELL_SIDE,
                actual: canonical.len(),
            });
        }
        let (cell_height, cell_width) = cell.dim();
        if cell_height == 0 || cell_width == 0 {
            return Err(SudocamDataError::BadParameters("Cannot normalize an empty cell!".into()));
        }

        let (min, max) = cell
            .iter()
            .fold((u8::MAX, u8::MIN), |(lo, hi), v| (lo.min(*v), hi.max(*v)));
        let range = (max - min) as u32;

        // A flat cell is blank at any threshold, including 0
        if range == 0 || range < self.low_contrast_threshold as u32 {
            canonical.fill(0);
            return Ok(CellContrast { min, max, blank: true });
        }

        for oy in 0..CANONICAL_CELL_SIDE {
            let (y0, y1) = bucket_bounds(oy, cell_height);
            for ox in 0..CANONICAL_CELL_SIDE {
                let (x0, x1) = bucket_bounds(ox, cell_width);
                let bucket = cell.slice(s![y0..y1, x0..x1]);

                let sum: u32 = bucket
                    .iter()
                    .map(|v| ((*v - min) as u32 * 255 / range).min(255))
                    .sum();
                canonical[[oy, ox]] = (sum / bucket.len() as u32) as u8;
            }
        }

        Ok(CellContrast { min, max, blank: false })
    }
}

/// Source span of canonical index `index` along an axis of `extent` pixels, never empty.
fn bucket_bounds(index: usize, extent: usize) -> (usize, usize) {
    let start = index * extent / CANONICAL_CELL_SIDE;
    let mut end = (index + 1) * extent / CANONICAL_CELL_SIDE;
    if end <= start {
        end = start + 1;
    }
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn two_tone_cell(low: u8, high: u8) -> Array2<u8> {
        Array2::from_shape_fn((28, 28), |(_, x)| if x < 14 { low } else { high })
    }

    fn normalize(cell: &Array2<u8>) -> (CellContrast, Array2<u8>) {
        let mut canonical = Array2::<u8>::from_elem((28, 28), 0xAA);
        let contrast = CellNormalizer::new(30)
            .normalize(cell.view(), canonical.view_mut())
            .unwrap();
        (contrast, canonical)
    }

    #[test]
    fn test_spread_29_is_blank() {
        let (contrast, canonical) = normalize(&two_tone_cell(100, 129));
        assert!(contrast.blank);
        assert_eq!(contrast.spread(), 29);
        assert!(canonical.iter().all(|v| *v == 0));
    }

    #[test]
    fn test_spread_30_is_stretched() {
        let (contrast, canonical) = normalize(&two_tone_cell(100, 130));
        assert!(!contrast.blank);
        assert_eq!(canonical[[5, 0]], 0);
        assert_eq!(canonical[[5, 13]], 0);
        assert_eq!(canonical[[5, 14]], 255);
        assert_eq!(canonical[[5, 27]], 255);
    }

    #[test]
    fn test_spread_31_is_stretched() {
        let (contrast, canonical) = normalize(&two_tone_cell(100, 131));
        assert!(!contrast.blank);
        assert_eq!(contrast.spread(), 31);
        assert_eq!(canonical[[0, 0]], 0);
        assert_eq!(canonical[[27, 27]], 255);
    }

    #[test]
    fn test_constant_cell_is_blank() {
        let (contrast, canonical) = normalize(&Array2::from_elem((45, 45), 255u8));
        assert!(contrast.blank);
        assert!(canonical.iter().all(|v| *v == 0));
    }

    #[test]
    fn test_zero_threshold_still_blanks_flat_cells() {
        let normalizer = CellNormalizer::new(0);
        let mut canonical = Array2::<u8>::from_elem((28, 28), 0xAA);
        let contrast = normalizer
            .normalize(Array2::from_elem((45, 45), 90u8).view(), canonical.view_mut())
            .unwrap();
        assert!(contrast.blank);
        assert!(canonical.iter().all(|v| *v == 0));

        // any spread at all is stretched
        let contrast = normalizer
            .normalize(two_tone_cell(90, 91).view(), canonical.view_mut())
            .unwrap();
        assert!(!contrast.blank);
        assert_eq!(canonical[[3, 0]], 0);
        assert_eq!(canonical[[3, 27]], 255);
    }

    #[test]
    fn test_linear_ramp_matches_hand_computed_values() {
        // v = 4x over a 56x56 cell: min 0, max 220, 2x2 buckets
        let ramp = Array2::from_shape_fn((56, 56), |(_, x)| (4 * x) as u8);
        let (contrast, canonical) = normalize(&ramp);

        assert_eq!((contrast.min, contrast.max), (0, 220));
        // (0*255/220 + 4*255/220) = (0 + 4), twice, / 4
        assert_eq!(canonical[[0, 0]], 2);
        // (216*255/220 + 220*255/220) = (250 + 255), twice, / 4
        assert_eq!(canonical[[27, 27]], 252);
        assert_eq!(canonical[[0, 27]], 252);
        // (112*255/220 + 116*255/220) = (129 + 134), twice, / 4
        assert_eq!(canonical[[14, 14]], 131);
    }

    #[test]
    fn test_stretch_happens_before_averaging() {
        // Buckets of 2x1 pixels mixing 0 and 101 in a cell ranging 0..=200.
        let cell = Array2::from_shape_fn((28, 56), |(y, x)| match (y, x % 2) {
            (0, _) => 200,
            (_, 0) => 0,
            _ => 101,
        });
        let (_, canonical) = normalize(&cell);
        // stretched 0 and 101*255/200 = 128, averaged 64. Averaging first would give 63.
        assert_eq!(canonical[[10, 3]], 64);
        assert_eq!(canonical[[0, 3]], 255);
    }

    #[test]
    fn test_cells_smaller_than_canonical_are_upsampled() {
        let cell = Array2::from_shape_fn((7, 7), |(y, _)| if y < 3 { 0u8 } else { 240 });
        let (_, canonical) = normalize(&cell);
        // 4 output rows per source row
        assert_eq!(canonical[[11, 20]], 0);
        assert_eq!(canonical[[12, 20]], 255);
        assert_eq!(canonical[[27, 0]], 255);
    }

    #[test]
    fn test_wrong_canonical_size_is_rejected() {
        let cell = two_tone_cell(0, 255);
        let mut canonical = Array2::<u8>::zeros((27, 28));
        assert!(CellNormalizer::new(30)
            .normalize(cell.view(), canonical.view_mut())
            .is_err());
    }
}
