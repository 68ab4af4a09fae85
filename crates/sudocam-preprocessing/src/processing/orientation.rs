// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use ndarray::{s, ArrayViewMut2, Zip};

/// Undoes the sensor's upside-down mounting relative to the training data
pub struct OrientationCorrector;

impl OrientationCorrector {
    /// Swap row `i` with row `height - 1 - i`, in place. Self-inverse.
    pub fn flip_vertical(mut image: ArrayViewMut2<'_, u8>) {
        let height = image.nrows();
        for row in 0..height / 2 {
            let mirror = height - 1 - row;
            let (upper, lower) = image.multi_slice_mut((s![row, ..], s![mirror, ..]));
            Zip::from(upper)
                .and(lower)
                .for_each(|a, b| std::mem::swap(a, b));
        }
    }
}
