// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! The numeric stages of the per-cell pipeline, in the order they run.

mod cell_normalizer;
mod frame_cropper;
mod grid_cell_extractor;
mod orientation;
mod quantizer;

pub use cell_normalizer::{CellContrast, CellNormalizer};
pub use frame_cropper::FrameCropper;
pub use grid_cell_extractor::GridCellExtractor;
pub use orientation::OrientationCorrector;
pub use quantizer::Quantizer;
