// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # sudocam-preprocessing
//!
//! Turns one grayscale sensor frame into an N x N grid of digit labels:
//!
//! frame → [`FrameCropper`] → board → [`GridCellExtractor`] → cell → [`CellNormalizer`]
//! → canonical 28x28 → [`OrientationCorrector`] → [`Quantizer`] → classifier → [`PredictionGrid`]
//!
//! [`PredictionAssembler`] runs the per-cell stages for every grid position and
//! [`BoardScanner`] drives a full activation, including frame acquisition and release.
//!
//! [`FrameCropper`]: processing::FrameCropper
//! [`GridCellExtractor`]: processing::GridCellExtractor
//! [`CellNormalizer`]: processing::CellNormalizer
//! [`OrientationCorrector`]: processing::OrientationCorrector
//! [`Quantizer`]: processing::Quantizer

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod assembler;
pub mod board_scanner;
pub mod data_types;
pub mod diagnostics;
mod error;
pub mod processing;
pub mod scratch;
pub mod settings;

pub use assembler::PredictionAssembler;
pub use board_scanner::{BoardScanner, ScannerState};
pub use data_types::PredictionGrid;
pub use error::ScanError;
pub use scratch::{CellScratch, ScratchArena};
pub use settings::{DiagnosticsSettings, PipelineSettings};
