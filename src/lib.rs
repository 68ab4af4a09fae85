// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # sudocam - board digit reader
//!
//! Reads the digits of a fixed, camera-facing puzzle board: one grayscale frame in, an N x N
//! grid of class labels out. The crate re-exports the workspace members:
//!
//! - **`structures`**: descriptors, reference constants, `SudocamDataError`
//! - **`hal`**: sensor and classifier capability traits, host frame source
//! - **`preprocessing`**: crop, grid extraction, normalization, quantization, assembly
//! - **`config`** (feature `config`): TOML configuration with env / CLI overrides
//! - **`observability`** (feature `observability`): logging setup and per-crate debug flags
//!
//! ## Usage
//!
//! ```rust,no_run
//! use sudocam::prelude::*;
//!
//! fn scan<S: FrameSource, C: DigitClassifier>(source: S, classifier: C) -> Result<(), ScanError> {
//!     let mut scanner = BoardScanner::new(source, classifier, PipelineSettings::reference());
//!     scanner.bring_up()?;
//!     let grid = scanner.activate()?;
//!     println!("{}", grid);
//!     Ok(())
//! }
//! ```
//!
//! ## License
//!
//! Apache-2.0

pub use sudocam_hal as hal;
pub use sudocam_preprocessing as preprocessing;
pub use sudocam_structures as structures;

#[cfg(feature = "config")]
pub use sudocam_config as config;

#[cfg(feature = "observability")]
pub use sudocam_observability as observability;

/// Prelude - commonly used types and traits
pub mod prelude {
    pub use crate::hal::{DigitClassifier, FrameSource, FrameView, OwnedFrame, PixelFormat, SensorFrame};
    pub use crate::preprocessing::{
        BoardScanner, DiagnosticsSettings, PipelineSettings, PredictionGrid, ScanError, ScannerState,
    };
    pub use crate::structures::descriptors::{
        BoardGeometry, CellCoordinate, CornerPoints, GridSize, QuantizationParameters,
    };
    pub use crate::structures::SudocamDataError;

    #[cfg(feature = "config")]
    pub use crate::config::{load_config, load_config_or_default, SudocamConfig};

    #[cfg(feature = "observability")]
    pub use crate::observability::{init_logging, parse_debug_flags, CrateDebugFlags, LoggingConfig};

    #[cfg(feature = "host-platform")]
    pub use crate::hal::platforms::ImageFileFrameSource;
}
