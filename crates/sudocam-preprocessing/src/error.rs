// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use sudocam_structures::SudocamDataError;

/// Why an activation did not produce a prediction grid
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScanError {
    /// The sensor did not deliver a frame. Nothing was acquired, so nothing was released.
    #[error("Frame capture failed")]
    AcquisitionFailed,
    /// The classifier reported failure for a cell. The activation was aborted and the frame released.
    #[error("Inference failed on cell ({row}, {col}): {reason}")]
    InferenceFailed { row: u32, col: u32, reason: String },
    /// The sensor could not be brought up
    #[error("Sensor initialization failed: {0}")]
    SensorInitFailed(String),
    /// Sensor bring-up failed earlier; no activation can run
    #[error("Scanner is halted, the sensor never came up")]
    Halted,
    /// The acquired frame cannot hold the configured board
    #[error("Invalid frame: {0}")]
    InvalidFrame(SudocamDataError),
    #[error("Preprocessing failed: {0}")]
    Preprocessing(#[from] SudocamDataError),
}

impl ScanError {
    /// False for the two errors after which no activation can ever succeed
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, ScanError::SensorInitFailed(_) | ScanError::Halted)
    }
}
