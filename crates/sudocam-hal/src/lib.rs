// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # sudocam-hal
//!
//! Capability traits the board reader consumes, kept apart from any concrete driver:
//! - [`FrameSource`] / [`SensorFrame`]: acquire and release grayscale sensor frames
//! - [`DigitClassifier`]: quantized input buffer, run, predicted class
//!
//! Platform implementations live under [`platforms`].

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod hal;
pub mod platforms;

pub use hal::*;
