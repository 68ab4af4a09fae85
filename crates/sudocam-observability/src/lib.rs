// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # sudocam-observability
//!
//! Logging setup shared by the sudocam binaries.
//!
//! Every crate logs through `tracing`; this crate owns the subscriber. Debug output can be
//! turned on per crate with `--debug-{crate}` flags or the `SUDOCAM_DEBUG` environment
//! variable.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod config;
pub mod init;

pub use cli::*;
pub use config::*;
pub use init::*;

/// Known sudocam crate names for debug flags
pub const KNOWN_CRATES: &[&str] = &[
    "sudocam",
    "sudocam-preprocessing",
    "sudocam-hal",
    "sudocam-config",
    "sudocam-structures",
];
