// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! The core crate for sudocam. Defines the descriptors, reference constants and the error
//! type shared by the configuration, hardware abstraction and preprocessing crates.

pub mod common_macros;
pub mod constants;
pub mod descriptors;
mod error;

pub use error::SudocamDataError;
