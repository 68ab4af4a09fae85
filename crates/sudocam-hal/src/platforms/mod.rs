// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/// Frame source decoding still images from disk (host side).
#[cfg(feature = "image-file")]
pub mod image_file;

#[cfg(feature = "image-file")]
pub use image_file::{ImageFileError, ImageFileFrameSource};
