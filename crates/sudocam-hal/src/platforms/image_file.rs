// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Host frame source backed by an image file
//!
//! Decodes once during [`FrameSource::initialize`] and hands out a copy of the same grayscale
//! frame on every acquisition, which makes bench replays of captured frames deterministic.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::hal::{FrameSource, OwnedFrame};

/// Errors raised while bringing up an [`ImageFileFrameSource`]
#[derive(Debug, thiserror::Error)]
pub enum ImageFileError {
    #[error("Failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Decoded image {path} is not a usable frame: {reason}")]
    InvalidFrame { path: PathBuf, reason: String },
}

/// Replays a still image as if it came from the sensor
#[derive(Debug)]
pub struct ImageFileFrameSource {
    path: PathBuf,
    frame: Option<OwnedFrame>,
    outstanding: usize,
}

impl ImageFileFrameSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        ImageFileFrameSource {
            path: path.as_ref().to_path_buf(),
            frame: None,
            outstanding: 0,
        }
    }

    pub fn get_path(&self) -> &Path {
        &self.path
    }

    /// Frames acquired and not yet released
    pub fn outstanding_frames(&self) -> usize {
        self.outstanding
    }
}

impl FrameSource for ImageFileFrameSource {
    type Frame = OwnedFrame;
    type Error = ImageFileError;

    fn initialize(&mut self) -> Result<(), Self::Error> {
        let decoded = image::open(&self.path).map_err(|source| ImageFileError::Decode {
            path: self.path.clone(),
            source,
        })?;
        let luma = decoded.to_luma8();
        let (width, height) = luma.dimensions();
        let frame = OwnedFrame::new(luma.into_raw(), width, height).map_err(|err| {
            ImageFileError::InvalidFrame {
                path: self.path.clone(),
                reason: err.to_string(),
            }
        })?;
        info!(
            "Loaded frame source {} ({}x{})",
            self.path.display(),
            width,
            height
        );
        self.frame = Some(frame);
        Ok(())
    }

    fn acquire(&mut self) -> Option<Self::Frame> {
        let frame = self.frame.clone()?;
        self.outstanding += 1;
        debug!("Acquired frame from {}", self.path.display());
        Some(frame)
    }

    fn release(&mut self, frame: Self::Frame) {
        self.outstanding = self.outstanding.saturating_sub(1);
        drop(frame);
    }
}
