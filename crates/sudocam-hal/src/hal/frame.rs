// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter};
use sudocam_structures::descriptors::ImageXYResolution;
use sudocam_structures::SudocamDataError;

/// Pixel layouts a sensor may deliver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// One byte per pixel, 0 = black
    Grayscale8,
    /// Two bytes per pixel, packed RGB565
    Rgb565,
    /// Compressed JPEG stream
    Jpeg,
}

impl PixelFormat {
    /// Bytes per pixel, `None` for compressed formats
    pub fn bytes_per_pixel(&self) -> Option<usize> {
        match self {
            PixelFormat::Grayscale8 => Some(1),
            PixelFormat::Rgb565 => Some(2),
            PixelFormat::Jpeg => None,
        }
    }
}

impl Display for PixelFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PixelFormat::Grayscale8 => "Grayscale8",
            PixelFormat::Rgb565 => "RGB565",
            PixelFormat::Jpeg => "JPEG",
        };
        write!(f, "{}", name)
    }
}

/// Borrowed, validated view of a single-byte grayscale frame.
///
/// Construction checks the format and that every row `0..height` fits in `bytes` when
/// stepping by `stride`. The last row only needs `width` bytes.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    bytes: &'a [u8],
    resolution: ImageXYResolution,
    stride: usize,
}

impl<'a> FrameView<'a> {
    pub fn new(
        bytes: &'a [u8],
        width: u32,
        height: u32,
        stride: usize,
        format: PixelFormat,
    ) -> Result<Self, SudocamDataError> {
        if format != PixelFormat::Grayscale8 {
            return Err(SudocamDataError::BadParameters(format!(
                "Frame pixel format must be Grayscale8, got {}",
                format
            )));
        }
        let resolution = ImageXYResolution::new(width, height)?;
        if stride < width as usize {
            return Err(SudocamDataError::BadParameters(format!(
                "Frame stride {} is smaller than its width {}",
                stride, width
            )));
        }
        let required = stride * (height as usize - 1) + width as usize;
        if bytes.len() < required {
            return Err(SudocamDataError::DimensionMismatch {
                expected: required,
                actual: bytes.len(),
            });
        }
        Ok(FrameView {
            bytes,
            resolution,
            stride,
        })
    }

    pub fn get_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn get_resolution(&self) -> ImageXYResolution {
        self.resolution
    }

    pub fn get_width(&self) -> u32 {
        self.resolution.width
    }

    pub fn get_height(&self) -> u32 {
        self.resolution.height
    }

    /// Bytes between the starts of consecutive rows
    pub fn get_stride(&self) -> usize {
        self.stride
    }

    /// The `width` pixels of row `y`
    pub fn row(&self, y: u32) -> Option<&'a [u8]> {
        if y >= self.resolution.height {
            return None;
        }
        let start = y as usize * self.stride;
        self.bytes.get(start..start + self.resolution.width as usize)
    }
}

impl Display for FrameView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "FrameView({}, stride {})", self.resolution, self.stride)
    }
}

/// A frame held by the caller between acquisition and release
pub trait SensorFrame {
    /// Validated view over the frame's pixels
    fn view(&self) -> Result<FrameView<'_>, SudocamDataError>;
}

/// Sensor capability: bring up once, then acquire and release frames
pub trait FrameSource {
    /// Frame handle handed out by [`FrameSource::acquire`]
    type Frame: SensorFrame;

    /// Platform-specific error type
    type Error: Display;

    /// Bring up the sensor
    ///
    /// # Returns
    /// Ok(()) or error. An error here means no frame can ever be acquired.
    fn initialize(&mut self) -> Result<(), Self::Error>;

    /// Block until a frame is available
    ///
    /// # Returns
    /// The frame, or `None` if the sensor could not produce one
    fn acquire(&mut self) -> Option<Self::Frame>;

    /// Hand a frame back to the sensor
    fn release(&mut self, frame: Self::Frame);
}

/// Heap-owned grayscale frame, used by host platforms and tests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedFrame {
    bytes: Vec<u8>,
    width: u32,
    height: u32,
    stride: usize,
}

impl OwnedFrame {
    /// Tightly packed frame (`stride == width`)
    pub fn new(bytes: Vec<u8>, width: u32, height: u32) -> Result<Self, SudocamDataError> {
        Self::with_stride(bytes, width, height, width as usize)
    }

    pub fn with_stride(
        bytes: Vec<u8>,
        width: u32,
        height: u32,
        stride: usize,
    ) -> Result<Self, SudocamDataError> {
        FrameView::new(&bytes, width, height, stride, PixelFormat::Grayscale8)?;
        Ok(OwnedFrame {
            bytes,
            width,
            height,
            stride,
        })
    }

    pub fn get_width(&self) -> u32 {
        self.width
    }

    pub fn get_height(&self) -> u32 {
        self.height
    }
}

impl SensorFrame for OwnedFrame {
    fn view(&self) -> Result<FrameView<'_>, SudocamDataError> {
        FrameView::new(
            &self.bytes,
            self.width,
            self.height,
            self.stride,
            PixelFormat::Grayscale8,
        )
    }
}
