// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/// Inference module capability.
pub mod classifier;
/// Sensor frame types and the frame source capability.
pub mod frame;

pub use classifier::DigitClassifier;
pub use frame::{FrameSource, FrameView, OwnedFrame, PixelFormat, SensorFrame};
