// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use std::fmt::Display;
use sudocam_structures::descriptors::QuantizationParameters;

/// Digit classifier capability
///
/// The pipeline knows nothing about the model beyond this contract: a quantized input
/// buffer it writes into, a run operation, and the predicted class after a successful run.
pub trait DigitClassifier {
    /// Platform-specific error type
    type Error: Display;

    /// Affine quantization declared by the model's input tensor
    fn input_quantization(&self) -> QuantizationParameters;

    /// Writable signed-byte input tensor (28x28 for the reference model)
    fn input_tensor_mut(&mut self) -> &mut [i8];

    /// Run inference on the current input tensor
    ///
    /// # Returns
    /// Ok(()) or error. The predicted class is only meaningful after Ok.
    fn predict(&mut self) -> Result<(), Self::Error>;

    /// Index of the highest scoring class of the last successful run
    fn predicted_class(&self) -> usize;
}
