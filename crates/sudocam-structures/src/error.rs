// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/// Common error type for sudocam data operations.
///
/// Raised by descriptor constructors and the numeric preprocessing stages when a
/// precondition (buffer size, rectangle bounds, grid divisibility, quantization range)
/// does not hold.
///
/// # Examples
/// ```
/// use sudocam_structures::SudocamDataError;
///
/// fn validate_count(count: u32) -> Result<(), SudocamDataError> {
///     if count == 0 {
///         return Err(SudocamDataError::BadParameters("Count must be > 0".into()));
///     }
///     Ok(())
/// }
///
/// assert!(validate_count(0).is_err());
/// assert!(validate_count(5).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SudocamDataError {
    /// Invalid parameters provided to a function
    #[error("Bad Parameters: {0}")]
    BadParameters(String),
    /// A buffer or tensor does not have the number of elements the operation requires
    #[error("Dimension Mismatch: expected {expected} elements, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    /// Internal error indicating a bug (please report)
    #[error("Internal Error, please raise an issue on Github: {0}")]
    InternalError(String),
}
