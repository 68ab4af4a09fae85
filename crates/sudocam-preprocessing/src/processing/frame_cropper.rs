// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use ndarray::ArrayViewMut2;
use sudocam_hal::FrameView;
use sudocam_structures::descriptors::CornerPoints;
use sudocam_structures::SudocamDataError;

/// Copies the calibrated board rectangle out of a sensor frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameCropper {
    crop: CornerPoints,
}

impl FrameCropper {
    pub fn new(crop: CornerPoints) -> Self {
        FrameCropper { crop }
    }

    pub fn get_crop(&self) -> CornerPoints {
        self.crop
    }

    /// Copy the crop rectangle row by row into `destination` (height x width).
    ///
    /// Rows of the source are located through the frame's stride, so the frame may be wider
    /// than the crop. The rectangle must lie inside the frame and `destination` must have exactly
    /// the crop's dimensions.
    pub fn crop_into(
        &self,
        frame: &FrameView<'_>,
        mut destination: ArrayViewMut2<'_, u8>,
    ) -> Result<(), SudocamDataError> {
        self.crop.verify_fits_in_resolution(frame.get_resolution())?;

        let width = self.crop.get_width() as usize;
        let height = self.crop.get_height() as usize;
        if destination.dim() != (height, width) {
            return Err(SudocamDataError::BadParameters(format!(
                "Crop destination is {}x{}, expected {}x{}!",
                destination.ncols(),
                destination.nrows(),
                width,
                height
            )));
        }

        let left = self.crop.upper_left.x as usize;
        for (offset, mut destination_row) in destination.outer_iter_mut().enumerate() {
            let source_y = self.crop.upper_left.y + offset as u32;
            let source_row = frame.row(source_y).ok_or_else(|| {
                SudocamDataError::InternalError(format!("Row {} missing from verified frame", source_y))
            })?;
            for (target, source) in destination_row
                .iter_mut()
                .zip(&source_row[left..left + width])
            {
                *target = *source;
            }
        }
        Ok(())
    }
}
