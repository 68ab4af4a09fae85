// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Scripted sensor and classifier doubles shared by the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;

use ndarray::Array2;
use sudocam_hal::{DigitClassifier, FrameSource, OwnedFrame};
use sudocam_structures::constants::{CROP_HEIGHT, CROP_LEFT, CROP_TOP, CROP_WIDTH};
use sudocam_structures::descriptors::QuantizationParameters;

pub const FRAME_WIDTH: u32 = 320;
pub const FRAME_HEIGHT: u32 = 240;

/// 180x180 board, all 0 except a 45x45 block of 255 at x 90..135, y 67..112.
///
/// Horizontally the block covers grid column 2 exactly. Vertically it straddles rows 1 and 2:
/// local rows 22..45 of cell (1,2) and 0..22 of cell (2,2).
///
/// A block aligned to a single cell would be flat inside that cell and come out blank, so the
/// block must straddle two cells to give each of them contrast.
pub fn straddling_block_board() -> Array2<u8> {
    Array2::from_shape_fn((CROP_HEIGHT as usize, CROP_WIDTH as usize), |(y, x)| {
        if (90..135).contains(&x) && (67..112).contains(&y) {
            255
        } else {
            0
        }
    })
}

/// QVGA frame with `board` placed at the reference crop rectangle
pub fn frame_with_board(board: &Array2<u8>) -> OwnedFrame {
    let mut bytes = vec![77u8; (FRAME_WIDTH * FRAME_HEIGHT) as usize];
    for ((y, x), value) in board.indexed_iter() {
        let fy = CROP_TOP as usize + y;
        let fx = CROP_LEFT as usize + x;
        bytes[fy * FRAME_WIDTH as usize + fx] = *value;
    }
    OwnedFrame::new(bytes, FRAME_WIDTH, FRAME_HEIGHT).unwrap()
}

pub struct ScriptedSource {
    script: VecDeque<Option<OwnedFrame>>,
    init_failure: Option<String>,
    pub initialize_calls: usize,
    pub acquired: usize,
    pub released: usize,
}

impl ScriptedSource {
    /// Hands out the scripted results in order, `None` once the script is exhausted
    pub fn new(script: Vec<Option<OwnedFrame>>) -> Self {
        ScriptedSource {
            script: script.into(),
            init_failure: None,
            initialize_calls: 0,
            acquired: 0,
            released: 0,
        }
    }

    pub fn failing_init(reason: &str) -> Self {
        ScriptedSource {
            init_failure: Some(reason.to_string()),
            ..ScriptedSource::new(Vec::new())
        }
    }
}

impl FrameSource for ScriptedSource {
    type Frame = OwnedFrame;
    type Error = String;

    fn initialize(&mut self) -> Result<(), Self::Error> {
        self.initialize_calls += 1;
        match &self.init_failure {
            Some(reason) => Err(reason.clone()),
            None => Ok(()),
        }
    }

    fn acquire(&mut self) -> Option<Self::Frame> {
        let frame = self.script.pop_front().flatten()?;
        self.acquired += 1;
        Some(frame)
    }

    fn release(&mut self, _frame: Self::Frame) {
        self.released += 1;
    }
}

/// Records every input tensor and answers `call index + 1`, failing on one call if asked.
pub struct RecordingClassifier {
    quantization: QuantizationParameters,
    input: Vec<i8>,
    fail_on_call: Option<usize>,
    last_label: usize,
    pub tensors: Vec<Vec<i8>>,
}

impl RecordingClassifier {
    pub fn new() -> Self {
        RecordingClassifier {
            quantization: QuantizationParameters::new(1.0 / 255.0, -128).unwrap(),
            input: vec![0; 784],
            fail_on_call: None,
            last_label: 0,
            tensors: Vec::new(),
        }
    }

    pub fn failing_on_call(call: usize) -> Self {
        RecordingClassifier {
            fail_on_call: Some(call),
            ..RecordingClassifier::new()
        }
    }

    pub fn calls(&self) -> usize {
        self.tensors.len()
    }
}

impl DigitClassifier for RecordingClassifier {
    type Error = String;

    fn input_quantization(&self) -> QuantizationParameters {
        self.quantization
    }

    fn input_tensor_mut(&mut self) -> &mut [i8] {
        &mut self.input
    }

    fn predict(&mut self) -> Result<(), Self::Error> {
        let call = self.tensors.len();
        self.tensors.push(self.input.clone());
        if self.fail_on_call == Some(call) {
            return Err("interpreter invoke failed".to_string());
        }
        self.last_label = call + 1;
        Ok(())
    }

    fn predicted_class(&self) -> usize {
        self.last_label
    }
}
