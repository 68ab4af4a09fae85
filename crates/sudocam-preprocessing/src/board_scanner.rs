// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! One activation end to end: acquire a frame, crop the board, classify every cell, release.

use std::fmt::Display;

use sudocam_hal::{DigitClassifier, FrameSource, FrameView, SensorFrame};
use sudocam_structures::SudocamDataError;
use tracing::{error, info, warn};

use crate::assembler::PredictionAssembler;
use crate::data_types::PredictionGrid;
use crate::diagnostics;
use crate::processing::FrameCropper;
use crate::scratch::ScratchArena;
use crate::settings::PipelineSettings;
use crate::ScanError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScannerState {
    /// Sensor not brought up yet
    Uninitialized,
    Ready,
    /// Sensor bring-up failed. Permanent.
    Halted,
}

impl Display for ScannerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ScannerState::Uninitialized => "Uninitialized",
            ScannerState::Ready => "Ready",
            ScannerState::Halted => "Halted",
        };
        write!(f, "{}", name)
    }
}

/// Frame on loan from the sensor. Released exactly once, when dropped.
struct HeldFrame<'a, S: FrameSource> {
    source: &'a mut S,
    frame: Option<S::Frame>,
}

impl<S: FrameSource> HeldFrame<'_, S> {
    fn view(&self) -> Result<FrameView<'_>, SudocamDataError> {
        match &self.frame {
            Some(frame) => frame.view(),
            None => Err(SudocamDataError::InternalError("Frame already released".into())),
        }
    }
}

impl<S: FrameSource> Drop for HeldFrame<'_, S> {
    fn drop(&mut self) {
        if let Some(frame) = self.frame.take() {
            self.source.release(frame);
        }
    }
}

/// Owns a sensor, a classifier and all scratch storage, and runs activations one at a time.
pub struct BoardScanner<S: FrameSource, C: DigitClassifier> {
    source: S,
    classifier: C,
    settings: PipelineSettings,
    cropper: FrameCropper,
    assembler: PredictionAssembler,
    arena: ScratchArena,
    state: ScannerState,
    completed_activations: u64,
}

impl<S: FrameSource, C: DigitClassifier> BoardScanner<S, C> {
    pub fn new(source: S, classifier: C, settings: PipelineSettings) -> Self {
        BoardScanner {
            source,
            classifier,
            cropper: FrameCropper::new(settings.geometry.get_crop()),
            assembler: PredictionAssembler::new(&settings),
            arena: ScratchArena::new(&settings.geometry),
            settings,
            state: ScannerState::Uninitialized,
            completed_activations: 0,
        }
    }

    pub fn get_state(&self) -> ScannerState {
        self.state
    }

    pub fn get_settings(&self) -> &PipelineSettings {
        &self.settings
    }

    pub fn get_frame_source(&self) -> &S {
        &self.source
    }

    pub fn get_classifier(&self) -> &C {
        &self.classifier
    }

    pub fn get_arena(&self) -> &ScratchArena {
        &self.arena
    }

    /// Activations that produced a grid
    pub fn get_completed_activations(&self) -> u64 {
        self.completed_activations
    }

    pub fn into_parts(self) -> (S, C) {
        (self.source, self.classifier)
    }

    /// Bring up the sensor. A failure halts the scanner for good.
    pub fn bring_up(&mut self) -> Result<(), ScanError> {
        match self.state {
            ScannerState::Halted => return Err(ScanError::Halted),
            ScannerState::Ready => return Ok(()),
            ScannerState::Uninitialized => {}
        }
        match self.source.initialize() {
            Ok(()) => {
                info!("Sensor initialized, board {}", self.settings.geometry);
                self.state = ScannerState::Ready;
                Ok(())
            }
            Err(err) => {
                error!("Sensor initialization failed: {}", err);
                self.state = ScannerState::Halted;
                Err(ScanError::SensorInitFailed(err.to_string()))
            }
        }
    }

    /// Run one activation and return the corrected prediction grid.
    ///
    /// Brings the sensor up first if that has not happened yet. Whatever the outcome, an
    /// acquired frame is handed back to the sensor before this returns.
    pub fn activate(&mut self) -> Result<PredictionGrid, ScanError> {
        if self.state != ScannerState::Ready {
            self.bring_up()?;
        }

        let frame = match self.source.acquire() {
            Some(frame) => frame,
            None => {
                warn!("Frame capture failed");
                return Err(ScanError::AcquisitionFailed);
            }
        };
        let held = HeldFrame {
            source: &mut self.source,
            frame: Some(frame),
        };

        let view = held.view().map_err(ScanError::InvalidFrame)?;
        self.cropper
            .crop_into(&view, self.arena.get_board_view_mut())
            .map_err(ScanError::InvalidFrame)?;

        let dumps = self.settings.diagnostics;
        let step = dumps.ascii_step as usize;
        if dumps.dump_cropped_board {
            diagnostics::emit(&diagnostics::render_cropped_hex(self.arena.get_board_view()));
        }
        if dumps.dump_board_ascii {
            diagnostics::emit(&diagnostics::render_board_ascii(self.arena.get_board_view(), step));
        }

        let (board, cell_scratch) = self.arena.split_for_cells();
        let grid = self.assembler.assemble(board, cell_scratch, &mut self.classifier)?;

        if dumps.dump_final_grid {
            diagnostics::emit(&diagnostics::render_prediction_grid(&grid));
        }
        if dumps.dump_cropped_board {
            diagnostics::emit(&diagnostics::render_cropped_downsampled(
                self.arena.get_board_view(),
                sudocam_structures::constants::DIAGNOSTIC_DOWNSAMPLE as usize,
            ));
        }

        drop(held);
        self.completed_activations += 1;
        info!("Activation {} complete", self.completed_activations);
        Ok(grid)
    }
}
