// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

mod common;

use common::{frame_with_board, straddling_block_board, RecordingClassifier, ScriptedSource};
use ndarray::Array2;
use sudocam_hal::OwnedFrame;
use sudocam_preprocessing::{
    BoardScanner, DiagnosticsSettings, PipelineSettings, ScanError, ScannerState,
};
use sudocam_structures::descriptors::{GridColumnIndex, GridRowIndex};

fn scanner(
    source: ScriptedSource,
    classifier: RecordingClassifier,
) -> BoardScanner<ScriptedSource, RecordingClassifier> {
    BoardScanner::new(source, classifier, PipelineSettings::reference())
}

fn label_at(grid: &sudocam_preprocessing::PredictionGrid, row: u32, column: u32) -> Option<usize> {
    grid.get(GridRowIndex::from(row), GridColumnIndex::from(column))
}

#[cfg(test)]
mod test_activation {
    use super::*;

    #[test]
    fn test_successful_activation_releases_frame_once() {
        let frame = frame_with_board(&straddling_block_board());
        let mut scanner = scanner(ScriptedSource::new(vec![Some(frame)]), RecordingClassifier::new());

        let grid = scanner.activate().unwrap();

        assert_eq!(scanner.get_state(), ScannerState::Ready);
        assert_eq!(scanner.get_completed_activations(), 1);
        assert_eq!(scanner.get_frame_source().initialize_calls, 1);
        assert_eq!(scanner.get_frame_source().acquired, 1);
        assert_eq!(scanner.get_frame_source().released, 1);
        assert_eq!(scanner.get_classifier().calls(), 16);
        assert_eq!(grid.rows().count(), 4);
    }

    #[test]
    fn test_block_signal_reaches_classifier_in_expected_rows() {
        let frame = frame_with_board(&straddling_block_board());
        let mut scanner = scanner(ScriptedSource::new(vec![Some(frame)]), RecordingClassifier::new());
        scanner.activate().unwrap();

        let tensors = &scanner.get_classifier().tensors;
        for (call, tensor) in tensors.iter().enumerate() {
            let tensor = Array2::from_shape_vec((28, 28), tensor.clone()).unwrap();
            let top = tensor.rows().into_iter().take(14).flatten().copied().collect::<Vec<i8>>();
            let bottom = tensor.rows().into_iter().skip(14).flatten().copied().collect::<Vec<i8>>();
            match call {
                // cell (1,2)
                6 => {
                    assert!(top.iter().all(|v| *v == 127));
                    assert!(bottom.iter().all(|v| *v == -128));
                }
                // cell (2,2)
                10 => {
                    assert!(top.iter().all(|v| *v == -128));
                    assert!(bottom.iter().all(|v| *v == 127));
                }
                _ => assert!(tensor.iter().all(|v| *v == -128), "call {} not blank", call),
            }
        }
    }

    #[test]
    fn test_rows_are_inverted_in_the_grid() {
        let frame = frame_with_board(&straddling_block_board());
        let mut scanner = scanner(ScriptedSource::new(vec![Some(frame)]), RecordingClassifier::new());
        let grid = scanner.activate().unwrap();

        // The classifier answers call index + 1, so raw cell (r, c) is labelled 4r + c + 1.
        assert_eq!(label_at(&grid, 3, 0), Some(1));
        assert_eq!(label_at(&grid, 0, 0), Some(13));
        assert_eq!(label_at(&grid, 3, 3), Some(4));
        assert_eq!(label_at(&grid, 1, 2), Some(11));
        assert_eq!(
            grid.to_nested(),
            vec![
                vec![13, 14, 15, 16],
                vec![9, 10, 11, 12],
                vec![5, 6, 7, 8],
                vec![1, 2, 3, 4],
            ]
        );
    }

    #[test]
    fn test_every_diagnostic_dump_can_be_enabled() {
        let frame = frame_with_board(&straddling_block_board());
        let settings = PipelineSettings {
            diagnostics: DiagnosticsSettings::everything(),
            ..PipelineSettings::reference()
        };
        let mut scanner = BoardScanner::new(
            ScriptedSource::new(vec![Some(frame)]),
            RecordingClassifier::new(),
            settings,
        );
        assert!(scanner.activate().is_ok());
        assert_eq!(scanner.get_frame_source().released, 1);
    }
}

#[cfg(test)]
mod test_failures {
    use super::*;

    #[test]
    fn test_inference_failure_aborts_and_releases_once() {
        let frame = frame_with_board(&straddling_block_board());
        // call 11 is cell (2,3) in row-major order
        let mut scanner = scanner(
            ScriptedSource::new(vec![Some(frame)]),
            RecordingClassifier::failing_on_call(11),
        );

        let result = scanner.activate();

        match result {
            Err(ScanError::InferenceFailed { row, col, .. }) => assert_eq!((row, col), (2, 3)),
            other => panic!("expected inference failure, got {:?}", other),
        }
        assert_eq!(scanner.get_classifier().calls(), 12);
        assert_eq!(scanner.get_frame_source().released, 1);
        assert_eq!(scanner.get_completed_activations(), 0);
        assert_eq!(scanner.get_state(), ScannerState::Ready);
    }

    #[test]
    fn test_acquisition_failure_is_recoverable() {
        let frame = frame_with_board(&straddling_block_board());
        let mut scanner = scanner(
            ScriptedSource::new(vec![None, Some(frame)]),
            RecordingClassifier::new(),
        );

        let first = scanner.activate();
        assert_eq!(first, Err(ScanError::AcquisitionFailed));
        assert!(first.unwrap_err().is_recoverable());
        assert_eq!(scanner.get_frame_source().released, 0);
        assert_eq!(scanner.get_classifier().calls(), 0);

        assert!(scanner.activate().is_ok());
        assert_eq!(scanner.get_frame_source().released, 1);
        assert_eq!(scanner.get_frame_source().initialize_calls, 1);
    }

    #[test]
    fn test_sensor_init_failure_halts_permanently() {
        let mut scanner = scanner(
            ScriptedSource::failing_init("camera not detected"),
            RecordingClassifier::new(),
        );

        let first = scanner.activate();
        assert_eq!(
            first,
            Err(ScanError::SensorInitFailed("camera not detected".to_string()))
        );
        assert_eq!(scanner.get_state(), ScannerState::Halted);

        for _ in 0..3 {
            let again = scanner.activate();
            assert_eq!(again, Err(ScanError::Halted));
            assert!(!again.unwrap_err().is_recoverable());
        }
        assert_eq!(scanner.bring_up(), Err(ScanError::Halted));
        assert_eq!(scanner.get_frame_source().initialize_calls, 1);
        assert_eq!(scanner.get_frame_source().acquired, 0);
    }

    #[test]
    fn test_frame_too_small_for_board_is_rejected_and_released() {
        let small = OwnedFrame::new(vec![0u8; 100 * 100], 100, 100).unwrap();
        let mut scanner = scanner(ScriptedSource::new(vec![Some(small)]), RecordingClassifier::new());

        let result = scanner.activate();

        assert!(matches!(result, Err(ScanError::InvalidFrame(_))));
        assert_eq!(scanner.get_frame_source().released, 1);
        assert_eq!(scanner.get_classifier().calls(), 0);
    }
}
