// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Bench replay of a captured sensor frame.
//!
//! Runs crop → extract → normalize → flip → quantize for every cell of the board using the
//! given quantization parameters, prints the requested diagnostics and a JSON summary of every
//! cell on stdout. Canonical cells can be exported as PNG files for inspection.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{info, warn};

use sudocam::config::load_config_or_default;
use sudocam::hal::platforms::ImageFileFrameSource;
use sudocam::hal::{FrameSource, SensorFrame};
use sudocam::observability::{init_logging, CrateDebugFlags, LoggingConfig};
use sudocam::preprocessing::diagnostics;
use sudocam::preprocessing::processing::{CellContrast, FrameCropper, Quantizer};
use sudocam::preprocessing::{DiagnosticsSettings, PipelineSettings, PredictionAssembler, ScratchArena};
use sudocam::structures::constants::{CANONICAL_CELL_ELEMENTS, CANONICAL_CELL_SIDE, DIAGNOSTIC_DOWNSAMPLE};
use sudocam::structures::descriptors::{CellCoordinate, QuantizationParameters};

/// sudocam replay - run the board preprocessing pipeline on a captured frame
#[derive(Parser, Debug)]
#[command(name = "sudocam-replay", version, author, long_about = None)]
struct Args {
    /// Image file holding one full sensor frame (converted to grayscale)
    frame: PathBuf,

    /// Configuration file (default: search for sudocam_configuration.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Input tensor quantization scale
    #[arg(long, default_value_t = 1.0 / 255.0)]
    scale: f32,

    /// Input tensor quantization zero point
    #[arg(long, default_value_t = -128, allow_hyphen_values = true)]
    zero_point: i32,

    /// Write every canonical cell as a 28x28 PNG into this directory
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Override the grid size
    #[arg(long)]
    grid_size: Option<u32>,

    /// Override the low-contrast threshold
    #[arg(long)]
    low_contrast_threshold: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Emit every diagnostic dump
    #[arg(long, default_value_t = false)]
    dump_all: bool,

    /// Enable debug logging for a crate (repeatable, e.g. sudocam-preprocessing)
    #[arg(long = "debug-crate", value_name = "CRATE")]
    debug_crates: Vec<String>,
}

#[derive(Debug, Serialize)]
struct CellSummary {
    row: u32,
    column: u32,
    #[serde(flatten)]
    contrast: CellContrast,
    /// Tensor entries above the zero point
    lit_inputs: usize,
}

#[derive(Debug, Serialize)]
struct ReplaySummary {
    frame: String,
    board: String,
    quantization: QuantizationParameters,
    blank_cells: usize,
    cells: Vec<CellSummary>,
}

fn cli_overrides(args: &Args) -> HashMap<String, String> {
    let mut overrides = HashMap::new();
    if let Some(grid_size) = args.grid_size {
        overrides.insert("grid_size".to_string(), grid_size.to_string());
    }
    if let Some(threshold) = args.low_contrast_threshold {
        overrides.insert("low_contrast_threshold".to_string(), threshold.to_string());
    }
    if let Some(level) = &args.log_level {
        overrides.insert("log_level".to_string(), level.clone());
    }
    overrides
}

fn debug_flags(args: &Args) -> CrateDebugFlags {
    let mut flags =
        CrateDebugFlags::from_args(args.debug_crates.iter().map(|name| format!("--debug-{}", name)));
    if let Ok(value) = std::env::var("SUDOCAM_DEBUG") {
        flags.merge_env_value(&value);
    }
    flags
}

fn export_cell(directory: &Path, coordinate: CellCoordinate, pixels: Vec<u8>) -> Result<()> {
    let side = CANONICAL_CELL_SIDE as u32;
    let image = image::GrayImage::from_raw(side, side, pixels)
        .context("Canonical cell buffer has the wrong size")?;
    let path = directory.join(format!("cell_{}_{}.png", coordinate.row, coordinate.column));
    image
        .save(&path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config_or_default(args.config.as_deref(), Some(&cli_overrides(&args)))
        .context("Failed to load configuration")?;
    let logging = LoggingConfig::from_parts(&config.logging.level, &config.logging.format)?;
    init_logging(&debug_flags(&args), &logging)?;

    let mut settings = PipelineSettings::try_from(&config)?;
    if args.dump_all {
        settings.diagnostics = DiagnosticsSettings::everything();
    }
    let quantizer = Quantizer::new(QuantizationParameters::new(args.scale, args.zero_point)?);
    info!("Replaying {} with {}", args.frame.display(), settings.geometry);

    if let Some(directory) = &args.export_dir {
        std::fs::create_dir_all(directory)
            .with_context(|| format!("Failed to create {}", directory.display()))?;
    }

    let mut source = ImageFileFrameSource::new(&args.frame);
    source.initialize()?;
    let frame = source
        .acquire()
        .context("Frame source produced no frame")?;

    let mut arena = ScratchArena::new(&settings.geometry);
    let cropped = frame
        .view()
        .and_then(|view| FrameCropper::new(settings.geometry.get_crop()).crop_into(&view, arena.get_board_view_mut()));
    source.release(frame);
    cropped.context("Frame cannot hold the configured board")?;

    let dumps = settings.diagnostics;
    if dumps.dump_cropped_board {
        diagnostics::emit(&diagnostics::render_cropped_hex(arena.get_board_view()));
        diagnostics::emit(&diagnostics::render_cropped_downsampled(
            arena.get_board_view(),
            DIAGNOSTIC_DOWNSAMPLE as usize,
        ));
    }
    if dumps.dump_board_ascii {
        diagnostics::emit(&diagnostics::render_board_ascii(
            arena.get_board_view(),
            dumps.ascii_step as usize,
        ));
    }

    let assembler = PredictionAssembler::new(&settings);
    let grid_size = assembler.get_grid_size();
    let mut tensor = vec![0i8; CANONICAL_CELL_ELEMENTS];
    let mut cells = Vec::with_capacity(grid_size.number_cells());

    let (board, scratch) = arena.split_for_cells();
    for coordinate in grid_size.iter_cells() {
        let contrast = assembler.prepare_cell(board, coordinate, scratch, &quantizer, &mut tensor)?;

        if dumps.dump_corner_cells {
            if let Some(label) = diagnostics::corner_label(coordinate, grid_size) {
                diagnostics::emit(&diagnostics::render_cell_hex(label, scratch.get_canonical_view()));
            }
        }
        if dumps.dump_cell_ascii {
            diagnostics::emit(&diagnostics::render_cell_ascii(coordinate, scratch.get_canonical_view()));
        }
        if dumps.dump_model_input {
            diagnostics::emit(&diagnostics::render_model_input_ascii(coordinate, &tensor));
        }
        if let Some(directory) = &args.export_dir {
            let pixels = scratch.get_canonical_view().iter().copied().collect();
            if let Err(err) = export_cell(directory, coordinate, pixels) {
                warn!("Skipping export of {}: {:#}", coordinate, err);
            }
        }

        let zero_point = quantizer.get_parameters().get_zero_point();
        cells.push(CellSummary {
            row: *coordinate.row,
            column: *coordinate.column,
            contrast,
            lit_inputs: tensor.iter().filter(|v| i32::from(**v) > zero_point).count(),
        });
    }

    let summary = ReplaySummary {
        frame: args.frame.display().to_string(),
        board: settings.geometry.to_string(),
        quantization: quantizer.get_parameters(),
        blank_cells: cells.iter().filter(|cell| cell.contrast.blank).count(),
        cells,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
