// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

mod prediction_grid;

pub use prediction_grid::PredictionGrid;
