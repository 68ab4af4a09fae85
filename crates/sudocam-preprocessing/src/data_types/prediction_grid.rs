// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use serde::Serialize;
use std::fmt::Display;
use sudocam_structures::descriptors::{GridColumnIndex, GridRowIndex, GridSize};
use sudocam_structures::SudocamDataError;

/// N x N class labels of one activation, indexed by corrected row (row 0 is the top of the
/// board as a person sees it) and column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredictionGrid {
    grid_size: GridSize,
    labels: Vec<usize>,
}

impl PredictionGrid {
    /// Grid with every label set to 0
    pub fn new(grid_size: GridSize) -> Self {
        PredictionGrid {
            grid_size,
            labels: vec![0; grid_size.number_cells()],
        }
    }

    pub fn get_grid_size(&self) -> GridSize {
        self.grid_size
    }

    pub fn get(&self, row: GridRowIndex, column: GridColumnIndex) -> Option<usize> {
        let index = self.index_of(row, column)?;
        self.labels.get(index).copied()
    }

    pub fn set(
        &mut self,
        row: GridRowIndex,
        column: GridColumnIndex,
        label: usize,
    ) -> Result<(), SudocamDataError> {
        let index = self.index_of(row, column).ok_or_else(|| {
            SudocamDataError::BadParameters(format!(
                "Row {} column {} is outside of {}!",
                row, column, self.grid_size
            ))
        })?;
        self.labels[index] = label;
        Ok(())
    }

    /// Labels one row at a time, top row first
    pub fn rows(&self) -> impl Iterator<Item = &[usize]> {
        self.labels.chunks(*self.grid_size as usize)
    }

    pub fn to_nested(&self) -> Vec<Vec<usize>> {
        self.rows().map(|row| row.to_vec()).collect()
    }

    fn index_of(&self, row: GridRowIndex, column: GridColumnIndex) -> Option<usize> {
        let n = *self.grid_size;
        if *row >= n || *column >= n {
            return None;
        }
        Some(*row as usize * n as usize + *column as usize)
    }
}

impl Display for PredictionGrid {
    /// One line per row, labels separated by spaces, 0 shown as `_`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, row) in self.rows().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            let rendered: Vec<String> = row
                .iter()
                .map(|label| match label {
                    0 => "_".to_string(),
                    other => other.to_string(),
                })
                .collect();
            write!(f, "{}", rendered.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_render() {
        let mut grid = PredictionGrid::new(GridSize::new(2).unwrap());
        grid.set(0.into(), 1.into(), 7).unwrap();
        grid.set(1.into(), 0.into(), 3).unwrap();

        assert_eq!(grid.get(0.into(), 1.into()), Some(7));
        assert_eq!(grid.get(2.into(), 0.into()), None);
        assert_eq!(grid.to_string(), "_ 7\n3 _");
        assert_eq!(grid.to_nested(), vec![vec![0, 7], vec![3, 0]]);
    }

    #[test]
    fn test_out_of_range_set_is_rejected() {
        let mut grid = PredictionGrid::new(GridSize::new(4).unwrap());
        assert!(grid.set(0.into(), 4.into(), 1).is_err());
    }

    #[test]
    fn test_serializes_grid_size_and_labels() {
        let mut grid = PredictionGrid::new(GridSize::new(2).unwrap());
        grid.set(1.into(), 1.into(), 9).unwrap();
        let json = serde_json::to_value(&grid).unwrap();
        assert_eq!(json["grid_size"], 2);
        assert_eq!(json["labels"], serde_json::json!([0, 0, 0, 9]));
    }
}
