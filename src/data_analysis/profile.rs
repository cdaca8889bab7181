// src/data_analysis/profile.rs

use ndarray::{Array1, ArrayView2, ArrayView3, Axis};
use std::ops::Range;

use crate::error::{Error, Result};
use crate::types::Orientation;

/// Log10 intensity along one cut through a frame.
///
/// Horizontal cuts read row `coordinate`, vertical cuts column `coordinate`.
/// Non-positive samples come back as `-inf` or `NaN`; callers plotting the
/// result get gaps at those positions.
pub fn extract_profile(
    frame: &ArrayView2<f64>,
    orientation: Orientation,
    coordinate: usize,
) -> Result<Array1<f64>> {
    let (rows, cols) = frame.dim();
    let (axis, limit) = match orientation {
        Orientation::Horizontal => (Axis(0), rows),
        Orientation::Vertical => (Axis(1), cols),
    };
    if coordinate >= limit {
        return Err(Error::CutOutOfBounds {
            orientation,
            coordinate,
            limit,
        });
    }
    Ok(frame.index_axis(axis, coordinate).mapv(f64::log10))
}

/// One log10 profile per frame of `stack`, all along the same cut.
pub fn stack_profiles(
    stack: &ArrayView3<f64>,
    orientation: Orientation,
    coordinate: usize,
) -> Result<Vec<Array1<f64>>> {
    stack
        .outer_iter()
        .map(|frame| extract_profile(&frame, orientation, coordinate))
        .collect()
}

/// Index ranges of consecutive finite samples.
pub fn finite_runs(values: &[f64]) -> Vec<Range<usize>> {
    let mut runs = Vec::new();
    let mut start: Option<usize> = None;
    for (i, v) in values.iter().enumerate() {
        match (v.is_finite(), start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                runs.push(s..i);
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        runs.push(s..values.len());
    }
    runs
}


// src/data_analysis/profile.rs
