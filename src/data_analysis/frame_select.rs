// src/data_analysis/frame_select.rs

use ndarray::{ArrayView2, ArrayView3, Axis};
use ndarray_stats::QuantileExt;

use crate::error::{Error, Result};
use crate::types::{FrameSelection, Image, ImageStack};

/// Pick the working frame out of the recorded events.
///
/// `Index(n)` takes the first frame of event `n`; `Mean` averages every
/// frame of the first event.
pub fn select_frame(events: &[ImageStack], selection: FrameSelection) -> Result<Image> {
    match selection {
        FrameSelection::Index(index) => {
            let event = events.get(index).ok_or(Error::FrameOutOfRange {
                index,
                available: events.len(),
            })?;
            if event.len_of(Axis(0)) == 0 {
                return Err(Error::EmptyStack);
            }
            Ok(event.index_axis(Axis(0), 0).to_owned())
        }
        FrameSelection::Mean => {
            let event = events.first().ok_or(Error::EmptyStack)?;
            mean_frame(&event.view())
        }
    }
}

/// Elementwise arithmetic mean over the frames of `stack`.
pub fn mean_frame(stack: &ArrayView3<f64>) -> Result<Image> {
    stack.mean_axis(Axis(0)).ok_or(Error::EmptyStack)
}

/// Smallest and largest non-NaN sample, `None` when there are none.
pub fn frame_range(image: &ArrayView2<f64>) -> Option<(f64, f64)> {
    if image.is_empty() {
        return None;
    }
    let min = *image.min_skipnan();
    let max = *image.max_skipnan();
    if min.is_nan() || max.is_nan() {
        None
    } else {
        Some((min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{array, Array3};

    fn events() -> Vec<ImageStack> {
        vec![
            Array3::from_shape_fn((3, 2, 2), |(f, r, c)| (f * 4 + r * 2 + c) as f64),
            Array3::from_elem((1, 2, 2), 42.0),
        ]
    }

    #[test]
    fn test_select_by_index_takes_first_frame_of_event() {
        let frame = select_frame(&events(), FrameSelection::Index(1)).unwrap();
        assert_eq!(frame.dim(), (2, 2));
        assert!(frame.iter().all(|&v| v == 42.0));
        let frame = select_frame(&events(), FrameSelection::Index(0)).unwrap();
        assert_eq!(frame, array![[0.0, 1.0], [2.0, 3.0]]);
    }

    #[test]
    fn test_select_out_of_range() {
        let err = select_frame(&events(), FrameSelection::Index(2)).unwrap_err();
        assert!(matches!(
            err,
            Error::FrameOutOfRange {
                index: 2,
                available: 2
            }
        ));
    }

    #[test]
    fn test_mean_is_elementwise_over_frames() {
        let frame = select_frame(&events(), FrameSelection::Mean).unwrap();
        // Frames hold base, base + 4, base + 8: mean is base + 4.
        assert_relative_eq!(frame[[0, 0]], 4.0);
        assert_relative_eq!(frame[[0, 1]], 5.0);
        assert_relative_eq!(frame[[1, 0]], 6.0);
        assert_relative_eq!(frame[[1, 1]], 7.0);
    }

    #[test]
    fn test_mean_of_empty_stack() {
        let stack = Array3::<f64>::zeros((0, 2, 2));
        assert!(matches!(mean_frame(&stack.view()), Err(Error::EmptyStack)));
        assert!(matches!(
            select_frame(&[], FrameSelection::Mean),
            Err(Error::EmptyStack)
        ));
    }

    #[test]
    fn test_frame_range_skips_nan() {
        let image = array![[f64::NAN, 3.0], [-1.0, 8.5]];
        assert_eq!(frame_range(&image.view()), Some((-1.0, 8.5)));
        let all_nan = array![[f64::NAN]];
        assert_eq!(frame_range(&all_nan.view()), None);
    }
}

// src/data_analysis/frame_select.rs
