// src/data_analysis/crop.rs

use ndarray::{s, ArrayView2};

use crate::error::{Error, Result};
use crate::types::CropRect;

/// Slice `image` to `rect`, rows `x1..x2` and columns `y1..y2`.
///
/// The returned view borrows the source; no pixels are copied.
pub fn crop_image<'a>(image: &ArrayView2<'a, f64>, rect: &CropRect) -> Result<ArrayView2<'a, f64>> {
    let (rows, cols) = image.dim();
    if rect.x2 > rows || rect.y2 > cols {
        return Err(Error::CropOutOfBounds {
            rect: *rect,
            rows,
            cols,
        });
    }
    if rect.is_empty() {
        return Err(Error::EmptyCrop { rect: *rect });
    }
    let view = image.clone().slice_move(s![rect.x1..rect.x2, rect.y1..rect.y2]);
    log::debug!("Cropped {rows}x{cols} image to {rect} -> {:?}", view.dim());
    Ok(view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    #[test]
    fn test_crop_published_rectangle() {
        let image = Array2::<f64>::zeros((2000, 2000));
        let cropped = crop_image(&image.view(), &CropRect::new(900, 1650, 750, 1400)).unwrap();
        assert_eq!(cropped.dim(), (750, 650));
    }

    #[test]
    fn test_crop_picks_expected_pixels() {
        let image = Array2::from_shape_fn((4, 5), |(r, c)| (r * 10 + c) as f64);
        let cropped = crop_image(&image.view(), &CropRect::new(1, 3, 2, 5)).unwrap();
        assert_eq!(cropped.dim(), (2, 3));
        assert_eq!(cropped[[0, 0]], 12.0);
        assert_eq!(cropped[[1, 2]], 24.0);
    }

    #[test]
    fn test_crop_out_of_bounds() {
        let image = Array2::<f64>::zeros((10, 20));
        let err = crop_image(&image.view(), &CropRect::new(0, 11, 0, 5)).unwrap_err();
        assert!(matches!(err, Error::CropOutOfBounds { rows: 10, cols: 20, .. }));
        let err = crop_image(&image.view(), &CropRect::new(0, 5, 0, 21)).unwrap_err();
        assert!(matches!(err, Error::CropOutOfBounds { .. }));
    }

    #[test]
    fn test_crop_inverted_is_empty() {
        let image = Array2::<f64>::zeros((10, 10));
        let err = crop_image(&image.view(), &CropRect::new(5, 2, 0, 5)).unwrap_err();
        assert!(matches!(err, Error::EmptyCrop { .. }));
    }
}

// src/data_analysis/crop.rs
