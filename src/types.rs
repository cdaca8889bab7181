// src/types.rs

use ndarray::{Array2, Array3};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// One detector frame, rows x columns.
pub type Image = Array2<f64>;

/// Ordered frames of one recorded event: frames x rows x columns.
pub type ImageStack = Array3<f64>;

/// Opaque measurement identifier: a single uid or one uid per frame.
///
/// Never interpreted, only used for titles, legends and file names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Uid(Vec<String>);

impl Uid {
    pub fn single(uid: impl Into<String>) -> Self {
        Uid(vec![uid.into()])
    }

    pub fn many<I, S>(uids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Uid(uids.into_iter().map(Into::into).collect())
    }

    pub fn entries(&self) -> &[String] {
        &self.0
    }

    /// Output file stem: the identifiers joined with `_`.
    pub fn stem(&self) -> String {
        self.0.join("_")
    }

    /// Legend labels for `frames` frames.
    ///
    /// A single identifier is reused for every frame with a `#index` suffix.
    /// A sequence must supply exactly one identifier per frame.
    pub fn frame_labels(&self, frames: usize) -> Result<Vec<String>> {
        match self.0.as_slice() {
            [single] if frames == 1 => Ok(vec![single.clone()]),
            [single] => Ok((0..frames).map(|i| format!("{single} #{i}")).collect()),
            many if many.len() == frames => Ok(many.to_vec()),
            many => Err(Error::LabelCountMismatch {
                frames,
                labels: many.len(),
            }),
        }
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stem())
    }
}

impl From<&str> for Uid {
    fn from(uid: &str) -> Self {
        Uid::single(uid)
    }
}

impl From<String> for Uid {
    fn from(uid: String) -> Self {
        Uid::single(uid)
    }
}

/// Crop rectangle in source-image pixel indices, half-open.
///
/// `x1..x2` slices the first array axis (rows) and `y1..y2` the second
/// (columns), matching the beamline's published crop defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRect {
    pub x1: usize,
    pub x2: usize,
    pub y1: usize,
    pub y2: usize,
}

impl CropRect {
    pub const fn new(x1: usize, x2: usize, y1: usize, y2: usize) -> Self {
        CropRect { x1, x2, y1, y2 }
    }

    /// (rows, columns) of the cropped image.
    pub fn dims(&self) -> (usize, usize) {
        (
            self.x2.saturating_sub(self.x1),
            self.y2.saturating_sub(self.y1),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.x1 >= self.x2 || self.y1 >= self.y2
    }
}

impl fmt::Display for CropRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}..{}, {}..{}]",
            self.x1, self.x2, self.y1, self.y2
        )
    }
}

/// Direction of a profile cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Along a row, at a fixed y.
    Horizontal,
    /// Along a column, at a fixed x.
    Vertical,
}

impl Orientation {
    /// Short tag used in output file names.
    pub fn file_tag(&self) -> &'static str {
        match self {
            Orientation::Horizontal => "horiz",
            Orientation::Vertical => "vert",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Horizontal => f.write_str("horizontal"),
            Orientation::Vertical => f.write_str("vertical"),
        }
    }
}

/// Which frame the end-to-end entry point works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameSelection {
    /// First frame of the event at this index.
    Index(usize),
    /// Elementwise mean over the frames of the first event.
    Mean,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_uid_labels_every_frame() {
        let uid = Uid::single("abc123");
        assert_eq!(uid.frame_labels(1).unwrap(), vec!["abc123"]);
        assert_eq!(
            uid.frame_labels(3).unwrap(),
            vec!["abc123 #0", "abc123 #1", "abc123 #2"]
        );
    }

    #[test]
    fn test_uid_sequence_must_match_frames() {
        let uid = Uid::many(["a", "b"]);
        assert_eq!(uid.frame_labels(2).unwrap(), vec!["a", "b"]);
        let err = uid.frame_labels(3).unwrap_err();
        assert!(matches!(
            err,
            Error::LabelCountMismatch {
                frames: 3,
                labels: 2
            }
        ));
    }

    #[test]
    fn test_uid_stem_joins_entries() {
        assert_eq!(Uid::many(["a", "b", "c"]).stem(), "a_b_c");
        assert_eq!(Uid::from("scan-7").to_string(), "scan-7");
    }

    #[test]
    fn test_crop_rect_dims() {
        let rect = CropRect::new(900, 1650, 750, 1400);
        assert_eq!(rect.dims(), (750, 650));
        assert!(!rect.is_empty());
        assert!(CropRect::new(10, 10, 0, 5).is_empty());
        assert!(CropRect::new(20, 10, 0, 5).is_empty());
    }
}

// src/types.rs
