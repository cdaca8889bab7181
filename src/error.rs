// src/error.rs

//! Error type shared by every helper in the crate.

use std::path::PathBuf;
use thiserror::Error;

use crate::types::{CropRect, Orientation};

/// Boxed error produced by the drawing layer (plotters backend and font errors).
pub type RenderError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum Error {
    /// Plain file-system failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HDF5 library failure (unwritable path, missing dataset, type mismatch).
    #[cfg(feature = "hdf5")]
    #[error("HDF5 error: {0}")]
    Hdf5(#[from] hdf5::Error),

    /// Failed to read or write a whitespace-delimited numeric file.
    #[error("text data error: {0}")]
    Csv(#[from] csv::Error),

    /// A value in a numeric text file could not be parsed.
    #[error("invalid number {value:?} at line {line} of {path}")]
    ParseNumber {
        path: PathBuf,
        line: usize,
        value: String,
    },

    /// Rows of a numeric text file have different lengths.
    #[error("ragged data in {path}: line {line} has {found} values, expected {expected}")]
    RaggedRows {
        path: PathBuf,
        line: usize,
        found: usize,
        expected: usize,
    },

    /// Failed to encode a figure as TIFF.
    #[error("failed to save figure to {path}: {source}")]
    ImageSave {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The drawing backend reported an error.
    #[error("rendering failed: {0}")]
    Render(#[from] RenderError),

    /// Array could not be reshaped into the expected dimensionality.
    #[error("array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    /// Crop rectangle reaches outside the source image.
    #[error("crop {rect} exceeds image of {rows}x{cols} (rows x cols)")]
    CropOutOfBounds {
        rect: CropRect,
        rows: usize,
        cols: usize,
    },

    /// Crop rectangle selects no pixels.
    #[error("crop {rect} is empty: expected x1 < x2 and y1 < y2")]
    EmptyCrop { rect: CropRect },

    /// Cut coordinate lies outside the frame.
    #[error("{orientation} cut at {coordinate} is outside the frame (limit {limit})")]
    CutOutOfBounds {
        orientation: Orientation,
        coordinate: usize,
        limit: usize,
    },

    /// Identifier list does not match the number of frames.
    #[error("{labels} identifiers supplied for {frames} frames")]
    LabelCountMismatch { frames: usize, labels: usize },

    /// Line style list does not match the number of frames.
    #[error("{styles} line styles supplied for {frames} frames")]
    LineStyleCountMismatch { frames: usize, styles: usize },

    /// Requested frame index does not exist.
    #[error("frame {index} requested but only {available} available")]
    FrameOutOfRange { index: usize, available: usize },

    /// No frames to work with.
    #[error("image stack is empty")]
    EmptyStack,

    /// The measurement source does not know this identifier.
    #[error("unknown measurement {uid}")]
    UnknownMeasurement { uid: String },

    /// The measurement has no field with this name.
    #[error("measurement {uid} has no field {field}")]
    UnknownField { uid: String, field: String },

    /// Stored data has a dimensionality the tools cannot interpret.
    #[error("field {field} has unsupported shape {shape:?}")]
    UnsupportedShape { field: String, shape: Vec<usize> },

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Settings file could not be read or parsed.
    #[error("failed to load settings from {path}: {reason}")]
    Config { path: PathBuf, reason: String },
}

impl Error {
    pub(crate) fn invalid(name: &str, reason: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for srw-image-tools operations.
pub type Result<T> = std::result::Result<T, Error>;

// src/error.rs
