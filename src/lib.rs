// src/lib.rs - Library interface for the image helpers

pub mod colormap;
pub mod config;
pub mod constants;
pub mod data_analysis;
pub mod data_output;
pub mod error;
pub mod font_config;
pub mod measurement;
pub mod pipeline;
pub mod plot_framework;
pub mod plot_functions;
pub mod types;

pub use config::{load_settings, PlotSettings};
pub use error::{Error, Result};
pub use measurement::{InMemorySource, MeasurementSource};
pub use pipeline::plot_eiger_for_srw;
pub use plot_framework::{FigureViewer, LogViewer, RenderContext};
pub use types::{CropRect, FrameSelection, Image, ImageStack, Orientation, Uid};

#[cfg(feature = "hdf5")]
pub use data_output::hdf5_io::save_hdf5;
#[cfg(feature = "hdf5")]
pub use measurement::Hdf5Source;

pub fn crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
