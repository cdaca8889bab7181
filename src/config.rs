// src/config.rs

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::colormap::{ColorLimits, Colormap};
use crate::constants::{
    CROPPED_MM_TICK_STEP, CROPPED_PIXEL_TICK_STEP, DEFAULT_CROP, DEFAULT_DETECTOR, DEFAULT_DPI,
    DISPLAY_CLIM, EIGER_MM_PER_PIXEL, FULL_MM_TICK_STEP, PROFILE_CMAP,
};
use crate::error::{Error, Result};
use crate::plot_functions::display_cropped::CropOptions;
use crate::plot_functions::display_image::DisplayOptions;
use crate::plot_functions::plot_profile::ProfileOptions;
use crate::types::{CropRect, FrameSelection};

/// Settings of the end-to-end entry point. Every field has a default, so a
/// settings file only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotSettings {
    /// Detector field to read from the measurement.
    pub detector: String,
    /// Event whose first frame is displayed and whose frames are profiled.
    pub frame: usize,
    /// Display the mean over the frames of the first event.
    pub mean: bool,
    /// Gridlines on the full-size display.
    pub grid: bool,
    /// Output resolution applied to the render context.
    pub dpi: f64,
    /// Colour limits and map of the full-size and cropped displays.
    pub clim: ColorLimits,
    pub cmap: Colormap,
    pub mm_per_pixel: f64,
    pub crop: CropRect,
    pub profile: ProfileSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSettings {
    pub horizontal: ProfileOptions,
    pub vertical: ProfileOptions,
}

impl Default for PlotSettings {
    fn default() -> Self {
        PlotSettings {
            detector: DEFAULT_DETECTOR.to_string(),
            frame: 0,
            mean: false,
            grid: false,
            dpi: DEFAULT_DPI,
            clim: DISPLAY_CLIM.into(),
            cmap: PROFILE_CMAP,
            mm_per_pixel: EIGER_MM_PER_PIXEL,
            crop: DEFAULT_CROP,
            profile: ProfileSettings::default(),
        }
    }
}

impl PlotSettings {
    pub fn selection(&self) -> FrameSelection {
        if self.mean {
            FrameSelection::Mean
        } else {
            FrameSelection::Index(self.frame)
        }
    }

    pub fn display_options(&self) -> DisplayOptions {
        DisplayOptions {
            clim: self.clim,
            cmap: self.cmap,
            mm_per_pixel: self.mm_per_pixel,
            mm_tick_step: FULL_MM_TICK_STEP,
            grid: self.grid,
        }
    }

    pub fn crop_options(&self) -> CropOptions {
        CropOptions {
            rect: self.crop,
            clim: self.clim,
            cmap: self.cmap,
            mm_per_pixel: self.mm_per_pixel,
            pixel_tick_step: CROPPED_PIXEL_TICK_STEP,
            mm_tick_step: CROPPED_MM_TICK_STEP,
        }
    }
}

pub fn load_settings(path: &Path) -> Result<PlotSettings> {
    let data = fs::read_to_string(path).map_err(|e| Error::Config {
        path: path.to_path_buf(),
        reason: format!("failed to read: {e}"),
    })?;
    serde_json::from_str(&data).map_err(|e| Error::Config {
        path: path.to_path_buf(),
        reason: format!("failed to parse: {e}"),
    })
}


// src/config.rs
