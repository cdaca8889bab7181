// src/plot_functions/display_image.rs

use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::colormap::{ColorLimits, Colormap};
use crate::constants::{
    DISPLAY_CLIM, DISPLAY_CMAP, EIGER_MM_PER_PIXEL, FULL_MM_AXIS_OUTWARD_PT, FULL_MM_TICK_STEP,
    FULL_PIXEL_MAX_TICKS,
};
use crate::data_analysis::axis_ticks::{nice_pixel_ticks, DualAxis};
use crate::error::Result;
use crate::font_config::FONTS_FULL_SIZE;
use crate::plot_framework::{render_image_panel, AxisSpec, ImagePanel, RenderContext};
use crate::types::Uid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    pub clim: ColorLimits,
    pub cmap: Colormap,
    /// Detector pixel pitch.
    pub mm_per_pixel: f64,
    pub mm_tick_step: usize,
    /// Gridlines at the pixel ticks.
    pub grid: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        DisplayOptions {
            clim: DISPLAY_CLIM.into(),
            cmap: DISPLAY_CMAP,
            mm_per_pixel: EIGER_MM_PER_PIXEL,
            mm_tick_step: FULL_MM_TICK_STEP,
            grid: false,
        }
    }
}

pub fn display_file_name(uid: &Uid) -> String {
    format!("{}.tif", uid.stem())
}

/// Build the full-size panel: pixel axes plus millimetre axes drawn outward
/// below and left of the image.
pub fn full_size_panel<'a>(
    ctx: &RenderContext,
    image: ArrayView2<'a, f64>,
    uid: &Uid,
    options: &DisplayOptions,
) -> Result<ImagePanel<'a>> {
    let dual = DualAxis::new(options.mm_per_pixel)?;
    let (height, width) = image.dim();

    let x_physical = dual.physical_ticks(width, options.mm_tick_step);
    let y_physical = dual.physical_ticks(height, options.mm_tick_step);
    log::debug!(
        "Full-size display {width}x{height}: {} mm ticks across, {} down",
        x_physical.len(),
        y_physical.len()
    );

    Ok(ImagePanel {
        image,
        clim: options.clim,
        cmap: options.cmap,
        title: Some(format!("UID: {uid}")),
        fonts: FONTS_FULL_SIZE.at_dpi(ctx.dpi()),
        x_pixel: AxisSpec::new("Pixels", nice_pixel_ticks(width, FULL_PIXEL_MAX_TICKS)),
        y_pixel: AxisSpec::new("Pixels", nice_pixel_ticks(height, FULL_PIXEL_MAX_TICKS)),
        x_physical: Some(AxisSpec::new("mm", x_physical)),
        y_physical: Some(AxisSpec::new("mm", y_physical)),
        outward_px: (
            ctx.points_to_px(FULL_MM_AXIS_OUTWARD_PT.0),
            ctx.points_to_px(FULL_MM_AXIS_OUTWARD_PT.1),
        ),
        cut: None,
        grid: options.grid,
    })
}

/// Display a detector frame at native resolution with dual pixel/mm axes
/// and save it as `<uid>.tif`.
pub fn display_image_in_actual_size(
    ctx: &mut RenderContext,
    image: &ArrayView2<f64>,
    uid: &Uid,
    options: &DisplayOptions,
) -> Result<PathBuf> {
    let panel = full_size_panel(ctx, image.view(), uid, options)?;
    let file_name = display_file_name(uid);
    let figure = render_image_panel(file_name.clone(), &panel)?;
    ctx.show(&figure)?;
    ctx.save(&figure, &file_name)
}


// src/plot_functions/display_image.rs
