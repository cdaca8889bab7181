// src/plot_functions/display_cropped.rs

use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::colormap::{ColorLimits, Colormap};
use crate::constants::{
    CROPPED_MM_AXIS_OUTWARD_PT, CROPPED_MM_TICK_STEP, CROPPED_PIXEL_TICK_STEP, DEFAULT_CROP,
    DISPLAY_CLIM, DISPLAY_CMAP, EIGER_MM_PER_PIXEL,
};
use crate::data_analysis::axis_ticks::{strided_pixel_ticks, DualAxis};
use crate::data_analysis::crop::crop_image;
use crate::error::Result;
use crate::font_config::FONTS_CROPPED;
use crate::plot_framework::{render_image_panel, AxisSpec, ImagePanel, RenderContext};
use crate::types::{CropRect, Uid};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropOptions {
    pub rect: CropRect,
    pub clim: ColorLimits,
    pub cmap: Colormap,
    pub mm_per_pixel: f64,
    pub pixel_tick_step: usize,
    pub mm_tick_step: usize,
}

impl Default for CropOptions {
    fn default() -> Self {
        CropOptions {
            rect: DEFAULT_CROP,
            clim: DISPLAY_CLIM.into(),
            cmap: DISPLAY_CMAP,
            mm_per_pixel: EIGER_MM_PER_PIXEL,
            pixel_tick_step: CROPPED_PIXEL_TICK_STEP,
            mm_tick_step: CROPPED_MM_TICK_STEP,
        }
    }
}

pub fn cropped_file_name(uid: &Uid) -> String {
    format!("{}_cropped.tif", uid.stem())
}

/// Build the cropped panel. Pixel ticks are labelled in source-image
/// coordinates; the mm axes start from zero at the crop corner.
pub fn cropped_panel<'a>(
    ctx: &RenderContext,
    image: &ArrayView2<'a, f64>,
    uid: &Uid,
    options: &CropOptions,
) -> Result<ImagePanel<'a>> {
    let dual = DualAxis::new(options.mm_per_pixel)?;
    let rect = options.rect;
    let cropped = crop_image(image, &rect)?;
    let (height, width) = cropped.dim();

    Ok(ImagePanel {
        image: cropped,
        clim: options.clim,
        cmap: options.cmap,
        title: Some(format!("UID: {uid}  Cropped: {width}x{height}")),
        fonts: FONTS_CROPPED.at_dpi(ctx.dpi()),
        x_pixel: AxisSpec::new(
            "Pixels",
            strided_pixel_ticks(width, rect.y1, options.pixel_tick_step),
        ),
        y_pixel: AxisSpec::new(
            "Pixels",
            strided_pixel_ticks(height, rect.x1, options.pixel_tick_step),
        ),
        x_physical: Some(AxisSpec::new("mm", dual.physical_ticks(width, options.mm_tick_step))),
        y_physical: Some(AxisSpec::new("mm", dual.physical_ticks(height, options.mm_tick_step))),
        outward_px: (
            ctx.points_to_px(CROPPED_MM_AXIS_OUTWARD_PT.0),
            ctx.points_to_px(CROPPED_MM_AXIS_OUTWARD_PT.1),
        ),
        cut: None,
        grid: false,
    })
}

/// Crop a frame, display it with dual pixel/mm axes and save it as
/// `<uid>_cropped.tif`.
pub fn display_cropped_image(
    ctx: &mut RenderContext,
    image: &ArrayView2<f64>,
    uid: &Uid,
    options: &CropOptions,
) -> Result<PathBuf> {
    let panel = cropped_panel(ctx, image, uid, options)?;
    let file_name = cropped_file_name(uid);
    let figure = render_image_panel(file_name.clone(), &panel)?;
    ctx.show(&figure)?;
    ctx.save(&figure, &file_name)
}


// src/plot_functions/display_cropped.rs
