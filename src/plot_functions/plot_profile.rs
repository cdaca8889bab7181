// src/plot_functions/plot_profile.rs

use ndarray::{ArrayView3, Axis};
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::path::PathBuf;

use crate::colormap::{parse_color, series_color, ColorLimits, Colormap};
use crate::constants::{
    DEFAULT_HORIZONTAL_CUT_ROW, DEFAULT_VERTICAL_CUT_COLUMN, FULL_PIXEL_MAX_TICKS,
    LINE_WIDTH_PLOT, PROFILE_CHART_SIZE_IN, PROFILE_CLIM, PROFILE_CMAP, PROFILE_LINE_COLOR,
};
use crate::data_analysis::axis_ticks::nice_pixel_ticks;
use crate::data_analysis::profile::stack_profiles;
use crate::error::{Error, Result};
use crate::font_config::FONTS_PROFILE;
use crate::plot_framework::{
    calculate_range, render_image_panel, render_line_chart, AxisSpec, CutLine, Figure,
    ImagePanel, LineStyle, PlotConfig, PlotSeries, RenderContext,
};
use crate::types::{Orientation, Uid};

/// Settings for one profile plot. Missing fields take the defaults of the
/// orientation being plotted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileOptions {
    /// Row (horizontal) or column (vertical) of the cut; `None` for the default.
    pub coordinate: Option<usize>,
    pub clim: ColorLimits,
    pub cmap: Colormap,
    pub line_color: String,
    /// One style per frame; all solid when absent.
    pub line_styles: Option<Vec<LineStyle>>,
}

impl Default for ProfileOptions {
    fn default() -> Self {
        ProfileOptions {
            coordinate: None,
            clim: PROFILE_CLIM.into(),
            cmap: PROFILE_CMAP,
            line_color: PROFILE_LINE_COLOR.to_string(),
            line_styles: None,
        }
    }
}

impl ProfileOptions {
    pub fn at(coordinate: usize) -> Self {
        ProfileOptions {
            coordinate: Some(coordinate),
            ..Default::default()
        }
    }

    pub fn coordinate_for(&self, orientation: Orientation) -> usize {
        self.coordinate.unwrap_or(match orientation {
            Orientation::Horizontal => DEFAULT_HORIZONTAL_CUT_ROW,
            Orientation::Vertical => DEFAULT_VERTICAL_CUT_COLUMN,
        })
    }
}

/// Files written by one profile plot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileOutput {
    pub image_path: PathBuf,
    pub intensity_path: PathBuf,
}

pub fn profile_file_names(uid: &Uid, orientation: Orientation) -> (String, String) {
    let stem = uid.stem();
    let tag = orientation.file_tag();
    (
        format!("{stem}_profile_{tag}_image.tif"),
        format!("{stem}_profile_{tag}_intensity.tif"),
    )
}

/// Axes of the overlaid intensity chart. The traces are log10 values, but
/// the axis keeps the beamline's plain "Intensity" label.
fn intensity_chart_config(
    series: Vec<PlotSeries>,
    x_max: usize,
    y_range: Range<f64>,
) -> PlotConfig {
    PlotConfig {
        title: String::new(),
        x_range: 0.0..(x_max.max(1) as f64),
        y_range,
        series,
        x_label: "Transverse Position (pixel)".to_string(),
        y_label: "Intensity".to_string(),
    }
}

/// Show every frame with the cut marked, then overlay the log10 intensity
/// along the cut for all frames in one chart.
///
/// The last frame's image and the intensity chart are saved as TIFF.
pub fn plot_profile(
    ctx: &mut RenderContext,
    stack: &ArrayView3<f64>,
    uid: &Uid,
    orientation: Orientation,
    options: &ProfileOptions,
) -> Result<ProfileOutput> {
    let coordinate = options.coordinate_for(orientation);
    match orientation {
        Orientation::Horizontal => log::info!("Horizontal cut at row {coordinate}"),
        Orientation::Vertical => log::info!("Vertical cut at column {coordinate}"),
    }

    let frames = stack.len_of(Axis(0));
    if frames == 0 {
        return Err(Error::EmptyStack);
    }
    let labels = uid.frame_labels(frames)?;
    let styles = match &options.line_styles {
        Some(styles) if styles.len() != frames => {
            return Err(Error::LineStyleCountMismatch {
                frames,
                styles: styles.len(),
            })
        }
        Some(styles) => styles.clone(),
        None => vec![LineStyle::Solid; frames],
    };
    let line_color = parse_color(&options.line_color)?;
    // Validates the cut against the frame size before anything is drawn.
    let profiles = stack_profiles(stack, orientation, coordinate)?;

    let (image_name, intensity_name) = profile_file_names(uid, orientation);
    let fonts = FONTS_PROFILE.at_dpi(ctx.dpi());

    let mut last_image: Option<Figure> = None;
    for (index, frame) in stack.outer_iter().enumerate() {
        let (rows, cols) = frame.dim();
        let panel = ImagePanel {
            image: frame,
            clim: options.clim,
            cmap: options.cmap,
            title: None,
            fonts,
            x_pixel: AxisSpec::new("", nice_pixel_ticks(cols, FULL_PIXEL_MAX_TICKS)),
            y_pixel: AxisSpec::new("", nice_pixel_ticks(rows, FULL_PIXEL_MAX_TICKS)),
            x_physical: None,
            y_physical: None,
            outward_px: (0, 0),
            cut: Some(CutLine {
                orientation,
                coordinate,
                color: line_color,
            }),
            grid: false,
        };
        let figure = render_image_panel(format!("{} frame {index}", labels[index]), &panel)?;
        ctx.show(&figure)?;
        last_image = Some(figure);
    }
    let image_path = match &last_image {
        Some(figure) => ctx.save(figure, &image_name)?,
        None => return Err(Error::EmptyStack),
    };

    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    let mut x_max = 0usize;
    let mut series = Vec::with_capacity(frames);
    for (index, profile) in profiles.iter().enumerate() {
        x_max = x_max.max(profile.len().saturating_sub(1));
        let mut data = Vec::with_capacity(profile.len());
        let mut dropped = 0usize;
        for (x, &y) in profile.iter().enumerate() {
            if y.is_finite() {
                y_min = y_min.min(y);
                y_max = y_max.max(y);
            } else {
                dropped += 1;
            }
            data.push((x as f64, y));
        }
        if dropped > 0 {
            log::debug!("{}: {dropped} non-finite samples left as gaps.", labels[index]);
        }
        series.push(PlotSeries {
            data,
            label: labels[index].clone(),
            color: series_color(index),
            stroke_width: LINE_WIDTH_PLOT,
            style: styles[index],
        });
    }
    if !y_min.is_finite() {
        log::warn!("No positive samples along the cut; intensity chart is empty.");
        y_min = 0.0;
        y_max = 0.0;
    }
    let (y_lo, y_hi) = calculate_range(y_min, y_max);

    let config = intensity_chart_config(series, x_max, y_lo..y_hi);
    let size = (
        ctx.inches_to_px(PROFILE_CHART_SIZE_IN.0),
        ctx.inches_to_px(PROFILE_CHART_SIZE_IN.1),
    );
    let chart = render_line_chart(intensity_name.clone(), size, &config, fonts)?;
    ctx.show(&chart)?;
    let intensity_path = ctx.save(&chart, &intensity_name)?;

    Ok(ProfileOutput {
        image_path,
        intensity_path,
    })
}

/// Horizontal profile with the beamline defaults (row 1200).
pub fn plot_profile_horiz(
    ctx: &mut RenderContext,
    stack: &ArrayView3<f64>,
    uid: &Uid,
) -> Result<ProfileOutput> {
    plot_profile(ctx, stack, uid, Orientation::Horizontal, &ProfileOptions::default())
}

/// Vertical profile with the beamline defaults (column 1100).
pub fn plot_profile_vert(
    ctx: &mut RenderContext,
    stack: &ArrayView3<f64>,
    uid: &Uid,
) -> Result<ProfileOutput> {
    plot_profile(ctx, stack, uid, Orientation::Vertical, &ProfileOptions::default())
}


// src/plot_functions/plot_profile.rs
