// src/plot_framework.rs

use ndarray::ArrayView2;
use plotters::backend::BitMapBackend;
use plotters::chart::{ChartBuilder, SeriesLabelPosition};
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, IntoDrawingArea};
use plotters::element::{Circle, PathElement, Rectangle, Text};
use plotters::series::LineSeries;
use plotters::style::colors::{BLACK, WHITE};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{Color, FontTransform, IntoFont, RGBColor, TextStyle};
use serde::{Deserialize, Serialize};

use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::colormap::{ColorLimits, Colormap};
use crate::constants::{
    CHAR_WIDTH_RATIO, DASH_DOT_PATTERN_PX, DASH_PATTERN_PX, DEFAULT_DPI, DOT_PATTERN_PX,
    FIGURE_PADDING_PX, GRID_COLOR, IMAGE_GRID_COLOR, LABEL_GAP_PX, LEGEND_LINE_LENGTH_PX,
    LINE_WIDTH_CUT, LINE_WIDTH_LEGEND, TICK_LENGTH_PX,
};
use crate::data_analysis::axis_ticks::Tick;
use crate::data_analysis::profile::finite_runs;
use crate::error::{Error, RenderError, Result};
use crate::font_config::{font_tuple, points_to_px, FontPx};
use crate::types::Orientation;

/// Drawing surface every figure is rasterised onto.
pub type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

/// Calculate plot range with padding.
/// Adds 15% padding, or a fixed padding for very small ranges.
pub fn calculate_range(min_val: f64, max_val: f64) -> (f64, f64) {
    let (min, max) = if min_val <= max_val {
        (min_val, max_val)
    } else {
        (max_val, min_val)
    };
    let range = (max - min).abs();
    let padding = if range < 1e-6 { 0.5 } else { range * 0.15 };
    (min - padding, max + padding)
}

// ---------------------------------------------------------------------------
// Figures and the render context
// ---------------------------------------------------------------------------

/// A rendered figure: a named RGB raster.
#[derive(Clone)]
pub struct Figure {
    name: String,
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Figure {
    /// Rasterise a figure of `size` pixels on a white background.
    pub fn render<F>(name: impl Into<String>, size: (u32, u32), draw: F) -> Result<Self>
    where
        F: FnOnce(&Area<'_>) -> std::result::Result<(), RenderError>,
    {
        let (width, height) = (size.0.max(1), size.1.max(1));
        let mut pixels = vec![255u8; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut pixels, (width, height)).into_drawing_area();
            let outcome: std::result::Result<(), RenderError> = (|| {
                root.fill(&WHITE)?;
                draw(&root)?;
                root.present()?;
                Ok(())
            })();
            outcome?;
        }
        Ok(Figure {
            name: name.into(),
            width,
            height,
            pixels,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// RGB value at `(x, y)`, `None` outside the figure.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 3;
        Some([self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]])
    }

    pub fn save_tiff(&self, path: &Path) -> Result<()> {
        image::save_buffer_with_format(
            path,
            &self.pixels,
            self.width,
            self.height,
            image::ColorType::Rgb8,
            image::ImageFormat::Tiff,
        )
        .map_err(|source| Error::ImageSave {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Receives every figure a plot function produces, before it is saved.
///
/// This is where an interactive display plugs in.
pub trait FigureViewer {
    fn show(&mut self, figure: &Figure) -> Result<()>;
}

/// Default viewer: reports each figure in the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogViewer;

impl FigureViewer for LogViewer {
    fn show(&mut self, figure: &Figure) -> Result<()> {
        let (w, h) = figure.size();
        log::info!("  Figure '{}' rendered ({w}x{h}).", figure.name());
        Ok(())
    }
}

/// Everything a plot function needs besides its data: where files go, the
/// output resolution, and who gets to look at the figures.
pub struct RenderContext {
    output_dir: PathBuf,
    dpi: f64,
    viewer: Box<dyn FigureViewer>,
}

impl RenderContext {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        RenderContext {
            output_dir: output_dir.into(),
            dpi: DEFAULT_DPI,
            viewer: Box::new(LogViewer),
        }
    }

    pub fn with_dpi(mut self, dpi: f64) -> Result<Self> {
        self.set_dpi(dpi)?;
        Ok(self)
    }

    pub fn set_dpi(&mut self, dpi: f64) -> Result<()> {
        if !dpi.is_finite() || dpi <= 0.0 {
            return Err(Error::invalid("dpi", format!("must be positive, got {dpi}")));
        }
        self.dpi = dpi;
        Ok(())
    }

    pub fn with_viewer(mut self, viewer: impl FigureViewer + 'static) -> Self {
        self.viewer = Box::new(viewer);
        self
    }

    pub fn dpi(&self) -> f64 {
        self.dpi
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }

    pub fn points_to_px(&self, points: f64) -> i32 {
        points_to_px(points, self.dpi)
    }

    pub fn inches_to_px(&self, inches: f64) -> u32 {
        (inches * self.dpi).round().max(1.0) as u32
    }

    pub fn show(&mut self, figure: &Figure) -> Result<()> {
        self.viewer.show(figure)
    }

    /// Write `figure` as TIFF into the output directory.
    pub fn save(&self, figure: &Figure, file_name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_path(file_name);
        figure.save_tiff(&path)?;
        log::info!("  Figure saved as '{}'.", path.display());
        Ok(path)
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        RenderContext::new(".")
    }
}

// ---------------------------------------------------------------------------
// Image panels
// ---------------------------------------------------------------------------

/// Ticks and title for one image axis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisSpec {
    pub title: String,
    pub ticks: Vec<Tick>,
}

impl AxisSpec {
    pub fn new(title: impl Into<String>, ticks: Vec<Tick>) -> Self {
        AxisSpec {
            title: title.into(),
            ticks,
        }
    }

    fn widest_label(&self, font_px: i32) -> i32 {
        self.ticks
            .iter()
            .map(|t| text_width(&t.label, font_px))
            .max()
            .unwrap_or(0)
    }
}

/// Reference line drawn across an image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutLine {
    pub orientation: Orientation,
    pub coordinate: usize,
    pub color: RGBColor,
}

/// An image drawn 1:1 with pixel axes and optional millimetre twin axes.
#[derive(Debug)]
pub struct ImagePanel<'a> {
    pub image: ArrayView2<'a, f64>,
    pub clim: ColorLimits,
    pub cmap: Colormap,
    pub title: Option<String>,
    pub fonts: FontPx,
    pub x_pixel: AxisSpec,
    pub y_pixel: AxisSpec,
    pub x_physical: Option<AxisSpec>,
    pub y_physical: Option<AxisSpec>,
    /// Offset of the physical spines from the image edge: (bottom, left).
    pub outward_px: (i32, i32),
    pub cut: Option<CutLine>,
    pub grid: bool,
}

fn text_width(text: &str, font_px: i32) -> i32 {
    (text.chars().count() as f64 * font_px as f64 * CHAR_WIDTH_RATIO).ceil() as i32
}

fn optional_title_px(title: &str, font_px: i32) -> i32 {
    if title.is_empty() {
        0
    } else {
        font_px + LABEL_GAP_PX
    }
}

/// Screen geometry of an image panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelLayout {
    /// Screen position of the image's top-left pixel.
    pub origin: (i32, i32),
    pub image_size: (u32, u32),
    pub canvas: (u32, u32),
    /// Screen y of the bottom physical spine.
    pub physical_x_spine: i32,
    /// Screen x of the left physical spine.
    pub physical_y_spine: i32,
}

impl PanelLayout {
    pub fn compute(panel: &ImagePanel<'_>) -> Self {
        let (rows, cols) = panel.image.dim();
        let label = panel.fonts.label;

        // Below the image: pixel ticks, labels, title; then the mm axis.
        let x_tick_rows = if panel.x_pixel.ticks.is_empty() { 0 } else { label + LABEL_GAP_PX };
        let primary_bottom = TICK_LENGTH_PX
            + LABEL_GAP_PX
            + x_tick_rows
            + optional_title_px(&panel.x_pixel.title, label);
        let (bottom, physical_x_offset) = match &panel.x_physical {
            Some(axis) => {
                let offset = panel.outward_px.0.max(primary_bottom + LABEL_GAP_PX);
                let block = TICK_LENGTH_PX
                    + LABEL_GAP_PX
                    + label
                    + LABEL_GAP_PX
                    + optional_title_px(&axis.title, label);
                (offset + block, offset)
            }
            None => (primary_bottom, 0),
        };

        // Left of the image: the same, sideways, with rotated titles.
        let primary_left = TICK_LENGTH_PX
            + LABEL_GAP_PX
            + panel.y_pixel.widest_label(label)
            + LABEL_GAP_PX
            + optional_title_px(&panel.y_pixel.title, label);
        let (left, physical_y_offset) = match &panel.y_physical {
            Some(axis) => {
                let offset = panel.outward_px.1.max(primary_left + LABEL_GAP_PX);
                let block = TICK_LENGTH_PX
                    + LABEL_GAP_PX
                    + axis.widest_label(label)
                    + LABEL_GAP_PX
                    + optional_title_px(&axis.title, label);
                (offset + block, offset)
            }
            None => (primary_left, 0),
        };

        let title_block = match &panel.title {
            Some(t) if !t.is_empty() => panel.fonts.title + 2 * LABEL_GAP_PX,
            _ => 0,
        };
        let top = FIGURE_PADDING_PX + title_block + label / 2;
        let left = FIGURE_PADDING_PX + left;
        let right = FIGURE_PADDING_PX + panel.x_pixel.widest_label(label) / 2;
        let bottom = bottom + FIGURE_PADDING_PX;

        let canvas = (
            (left + cols as i32 + right).max(1) as u32,
            (top + rows as i32 + bottom).max(1) as u32,
        );
        PanelLayout {
            origin: (left, top),
            image_size: (cols as u32, rows as u32),
            canvas,
            physical_x_spine: top + rows as i32 + physical_x_offset,
            physical_y_spine: left - physical_y_offset,
        }
    }

    /// Screen column of pixel coordinate `p` (pixel centres at integers).
    pub fn x_to_screen(&self, p: f64) -> i32 {
        self.origin.0 + (p + 0.5).floor() as i32
    }

    /// Screen row of pixel coordinate `p`.
    pub fn y_to_screen(&self, p: f64) -> i32 {
        self.origin.1 + (p + 0.5).floor() as i32
    }

    fn image_right(&self) -> i32 {
        self.origin.0 + self.image_size.0 as i32
    }

    fn image_bottom(&self) -> i32 {
        self.origin.1 + self.image_size.1 as i32
    }
}

fn label_style(size: i32, pos: Pos) -> TextStyle<'static> {
    font_tuple(size).into_font().color(&BLACK).pos(pos)
}

fn rotated_style(size: i32) -> TextStyle<'static> {
    font_tuple(size)
        .into_font()
        .transform(FontTransform::Rotate270)
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center))
}

fn draw_line(
    area: &Area<'_>,
    from: (i32, i32),
    to: (i32, i32),
    color: RGBColor,
    width: u32,
) -> std::result::Result<(), RenderError> {
    area.draw(&PathElement::new(vec![from, to], color.stroke_width(width)))?;
    Ok(())
}

/// Paint the image pixels, NaN left as background.
fn draw_image_pixels(
    area: &Area<'_>,
    panel: &ImagePanel<'_>,
    layout: &PanelLayout,
) -> std::result::Result<(), RenderError> {
    let (ox, oy) = layout.origin;
    for ((r, c), &value) in panel.image.indexed_iter() {
        if let Some(t) = panel.clim.normalize(value) {
            area.draw_pixel((ox + c as i32, oy + r as i32), &panel.cmap.eval(t))?;
        }
    }
    Ok(())
}

/// Ticks, labels and title below the image, hanging from `spine_y`.
fn draw_bottom_axis(
    area: &Area<'_>,
    layout: &PanelLayout,
    axis: &AxisSpec,
    spine_y: i32,
    font_px: i32,
) -> std::result::Result<(), RenderError> {
    let label_y = spine_y + TICK_LENGTH_PX + LABEL_GAP_PX;
    for tick in &axis.ticks {
        let x = layout.x_to_screen(tick.position);
        draw_line(area, (x, spine_y), (x, spine_y + TICK_LENGTH_PX), BLACK, 1)?;
        area.draw(&Text::new(
            tick.label.as_str(),
            (x, label_y),
            label_style(font_px, Pos::new(HPos::Center, VPos::Top)),
        ))?;
    }
    if !axis.title.is_empty() {
        let tick_rows = if axis.ticks.is_empty() { 0 } else { font_px + LABEL_GAP_PX };
        let center_x = (layout.origin.0 + layout.image_right()) / 2;
        area.draw(&Text::new(
            axis.title.as_str(),
            (center_x, label_y + tick_rows),
            label_style(font_px, Pos::new(HPos::Center, VPos::Top)),
        ))?;
    }
    Ok(())
}

fn draw_left_axis(
    area: &Area<'_>,
    layout: &PanelLayout,
    axis: &AxisSpec,
    spine_x: i32,
    font_px: i32,
) -> std::result::Result<(), RenderError> {
    let label_x = spine_x - TICK_LENGTH_PX - LABEL_GAP_PX;
    for tick in &axis.ticks {
        let y = layout.y_to_screen(tick.position);
        draw_line(area, (spine_x - TICK_LENGTH_PX, y), (spine_x, y), BLACK, 1)?;
        area.draw(&Text::new(
            tick.label.as_str(),
            (label_x, y),
            label_style(font_px, Pos::new(HPos::Right, VPos::Center)),
        ))?;
    }
    if !axis.title.is_empty() {
        let title_x = label_x - axis.widest_label(font_px) - LABEL_GAP_PX - font_px / 2;
        let center_y = (layout.origin.1 + layout.image_bottom()) / 2;
        area.draw(&Text::new(
            axis.title.as_str(),
            (title_x, center_y),
            rotated_style(font_px),
        ))?;
    }
    Ok(())
}

/// Draw a complete image panel onto `area`, which must be at least
/// `layout.canvas` in size.
pub fn draw_image_panel(
    area: &Area<'_>,
    panel: &ImagePanel<'_>,
    layout: &PanelLayout,
) -> std::result::Result<(), RenderError> {
    draw_image_pixels(area, panel, layout)?;

    let (ox, oy) = layout.origin;
    let (right, bottom) = (layout.image_right(), layout.image_bottom());

    if panel.grid {
        let grid = IMAGE_GRID_COLOR.mix(0.5);
        for tick in &panel.x_pixel.ticks {
            let x = layout.x_to_screen(tick.position);
            area.draw(&PathElement::new(vec![(x, oy), (x, bottom - 1)], grid.stroke_width(1)))?;
        }
        for tick in &panel.y_pixel.ticks {
            let y = layout.y_to_screen(tick.position);
            area.draw(&PathElement::new(vec![(ox, y), (right - 1, y)], grid.stroke_width(1)))?;
        }
    }

    if let Some(cut) = &panel.cut {
        match cut.orientation {
            Orientation::Horizontal => {
                let y = layout.y_to_screen(cut.coordinate as f64);
                draw_line(area, (ox, y), (right - 1, y), cut.color, LINE_WIDTH_CUT)?;
            }
            Orientation::Vertical => {
                let x = layout.x_to_screen(cut.coordinate as f64);
                draw_line(area, (x, oy), (x, bottom - 1), cut.color, LINE_WIDTH_CUT)?;
            }
        }
    }

    area.draw(&Rectangle::new(
        [(ox - 1, oy - 1), (right, bottom)],
        BLACK.stroke_width(1),
    ))?;

    let label = panel.fonts.label;
    draw_bottom_axis(area, layout, &panel.x_pixel, bottom, label)?;
    draw_left_axis(area, layout, &panel.y_pixel, ox - 1, label)?;

    if let Some(axis) = &panel.x_physical {
        let y = layout.physical_x_spine;
        draw_line(area, (ox, y), (right - 1, y), BLACK, 1)?;
        draw_bottom_axis(area, layout, axis, y, label)?;
    }
    if let Some(axis) = &panel.y_physical {
        let x = layout.physical_y_spine;
        draw_line(area, (x, oy), (x, bottom - 1), BLACK, 1)?;
        draw_left_axis(area, layout, axis, x, label)?;
    }

    if let Some(title) = panel.title.as_deref().filter(|t| !t.is_empty()) {
        area.draw(&Text::new(
            title,
            ((ox + right) / 2, FIGURE_PADDING_PX),
            label_style(panel.fonts.title, Pos::new(HPos::Center, VPos::Top)),
        ))?;
    }
    Ok(())
}

/// Lay out and rasterise an image panel as its own figure.
pub fn render_image_panel(name: impl Into<String>, panel: &ImagePanel<'_>) -> Result<Figure> {
    let layout = PanelLayout::compute(panel);
    log::debug!("Image panel layout: {layout:?}");
    Figure::render(name, layout.canvas, |area| {
        draw_image_panel(area, panel, &layout)
    })
}

// ---------------------------------------------------------------------------
// Line charts
// ---------------------------------------------------------------------------

/// Dash pattern of a plotted curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    DashDot,
}

impl LineStyle {
    /// Alternating on/off lengths in output pixels, `None` for solid.
    pub fn pattern_px(&self) -> Option<&'static [f64]> {
        match self {
            LineStyle::Solid => None,
            LineStyle::Dashed => Some(DASH_PATTERN_PX),
            LineStyle::Dotted => Some(DOT_PATTERN_PX),
            LineStyle::DashDot => Some(DASH_DOT_PATTERN_PX),
        }
    }
}

impl FromStr for LineStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "-" | "solid" => Ok(LineStyle::Solid),
            "--" | "dashed" => Ok(LineStyle::Dashed),
            ":" | "dotted" => Ok(LineStyle::Dotted),
            "-." | "dashdot" | "dash_dot" => Ok(LineStyle::DashDot),
            other => Err(Error::invalid("linestyle", format!("unknown style {other:?}"))),
        }
    }
}

/// Split `run` into the sample ranges that are drawn ("on" dashes).
///
/// `samples_per_px` converts the pixel pattern into sample counts. Every
/// dash keeps at least two samples so it draws a visible segment.
pub fn dash_runs(run: Range<usize>, style: LineStyle, samples_per_px: f64) -> Vec<Range<usize>> {
    let pattern = match style.pattern_px() {
        None => return vec![run],
        Some(p) => p,
    };
    let lengths: Vec<usize> = pattern
        .iter()
        .enumerate()
        .map(|(i, &px)| {
            let samples = (px * samples_per_px).round() as usize;
            if i % 2 == 0 {
                samples.max(2)
            } else {
                samples.max(1)
            }
        })
        .collect();

    let mut pieces = Vec::new();
    let mut cursor = run.start;
    let mut i = 0;
    while cursor < run.end {
        let len = lengths[i % lengths.len()];
        if i % 2 == 0 {
            let end = (cursor + len).min(run.end);
            if end - cursor >= 2 || (end - cursor == 1 && run.len() == 1) {
                pieces.push(cursor..end);
            }
            cursor = end;
        } else {
            cursor += len;
        }
        i += 1;
    }
    pieces
}

#[derive(Clone)]
pub struct PlotSeries {
    pub data: Vec<(f64, f64)>,
    pub label: String,
    pub color: RGBColor,
    pub stroke_width: u32,
    pub style: LineStyle,
}

#[derive(Clone)]
pub struct PlotConfig {
    pub title: String,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
    pub series: Vec<PlotSeries>,
    pub x_label: String,
    pub y_label: String,
}

/// Draws a single chart from a PlotConfig: grid, axis labels, one curve per
/// series with gaps at non-finite samples, and a legend.
pub fn draw_line_chart(
    area: &Area<'_>,
    plot_config: &PlotConfig,
    fonts: FontPx,
) -> std::result::Result<(), RenderError> {
    let mut builder = ChartBuilder::on(area);
    builder
        .margin(fonts.label)
        .x_label_area_size(fonts.label * 3)
        .y_label_area_size(fonts.label * 4);
    if !plot_config.title.is_empty() {
        builder.caption(&plot_config.title, font_tuple(fonts.title));
    }
    let mut chart =
        builder.build_cartesian_2d(plot_config.x_range.clone(), plot_config.y_range.clone())?;

    chart
        .configure_mesh()
        .x_desc(&plot_config.x_label)
        .y_desc(&plot_config.y_label)
        .x_labels(15)
        .y_labels(10)
        .y_label_formatter(&|y| format!("{y:.1}"))
        .bold_line_style(GRID_COLOR)
        .light_line_style(WHITE.mix(0.0))
        .label_style(font_tuple(fonts.label))
        .draw()?;

    let plot_width_px = {
        let (x_px, _) = chart.plotting_area().get_pixel_range();
        (x_px.end - x_px.start).max(1) as f64
    };

    let mut legend_series_count = 0;

    for s in &plot_config.series {
        let color = s.color;
        let ys: Vec<f64> = s.data.iter().map(|&(_, y)| y).collect();
        // Samples span the x range evenly.
        let samples_per_px = if s.data.len() > 1 {
            (s.data.len() - 1) as f64 / plot_width_px
        } else {
            1.0
        };

        let mut labelled = s.label.is_empty();
        for run in finite_runs(&ys) {
            for piece in dash_runs(run, s.style, samples_per_px) {
                let drawn = chart.draw_series(LineSeries::new(
                    s.data[piece].iter().copied(),
                    color.stroke_width(s.stroke_width),
                ))?;
                if !labelled {
                    drawn.label(&s.label).legend(move |(x, y)| {
                        PathElement::new(
                            vec![(x, y), (x + LEGEND_LINE_LENGTH_PX, y)],
                            color.stroke_width(LINE_WIDTH_LEGEND),
                        )
                    });
                    labelled = true;
                    legend_series_count += 1;
                }
            }
        }

        // Nothing plottable: keep the legend entry with an invisible point.
        if !labelled {
            log::warn!("Series '{}' has no finite samples to plot.", s.label);
            chart
                .draw_series(std::iter::once(Circle::new(
                    (plot_config.x_range.start, plot_config.y_range.start),
                    0,
                    color.filled(),
                )))?
                .label(&s.label)
                .legend(move |(x, y)| {
                    PathElement::new(
                        vec![(x, y), (x + LEGEND_LINE_LENGTH_PX, y)],
                        color.stroke_width(LINE_WIDTH_LEGEND),
                    )
                });
            legend_series_count += 1;
        }
    }

    if legend_series_count > 0 {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(font_tuple(fonts.label))
            .draw()?;
    }
    Ok(())
}

/// Rasterise a line chart as its own figure.
pub fn render_line_chart(
    name: impl Into<String>,
    size: (u32, u32),
    plot_config: &PlotConfig,
    fonts: FontPx,
) -> Result<Figure> {
    Figure::render(name, size, |area| draw_line_chart(area, plot_config, fonts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_analysis::axis_ticks::{strided_pixel_ticks, DualAxis};
    use ndarray::Array2;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn bare_panel(image: &Array2<f64>) -> ImagePanel<'_> {
        ImagePanel {
            image: image.view(),
            clim: ColorLimits::new(0.0, 1.0),
            cmap: Colormap::Gray,
            title: None,
            fonts: FontPx { title: 20, label: 10 },
            x_pixel: AxisSpec::default(),
            y_pixel: AxisSpec::default(),
            x_physical: None,
            y_physical: None,
            outward_px: (0, 0),
            cut: None,
            grid: false,
        }
    }

    #[test]
    fn test_calculate_range_pads() {
        assert_eq!(calculate_range(0.0, 0.0), (-0.5, 0.5));
        let (lo, hi) = calculate_range(10.0, 0.0);
        assert!((lo + 1.5).abs() < 1e-12 && (hi - 11.5).abs() < 1e-12);
    }

    #[test]
    fn test_layout_maps_pixel_centres() {
        let image = Array2::<f64>::zeros((50, 80));
        let panel = bare_panel(&image);
        let layout = PanelLayout::compute(&panel);
        assert_eq!(layout.image_size, (80, 50));
        assert_eq!(layout.x_to_screen(0.0), layout.origin.0);
        assert_eq!(layout.x_to_screen(79.0), layout.origin.0 + 79);
        assert_eq!(layout.y_to_screen(10.0), layout.origin.1 + 10);
        assert!(layout.canvas.0 >= 80 + layout.origin.0 as u32);
        assert!(layout.canvas.1 >= 50 + layout.origin.1 as u32);
    }

    #[test]
    fn test_physical_spines_sit_outside_pixel_axes() {
        let image = Array2::<f64>::zeros((650, 750));
        let dual = DualAxis::new(0.075).unwrap();
        let mut panel = bare_panel(&image);
        panel.x_pixel = AxisSpec::new("Pixels", strided_pixel_ticks(750, 750, 100));
        panel.y_pixel = AxisSpec::new("Pixels", strided_pixel_ticks(650, 900, 100));
        panel.x_physical = Some(AxisSpec::new("mm", dual.physical_ticks(750, 10)));
        panel.y_physical = Some(AxisSpec::new("mm", dual.physical_ticks(650, 10)));
        panel.outward_px = (56, 89);
        let layout = PanelLayout::compute(&panel);

        let image_bottom = layout.origin.1 + 650;
        assert!(layout.physical_x_spine >= image_bottom + 56);
        assert!(layout.physical_y_spine <= layout.origin.0 - 89);
        assert!(layout.physical_y_spine > 0);
        assert!((layout.physical_x_spine as u32) < layout.canvas.1);
    }

    #[test]
    fn test_render_bare_panel_paints_pixels() {
        let mut image = Array2::<f64>::zeros((4, 6));
        image[[1, 2]] = 1.0;
        image[[3, 5]] = f64::NAN;
        let panel = bare_panel(&image);
        let layout = PanelLayout::compute(&panel);
        let figure = render_image_panel("bare", &panel).unwrap();
        assert_eq!(figure.size(), layout.canvas);

        let (ox, oy) = (layout.origin.0 as u32, layout.origin.1 as u32);
        assert_eq!(figure.pixel(ox, oy), Some([0, 0, 0]));
        assert_eq!(figure.pixel(ox + 2, oy + 1), Some([255, 255, 255]));
        // NaN stays background white.
        assert_eq!(figure.pixel(ox + 5, oy + 3), Some([255, 255, 255]));
        assert_eq!(figure.pixel(figure.size().0, 0), None);
    }

    #[test]
    fn test_cut_line_drawn_across_image() {
        let image = Array2::<f64>::zeros((20, 30));
        let mut panel = bare_panel(&image);
        panel.cut = Some(CutLine {
            orientation: Orientation::Horizontal,
            coordinate: 7,
            color: RGBColor(0, 191, 255),
        });
        let layout = PanelLayout::compute(&panel);
        let figure = render_image_panel("cut", &panel).unwrap();
        let y = layout.y_to_screen(7.0) as u32;
        let x = layout.x_to_screen(15.0) as u32;
        assert_eq!(figure.pixel(x, y), Some([0, 191, 255]));
    }

    #[test]
    fn test_figure_saves_tiff() {
        let dir = tempfile::tempdir().unwrap();
        let figure = Figure::render("blank", (12, 8), |area| {
            area.draw(&Rectangle::new([(0, 0), (5, 3)], RGBColor(255, 0, 0).filled()))?;
            Ok(())
        })
        .unwrap();
        let ctx = RenderContext::new(dir.path());
        let path = ctx.save(&figure, "blank.tif").unwrap();
        let decoded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (12, 8));
        assert_eq!(decoded.get_pixel(1, 1).0, [255, 0, 0]);
        assert_eq!(decoded.get_pixel(10, 7).0, [255, 255, 255]);
    }

    struct Recorder(Rc<RefCell<Vec<String>>>);

    impl FigureViewer for Recorder {
        fn show(&mut self, figure: &Figure) -> Result<()> {
            self.0.borrow_mut().push(figure.name().to_string());
            Ok(())
        }
    }

    #[test]
    fn test_context_hands_figures_to_viewer() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut ctx = RenderContext::new(".").with_viewer(Recorder(seen.clone()));
        let figure = Figure::render("one", (2, 2), |_| Ok(())).unwrap();
        ctx.show(&figure).unwrap();
        assert_eq!(*seen.borrow(), vec!["one".to_string()]);
    }

    #[test]
    fn test_context_unit_conversions() {
        let ctx = RenderContext::new(".").with_dpi(80.0).unwrap();
        assert_eq!(ctx.inches_to_px(15.0), 1200);
        assert_eq!(ctx.points_to_px(130.0), 144);
        assert!(RenderContext::new(".").with_dpi(0.0).is_err());
    }

    #[test]
    fn test_set_dpi_keeps_old_value_on_error() {
        let mut ctx = RenderContext::new(".");
        ctx.set_dpi(150.0).unwrap();
        assert_eq!(ctx.dpi(), 150.0);
        assert!(ctx.set_dpi(f64::NAN).is_err());
        assert!(ctx.set_dpi(-1.0).is_err());
        assert_eq!(ctx.dpi(), 150.0);
    }

    #[test]
    fn test_line_style_parsing() {
        assert_eq!("--".parse::<LineStyle>().unwrap(), LineStyle::Dashed);
        assert_eq!("-.".parse::<LineStyle>().unwrap(), LineStyle::DashDot);
        assert_eq!("solid".parse::<LineStyle>().unwrap(), LineStyle::Solid);
        assert!("~~".parse::<LineStyle>().is_err());
    }

    #[test]
    fn test_dash_runs() {
        assert_eq!(dash_runs(0..100, LineStyle::Solid, 1.0), vec![0..100]);
        // One sample per pixel: 8 on, 5 off.
        let pieces = dash_runs(0..30, LineStyle::Dashed, 1.0);
        assert_eq!(pieces, vec![0..8, 13..21, 26..30]);
        // Sparse samples still give two-sample dashes.
        let pieces = dash_runs(0..6, LineStyle::Dotted, 0.1);
        assert_eq!(pieces, vec![0..2, 3..5]);
    }
}

// src/plot_framework.rs
