// src/constants.rs

use plotters::style::RGBColor;

use crate::colormap::Colormap;
use crate::types::CropRect;

// Output resolution in dots per inch. Image figures are sized so one
// detector pixel maps to one output pixel at any dpi.
pub const DEFAULT_DPI: f64 = 80.0;
pub const POINTS_PER_INCH: f64 = 72.0;

// Eiger 4M: 75 um per pixel.
pub const EIGER_MM_PER_PIXEL: f64 = 0.075;

pub const DEFAULT_DETECTOR: &str = "eiger4m_single_image";

// --- Profile cuts ---
pub const DEFAULT_HORIZONTAL_CUT_ROW: usize = 1200;
pub const DEFAULT_VERTICAL_CUT_COLUMN: usize = 1100;
pub const PROFILE_CLIM: (f64, f64) = (0.0, 200.0);
pub const PROFILE_CMAP: Colormap = Colormap::Afmhot;
pub const PROFILE_LINE_COLOR: &str = "deepskyblue";
pub const PROFILE_CHART_SIZE_IN: (f64, f64) = (15.0, 6.0);

// --- Full-size and cropped display ---
pub const DISPLAY_CLIM: (f64, f64) = (0.0, 100.0);
pub const DISPLAY_CMAP: Colormap = Colormap::GistStern;
pub const DEFAULT_CROP: CropRect = CropRect::new(900, 1650, 750, 1400);

pub const FULL_MM_TICK_STEP: usize = 5;
pub const CROPPED_MM_TICK_STEP: usize = 10;
pub const CROPPED_PIXEL_TICK_STEP: usize = 100;
pub const FULL_PIXEL_MAX_TICKS: usize = 9;

// Secondary (mm) spines sit this far outside the image, in points: (bottom, left).
pub const FULL_MM_AXIS_OUTWARD_PT: (f64, f64) = (80.0, 130.0);
pub const CROPPED_MM_AXIS_OUTWARD_PT: (f64, f64) = (50.0, 80.0);

// --- Font sizes in points ---
pub const FONT_PT_FULL_TITLE: f64 = 30.0;
pub const FONT_PT_FULL_LABEL: f64 = 20.0;
pub const FONT_PT_CROPPED_TITLE: f64 = 15.0;
pub const FONT_PT_CROPPED_LABEL: f64 = 15.0;
pub const FONT_PT_PROFILE_TITLE: f64 = 14.0;
pub const FONT_PT_PROFILE_LABEL: f64 = 12.0;

// Average glyph width as a fraction of the font size, for layout estimates.
pub const CHAR_WIDTH_RATIO: f64 = 0.6;
pub const TICK_LENGTH_PX: i32 = 6;
pub const LABEL_GAP_PX: i32 = 4;
pub const FIGURE_PADDING_PX: i32 = 10;

// --- Line chart ---
pub const LINE_WIDTH_PLOT: u32 = 1;
pub const LINE_WIDTH_LEGEND: u32 = 2;
pub const LINE_WIDTH_CUT: u32 = 2;
pub const GRID_COLOR: RGBColor = RGBColor(200, 200, 200);
pub const IMAGE_GRID_COLOR: RGBColor = RGBColor(255, 255, 255);

// Dash patterns in output pixels, alternating on/off lengths.
pub const DASH_PATTERN_PX: &[f64] = &[8.0, 5.0];
pub const DOT_PATTERN_PX: &[f64] = &[2.0, 3.0];
pub const DASH_DOT_PATTERN_PX: &[f64] = &[6.0, 3.0, 2.0, 3.0];
pub const LEGEND_LINE_LENGTH_PX: i32 = 20;

// src/constants.rs
