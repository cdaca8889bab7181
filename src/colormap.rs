// src/colormap.rs

//! Colour mapping for detector images.
//!
//! `afmhot` and `gist_stern` follow matplotlib's segment definitions; the
//! perceptual maps come from `colorous`.

use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Colormap {
    Afmhot,
    GistStern,
    Gray,
    Viridis,
    Inferno,
    Magma,
    Plasma,
}

// Piecewise-linear channel: (x, value left of x, value right of x).
type Segment = (f64, f64, f64);

const GIST_STERN_RED: &[Segment] = &[
    (0.0, 0.0, 0.0),
    (0.0547, 1.0, 1.0),
    (0.250, 0.027, 0.250),
    (1.0, 1.0, 1.0),
];
const GIST_STERN_GREEN: &[Segment] = &[(0.0, 0.0, 0.0), (1.0, 1.0, 1.0)];
const GIST_STERN_BLUE: &[Segment] = &[
    (0.0, 0.0, 0.0),
    (0.5, 1.0, 1.0),
    (0.735, 0.0, 0.0),
    (1.0, 1.0, 1.0),
];

fn eval_segments(segments: &[Segment], t: f64) -> f64 {
    for pair in segments.windows(2) {
        let (x0, _, y0) = pair[0];
        let (x1, y1, _) = pair[1];
        if t <= x1 {
            if x1 <= x0 {
                return y1;
            }
            return y0 + (t - x0) / (x1 - x0) * (y1 - y0);
        }
    }
    segments.last().map(|s| s.2).unwrap_or(0.0)
}

fn channel(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl Colormap {
    /// Colour at normalised position `t` in [0, 1]; values outside are clamped.
    pub fn eval(&self, t: f64) -> RGBColor {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Colormap::Afmhot => RGBColor(
                channel(2.0 * t),
                channel(2.0 * t - 0.5),
                channel(2.0 * t - 1.0),
            ),
            Colormap::GistStern => RGBColor(
                channel(eval_segments(GIST_STERN_RED, t)),
                channel(eval_segments(GIST_STERN_GREEN, t)),
                channel(eval_segments(GIST_STERN_BLUE, t)),
            ),
            Colormap::Gray => {
                let v = channel(t);
                RGBColor(v, v, v)
            }
            Colormap::Viridis => from_colorous(&colorous::VIRIDIS, t),
            Colormap::Inferno => from_colorous(&colorous::INFERNO, t),
            Colormap::Magma => from_colorous(&colorous::MAGMA, t),
            Colormap::Plasma => from_colorous(&colorous::PLASMA, t),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Colormap::Afmhot => "afmhot",
            Colormap::GistStern => "gist_stern",
            Colormap::Gray => "gray",
            Colormap::Viridis => "viridis",
            Colormap::Inferno => "inferno",
            Colormap::Magma => "magma",
            Colormap::Plasma => "plasma",
        }
    }
}

fn from_colorous(gradient: &colorous::Gradient, t: f64) -> RGBColor {
    let color = gradient.eval_continuous(t);
    RGBColor(color.r, color.g, color.b)
}

impl FromStr for Colormap {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "afmhot" => Ok(Colormap::Afmhot),
            "gist_stern" => Ok(Colormap::GistStern),
            "gray" | "grey" => Ok(Colormap::Gray),
            "viridis" => Ok(Colormap::Viridis),
            "inferno" => Ok(Colormap::Inferno),
            "magma" => Ok(Colormap::Magma),
            "plasma" => Ok(Colormap::Plasma),
            other => Err(Error::invalid("cmap", format!("unknown colormap {other:?}"))),
        }
    }
}

impl fmt::Display for Colormap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Intensity range mapped onto the full colormap (matplotlib's `clim`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorLimits {
    pub min: f64,
    pub max: f64,
}

impl ColorLimits {
    pub const fn new(min: f64, max: f64) -> Self {
        ColorLimits { min, max }
    }

    /// Position of `value` within the limits, clamped to [0, 1].
    /// `None` for NaN, which is left unpainted.
    pub fn normalize(&self, value: f64) -> Option<f64> {
        if value.is_nan() {
            return None;
        }
        let span = self.max - self.min;
        if span <= 0.0 || !span.is_finite() {
            return Some(0.0);
        }
        Some(((value - self.min) / span).clamp(0.0, 1.0))
    }
}

impl From<(f64, f64)> for ColorLimits {
    fn from((min, max): (f64, f64)) -> Self {
        ColorLimits::new(min, max)
    }
}

/// Parse a line colour: the CSS names used by the tools, or `#rrggbb`.
pub fn parse_color(name: &str) -> Result<RGBColor> {
    let name = name.trim().to_ascii_lowercase();
    if let Some(hex) = name.strip_prefix('#') {
        if hex.len() == 6 && hex.is_ascii() {
            let component = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
            if let (Ok(r), Ok(g), Ok(b)) = (component(0), component(2), component(4)) {
                return Ok(RGBColor(r, g, b));
            }
        }
        return Err(Error::invalid("line_color", format!("bad hex colour #{hex}")));
    }
    let rgb = match name.as_str() {
        "deepskyblue" => RGBColor(0, 191, 255),
        "red" => RGBColor(255, 0, 0),
        "green" => RGBColor(0, 128, 0),
        "blue" => RGBColor(0, 0, 255),
        "black" => RGBColor(0, 0, 0),
        "white" => RGBColor(255, 255, 255),
        "orange" => RGBColor(255, 165, 0),
        "yellow" => RGBColor(255, 255, 0),
        "cyan" => RGBColor(0, 255, 255),
        "magenta" => RGBColor(255, 0, 255),
        "lime" => RGBColor(0, 255, 0),
        other => {
            return Err(Error::invalid(
                "line_color",
                format!("unknown colour {other:?}"),
            ))
        }
    };
    Ok(rgb)
}

/// Curve colour for the i-th series (matplotlib's default cycle).
pub fn series_color(index: usize) -> RGBColor {
    let c = colorous::CATEGORY10[index % colorous::CATEGORY10.len()];
    RGBColor(c.r, c.g, c.b)
}


// src/colormap.rs
