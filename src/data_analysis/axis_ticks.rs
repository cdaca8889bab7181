// src/data_analysis/axis_ticks.rs

//! Tick placement for images drawn with a pixel axis and a twin axis in
//! millimetres.
//!
//! Every tick position is expressed in pixel coordinates along one image
//! dimension: position `p` is the centre of pixel `p`. The physical axis
//! picks round millimetre values first and converts each one back, so a
//! label `t` always sits at pixel `t / mm_per_pixel`.

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Position along the axis, in pixels.
    pub position: f64,
    /// Value shown by the label, in the axis' own unit.
    pub value: f64,
    pub label: String,
}

impl Tick {
    fn integer(position: f64, value: usize) -> Self {
        Tick {
            position,
            value: value as f64,
            label: value.to_string(),
        }
    }
}

/// Linear pixel <-> millimetre conversion for one detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DualAxis {
    mm_per_pixel: f64,
}

impl DualAxis {
    pub fn new(mm_per_pixel: f64) -> Result<Self> {
        if !mm_per_pixel.is_finite() || mm_per_pixel <= 0.0 {
            return Err(Error::invalid(
                "mm_per_pixel",
                format!("must be a positive finite number, got {mm_per_pixel}"),
            ));
        }
        Ok(DualAxis { mm_per_pixel })
    }

    pub fn mm_per_pixel(&self) -> f64 {
        self.mm_per_pixel
    }

    pub fn to_mm(&self, pixels: f64) -> f64 {
        pixels * self.mm_per_pixel
    }

    pub fn to_px(&self, mm: f64) -> f64 {
        mm / self.mm_per_pixel
    }

    /// Millimetre ticks for an axis `extent_px` pixels long.
    ///
    /// Labels run `0, step, 2 step, ...` strictly below the truncated
    /// physical length of the axis.
    pub fn physical_ticks(&self, extent_px: usize, step_mm: usize) -> Vec<Tick> {
        let length_mm = self.to_mm(extent_px as f64).trunc() as usize;
        (0..length_mm)
            .step_by(step_mm.max(1))
            .map(|mm| Tick::integer(self.to_px(mm as f64), mm))
            .collect()
    }
}

fn last_visible_pixel(extent_px: usize) -> f64 {
    extent_px as f64 - 0.5
}

/// Pixel ticks every `stride` pixels, labelled in source-image coordinates.
///
/// Used for crops: position 0 is the first cropped pixel and is labelled
/// `offset`.
pub fn strided_pixel_ticks(extent_px: usize, offset: usize, stride: usize) -> Vec<Tick> {
    let limit = last_visible_pixel(extent_px);
    (0..=extent_px)
        .step_by(stride.max(1))
        .filter(|&p| p as f64 <= limit)
        .map(|p| Tick::integer(p as f64, offset + p))
        .collect()
}

/// Round-number pixel ticks for a whole image: steps of 1, 2, 2.5 or 5
/// times a power of ten, at most `max_ticks` of them.
pub fn nice_pixel_ticks(extent_px: usize, max_ticks: usize) -> Vec<Tick> {
    let limit = last_visible_pixel(extent_px);
    if limit < 0.0 {
        return Vec::new();
    }
    let step = nice_step(limit, max_ticks.max(2));
    let count = (limit / step).floor() as usize + 1;
    (0..count)
        .map(|i| {
            let position = i as f64 * step;
            let label = if step.fract() == 0.0 {
                format!("{position:.0}")
            } else {
                format!("{position}")
            };
            Tick {
                position,
                value: position,
                label,
            }
        })
        .collect()
}

fn nice_step(span: f64, max_ticks: usize) -> f64 {
    if span <= 0.0 {
        return 1.0;
    }
    let raw = span / (max_ticks - 1) as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    for multiplier in [1.0, 2.0, 2.5, 5.0, 10.0] {
        let step = multiplier * magnitude;
        if (span / step).floor() as usize + 1 <= max_ticks {
            return step.max(1.0);
        }
    }
    (10.0 * magnitude).max(1.0)
}


// src/data_analysis/axis_ticks.rs
