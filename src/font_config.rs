// src/font_config.rs

// Font styles for figure text. Sizes are given in points and converted to
// pixels by the render context's dpi, so figures keep their proportions.

use crate::constants::{
    FONT_PT_CROPPED_LABEL, FONT_PT_CROPPED_TITLE, FONT_PT_FULL_LABEL, FONT_PT_FULL_TITLE,
    FONT_PT_PROFILE_LABEL, FONT_PT_PROFILE_TITLE,
};

/// Font family name for default system fonts.
pub const FONT_FAMILY_SYSTEM: &str = "sans-serif";

/// Title and label sizes for one kind of figure, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureFonts {
    pub title_pt: f64,
    pub label_pt: f64,
}

pub const FONTS_FULL_SIZE: FigureFonts = FigureFonts {
    title_pt: FONT_PT_FULL_TITLE,
    label_pt: FONT_PT_FULL_LABEL,
};

pub const FONTS_CROPPED: FigureFonts = FigureFonts {
    title_pt: FONT_PT_CROPPED_TITLE,
    label_pt: FONT_PT_CROPPED_LABEL,
};

pub const FONTS_PROFILE: FigureFonts = FigureFonts {
    title_pt: FONT_PT_PROFILE_TITLE,
    label_pt: FONT_PT_PROFILE_LABEL,
};

/// Pixel sizes resolved for a particular dpi.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontPx {
    pub title: i32,
    pub label: i32,
}

impl FigureFonts {
    pub fn at_dpi(&self, dpi: f64) -> FontPx {
        FontPx {
            title: points_to_px(self.title_pt, dpi),
            label: points_to_px(self.label_pt, dpi),
        }
    }
}

pub fn points_to_px(points: f64, dpi: f64) -> i32 {
    (points * dpi / crate::constants::POINTS_PER_INCH).round().max(1.0) as i32
}

/// Tuple form for plotters' `IntoFont`.
pub fn font_tuple(size_px: i32) -> (&'static str, i32) {
    (FONT_FAMILY_SYSTEM, size_px)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_scale_with_dpi() {
        assert_eq!(points_to_px(72.0, 72.0), 72);
        assert_eq!(points_to_px(20.0, 80.0), 22);
        assert_eq!(points_to_px(0.1, 10.0), 1);
    }

    #[test]
    fn test_full_size_fonts_at_default_dpi() {
        let px = FONTS_FULL_SIZE.at_dpi(80.0);
        assert_eq!(px, FontPx { title: 33, label: 22 });
    }
}

// src/font_config.rs
