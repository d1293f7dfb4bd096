use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::predict::Label;
use crate::workflow::Banner;

// ---------------------------------------------------------------------------
// Hue-based colours
// ---------------------------------------------------------------------------

/// Saturated, mid-lightness colour for a hue in degrees.
pub fn from_hue(hue: f32) -> Color32 {
    let hsl = Hsl::new(hue, 0.75, 0.55);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Bar colour per label: green for pure, red for adulterated.
pub fn label_color(label: Label) -> Color32 {
    match label {
        Label::Pure => from_hue(130.0),
        Label::Adulterated => from_hue(0.0),
    }
}

/// Histogram fill.
pub fn feature_color() -> Color32 {
    from_hue(210.0)
}

/// Text colour for a status banner.
pub fn banner_color(banner: &Banner) -> Color32 {
    match banner {
        Banner::Success(_) => from_hue(130.0),
        Banner::Warning(_) => from_hue(40.0),
        Banner::Error(_) => Color32::RED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_colours_are_distinct() {
        assert_ne!(label_color(Label::Pure), label_color(Label::Adulterated));
    }

    #[test]
    fn red_hue_is_mostly_red() {
        let c = from_hue(0.0);
        assert!(c.r() > c.g() && c.r() > c.b());
    }
}
