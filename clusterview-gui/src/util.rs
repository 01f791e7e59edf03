//! Conversion and formatting helpers for the panels.

use eframe::egui::Color32;

/// Convert f32 to u8 with clamping to [0, 255].
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn f32_to_u8(value: f32) -> u8 {
    let clamped = value.clamp(0.0, 255.0);
    clamped.round() as u8
}

/// Marker color from an RGB triple and an opacity in `[0, 1]`.
#[must_use]
pub fn color32(rgb: [u8; 3], opacity: f32) -> Color32 {
    let [r, g, b] = rgb;
    Color32::from_rgba_unmultiplied(r, g, b, f32_to_u8(opacity * 255.0))
}

/// Format a number with comma separators for readability.
#[must_use]
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Format a plot coordinate for the cursor readout.
#[must_use]
pub fn format_coordinate(value: f64) -> String {
    format!("{value:.3}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f32_to_u8_clamps() {
        assert_eq!(f32_to_u8(-3.0), 0);
        assert_eq!(f32_to_u8(127.6), 128);
        assert_eq!(f32_to_u8(400.0), 255);
    }

    #[test]
    fn test_color32_applies_opacity() {
        let c = color32([10, 20, 30], 1.0);
        assert_eq!(c, Color32::from_rgb(10, 20, 30));

        let faded = color32([128, 128, 128], 0.5);
        assert_eq!(faded.a(), 128);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(42), "42");
        assert_eq!(format_number(1234), "1,234");
        assert_eq!(format_number(12_345_678), "12,345,678");
    }

    #[test]
    fn test_format_coordinate() {
        assert_eq!(format_coordinate(1.0), "1.000");
        assert_eq!(format_coordinate(-0.12345), "-0.123");
    }
}
