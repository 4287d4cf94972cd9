//! Hex color helpers used by the style composer.
//!
//! Colors travel through [`StyleConfig`](crate::StyleConfig) as `#RRGGBB`
//! strings. Anything that does not parse is logged and treated as black, so
//! a half-typed color in the form never breaks the preview.

use log::warn;
use palette::Srgb;

const FALLBACK_TRIPLE: &str = "0, 0, 0";
const FALLBACK_HEX: &str = "#000000";

/// Parses `#rrggbb`, `rrggbb`, `#rgb` or `rgb` into an 8-bit sRGB color.
///
/// Shorthand colors expand by duplicating each digit (`#fa0` → `#ffaa00`).
/// Returns `None` for anything else.
pub fn hex_to_rgb(hex: &str) -> Option<Srgb<u8>> {
    let trimmed = hex.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

    // palette slices by byte offset, so reject non-ASCII input up front
    if !matches!(digits.len(), 3 | 6) || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    digits.parse::<Srgb<u8>>().ok()
}

/// Encodes a color as lowercase `#rrggbb`.
pub fn to_hex(color: Srgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}

/// Formats a hex color as the `"R, G, B"` triple used inside `rgba(...)`.
pub fn rgb_triple(hex: &str) -> String {
    match hex_to_rgb(hex) {
        Some(c) => format!("{}, {}, {}", c.red, c.green, c.blue),
        None => {
            warn!("invalid hex color {hex:?}, rendering as black");
            FALLBACK_TRIPLE.to_string()
        }
    }
}

/// Lightens each channel by `percent`: `min(255, floor(c * (1 + percent / 100)))`.
pub fn lighten(hex: &str, percent: f64) -> String {
    scale_channels(hex, 1.0 + percent / 100.0)
}

/// Darkens each channel by `percent`: `max(0, floor(c * (1 - percent / 100)))`.
pub fn darken(hex: &str, percent: f64) -> String {
    scale_channels(hex, 1.0 - percent / 100.0)
}

/// Returns true when the perceived luminance of `hex` is above one half.
///
/// Invalid colors count as dark.
pub fn is_light(hex: &str) -> bool {
    let Some(color) = hex_to_rgb(hex) else {
        warn!("invalid hex color {hex:?}, treating as dark");
        return false;
    };
    let c: Srgb<f32> = color.into_format();
    0.299 * c.red + 0.587 * c.green + 0.114 * c.blue > 0.5
}

fn scale_channels(hex: &str, factor: f64) -> String {
    let Some(color) = hex_to_rgb(hex) else {
        warn!("invalid hex color {hex:?}, rendering as black");
        return FALLBACK_HEX.to_string();
    };
    let scale = |c: u8| (f64::from(c) * factor).floor().clamp(0.0, 255.0) as u8;
    to_hex(Srgb::new(
        scale(color.red),
        scale(color.green),
        scale(color.blue),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_six_digit_hex() {
        let c = hex_to_rgb("#523091").unwrap();
        assert_eq!((c.red, c.green, c.blue), (82, 48, 145));
        assert_eq!(rgb_triple("#1a0b33"), "26, 11, 51");
    }

    #[test]
    fn expands_shorthand() {
        assert_eq!(rgb_triple("#fa0"), "255, 170, 0");
        assert_eq!(rgb_triple("fff"), "255, 255, 255");
    }

    #[test]
    fn invalid_hex_is_black() {
        assert_eq!(rgb_triple("#12345"), "0, 0, 0");
        assert_eq!(rgb_triple("#gg0000"), "0, 0, 0");
        assert_eq!(rgb_triple("#ééé"), "0, 0, 0");
        assert_eq!(lighten("nope", 10.0), "#000000");
        assert!(hex_to_rgb("").is_none());
    }

    #[test]
    fn lighten_floors_and_caps() {
        // 0x7c = 124 -> floor(136.4) = 136 = 0x88
        assert_eq!(lighten("#7c3aed", 10.0), "#883fff");
        assert_eq!(lighten("#ffffff", 50.0), "#ffffff");
        assert_eq!(lighten("#000000", 10.0), "#000000");
    }

    #[test]
    fn darken_floors_at_zero() {
        assert_eq!(darken("#646464", 10.0), "#5a5a5a");
        assert_eq!(darken("#646464", 150.0), "#000000");
    }

    #[test]
    fn light_and_dark() {
        assert!(is_light("#ffffff"));
        assert!(is_light("#e0e0e0"));
        assert!(!is_light("#1a0b33"));
        assert!(!is_light("garbage"));
    }

    #[test]
    fn hex_encoding_pads() {
        assert_eq!(to_hex(Srgb::new(1, 2, 255)), "#0102ff");
    }
}
