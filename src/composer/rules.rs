//! Rule emission: the readable stylesheet before any post-processing.

use std::fmt::Write;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::color::{lighten, rgb_triple};
use crate::style::{BorderStyle, Shadow, StyleConfig};

/// Radial gradient geometry shared by the card background and its hover.
const CARD_GRADIENT_SHAPE: &str = "86.88% 75.47% at 50.00% 24.53%";

/// Fixed hover adjustments.
const HOVER_BG_FROM_DELTA: f64 = 0.15;
const HOVER_BG_TO_DELTA: f64 = 0.1;
const HOVER_SHADOW_Y_DELTA: f64 = 20.0;
const HOVER_SHADOW_BLUR_DELTA: f64 = 30.0;
const HOVER_SHADOW_ALPHA_DELTA: f64 = 0.2;
const HOVER_LIGHTEN_PERCENT: f64 = 10.0;

const ANIMATION_KEYFRAMES_FLOAT: &str = "@keyframes float {
  0% { transform: translateY(0px); }
  50% { transform: translateY(-10px); }
  100% { transform: translateY(0px); }
}";

const ANIMATION_KEYFRAMES_PULSE: &str = "@keyframes pulse {
  0% { opacity: 0.6; }
  50% { opacity: 0.8; }
  100% { opacity: 0.6; }
}";

// ============================================================================
// Value Fragments
// ============================================================================

/// The `border-radius` value. Linked corners collapse to one value;
/// otherwise the CSS order is top-left, top-right, bottom-right, bottom-left.
pub fn border_radius_value(config: &StyleConfig) -> String {
    let unit = &config.card_border_radius_unit;
    if config.link_border_radius {
        format!("{}{unit}", config.card_border_radius_top_left)
    } else {
        format!(
            "{}{unit} {}{unit} {}{unit} {}{unit}",
            config.card_border_radius_top_left,
            config.card_border_radius_top_right,
            config.card_border_radius_bottom_right,
            config.card_border_radius_bottom_left,
        )
    }
}

/// One box-shadow layer: `[inset ]Xpx Ypx Blurpx Spreadpx rgba(R, G, B, A)`.
pub fn shadow_value(shadow: &Shadow<'_>) -> String {
    format!(
        "{}{}px {}px {}px {}px rgba({}, {})",
        if shadow.inset { "inset " } else { "" },
        shadow.x,
        shadow.y,
        shadow.blur,
        shadow.spread,
        rgb_triple(shadow.color),
        shadow.opacity,
    )
}

/// The complete `box-shadow` value, secondary layer appended when enabled.
pub fn box_shadow_value(config: &StyleConfig) -> String {
    layered_shadow(shadow_value(&config.primary_shadow()), config)
}

/// A border shorthand, or `none` when the width is `"0"`.
pub fn border_value(width: &str, style: BorderStyle, color: &str, opacity: &str) -> String {
    if width == "0" {
        "none".to_string()
    } else {
        format!("{width}px {style} rgba({}, {opacity})", rgb_triple(color))
    }
}

fn layered_shadow(primary: String, config: &StyleConfig) -> String {
    match config.secondary_shadow() {
        Some(secondary) => format!("{primary}, {}", shadow_value(&secondary)),
        None => primary,
    }
}

fn card_background(config: &StyleConfig, opacity_from: &str, opacity_to: &str) -> String {
    format!(
        "radial-gradient({CARD_GRADIENT_SHAPE},  rgba({}, {opacity_from}),  rgba({}, {opacity_to}))",
        rgb_triple(&config.bg_gradient_from),
        rgb_triple(&config.bg_gradient_to),
    )
}

fn card_height(config: &StyleConfig) -> String {
    if config.card_height == "auto" {
        "auto".to_string()
    } else {
        format!("{}{}", config.card_height, config.card_height_unit)
    }
}

// ============================================================================
// Lenient Numbers
// ============================================================================

static FLOAT_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?").unwrap());
static INT_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[+-]?\d+").unwrap());

/// Reads the longest leading decimal number, or `NaN` if there is none.
pub fn parse_float(s: &str) -> f64 {
    FLOAT_PREFIX
        .find(s)
        .and_then(|m| m.as_str().trim().parse().ok())
        .unwrap_or(f64::NAN)
}

/// Reads the leading integer, or `NaN` if there is none.
pub fn parse_int(s: &str) -> f64 {
    INT_PREFIX
        .find(s)
        .and_then(|m| m.as_str().trim().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

/// Prints a computed number without float noise (`0.7 + 0.15` → `0.85`).
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let rounded = (n * 10_000.0).round() / 10_000.0;
    if rounded == 0.0 {
        // avoids "-0"
        "0".to_string()
    } else {
        rounded.to_string()
    }
}

// ============================================================================
// Rule Emission
// ============================================================================

/// Emits the full readable stylesheet for `config`.
pub fn render(config: &StyleConfig) -> String {
    let ty = config.card_type.as_str();
    let mut css = String::new();

    // Writing into a String cannot fail.
    let _ = write_base_rules(&mut css, ty, config);
    if config.enable_hover_effects {
        let _ = write_hover_rules(&mut css, ty, config);
    }
    if config.enable_animations {
        let _ = write_animation_rules(&mut css, ty);
    }

    css
}

fn write_base_rules(css: &mut String, ty: &str, config: &StyleConfig) -> std::fmt::Result {
    let card_border = border_value(
        &config.card_border_width,
        config.card_border_style,
        &config.card_border_color,
        &config.card_border_opacity,
    );
    let icon_border = border_value(
        &config.icon_border_width,
        config.icon_border_style,
        &config.icon_border_color,
        &config.icon_border_opacity,
    );
    let opacity = format_number(f64::from(config.card_opacity) / 100.0);

    writeln!(css, "/* {} CARD STYLES */", ty.to_uppercase())?;
    writeln!(css)?;
    writeln!(css, "/* Card Container */")?;
    writeln!(css, ".{ty}-card {{")?;
    writeln!(css, "  width: {}{};", config.card_width, config.card_width_unit)?;
    writeln!(css, "  height: {};", card_height(config))?;
    writeln!(css, "  position: {};", config.position_type)?;
    writeln!(css, "  z-index: {};", config.z_index)?;
    writeln!(css, "  opacity: {opacity};")?;
    writeln!(css, "  padding: {}{};", config.card_padding, config.card_padding_unit)?;
    writeln!(css, "  border-radius: {};", border_radius_value(config))?;
    writeln!(css, "  border: {card_border};")?;
    writeln!(
        css,
        "  background: {};",
        card_background(config, &config.bg_opacity_from, &config.bg_opacity_to)
    )?;
    writeln!(css, "  box-shadow: {};", box_shadow_value(config))?;
    writeln!(css, "  transition: all 0.3s cubic-bezier(0.16, 1, 0.3, 1);")?;
    writeln!(css, "}}")?;
    writeln!(css)?;

    writeln!(css, "/* Icon Container */")?;
    writeln!(css, ".{ty}-icon {{")?;
    writeln!(css, "  width: {}px;", config.icon_size)?;
    writeln!(css, "  height: {}px;", config.icon_size)?;
    writeln!(
        css,
        "  border-radius: {}{};",
        config.icon_border_radius, config.icon_border_radius_unit
    )?;
    writeln!(css, "  border: {icon_border};")?;
    writeln!(
        css,
        "  background: linear-gradient(to bottom right, {}, {});",
        config.icon_gradient_from, config.icon_gradient_to
    )?;
    writeln!(
        css,
        "  box-shadow: 0 4px 12px rgba({}, 0.3);",
        rgb_triple(&config.icon_gradient_from)
    )?;
    writeln!(css, "  transition: all 0.3s ease-in-out;")?;
    writeln!(css, "}}")?;
    writeln!(css)?;

    writeln!(css, "/* Card Image Background */")?;
    writeln!(css, ".{ty}-card-image {{")?;
    writeln!(
        css,
        "  background: linear-gradient(to bottom right,  {},  {},  {});",
        config.card_image_gradient_from,
        config.card_image_gradient_via,
        config.card_image_gradient_to
    )?;
    writeln!(css, "}}")
}

fn write_hover_rules(css: &mut String, ty: &str, config: &StyleConfig) -> std::fmt::Result {
    let from = format_number(parse_float(&config.bg_opacity_from) + HOVER_BG_FROM_DELTA);
    let to = format_number(parse_float(&config.bg_opacity_to) + HOVER_BG_TO_DELTA);

    let primary = config.primary_shadow();
    let lifted = Shadow {
        y: &format_number(parse_int(primary.y) + HOVER_SHADOW_Y_DELTA),
        blur: &format_number(parse_int(primary.blur) + HOVER_SHADOW_BLUR_DELTA),
        opacity: &format_number(parse_float(primary.opacity) + HOVER_SHADOW_ALPHA_DELTA),
        ..primary
    };
    let hover_shadow = layered_shadow(shadow_value(&lifted), config);

    writeln!(css)?;
    writeln!(css, "/* Hover Effects */")?;
    writeln!(css, ".{ty}-card:hover {{")?;
    writeln!(css, "  transform: translateY(-8px) scale(1.02);")?;
    writeln!(css, "  background: {};", card_background(config, &from, &to))?;
    writeln!(css, "  box-shadow: {hover_shadow};")?;
    writeln!(css, "}}")?;
    writeln!(css)?;

    writeln!(css, ".{ty}-icon:hover {{")?;
    writeln!(css, "  transform: scale(1.05);")?;
    writeln!(
        css,
        "  background: linear-gradient(to bottom right, {}, {});",
        lighten(&config.icon_gradient_from, HOVER_LIGHTEN_PERCENT),
        lighten(&config.icon_gradient_to, HOVER_LIGHTEN_PERCENT)
    )?;
    writeln!(
        css,
        "  box-shadow: 0 8px 24px rgba({}, 0.5);",
        rgb_triple(&config.icon_gradient_from)
    )?;
    writeln!(css, "}}")?;
    writeln!(css)?;

    writeln!(css, ".{ty}-card-image:hover {{")?;
    writeln!(
        css,
        "  background: linear-gradient(to bottom right,  {},  {},  {});",
        lighten(&config.card_image_gradient_from, HOVER_LIGHTEN_PERCENT),
        lighten(&config.card_image_gradient_via, HOVER_LIGHTEN_PERCENT),
        lighten(&config.card_image_gradient_to, HOVER_LIGHTEN_PERCENT)
    )?;
    writeln!(css, "}}")
}

fn write_animation_rules(css: &mut String, ty: &str) -> std::fmt::Result {
    writeln!(css)?;
    writeln!(css, "/* Animations */")?;
    writeln!(css, "{ANIMATION_KEYFRAMES_FLOAT}")?;
    writeln!(css)?;
    writeln!(css, ".{ty}-float {{")?;
    writeln!(css, "  animation: float 3s ease-in-out infinite;")?;
    writeln!(css, "}}")?;
    writeln!(css)?;
    writeln!(css, "{ANIMATION_KEYFRAMES_PULSE}")?;
    writeln!(css)?;
    writeln!(css, ".{ty}-pulse {{")?;
    writeln!(css, "  animation: pulse 2s ease-in-out infinite;")?;
    writeln!(css, "}}")
}

// ============================================================================
// Tests
// ============================================================================
