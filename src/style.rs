//! The flat style record behind one extension card.
//!
//! A [`StyleConfig`] captures everything the composer needs in a format that
//! serializes to the same camelCase JSON the browser editor stores.
//!
//! # Example
//!
//! ```
//! use card_styler::{CardType, Corner, StyleConfig};
//!
//! let mut config = StyleConfig::for_type(CardType::Redis, "Redis", "In-memory store.");
//! config.set_corner(Corner::BottomRight, "24");
//! assert!(config.corners_uniform());
//!
//! let json = config.to_json().unwrap();
//! let restored = StyleConfig::from_json(&json).unwrap();
//! assert_eq!(restored, config);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::preset::Preset;

#[cfg(feature = "tsify")]
use tsify_next::Tsify;

// ============================================================================
// Enumerations
// ============================================================================

/// The card archetypes the editor ships with.
///
/// The lowercase name doubles as the CSS class prefix (`.obsidian-card`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "tsify", derive(Tsify))]
pub enum CardType {
    #[default]
    Obsidian,
    Figma,
    Redis,
    Terminal,
    Docker,
}

impl CardType {
    /// Every card type, in the order the editor lists them.
    pub const ALL: [CardType; 5] = [
        Self::Obsidian,
        Self::Figma,
        Self::Redis,
        Self::Terminal,
        Self::Docker,
    ];

    /// The CSS class fragment for this type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Obsidian => "obsidian",
            Self::Figma => "figma",
            Self::Redis => "redis",
            Self::Terminal => "terminal",
            Self::Docker => "docker",
        }
    }

    /// Title given to a freshly created card of this type.
    pub fn default_title(self) -> &'static str {
        match self {
            Self::Obsidian => "Obsidian",
            Self::Figma => "Figma File Search",
            Self::Redis => "Redis",
            Self::Terminal => "Terminal",
            Self::Docker => "Docker",
        }
    }

    /// Description given to a freshly created card of this type.
    pub fn default_description(self) -> &'static str {
        match self {
            Self::Obsidian => "Capture information, manage tasks and pin notes to your menu bar.",
            Self::Figma => "Quickly open a Figma file from anywhere on your Mac.",
            Self::Redis => "Fast in-memory data structure store and caching solution.",
            Self::Terminal => "Powerful command-line terminal with advanced features.",
            Self::Docker => "Containerize applications for consistent deployment.",
        }
    }

    /// The color palette a new card of this type starts with.
    pub fn palette(self) -> &'static Palette {
        match self {
            Self::Obsidian => &OBSIDIAN,
            Self::Figma => &FIGMA,
            Self::Redis => &REDIS,
            Self::Terminal => &TERMINAL,
            Self::Docker => &DOCKER,
        }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CSS `border-style` keywords offered by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "tsify", derive(Tsify))]
pub enum BorderStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    Double,
    Groove,
    Ridge,
    Inset,
    Outset,
    None,
}

impl BorderStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Dashed => "dashed",
            Self::Dotted => "dotted",
            Self::Double => "double",
            Self::Groove => "groove",
            Self::Ridge => "ridge",
            Self::Inset => "inset",
            Self::Outset => "outset",
            Self::None => "none",
        }
    }
}

impl fmt::Display for BorderStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CSS `position` keywords offered by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "tsify", derive(Tsify))]
pub enum PositionType {
    Static,
    #[default]
    Relative,
    Absolute,
    Fixed,
    Sticky,
}

impl PositionType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Relative => "relative",
            Self::Absolute => "absolute",
            Self::Fixed => "fixed",
            Self::Sticky => "sticky",
        }
    }
}

impl fmt::Display for PositionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One corner of the card's border radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

// ============================================================================
// Palettes
// ============================================================================

/// The per-type colors a new card starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg_gradient_from: &'static str,
    pub bg_gradient_to: &'static str,
    pub bg_opacity_from: &'static str,
    pub bg_opacity_to: &'static str,
    pub icon_gradient_from: &'static str,
    pub icon_gradient_to: &'static str,
    pub card_image_gradient_from: &'static str,
    pub card_image_gradient_via: &'static str,
    pub card_image_gradient_to: &'static str,
    pub shadow_color: &'static str,
    pub shadow_opacity: &'static str,
}

const OBSIDIAN: Palette = Palette {
    bg_gradient_from: "#523091",
    bg_gradient_to: "#1a0b33",
    bg_opacity_from: "0.70",
    bg_opacity_to: "0.14",
    icon_gradient_from: "#7c3aed",
    icon_gradient_to: "#a855f7",
    card_image_gradient_from: "#4C1D95",
    card_image_gradient_via: "#7C3AED",
    card_image_gradient_to: "#A855F7",
    shadow_color: "#7c3aed",
    shadow_opacity: "0.3",
};

const FIGMA: Palette = Palette {
    bg_gradient_from: "#192935",
    bg_gradient_to: "#121922",
    bg_opacity_from: "0.70",
    bg_opacity_to: "0.07",
    icon_gradient_from: "#1e293b",
    icon_gradient_to: "#334155",
    card_image_gradient_from: "#0f172a",
    card_image_gradient_via: "#1e293b",
    card_image_gradient_to: "#334155",
    shadow_color: "#1abcfe",
    shadow_opacity: "0.3",
};

const REDIS: Palette = Palette {
    bg_gradient_from: "#913030",
    bg_gradient_to: "#330b0b",
    bg_opacity_from: "0.70",
    bg_opacity_to: "0.14",
    icon_gradient_from: "#dc2626",
    icon_gradient_to: "#ef4444",
    card_image_gradient_from: "#7f1d1d",
    card_image_gradient_via: "#dc2626",
    card_image_gradient_to: "#ef4444",
    shadow_color: "#ed3a3a",
    shadow_opacity: "0.3",
};

const TERMINAL: Palette = Palette {
    bg_gradient_from: "#404040",
    bg_gradient_to: "#181818",
    bg_opacity_from: "0.70",
    bg_opacity_to: "0.07",
    icon_gradient_from: "#374151",
    icon_gradient_to: "#6b7280",
    card_image_gradient_from: "#1f2937",
    card_image_gradient_via: "#374151",
    card_image_gradient_to: "#6b7280",
    shadow_color: "#a0a0a0",
    shadow_opacity: "0.3",
};

const DOCKER: Palette = Palette {
    bg_gradient_from: "#307891",
    bg_gradient_to: "#0b1e33",
    bg_opacity_from: "0.70",
    bg_opacity_to: "0.14",
    icon_gradient_from: "#0ea5e9",
    icon_gradient_to: "#3b82f6",
    card_image_gradient_from: "#0c4a6e",
    card_image_gradient_via: "#0ea5e9",
    card_image_gradient_to: "#3b82f6",
    shadow_color: "#3abced",
    shadow_opacity: "0.3",
};

// ============================================================================
// Output options
// ============================================================================

/// Flags for the generator invocation rather than the card's appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "tsify", derive(Tsify))]
pub struct OutputOptions {
    /// Collapse the stylesheet onto one line.
    pub minify_css: bool,

    /// Add `-webkit-`/`-moz-` copies of selected declarations.
    pub include_prefixes: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            minify_css: false,
            include_prefixes: true,
        }
    }
}

// ============================================================================
// Shadow view
// ============================================================================

/// A borrowed view of one box-shadow layer of a [`StyleConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shadow<'a> {
    pub inset: bool,
    pub x: &'a str,
    pub y: &'a str,
    pub blur: &'a str,
    pub spread: &'a str,
    pub color: &'a str,
    pub opacity: &'a str,
}

// ============================================================================
// StyleConfig
// ============================================================================

/// Every visual property of one card.
///
/// Numeric values are kept as the strings the form produced; the composer
/// interprets them leniently. Missing JSON fields take the defaults below
/// and unknown fields are ignored.
///
/// # JSON Format
///
/// ```json
/// {
///   "type": "obsidian",
///   "bgGradientFrom": "#523091",
///   "bgOpacityFrom": "0.70",
///   "cardBorderRadiusTopLeft": "16",
///   "linkBorderRadius": true,
///   "useSecondShadow": true,
///   "cardOpacity": 100,
///   "minifyCss": false,
///   "includePrefixes": true
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "tsify", derive(Tsify), tsify(into_wasm_abi, from_wasm_abi))]
pub struct StyleConfig {
    #[serde(rename = "type")]
    pub card_type: CardType,
    pub title: String,
    pub description: String,
    /// CSS time string, e.g. `500ms`.
    pub delay: String,

    pub bg_gradient_from: String,
    pub bg_gradient_to: String,
    pub bg_opacity_from: String,
    pub bg_opacity_to: String,

    pub icon_gradient_from: String,
    pub icon_gradient_to: String,
    pub icon_size: String,
    pub icon_border_width: String,
    pub icon_border_style: BorderStyle,
    pub icon_border_color: String,
    pub icon_border_opacity: String,
    pub icon_border_radius: String,
    pub icon_border_radius_unit: String,

    pub card_image_gradient_from: String,
    pub card_image_gradient_via: String,
    pub card_image_gradient_to: String,

    pub card_width: String,
    pub card_width_unit: String,
    /// Either `"auto"` or a number paired with `card_height_unit`.
    pub card_height: String,
    pub card_height_unit: String,
    pub card_padding: String,
    pub card_padding_unit: String,

    pub card_border_width: String,
    pub card_border_style: BorderStyle,
    pub card_border_color: String,
    pub card_border_opacity: String,

    pub card_border_radius_top_left: String,
    pub card_border_radius_top_right: String,
    pub card_border_radius_bottom_left: String,
    pub card_border_radius_bottom_right: String,
    pub card_border_radius_unit: String,
    /// When set, editing one corner through [`set_corner`](Self::set_corner)
    /// writes all four.
    pub link_border_radius: bool,

    pub shadow_inset: bool,
    pub shadow_x: String,
    pub shadow_y: String,
    pub shadow_blur: String,
    pub shadow_spread: String,
    pub shadow_color: String,
    pub shadow_opacity: String,

    pub use_second_shadow: bool,
    pub shadow2_inset: bool,
    pub shadow2_x: String,
    pub shadow2_y: String,
    pub shadow2_blur: String,
    pub shadow2_spread: String,
    pub shadow2_color: String,
    pub shadow2_opacity: String,

    pub z_index: String,
    pub position_type: PositionType,
    /// Whole-card opacity as a percentage (0-100).
    pub card_opacity: u8,

    pub enable_hover_effects: bool,
    pub enable_animations: bool,

    #[serde(flatten)]
    pub output: OutputOptions,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self::for_type(
            CardType::Obsidian,
            CardType::Obsidian.default_title(),
            CardType::Obsidian.default_description(),
        )
    }
}

impl StyleConfig {
    /// Creates a card of the given type with that type's palette and the
    /// shared layout defaults.
    pub fn for_type(
        card_type: CardType,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let mut config = Self {
            card_type,
            title: title.into(),
            description: description.into(),
            delay: "500ms".into(),

            bg_gradient_from: String::new(),
            bg_gradient_to: String::new(),
            bg_opacity_from: String::new(),
            bg_opacity_to: String::new(),

            icon_gradient_from: String::new(),
            icon_gradient_to: String::new(),
            icon_size: "56".into(),
            icon_border_width: "0".into(),
            icon_border_style: BorderStyle::Solid,
            icon_border_color: "#ffffff".into(),
            icon_border_opacity: "0.2".into(),
            icon_border_radius: "12".into(),
            icon_border_radius_unit: "px".into(),

            card_image_gradient_from: String::new(),
            card_image_gradient_via: String::new(),
            card_image_gradient_to: String::new(),

            card_width: "320".into(),
            card_width_unit: "px".into(),
            card_height: "auto".into(),
            card_height_unit: "px".into(),
            card_padding: "20".into(),
            card_padding_unit: "px".into(),

            card_border_width: "0".into(),
            card_border_style: BorderStyle::Solid,
            card_border_color: "#ffffff".into(),
            card_border_opacity: "0.1".into(),

            card_border_radius_top_left: "16".into(),
            card_border_radius_top_right: "16".into(),
            card_border_radius_bottom_left: "16".into(),
            card_border_radius_bottom_right: "16".into(),
            card_border_radius_unit: "px".into(),
            link_border_radius: true,

            shadow_inset: false,
            shadow_x: "0".into(),
            shadow_y: "30".into(),
            shadow_blur: "50".into(),
            shadow_spread: "0".into(),
            shadow_color: String::new(),
            shadow_opacity: String::new(),

            use_second_shadow: true,
            shadow2_inset: true,
            shadow2_x: "0".into(),
            shadow2_y: "1".into(),
            shadow2_blur: "0".into(),
            shadow2_spread: "0".into(),
            shadow2_color: "#ffffff".into(),
            shadow2_opacity: "0.1".into(),

            z_index: "1".into(),
            position_type: PositionType::Relative,
            card_opacity: 100,

            enable_hover_effects: true,
            enable_animations: true,

            output: OutputOptions::default(),
        };
        config.apply_palette(card_type.palette());
        config
    }

    /// Overwrites the color fields with a palette.
    pub fn apply_palette(&mut self, palette: &Palette) {
        self.bg_gradient_from = palette.bg_gradient_from.into();
        self.bg_gradient_to = palette.bg_gradient_to.into();
        self.bg_opacity_from = palette.bg_opacity_from.into();
        self.bg_opacity_to = palette.bg_opacity_to.into();
        self.icon_gradient_from = palette.icon_gradient_from.into();
        self.icon_gradient_to = palette.icon_gradient_to.into();
        self.card_image_gradient_from = palette.card_image_gradient_from.into();
        self.card_image_gradient_via = palette.card_image_gradient_via.into();
        self.card_image_gradient_to = palette.card_image_gradient_to.into();
        self.shadow_color = palette.shadow_color.into();
        self.shadow_opacity = palette.shadow_opacity.into();
    }

    /// Applies a named preset. See [`Preset::apply`].
    pub fn apply_preset(&mut self, preset: Preset) {
        preset.apply(self);
    }

    // ------------------------------------------------------------------------
    // Border radius
    // ------------------------------------------------------------------------

    /// Returns the stored value of one corner.
    pub fn corner(&self, corner: Corner) -> &str {
        match corner {
            Corner::TopLeft => &self.card_border_radius_top_left,
            Corner::TopRight => &self.card_border_radius_top_right,
            Corner::BottomLeft => &self.card_border_radius_bottom_left,
            Corner::BottomRight => &self.card_border_radius_bottom_right,
        }
    }

    fn corner_mut(&mut self, corner: Corner) -> &mut String {
        match corner {
            Corner::TopLeft => &mut self.card_border_radius_top_left,
            Corner::TopRight => &mut self.card_border_radius_top_right,
            Corner::BottomLeft => &mut self.card_border_radius_bottom_left,
            Corner::BottomRight => &mut self.card_border_radius_bottom_right,
        }
    }

    /// Sets one corner, or all four when the radius is linked.
    pub fn set_corner(&mut self, corner: Corner, value: impl Into<String>) {
        let value = value.into();
        if self.link_border_radius {
            for c in [
                Corner::TopLeft,
                Corner::TopRight,
                Corner::BottomLeft,
                Corner::BottomRight,
            ] {
                *self.corner_mut(c) = value.clone();
            }
        } else {
            *self.corner_mut(corner) = value;
        }
    }

    /// Toggles corner linking. Turning it on copies the top-left value to
    /// the other three corners.
    pub fn set_link_border_radius(&mut self, linked: bool) {
        self.link_border_radius = linked;
        if linked {
            let top_left = self.card_border_radius_top_left.clone();
            self.set_corner(Corner::TopLeft, top_left);
        }
    }

    /// Returns true if all four corners hold the same value.
    pub fn corners_uniform(&self) -> bool {
        let tl = &self.card_border_radius_top_left;
        *tl == self.card_border_radius_top_right
            && *tl == self.card_border_radius_bottom_left
            && *tl == self.card_border_radius_bottom_right
    }

    // ------------------------------------------------------------------------
    // Shadows
    // ------------------------------------------------------------------------

    /// The primary box-shadow layer.
    pub fn primary_shadow(&self) -> Shadow<'_> {
        Shadow {
            inset: self.shadow_inset,
            x: &self.shadow_x,
            y: &self.shadow_y,
            blur: &self.shadow_blur,
            spread: &self.shadow_spread,
            color: &self.shadow_color,
            opacity: &self.shadow_opacity,
        }
    }

    /// The secondary layer, if enabled.
    pub fn secondary_shadow(&self) -> Option<Shadow<'_>> {
        self.use_second_shadow.then(|| Shadow {
            inset: self.shadow2_inset,
            x: &self.shadow2_x,
            y: &self.shadow2_y,
            blur: &self.shadow2_blur,
            spread: &self.shadow2_spread,
            color: &self.shadow2_color,
            opacity: &self.shadow2_opacity,
        })
    }

    // ------------------------------------------------------------------------
    // Serialization
    // ------------------------------------------------------------------------

    /// Serializes the config to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the config to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a config, taking defaults for any missing field.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_obsidian() {
        let config = StyleConfig::default();
        assert_eq!(config.card_type, CardType::Obsidian);
        assert_eq!(config.bg_gradient_from, "#523091");
        assert_eq!(config.card_height, "auto");
        assert_eq!(config.card_opacity, 100);
        assert!(config.link_border_radius);
        assert!(config.output.include_prefixes);
        assert!(!config.output.minify_css);
    }

    #[test]
    fn per_type_palette() {
        let docker = StyleConfig::for_type(CardType::Docker, "Docker", "");
        assert_eq!(docker.bg_gradient_from, "#307891");
        assert_eq!(docker.shadow_color, "#3abced");
        // layout defaults are shared
        assert_eq!(docker.card_width, "320");
    }

    #[test]
    fn json_uses_camel_case_field_names() {
        let json = StyleConfig::default().to_json_pretty().unwrap();
        assert!(json.contains("\"type\": \"obsidian\""));
        assert!(json.contains("\"bgGradientFrom\": \"#523091\""));
        assert!(json.contains("\"shadow2Opacity\": \"0.1\""));
        assert!(json.contains("\"cardBorderRadiusTopLeft\": \"16\""));
        assert!(json.contains("\"minifyCss\": false"));
        assert!(json.contains("\"positionType\": \"relative\""));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = StyleConfig::from_json(r#"{ "type": "figma", "title": "Figma" }"#).unwrap();
        assert_eq!(config.card_type, CardType::Figma);
        assert_eq!(config.title, "Figma");
        // Missing fields come from the obsidian defaults, not the figma palette.
        assert_eq!(config.bg_gradient_from, "#523091");
        assert_eq!(config.shadow_y, "30");
        assert!(config.output.include_prefixes);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let config =
            StyleConfig::from_json(r#"{ "isActive": true, "iconImage": null, "cardWidth": "400" }"#)
                .unwrap();
        assert_eq!(config.card_width, "400");
    }

    #[test]
    fn linked_corner_writes_all_four() {
        let mut config = StyleConfig::default();
        config.set_corner(Corner::TopRight, "8");
        for corner in [
            Corner::TopLeft,
            Corner::TopRight,
            Corner::BottomLeft,
            Corner::BottomRight,
        ] {
            assert_eq!(config.corner(corner), "8");
        }
    }

    #[test]
    fn unlinked_corner_writes_one() {
        let mut config = StyleConfig::default();
        config.set_link_border_radius(false);
        config.set_corner(Corner::BottomLeft, "4");
        assert_eq!(config.corner(Corner::BottomLeft), "4");
        assert_eq!(config.corner(Corner::TopLeft), "16");
        assert!(!config.corners_uniform());

        config.set_link_border_radius(true);
        assert!(config.corners_uniform());
        assert_eq!(config.corner(Corner::BottomLeft), "16");
    }

    #[test]
    fn secondary_shadow_gated_by_flag() {
        let mut config = StyleConfig::default();
        assert_eq!(config.secondary_shadow().unwrap().color, "#ffffff");
        config.use_second_shadow = false;
        assert!(config.secondary_shadow().is_none());
        assert_eq!(config.primary_shadow().y, "30");
    }

    #[test]
    fn enum_names_are_css_keywords() {
        assert_eq!(BorderStyle::Double.to_string(), "double");
        assert_eq!(PositionType::Sticky.to_string(), "sticky");
        assert_eq!(CardType::Terminal.to_string(), "terminal");
    }
}
