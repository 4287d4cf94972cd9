//! Named style presets that overwrite shadow, border and background fields.

use serde::{Deserialize, Serialize};

use crate::style::StyleConfig;

/// A one-click look applied on top of an existing card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub enum Preset {
    #[default]
    Default,
    Flat,
    Glass,
    Neumorphism,
    Material,
}

impl Preset {
    pub const ALL: [Preset; 5] = [
        Self::Default,
        Self::Flat,
        Self::Glass,
        Self::Neumorphism,
        Self::Material,
    ];

    /// Label shown in the preset picker.
    pub fn name(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Flat => "Flat",
            Self::Glass => "Glassmorphism",
            Self::Neumorphism => "Neumorphism",
            Self::Material => "Material",
        }
    }

    /// Writes this preset's fields into `config`. Fields the preset does not
    /// mention are left alone.
    pub fn apply(self, config: &mut StyleConfig) {
        match self {
            Self::Flat => {
                set_primary_shadow(config, "0", "0", "0", "0");
                config.use_second_shadow = false;
                config.card_border_width = "1".into();
                config.card_border_color = "#000000".into();
                config.card_border_opacity = "0.1".into();
            }
            Self::Glass => {
                config.bg_opacity_from = "0.2".into();
                config.bg_opacity_to = "0.1".into();
                config.card_border_width = "1".into();
                config.card_border_color = "#ffffff".into();
                config.card_border_opacity = "0.2".into();
                set_primary_shadow(config, "0", "10", "30", "0");
                config.shadow_opacity = "0.15".into();
            }
            Self::Neumorphism => {
                config.bg_gradient_from = "#e0e0e0".into();
                config.bg_gradient_to = "#e0e0e0".into();
                config.bg_opacity_from = "1".into();
                config.bg_opacity_to = "1".into();
                config.shadow_color = "#ffffff".into();
                config.shadow_opacity = "1".into();
                set_primary_shadow(config, "-10", "-10", "20", "0");
                config.use_second_shadow = true;
                config.shadow2_color = "#000000".into();
                config.shadow2_opacity = "0.1".into();
                set_secondary_shadow(config, "10", "10", "20", "0");
                config.card_border_width = "0".into();
            }
            Self::Material => {
                set_primary_shadow(config, "0", "4", "20", "0");
                config.shadow_opacity = "0.2".into();
                config.use_second_shadow = true;
                set_secondary_shadow(config, "0", "2", "4", "0");
                config.shadow2_color = "#000000".into();
                config.shadow2_opacity = "0.1".into();
                config.card_border_width = "0".into();
            }
            Self::Default => {
                set_primary_shadow(config, "0", "30", "50", "0");
                config.shadow_opacity = "0.4".into();
                config.use_second_shadow = true;
                config.shadow2_inset = true;
                set_secondary_shadow(config, "0", "1", "0", "0");
                config.shadow2_color = "#ffffff".into();
                config.shadow2_opacity = "0.1".into();
                config.card_border_width = "0".into();
            }
        }
    }
}

fn set_primary_shadow(config: &mut StyleConfig, x: &str, y: &str, blur: &str, spread: &str) {
    config.shadow_x = x.into();
    config.shadow_y = y.into();
    config.shadow_blur = blur.into();
    config.shadow_spread = spread.into();
}

fn set_secondary_shadow(config: &mut StyleConfig, x: &str, y: &str, blur: &str, spread: &str) {
    config.shadow2_x = x.into();
    config.shadow2_y = y.into();
    config.shadow2_blur = blur.into();
    config.shadow2_spread = spread.into();
}
