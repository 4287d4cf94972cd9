//! CSS composition for extension cards.
//!
//! Composition happens in two stages:
//!
//! 1. **Rule emission** ([`rules`]) turns a [`StyleConfig`] into a readable
//!    stylesheet: the card, icon and card-image rules, plus the optional
//!    hover and animation variants.
//! 2. **Post-processing passes** rewrite that text. Each pass implements
//!    [`Pass`] and sits in a [`PassSlot`] that can be switched on and off
//!    without losing the pass itself.
//!
//! # Pass Order
//!
//! ```text
//! StyleConfig
//!     │
//!     ▼
//! ┌──────────┐
//! │  rules   │ ◄── pure function of the config
//! └────┬─────┘
//!      │
//!      ▼
//! ┌──────────┐
//! │ prefixes │ ◄── includePrefixes; inserts new lines
//! └────┬─────┘
//!      │
//!      ▼
//! ┌──────────┐
//! │  minify  │ ◄── minifyCss; must run last to collapse those lines
//! └──────────┘
//! ```

pub mod minify;
pub mod prefix;
pub mod rules;

pub use minify::Minify;
pub use prefix::VendorPrefixes;

use log::debug;

use crate::style::{OutputOptions, StyleConfig};

// ============================================================================
// Pass Traits
// ============================================================================

/// A textual rewrite applied to an already generated stylesheet.
pub trait Pass {
    /// Short name used in log output.
    fn name(&self) -> &'static str;

    /// Rewrites `css`, returning the new text.
    fn apply(&self, css: &str) -> String;
}

// ============================================================================
// Pass Slot
// ============================================================================

/// A pass together with its enabled state.
#[derive(Debug, Clone, Default)]
pub struct PassSlot<P: Pass> {
    pass: P,
    enabled: bool,
}

impl<P: Pass> PassSlot<P> {
    /// Wraps a pass, initially disabled.
    pub fn new(pass: P) -> Self {
        Self {
            pass,
            enabled: false,
        }
    }

    /// Returns the wrapped pass.
    pub fn pass(&self) -> &P {
        &self.pass
    }

    /// Returns whether the pass will run.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Sets whether the pass runs. Returns true if the state changed.
    pub fn set_enabled(&mut self, enabled: bool) -> bool {
        if self.enabled != enabled {
            self.enabled = enabled;
            true
        } else {
            false
        }
    }

    /// Runs the pass if enabled, otherwise hands `css` back untouched.
    pub fn run(&self, css: String) -> String {
        if !self.enabled {
            return css;
        }
        debug!("running css pass `{}`", self.pass.name());
        self.pass.apply(&css)
    }
}

// ============================================================================
// Pass Pipeline
// ============================================================================

/// The post-processing passes in their fixed order.
#[derive(Debug, Clone, Default)]
pub struct PassPipeline {
    /// Vendor prefix duplication (runs first).
    pub prefixes: PassSlot<VendorPrefixes>,

    /// Whitespace and comment stripping (runs last).
    pub minify: PassSlot<Minify>,
}

impl PassPipeline {
    /// Creates a pipeline with every pass switched according to `options`.
    pub fn from_options(options: &OutputOptions) -> Self {
        let mut pipeline = Self::default();
        pipeline.configure(options);
        pipeline
    }

    /// Switches passes on or off. Returns true if anything changed.
    pub fn configure(&mut self, options: &OutputOptions) -> bool {
        let prefixes = self.prefixes.set_enabled(options.include_prefixes);
        let minify = self.minify.set_enabled(options.minify_css);
        prefixes || minify
    }

    /// Runs every enabled pass over `css`, each exactly once.
    pub fn run(&self, css: String) -> String {
        let css = self.prefixes.run(css);
        self.minify.run(css)
    }
}

// ============================================================================
// Entry Points
// ============================================================================

/// Generates the complete stylesheet for one card.
///
/// This is a pure function: the same config always yields byte-identical
/// output, and no input makes it panic.
///
/// ```
/// use card_styler::{generate, StyleConfig};
///
/// let css = generate(&StyleConfig::default());
/// assert!(css.contains(".obsidian-card {"));
/// ```
pub fn generate(config: &StyleConfig) -> String {
    PassPipeline::from_options(&config.output).run(rules::render(config))
}

/// A composer that remembers its last output.
///
/// Live previews recompute CSS on every keystroke; when the config has not
/// changed since the previous call the cached text is returned.
///
/// The passes are switched by each config's [`OutputOptions`]; toggle
/// `minifyCss` or `includePrefixes` on the config to change them.
#[derive(Debug, Clone, Default)]
pub struct StyleComposer {
    pipeline: PassPipeline,

    cache: Option<(StyleConfig, String)>,
}

impl StyleComposer {
    /// Creates a composer with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the passes as configured by the last composed config.
    pub fn pipeline(&self) -> &PassPipeline {
        &self.pipeline
    }

    /// Returns the stylesheet for `config`, reusing the cached text when the
    /// config equals the previous one.
    pub fn compose(&mut self, config: &StyleConfig) -> &str {
        let hit = matches!(&self.cache, Some((cached, _)) if cached == config);
        if hit {
            debug!("css cache hit for `{}`", config.card_type);
        } else {
            self.pipeline.configure(&config.output);
            let css = self.pipeline.run(rules::render(config));
            self.cache = Some((config.clone(), css));
        }

        match &self.cache {
            Some((_, css)) => css.as_str(),
            None => "",
        }
    }

    /// Drops the cached output.
    pub fn clear_cache(&mut self) {
        self.cache = None;
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn obsidian_scenario() -> StyleConfig {
        let mut config = StyleConfig::default();
        config.bg_gradient_from = "#523091".into();
        config.bg_opacity_from = "0.70".into();
        config.bg_gradient_to = "#1a0b33".into();
        config.bg_opacity_to = "0.14".into();
        config.card_border_width = "0".into();
        config
    }

    #[test]
    fn obsidian_background_and_border() {
        let css = generate(&obsidian_scenario());
        assert!(css.contains(
            "background: radial-gradient(86.88% 75.47% at 50.00% 24.53%,  rgba(82, 48, 145, 0.70),  rgba(26, 11, 51, 0.14));"
        ));
        assert!(css.contains("border: none;"));
    }

    #[test]
    fn generation_is_deterministic() {
        let config = obsidian_scenario();
        assert_eq!(generate(&config), generate(&config));
    }

    #[test]
    fn prefixes_precede_standard_declaration() {
        let config = StyleConfig::default();
        let css = generate(&config);
        let webkit = css.find("-webkit-border-radius: 16px;").unwrap();
        let standard = css.find("\n  border-radius: 16px;").unwrap();
        assert!(webkit < standard);
        assert!(css.contains("-moz-box-shadow: "));
        assert!(css.contains("@-webkit-keyframes float {"));
    }

    #[test]
    fn no_prefixes_when_disabled() {
        let mut config = StyleConfig::default();
        config.output.include_prefixes = false;
        let css = generate(&config);
        assert!(!css.contains("-webkit-"));
        assert!(!css.contains("-moz-"));
    }

    #[test]
    fn minified_output_is_single_line() {
        let mut config = StyleConfig::default();
        config.output.minify_css = true;
        let css = generate(&config);
        assert!(!css.contains('\n'));
        assert!(!css.contains("/*"));
        assert!(css.starts_with(".obsidian-card{"));
        assert!(css.contains("border:none;"));
        // prefix copies survive minification
        assert!(css.contains("-webkit-border-radius:16px;"));
    }

    #[test]
    fn pass_slot_toggle_reports_change() {
        let mut slot = PassSlot::new(Minify);
        assert!(!slot.is_enabled());
        assert!(slot.set_enabled(true));
        assert!(!slot.set_enabled(true));
        assert_eq!(slot.run("a {  }".into()), "a{}");
        slot.set_enabled(false);
        assert_eq!(slot.run("a {  }".into()), "a {  }");
    }

    #[test]
    fn composer_cache_tracks_config() {
        let mut composer = StyleComposer::new();
        let mut config = StyleConfig::default();
        let first = composer.compose(&config).to_string();
        assert_eq!(composer.compose(&config), first);

        config.output.minify_css = true;
        let minified = composer.compose(&config).to_string();
        assert_ne!(minified, first);
        assert_eq!(minified, generate(&config));

        composer.clear_cache();
        assert_eq!(composer.compose(&config), minified);
    }

    #[test]
    fn composer_passes_follow_output_options() {
        let mut composer = StyleComposer::new();
        let mut config = StyleConfig::default();
        assert!(composer.compose(&config).contains('\n'));
        assert!(!composer.pipeline().minify.is_enabled());
        assert!(composer.pipeline().prefixes.is_enabled());

        config.output.minify_css = true;
        config.output.include_prefixes = false;
        let css = composer.compose(&config).to_string();
        assert!(!css.contains('\n'));
        assert!(!css.contains("-webkit-"));
        assert!(composer.pipeline().minify.is_enabled());
        assert!(!composer.pipeline().prefixes.is_enabled());
    }
}
