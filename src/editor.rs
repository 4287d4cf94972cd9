//! Card editing session with undo/redo.

use crate::composer::StyleComposer;
use crate::history::{History, HistoryConfig};
use crate::preset::Preset;
use crate::settings::EditorSettings;
use crate::style::{CardType, Corner, StyleConfig};

// ============================================================================
// Configurable Trait
// ============================================================================

/// Types whose whole state can be replaced by, or exported as, a
/// [`StyleConfig`].
pub trait Configurable {
    /// Replaces the current config. Returns true if anything changed.
    fn apply_config(&mut self, config: &StyleConfig) -> bool;

    /// Exports the current config.
    fn export_config(&self) -> StyleConfig;
}

// ============================================================================
// CardEditor
// ============================================================================

/// One card being edited.
///
/// Every mutation goes through the editor so the previous value lands in
/// the history first. The CSS is recomputed on demand and never throttled.
///
/// # Example
///
/// ```
/// use card_styler::{CardEditor, Corner, StyleConfig};
///
/// let mut editor = CardEditor::new(StyleConfig::default());
/// editor.set_corner_radius(Corner::TopLeft, "24");
/// assert!(editor.css().contains("border-radius: 24px;"));
///
/// editor.undo();
/// assert_eq!(editor.config().card_border_radius_top_left, "16");
/// ```
#[derive(Debug, Clone)]
pub struct CardEditor {
    history: History<StyleConfig>,
    composer: StyleComposer,
}

impl CardEditor {
    /// Starts an editing session with default limits.
    pub fn new(config: StyleConfig) -> Self {
        Self::with_settings(config, &EditorSettings::default())
    }

    /// Starts an editing session using the history limit from `settings`.
    pub fn with_settings(config: StyleConfig, settings: &EditorSettings) -> Self {
        Self {
            history: History::with_config(
                config,
                HistoryConfig::new(settings.max_history_length),
            ),
            composer: StyleComposer::new(),
        }
    }

    /// Returns the config being edited.
    pub fn config(&self) -> &StyleConfig {
        self.history.present()
    }

    /// Returns the underlying history.
    pub fn history(&self) -> &History<StyleConfig> {
        &self.history
    }

    /// Edits a copy of the config and records it if the closure changed
    /// anything. Returns true if a step was recorded.
    pub fn update(&mut self, edit: impl FnOnce(&mut StyleConfig)) -> bool {
        let mut next = self.history.present().clone();
        edit(&mut next);
        self.history.record(next)
    }

    /// Sets one corner, or all four when the radius is linked.
    pub fn set_corner_radius(&mut self, corner: Corner, value: impl Into<String>) -> bool {
        let value = value.into();
        self.update(|config| config.set_corner(corner, value))
    }

    /// Toggles corner linking. Linking copies the top-left corner to the
    /// other three.
    pub fn set_link_border_radius(&mut self, linked: bool) -> bool {
        self.update(|config| config.set_link_border_radius(linked))
    }

    /// Sets the whole-card opacity percentage, clamped to 100.
    pub fn set_card_opacity(&mut self, percent: u8) -> bool {
        self.update(|config| config.card_opacity = percent.min(100))
    }

    pub fn apply_preset(&mut self, preset: Preset) -> bool {
        self.update(|config| config.apply_preset(preset))
    }

    /// Replaces the card with a fresh one of `card_type`, as one undo step.
    pub fn reset(&mut self, card_type: CardType) -> bool {
        self.history.record(StyleConfig::for_type(
            card_type,
            card_type.default_title(),
            card_type.default_description(),
        ))
    }

    pub fn undo(&mut self) -> Option<&StyleConfig> {
        self.history.undo()
    }

    pub fn redo(&mut self) -> Option<&StyleConfig> {
        self.history.redo()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Returns the stylesheet for the current config.
    pub fn css(&mut self) -> &str {
        self.composer.compose(self.history.present())
    }
}

impl Default for CardEditor {
    fn default() -> Self {
        Self::new(StyleConfig::default())
    }
}

impl Configurable for CardEditor {
    /// Records `config` as one undo step.
    fn apply_config(&mut self, config: &StyleConfig) -> bool {
        self.history.record(config.clone())
    }

    fn export_config(&self) -> StyleConfig {
        self.history.present().clone()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_records_previous_value() {
        let mut editor = CardEditor::default();
        assert!(editor.update(|c| c.title = "Notes".into()));
        assert_eq!(editor.config().title, "Notes");
        assert!(editor.can_undo());

        let restored = editor.undo().unwrap();
        assert_eq!(restored.title, "Obsidian");
        assert!(editor.can_redo());
        assert_eq!(editor.redo().unwrap().title, "Notes");
    }

    #[test]
    fn unchanged_update_records_nothing() {
        let mut editor = CardEditor::default();
        assert!(!editor.update(|c| c.card_width = "320".into()));
        assert!(!editor.can_undo());
    }

    #[test]
    fn linked_corner_edit_is_one_step() {
        let mut editor = CardEditor::default();
        editor.set_corner_radius(Corner::BottomRight, "4");
        assert!(editor.config().corners_uniform());
        assert_eq!(editor.config().corner(Corner::TopLeft), "4");
        assert_eq!(editor.history().past().len(), 1);
    }

    #[test]
    fn relinking_syncs_to_top_left() {
        let mut editor = CardEditor::default();
        editor.set_link_border_radius(false);
        editor.set_corner_radius(Corner::TopLeft, "30");
        assert_eq!(editor.config().corner(Corner::TopRight), "16");

        editor.set_link_border_radius(true);
        assert!(editor.config().corners_uniform());
        assert_eq!(editor.config().corner(Corner::BottomLeft), "30");
    }

    #[test]
    fn opacity_is_clamped() {
        let mut editor = CardEditor::default();
        editor.set_card_opacity(250);
        assert_eq!(editor.config().card_opacity, 100);
        assert!(!editor.can_undo());
        editor.set_card_opacity(40);
        assert!(editor.css().contains("opacity: 0.4;"));
    }

    #[test]
    fn reset_is_undoable() {
        let mut editor = CardEditor::default();
        editor.reset(CardType::Redis);
        assert_eq!(editor.config().card_type, CardType::Redis);
        assert_eq!(editor.config().bg_gradient_from, "#913030");
        editor.undo();
        assert_eq!(editor.config().card_type, CardType::Obsidian);
    }

    #[test]
    fn preset_then_css() {
        let mut editor = CardEditor::default();
        editor.apply_preset(Preset::Flat);
        let css = editor.css().to_string();
        assert!(css.contains("border: 1px solid rgba(0, 0, 0, 0.1);"));
        assert!(!css.contains("inset 0px 1px"));
    }

    #[test]
    fn history_limit_from_settings() {
        let settings = EditorSettings {
            max_history_length: 2,
            ..EditorSettings::default()
        };
        let mut editor = CardEditor::with_settings(StyleConfig::default(), &settings);
        for z in 2..7 {
            editor.update(|c| c.z_index = z.to_string());
        }
        assert_eq!(editor.history().past().len(), 2);
    }

    #[test]
    fn configurable_round_trip() {
        let mut editor = CardEditor::default();
        let mut config = editor.export_config();
        config.card_type = CardType::Terminal;
        assert!(editor.apply_config(&config));
        assert!(!editor.apply_config(&config));
        assert_eq!(editor.export_config(), config);
    }
}
