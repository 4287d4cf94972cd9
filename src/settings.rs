//! Editor-wide settings: storage keys, limits and timings.
//!
//! ```
//! use card_styler::EditorSettings;
//!
//! let settings = EditorSettings::from_json(r#"{ "maxHistoryLength": 20 }"#).unwrap();
//! assert_eq!(settings.max_history_length, 20);
//! assert_eq!(settings.cards_key, "extension_cards");
//! ```

use serde::{Deserialize, Serialize};

/// Configuration consumed by the editors and the persistence gateway.
///
/// Every field is optional in JSON and falls back to [`Default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct EditorSettings {
    /// Key under which the card list is stored.
    pub cards_key: String,

    /// Key under which the open presentation is stored.
    pub presentation_key: String,

    /// Key under which the list of known presentations is stored.
    pub presentations_list_key: String,

    /// Number of undo steps kept per editing session.
    pub max_history_length: usize,

    /// Image payloads longer than this many characters are moved out of the
    /// primary store.
    pub image_inline_limit: usize,

    /// Debounce window for saves, in milliseconds.
    pub save_debounce_ms: u64,

    /// Maximum number of slides in one presentation.
    pub max_slides: usize,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            cards_key: "extension_cards".into(),
            presentation_key: "current-slide-presentation".into(),
            presentations_list_key: "slide-presentations-list".into(),
            max_history_length: 50,
            image_inline_limit: 10_000,
            save_debounce_ms: 1_000,
            max_slides: 100,
        }
    }
}

impl EditorSettings {
    /// Creates the default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Deserializes settings from JSON, filling missing fields with defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the settings to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
