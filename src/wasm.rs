//! JavaScript bindings for browser editors.
//!
//! This module provides [`CardStyleEditor`], a wrapper around [`CardEditor`]
//! that a web UI can drive directly for live preview and CSS export.
//!
//! # Feature Flag
//!
//! Only available with the `wasm` feature enabled:
//!
//! ```toml
//! [dependencies]
//! card-styler = { version = "0.1", features = ["wasm"] }
//! ```
//!
//! # Example (JavaScript/TypeScript)
//!
//! ```javascript
//! import init, { CardStyleEditor, generateCss } from 'card-styler';
//!
//! await init();
//!
//! const editor = new CardStyleEditor();
//! editor.setConfig({ ...editor.exportConfig(), cardWidth: "360" });
//! preview.textContent = editor.css();
//!
//! if (editor.canUndo()) editor.undo();
//! ```

use wasm_bindgen::prelude::*;

use crate::composer::generate;
use crate::editor::{CardEditor, Configurable};
use crate::style::StyleConfig;

// ============================================================================
// CardStyleEditor
// ============================================================================

/// A [`CardEditor`] exposed to JavaScript.
#[wasm_bindgen]
pub struct CardStyleEditor {
    editor: CardEditor,
}

#[wasm_bindgen]
impl CardStyleEditor {
    /// Creates an editor on the default obsidian card.
    #[wasm_bindgen(constructor)]
    pub fn new() -> CardStyleEditor {
        Self {
            editor: CardEditor::default(),
        }
    }

    /// Creates an editor from a stored config JSON string.
    #[wasm_bindgen(js_name = "fromJson")]
    pub fn from_json(json: &str) -> Result<CardStyleEditor, JsError> {
        let config = StyleConfig::from_json(json)
            .map_err(|e| JsError::new(&format!("Failed to parse config: {e}")))?;
        Ok(Self {
            editor: CardEditor::new(config),
        })
    }

    /// Returns the stylesheet for the current config.
    pub fn css(&mut self) -> String {
        self.editor.css().to_string()
    }

    /// Replaces the config with a plain JS object, recording one undo step.
    ///
    /// Returns true if anything changed.
    #[wasm_bindgen(js_name = "setConfig")]
    pub fn set_config(&mut self, config: JsValue) -> Result<bool, JsError> {
        let config: StyleConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsError::new(&format!("Invalid config: {e}")))?;
        Ok(self.editor.apply_config(&config))
    }

    /// Returns the current config as a plain JS object.
    #[wasm_bindgen(js_name = "exportConfig")]
    pub fn export_config(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(&self.editor.export_config())
            .map_err(|e| JsError::new(&format!("Failed to export config: {e}")))
    }

    /// Returns the current config as a JSON string.
    #[wasm_bindgen(js_name = "exportConfigJson")]
    pub fn export_config_json(&self) -> Result<String, JsError> {
        self.editor
            .config()
            .to_json()
            .map_err(|e| JsError::new(&format!("Failed to serialize config: {e}")))
    }

    /// Steps back one edit. Returns false if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.editor.undo().is_some()
    }

    /// Steps forward one edit. Returns false if there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        self.editor.redo().is_some()
    }

    #[wasm_bindgen(js_name = "canUndo")]
    pub fn can_undo(&self) -> bool {
        self.editor.can_undo()
    }

    #[wasm_bindgen(js_name = "canRedo")]
    pub fn can_redo(&self) -> bool {
        self.editor.can_redo()
    }
}

impl Default for CardStyleEditor {
    fn default() -> Self {
        Self::new()
    }
}

/// Generates the stylesheet for a plain JS config object without keeping
/// any editor state.
#[wasm_bindgen(js_name = "generateCss")]
pub fn generate_css(config: JsValue) -> Result<String, JsError> {
    let config: StyleConfig = serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsError::new(&format!("Invalid config: {e}")))?;
    Ok(generate(&config))
}
