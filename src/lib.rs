//! card-styler: CSS generation and editing state for extension cards
//!
//! This crate turns a flat [`StyleConfig`] into deterministic CSS, and
//! provides the undo/redo and persistence plumbing a browser editor needs
//! around it.
//!
//! # Example
//!
//! ```
//! use card_styler::{generate, CardType, StyleConfig};
//!
//! let mut config = StyleConfig::for_type(CardType::Docker, "Docker", "Containers.");
//! config.card_border_width = "0".into();
//! config.output.minify_css = true;
//!
//! let css = generate(&config);
//! assert!(css.starts_with(".docker-card{"));
//! assert!(css.contains("border:none;"));
//! ```
//!
//! # Editing With History
//!
//! [`CardEditor`] records every change so it can be undone:
//!
//! ```
//! use card_styler::{CardEditor, Preset, StyleConfig};
//!
//! let mut editor = CardEditor::new(StyleConfig::default());
//! editor.apply_preset(Preset::Glass);
//! editor.set_card_opacity(90);
//!
//! editor.undo();
//! assert_eq!(editor.config().card_opacity, 100);
//! assert!(editor.can_redo());
//! ```
//!
//! [`History`] is generic and also backs [`SlideDeck`].
//!
//! # Persistence
//!
//! ```
//! use card_styler::{CardGateway, MemoryStore, StoredCard, StyleConfig};
//!
//! let mut gateway = CardGateway::new(MemoryStore::new(), MemoryStore::new());
//! let cards = vec![StoredCard::new("c1", StyleConfig::default())];
//! gateway.save_card_list(&cards).unwrap();
//! assert_eq!(gateway.load_card_list().unwrap(), Some(cards));
//! ```

pub mod composer;

mod color;
mod editor;
mod error;
mod history;
mod persistence;
mod preset;
mod settings;
mod slides;
mod style;

#[cfg(feature = "wasm")]
mod wasm;

pub use color::{darken, hex_to_rgb, is_light, lighten, rgb_triple, to_hex};
pub use composer::{Pass, PassPipeline, PassSlot, StyleComposer, generate};
pub use editor::{CardEditor, Configurable};
pub use error::{Error, Result, StorageError};
pub use history::{History, HistoryConfig, HistoryState};
pub use persistence::{
    CardGateway, IMAGE_SENTINEL, ImageGenerations, ImageKind, KeyValueStore, MemoryStore,
    PresentationSummary, SaveThrottle, StoredCard, Ticket,
};
pub use preset::Preset;
pub use settings::EditorSettings;
pub use slides::{Presentation, Slide, SlideDeck, unique_id};
pub use style::{
    BorderStyle, CardType, Corner, OutputOptions, Palette, PositionType, Shadow, StyleConfig,
};

#[cfg(feature = "wasm")]
pub use wasm::{CardStyleEditor, generate_css};
