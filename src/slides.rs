//! Slide presentations and their editing session.
//!
//! [`Presentation`] is the stored document; [`SlideDeck`] wraps one with a
//! current-slide cursor, a dirty flag and an undo history.
//!
//! # Security
//!
//! Slide text fields hold HTML produced by the editor's own content-editable
//! regions and are stored and returned verbatim. Nothing here sanitizes
//! them, so they must only ever come from a trusted origin.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::history::{History, HistoryConfig};
use crate::settings::EditorSettings;

pub const DEFAULT_PRESENTATION_TITLE: &str = "Untitled Presentation";
pub const DEFAULT_SLIDE_TITLE: &str = "Slide Title";
pub const DEFAULT_SLIDE_SUBTITLE: &str = "Slide Subtitle";
pub const DEFAULT_SLIDE_CONTENT: &str = "<p>Click to add text</p>";

/// Longest text accepted into a single slide field; longer input is cut.
pub const MAX_FIELD_CHARS: usize = 10_000;

pub const MIN_ZOOM: f64 = 0.25;
pub const MAX_ZOOM: f64 = 3.0;

// ============================================================================
// Document Model
// ============================================================================

/// One slide. `title`, `subtitle` and `content` are trusted HTML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct Slide {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub content: String,
    #[serde(default)]
    pub background: String,
    /// Free-form elements placed by external tools.
    #[serde(default)]
    pub elements: Vec<serde_json::Value>,
}

impl Default for Slide {
    fn default() -> Self {
        Self {
            id: unique_id(),
            title: DEFAULT_SLIDE_TITLE.into(),
            subtitle: DEFAULT_SLIDE_SUBTITLE.into(),
            content: DEFAULT_SLIDE_CONTENT.into(),
            background: String::new(),
            elements: Vec::new(),
        }
    }
}

/// A titled, ordered list of slides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct Presentation {
    pub id: String,
    pub title: String,
    /// RFC 3339 in JSON.
    pub last_edited: DateTime<Utc>,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default)]
    pub slides: Vec<Slide>,
}

impl Default for Presentation {
    fn default() -> Self {
        Self {
            id: unique_id(),
            title: DEFAULT_PRESENTATION_TITLE.into(),
            last_edited: Utc::now(),
            theme: default_theme(),
            slides: Vec::new(),
        }
    }
}

impl Presentation {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

fn default_theme() -> String {
    "default".into()
}

/// Returns a new identifier: the current time in milliseconds followed by
/// a process-wide sequence number, both base 36.
pub fn unique_id() -> String {
    static SEQUENCE: AtomicU64 = AtomicU64::new(0);
    let millis = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("{}{}", base36(millis), base36(seq))
}

fn base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut out = Vec::new();
    loop {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
        if n == 0 {
            break;
        }
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

fn truncate_chars(text: &mut String, max: usize) {
    if let Some((byte, _)) = text.char_indices().nth(max) {
        debug!("slide field truncated to {max} characters");
        text.truncate(byte);
    }
}

// ============================================================================
// SlideDeck
// ============================================================================

/// An editing session over one [`Presentation`].
///
/// Every structural or content edit records the previous document and
/// bumps `last_edited`. An edit that leaves the slides untouched records
/// nothing.
///
/// ```
/// use card_styler::SlideDeck;
///
/// let mut deck = SlideDeck::new();
/// deck.add_slide().unwrap();
/// deck.edit_slide(0, |s| s.title = "<h1>Intro</h1>".into()).unwrap();
/// assert!(deck.is_dirty());
///
/// deck.undo();
/// assert_eq!(deck.current_slide().unwrap().title, "Slide Title");
/// ```
#[derive(Debug, Clone)]
pub struct SlideDeck {
    history: History<Presentation>,
    current: Option<usize>,
    dirty: bool,
    zoom: f64,
    max_slides: usize,
}

impl SlideDeck {
    /// Starts a session on an empty presentation.
    pub fn new() -> Self {
        Self::from_presentation(Presentation::default())
    }

    pub fn with_settings(settings: &EditorSettings) -> Self {
        Self::from_presentation_with_settings(Presentation::default(), settings)
    }

    /// Starts a session on an existing presentation with its first slide
    /// selected.
    pub fn from_presentation(presentation: Presentation) -> Self {
        Self::from_presentation_with_settings(presentation, &EditorSettings::default())
    }

    pub fn from_presentation_with_settings(
        presentation: Presentation,
        settings: &EditorSettings,
    ) -> Self {
        let current = (!presentation.slides.is_empty()).then_some(0);
        Self {
            history: History::with_config(
                presentation,
                HistoryConfig::new(settings.max_history_length),
            ),
            current,
            dirty: false,
            zoom: 1.0,
            max_slides: settings.max_slides,
        }
    }

    pub fn presentation(&self) -> &Presentation {
        self.history.present()
    }

    pub fn slides(&self) -> &[Slide] {
        &self.presentation().slides
    }

    pub fn len(&self) -> usize {
        self.slides().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides().is_empty()
    }

    // ------------------------------------------------------------------------
    // Structure
    // ------------------------------------------------------------------------

    /// Appends a default slide and selects it. Returns its index.
    pub fn add_slide(&mut self) -> Result<usize> {
        if self.len() >= self.max_slides {
            return Err(Error::SlideLimit {
                max: self.max_slides,
            });
        }
        let index = self.len();
        self.commit(|p| p.slides.push(Slide::default()));
        self.current = Some(index);
        Ok(index)
    }

    /// Removes a slide. The selection stays on the same slide when it
    /// survives, and otherwise moves to the slide now at `index`.
    pub fn delete_slide(&mut self, index: usize) -> Result<Slide> {
        self.check_index(index)?;
        let removed = self.slides()[index].clone();
        self.commit(|p| {
            p.slides.remove(index);
        });

        let len = self.len();
        self.current = match self.current {
            _ if len == 0 => None,
            Some(cur) if cur == index => Some(index.min(len - 1)),
            Some(cur) if cur > index => Some(cur - 1),
            other => other,
        };
        Ok(removed)
    }

    /// Inserts a copy of a slide right after it, with a new id, and selects
    /// the copy.
    pub fn duplicate_slide(&mut self, index: usize) -> Result<usize> {
        self.check_index(index)?;
        if self.len() >= self.max_slides {
            return Err(Error::SlideLimit {
                max: self.max_slides,
            });
        }
        let mut copy = self.slides()[index].clone();
        copy.id = unique_id();
        self.commit(|p| p.slides.insert(index + 1, copy));
        self.current = Some(index + 1);
        Ok(index + 1)
    }

    /// Moves a slide from one position to another. The moved slide stays
    /// selected if it was.
    pub fn move_slide(&mut self, from: usize, to: usize) -> Result<()> {
        self.check_index(from)?;
        self.check_index(to)?;
        if from == to {
            return Ok(());
        }
        self.commit(|p| {
            let slide = p.slides.remove(from);
            p.slides.insert(to, slide);
        });

        self.current = self.current.map(|cur| {
            if cur == from {
                to
            } else if from < cur && cur <= to {
                cur - 1
            } else if to <= cur && cur < from {
                cur + 1
            } else {
                cur
            }
        });
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Content
    // ------------------------------------------------------------------------

    /// Edits one slide in place. Returns true if anything changed. Text
    /// fields longer than [`MAX_FIELD_CHARS`] are cut.
    pub fn edit_slide(&mut self, index: usize, edit: impl FnOnce(&mut Slide)) -> Result<bool> {
        self.check_index(index)?;
        Ok(self.commit(|p| {
            let slide = &mut p.slides[index];
            edit(&mut *slide);
            for field in [&mut slide.title, &mut slide.subtitle, &mut slide.content] {
                truncate_chars(field, MAX_FIELD_CHARS);
            }
        }))
    }

    pub fn rename(&mut self, title: impl Into<String>) -> bool {
        let title = title.into();
        self.commit(|p| p.title = title)
    }

    pub fn set_theme(&mut self, theme: impl Into<String>) -> bool {
        let theme = theme.into();
        self.commit(|p| p.theme = theme)
    }

    // ------------------------------------------------------------------------
    // Selection and view
    // ------------------------------------------------------------------------

    pub fn select(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        self.current = Some(index);
        Ok(())
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_slide(&self) -> Option<&Slide> {
        self.current.and_then(|i| self.slides().get(i))
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom level, clamped to `[MIN_ZOOM, MAX_ZOOM]`.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        }
    }

    // ------------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------------

    pub fn undo(&mut self) -> bool {
        let undone = self.history.undo().is_some();
        if undone {
            self.after_restore();
        }
        undone
    }

    pub fn redo(&mut self) -> bool {
        let redone = self.history.redo().is_some();
        if redone {
            self.after_restore();
        }
        redone
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Returns true if the deck changed since it was loaded or last saved.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    // ------------------------------------------------------------------------
    // Internal
    // ------------------------------------------------------------------------

    fn check_index(&self, index: usize) -> Result<()> {
        let len = self.len();
        if index < len {
            Ok(())
        } else {
            Err(Error::SlideIndex { index, len })
        }
    }

    /// Applies `edit` to a copy of the document and records it when it
    /// differs, stamping `last_edited`.
    fn commit(&mut self, edit: impl FnOnce(&mut Presentation)) -> bool {
        let mut next = self.history.present().clone();
        edit(&mut next);
        if next == *self.history.present() {
            return false;
        }
        next.last_edited = Utc::now();
        self.dirty = true;
        self.history.record(next)
    }

    fn after_restore(&mut self) {
        self.dirty = true;
        let len = self.len();
        self.current = match self.current {
            _ if len == 0 => None,
            Some(cur) => Some(cur.min(len - 1)),
            None => Some(0),
        };
    }
}

impl Default for SlideDeck {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
