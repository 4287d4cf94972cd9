//! Card and presentation persistence over a pair of key-value stores.
//!
//! The gateway mirrors the browser split: a durable *local* store holds the
//! card list and presentations, and a *session* store holds large image
//! payloads that would otherwise blow the local quota.
//!
//! # Image Offloading
//!
//! ```text
//! StoredCard { iconImage: "data:image/png;base64,…" (> limit) }
//!     │
//!     ├── session["icon_{id}"] = "data:image/png;base64,…"
//!     │
//!     ▼
//! local[cards_key] = [{ …, "iconImage": "IMAGE_DATA_EXISTS" }]
//! ```
//!
//! If the local write still exceeds the quota, the list is written again
//! with every image removed.

use chrono::{DateTime, Utc};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};

use super::store::KeyValueStore;
use crate::error::{Error, Result, StorageError};
use crate::settings::EditorSettings;
use crate::slides::{Presentation, SlideDeck};
use crate::style::StyleConfig;

/// Stands in for an image payload that was moved to the session store.
pub const IMAGE_SENTINEL: &str = "IMAGE_DATA_EXISTS";

const ICON_PLACEHOLDER_URL: &str = "https://img.heroui.chat/image/avatar?w=200&h=200&u=";
const CONTENT_PLACEHOLDER_URL: &str = "https://img.heroui.chat/image/ai?w=800&h=600&u=";

// ============================================================================
// Stored Types
// ============================================================================

/// Which image slot of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageKind {
    Icon,
    Content,
}

impl ImageKind {
    /// Prefix of the session key holding this kind of image.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Icon => "icon_",
            Self::Content => "content_",
        }
    }

    /// Session key for a card's image.
    pub fn session_key(self, card_id: &str) -> String {
        format!("{}{card_id}", self.prefix())
    }

    fn placeholder(self, card_id: &str) -> String {
        match self {
            Self::Icon => format!("{ICON_PLACEHOLDER_URL}{card_id}_icon"),
            Self::Content => format!("{CONTENT_PLACEHOLDER_URL}{card_id}_content"),
        }
    }
}

/// One entry of the saved card list: the style plus list bookkeeping.
///
/// Records written by older editors keep the radius and shadows as nested
/// `cardBorderRadius`, `shadowSettings` and `shadow2Settings` objects; those
/// are folded into the flat style fields on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "CardRecord")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct StoredCard {
    pub id: String,
    #[serde(flatten)]
    pub style: StyleConfig,
    #[serde(default)]
    pub is_active: bool,
    /// Image data URL, or [`IMAGE_SENTINEL`] once offloaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_image: Option<String>,
}

impl StoredCard {
    pub fn new(id: impl Into<String>, style: StyleConfig) -> Self {
        Self {
            id: id.into(),
            style,
            is_active: true,
            icon_image: None,
            content_image: None,
        }
    }

    pub fn image(&self, kind: ImageKind) -> Option<&str> {
        match kind {
            ImageKind::Icon => self.icon_image.as_deref(),
            ImageKind::Content => self.content_image.as_deref(),
        }
    }

    fn image_mut(&mut self, kind: ImageKind) -> &mut Option<String> {
        match kind {
            ImageKind::Icon => &mut self.icon_image,
            ImageKind::Content => &mut self.content_image,
        }
    }
}

/// The on-disk shape of a [`StoredCard`], accepting both layouts.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
struct CardRecord {
    id: String,
    #[serde(flatten)]
    style: StyleConfig,
    #[serde(default)]
    is_active: bool,
    #[serde(default)]
    icon_image: Option<String>,
    #[serde(default)]
    content_image: Option<String>,
    #[serde(default)]
    card_border_radius: Option<NestedRadius>,
    #[serde(default)]
    shadow_settings: Option<NestedShadow>,
    #[serde(default)]
    shadow2_settings: Option<NestedShadow>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
struct NestedRadius {
    top_left: Option<String>,
    top_right: Option<String>,
    bottom_left: Option<String>,
    bottom_right: Option<String>,
    unit: Option<String>,
}

#[derive(Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
struct NestedShadow {
    inset: Option<bool>,
    x: Option<String>,
    y: Option<String>,
    blur: Option<String>,
    spread: Option<String>,
    color: Option<String>,
    opacity: Option<String>,
}

fn fold(target: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *target = value;
    }
}

impl From<CardRecord> for StoredCard {
    fn from(record: CardRecord) -> Self {
        let mut style = record.style;
        let nested = record.card_border_radius.is_some() || record.shadow_settings.is_some();

        if let Some(radius) = record.card_border_radius {
            fold(&mut style.card_border_radius_top_left, radius.top_left);
            fold(&mut style.card_border_radius_top_right, radius.top_right);
            fold(&mut style.card_border_radius_bottom_left, radius.bottom_left);
            fold(&mut style.card_border_radius_bottom_right, radius.bottom_right);
            fold(&mut style.card_border_radius_unit, radius.unit);
            style.link_border_radius = style.corners_uniform();
        }

        if let Some(shadow) = record.shadow_settings {
            style.shadow_inset = shadow.inset.unwrap_or(style.shadow_inset);
            fold(&mut style.shadow_x, shadow.x);
            fold(&mut style.shadow_y, shadow.y);
            fold(&mut style.shadow_blur, shadow.blur);
            fold(&mut style.shadow_spread, shadow.spread);
            fold(&mut style.shadow_color, shadow.color);
            fold(&mut style.shadow_opacity, shadow.opacity);
        }

        match record.shadow2_settings {
            Some(shadow) => {
                style.use_second_shadow = true;
                style.shadow2_inset = shadow.inset.unwrap_or(style.shadow2_inset);
                fold(&mut style.shadow2_x, shadow.x);
                fold(&mut style.shadow2_y, shadow.y);
                fold(&mut style.shadow2_blur, shadow.blur);
                fold(&mut style.shadow2_spread, shadow.spread);
                style.shadow2_color = shadow.color.unwrap_or_else(|| "#ffffff".into());
                style.shadow2_opacity = shadow.opacity.unwrap_or_else(|| "0.1".into());
            }
            // nested records without a second shadow had it switched off
            None if nested => style.use_second_shadow = false,
            None => {}
        }

        Self {
            id: record.id,
            style,
            is_active: record.is_active,
            icon_image: record.icon_image,
            content_image: record.content_image,
        }
    }
}

/// An entry of the saved presentations list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct PresentationSummary {
    pub id: String,
    pub title: String,
    pub last_edited: DateTime<Utc>,
    pub slide_count: usize,
}

impl From<&Presentation> for PresentationSummary {
    fn from(p: &Presentation) -> Self {
        Self {
            id: p.id.clone(),
            title: p.title.clone(),
            last_edited: p.last_edited,
            slide_count: p.slides.len(),
        }
    }
}

// ============================================================================
// CardGateway
// ============================================================================

/// Saves and loads cards and presentations.
#[derive(Debug, Clone)]
pub struct CardGateway<L, S> {
    local: L,
    session: S,
    settings: EditorSettings,
}

impl<L: KeyValueStore, S: KeyValueStore> CardGateway<L, S> {
    pub fn new(local: L, session: S) -> Self {
        Self::with_settings(local, session, EditorSettings::default())
    }

    pub fn with_settings(local: L, session: S, settings: EditorSettings) -> Self {
        Self {
            local,
            session,
            settings,
        }
    }

    pub fn local(&self) -> &L {
        &self.local
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn into_parts(self) -> (L, S) {
        (self.local, self.session)
    }

    // ------------------------------------------------------------------------
    // Cards
    // ------------------------------------------------------------------------

    /// Saves `cards` under `key`, offloading large images to the session
    /// store. On a quota failure the list is saved again without images;
    /// only a failure of that second write is returned.
    pub fn save_cards(&mut self, key: &str, cards: &[StoredCard]) -> Result<()> {
        let err = match self.try_save_cards(key, cards) {
            Ok(()) => return Ok(()),
            Err(Error::Storage(err @ StorageError::QuotaExceeded { .. })) => err,
            Err(err) => return Err(err),
        };

        warn!("{err}; saving cards without images");
        let minimal: Vec<StoredCard> = cards
            .iter()
            .map(|card| StoredCard {
                icon_image: None,
                content_image: None,
                ..card.clone()
            })
            .collect();

        let json = serde_json::to_string(&minimal)?;
        match self.local.set(key, &json) {
            Ok(()) => {
                info!("saved {} cards without image data", minimal.len());
                Ok(())
            }
            Err(fallback) => {
                error!("failed to save even minimal card data: {fallback}");
                Err(fallback.into())
            }
        }
    }

    /// Saves under the configured cards key.
    pub fn save_card_list(&mut self, cards: &[StoredCard]) -> Result<()> {
        let key = self.settings.cards_key.clone();
        self.save_cards(&key, cards)
    }

    /// Offloads and writes the list. On failure every session entry written
    /// by this call is removed again.
    fn try_save_cards(&mut self, key: &str, cards: &[StoredCard]) -> Result<()> {
        let mut written = Vec::new();
        let result = self.offload_and_write(key, cards, &mut written);
        if result.is_err() && !written.is_empty() {
            for session_key in &written {
                self.session.remove(session_key);
            }
            info!("removed {} offloaded images after a failed save", written.len());
        }
        result
    }

    fn offload_and_write(
        &mut self,
        key: &str,
        cards: &[StoredCard],
        written: &mut Vec<String>,
    ) -> Result<()> {
        let limit = self.settings.image_inline_limit;
        let mut stripped = Vec::with_capacity(cards.len());

        for card in cards {
            let mut copy = card.clone();
            for kind in [ImageKind::Icon, ImageKind::Content] {
                let slot = copy.image_mut(kind);
                let Some(data) = slot.as_deref() else {
                    continue;
                };
                if data.len() > limit {
                    let session_key = kind.session_key(&card.id);
                    self.session.set(&session_key, data)?;
                    written.push(session_key);
                    *slot = Some(IMAGE_SENTINEL.to_string());
                }
            }
            stripped.push(copy);
        }

        let json = serde_json::to_string(&stripped)?;
        self.local.set(key, &json)?;
        Ok(())
    }

    /// Loads the card list under `key`.
    ///
    /// Returns `Ok(None)` when nothing is stored and [`Error::Corrupted`]
    /// when the stored text does not parse.
    pub fn load_cards(&self, key: &str) -> Result<Option<Vec<StoredCard>>> {
        let Some(json) = self.local.get(key) else {
            return Ok(None);
        };
        let cards: Vec<StoredCard> =
            serde_json::from_str(&json).map_err(|source| Error::Corrupted {
                key: key.to_string(),
                source,
            })?;

        let offloaded = cards
            .iter()
            .flat_map(|c| [c.icon_image.as_deref(), c.content_image.as_deref()])
            .filter(|image| *image == Some(IMAGE_SENTINEL))
            .count();
        if offloaded > 0 {
            info!("loaded {} cards, {offloaded} images held in session storage", cards.len());
        }
        Ok(Some(cards))
    }

    /// Loads from the configured cards key.
    pub fn load_card_list(&self) -> Result<Option<Vec<StoredCard>>> {
        self.load_cards(&self.settings.cards_key)
    }

    /// Returns the displayable image for a card slot.
    ///
    /// An offloaded image is fetched from the session store; if the session
    /// no longer has it, a placeholder URL derived from the card id is
    /// returned instead.
    pub fn resolve_image(&self, card: &StoredCard, kind: ImageKind) -> Option<String> {
        match card.image(kind)? {
            IMAGE_SENTINEL => Some(
                self.session
                    .get(&kind.session_key(&card.id))
                    .unwrap_or_else(|| kind.placeholder(&card.id)),
            ),
            inline => Some(inline.to_string()),
        }
    }

    /// Removes every offloaded image from both stores. Returns how many
    /// entries were removed.
    pub fn clear_image_data(&mut self) -> usize {
        fn clear(store: &mut impl KeyValueStore) -> usize {
            let keys: Vec<String> = store
                .keys()
                .into_iter()
                .filter(|k| {
                    k.starts_with(ImageKind::Icon.prefix())
                        || k.starts_with(ImageKind::Content.prefix())
                })
                .collect();
            for key in &keys {
                store.remove(key);
            }
            keys.len()
        }

        let removed = clear(&mut self.session) + clear(&mut self.local);
        info!("cleared {removed} image entries");
        removed
    }

    /// Bytes used in the local store.
    pub fn storage_size(&self) -> usize {
        self.local.size()
    }

    // ------------------------------------------------------------------------
    // Presentations
    // ------------------------------------------------------------------------

    /// Saves the open presentation and updates the presentations list.
    pub fn save_presentation(&mut self, presentation: &Presentation) -> Result<()> {
        let json = presentation.to_json()?;
        self.local.set(&self.settings.presentation_key, &json)?;

        let mut list = self.list_presentations().unwrap_or_else(|err| {
            warn!("{err}; starting a new presentations list");
            Vec::new()
        });
        let summary = PresentationSummary::from(presentation);
        match list.iter_mut().find(|s| s.id == summary.id) {
            Some(existing) => *existing = summary,
            None => list.push(summary),
        }
        let json = serde_json::to_string(&list)?;
        self.local.set(&self.settings.presentations_list_key, &json)?;
        Ok(())
    }

    /// Saves a deck's presentation and marks the deck saved.
    pub fn save_deck(&mut self, deck: &mut SlideDeck) -> Result<()> {
        self.save_presentation(deck.presentation())?;
        deck.mark_saved();
        Ok(())
    }

    /// Loads the open presentation, if any.
    pub fn load_presentation(&self) -> Result<Option<Presentation>> {
        let key = &self.settings.presentation_key;
        self.local
            .get(key)
            .map(|json| {
                serde_json::from_str(&json).map_err(|source| Error::Corrupted {
                    key: key.clone(),
                    source,
                })
            })
            .transpose()
    }

    /// Returns the saved presentations list, empty if none was saved.
    pub fn list_presentations(&self) -> Result<Vec<PresentationSummary>> {
        let key = &self.settings.presentations_list_key;
        let Some(json) = self.local.get(key) else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&json).map_err(|source| Error::Corrupted {
            key: key.clone(),
            source,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::style::CardType;

    const KEY: &str = "extension_cards";

    fn big_image() -> String {
        format!("data:image/png;base64,{}", "A".repeat(12_000))
    }

    fn card(id: &str) -> StoredCard {
        StoredCard::new(id, StyleConfig::default())
    }

    fn gateway() -> CardGateway<MemoryStore, MemoryStore> {
        CardGateway::new(MemoryStore::new(), MemoryStore::new())
    }

    #[test]
    fn round_trip_small_cards() {
        let mut gw = gateway();
        let mut c = card("a");
        c.icon_image = Some("data:image/png;base64,AAAA".into());
        gw.save_cards(KEY, &[c.clone()]).unwrap();
        assert_eq!(gw.load_cards(KEY).unwrap(), Some(vec![c]));
    }

    #[test]
    fn large_images_move_to_session() {
        let mut gw = gateway();
        let mut c = card("a");
        c.icon_image = Some(big_image());
        c.content_image = Some(big_image());
        gw.save_cards(KEY, &[c.clone()]).unwrap();

        let loaded = gw.load_cards(KEY).unwrap().unwrap();
        assert_eq!(loaded[0].icon_image.as_deref(), Some(IMAGE_SENTINEL));
        assert_eq!(loaded[0].content_image.as_deref(), Some(IMAGE_SENTINEL));
        assert_eq!(gw.session().get("icon_a"), Some(big_image()));
        assert_eq!(gw.resolve_image(&loaded[0], ImageKind::Icon), Some(big_image()));
    }

    #[test]
    fn missing_session_image_resolves_to_placeholder() {
        let gw = gateway();
        let mut c = card("x1");
        c.content_image = Some(IMAGE_SENTINEL.into());
        let url = gw.resolve_image(&c, ImageKind::Content).unwrap();
        assert!(url.starts_with("https://"));
        assert!(url.ends_with("x1_content"));
        assert!(gw.resolve_image(&c, ImageKind::Icon).is_none());
    }

    #[test]
    fn quota_falls_back_to_no_images() {
        // the session cannot take the image, the local store has room for
        // the bare card only
        let mut gw = CardGateway::new(MemoryStore::with_quota(4_000), MemoryStore::with_quota(10));
        let mut c = card("a");
        c.icon_image = Some(big_image());
        gw.save_cards(KEY, &[c]).unwrap();

        let loaded = gw.load_cards(KEY).unwrap().unwrap();
        assert!(loaded[0].icon_image.is_none());
        assert!(!gw.local().get(KEY).unwrap().contains("iconImage"));
    }

    #[test]
    fn fallback_removes_offloaded_images() {
        // room for the bare card, not for the card with a sentinel
        let bare = serde_json::to_string(&[card("a")]).unwrap();
        let mut gw = CardGateway::new(
            MemoryStore::with_quota(KEY.len() + bare.len()),
            MemoryStore::new(),
        );
        let mut c = card("a");
        c.icon_image = Some(big_image());
        c.content_image = Some(big_image());
        gw.save_cards(KEY, &[c]).unwrap();

        assert_eq!(gw.local().get(KEY), Some(bare));
        assert!(gw.session().is_empty());
    }

    #[test]
    fn nested_records_fold_into_style() {
        let json = r##"[{
            "id": "x",
            "type": "obsidian",
            "cardBorderRadius": {
                "topLeft": "4", "topRight": "4", "bottomLeft": "4", "bottomRight": "4",
                "unit": "rem"
            },
            "shadowSettings": { "inset": true, "x": "2", "y": "8", "blur": "12", "spread": "1" },
            "shadow2Settings": {
                "inset": false, "x": "0", "y": "2", "blur": "3", "spread": "0",
                "color": "#000000"
            }
        }]"##;
        let mut local = MemoryStore::new();
        local.set(KEY, json).unwrap();
        let gw = CardGateway::new(local, MemoryStore::new());

        let cards = gw.load_card_list().unwrap().unwrap();
        let style = &cards[0].style;
        assert_eq!(style.card_border_radius_top_left, "4");
        assert_eq!(style.card_border_radius_bottom_right, "4");
        assert_eq!(style.card_border_radius_unit, "rem");
        assert!(style.link_border_radius);
        assert!(style.shadow_inset);
        assert_eq!(style.shadow_x, "2");
        assert_eq!(style.shadow_y, "8");
        assert_eq!(style.shadow_blur, "12");
        assert_eq!(style.shadow_spread, "1");
        assert!(style.use_second_shadow);
        assert!(!style.shadow2_inset);
        assert_eq!(style.shadow2_y, "2");
        assert_eq!(style.shadow2_color, "#000000");
        assert_eq!(style.shadow2_opacity, "0.1");
        assert!(crate::generate(style).contains("border-radius: 4rem;"));
    }

    #[test]
    fn nested_record_without_second_shadow_disables_it() {
        let json = r#"{
            "id": "y",
            "type": "docker",
            "cardBorderRadius": {
                "topLeft": "8", "topRight": "0", "bottomLeft": "0", "bottomRight": "8",
                "unit": "px"
            }
        }"#;
        let c: StoredCard = serde_json::from_str(json).unwrap();
        assert!(!c.style.use_second_shadow);
        assert!(!c.style.link_border_radius);
        assert_eq!(c.style.card_border_radius_top_right, "0");
    }

    #[test]
    fn failed_fallback_is_reported() {
        let mut gw = CardGateway::new(MemoryStore::with_quota(10), MemoryStore::new());
        let err = gw.save_cards(KEY, &[card("a")]).unwrap_err();
        assert!(matches!(err, Error::Storage(StorageError::QuotaExceeded { .. })));
    }

    #[test]
    fn corrupted_list_is_reported() {
        let mut local = MemoryStore::new();
        local.set(KEY, "[{not json").unwrap();
        let gw = CardGateway::new(local, MemoryStore::new());
        assert!(matches!(gw.load_cards(KEY), Err(Error::Corrupted { .. })));
        assert_eq!(gw.load_cards("other").unwrap(), None);
    }

    #[test]
    fn stored_card_json_is_flat() {
        let mut c = StoredCard::new("r", StyleConfig::for_type(CardType::Redis, "Redis", ""));
        c.is_active = false;
        let json = serde_json::to_string(&c).unwrap();
        assert!(json.contains("\"id\":\"r\""));
        assert!(json.contains("\"type\":\"redis\""));
        assert!(json.contains("\"isActive\":false"));
        assert!(!json.contains("iconImage"));
    }

    #[test]
    fn partial_card_fills_defaults() {
        let c: StoredCard =
            serde_json::from_str(r#"{ "id": "p", "type": "docker", "iconImage": null }"#).unwrap();
        assert_eq!(c.style.card_type, CardType::Docker);
        assert_eq!(c.style.card_width, "320");
        assert!(c.icon_image.is_none());
        assert!(!c.is_active);
    }

    #[test]
    fn clear_and_size() {
        let mut gw = gateway();
        let mut c = card("a");
        c.icon_image = Some(big_image());
        gw.save_card_list(&[c]).unwrap();
        assert!(gw.storage_size() > 0);
        assert_eq!(gw.clear_image_data(), 1);
        assert!(gw.session().get("icon_a").is_none());
    }

    #[test]
    fn presentation_round_trip_and_list() {
        let mut gw = gateway();
        let mut deck = SlideDeck::new();
        deck.add_slide().unwrap();
        gw.save_deck(&mut deck).unwrap();
        assert!(!deck.is_dirty());

        deck.rename("Roadmap");
        gw.save_deck(&mut deck).unwrap();

        let loaded = gw.load_presentation().unwrap().unwrap();
        assert_eq!(&loaded, deck.presentation());

        let list = gw.list_presentations().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].title, "Roadmap");
        assert_eq!(list[0].slide_count, 1);
    }

    #[test]
    fn no_presentation_saved() {
        let gw = gateway();
        assert!(gw.load_presentation().unwrap().is_none());
        assert!(gw.list_presentations().unwrap().is_empty());
    }
}
