//! Timing helpers for saves and asynchronous image results.
//!
//! Both types take the current time from the caller, so they work the same
//! under a browser event loop, a native timer or a test.

use std::collections::HashMap;

use super::ImageKind;
use crate::settings::EditorSettings;

// ============================================================================
// SaveThrottle
// ============================================================================

/// A trailing-edge debounce for saves.
///
/// Scheduling a payload starts a window; scheduling again before it elapses
/// replaces the payload and restarts the window. Only the newest payload is
/// ever handed out.
///
/// ```
/// use card_styler::SaveThrottle;
///
/// let mut throttle = SaveThrottle::new(1_000);
/// throttle.schedule("first", 0);
/// throttle.schedule("second", 400);
/// assert_eq!(throttle.poll(1_000), None);
/// assert_eq!(throttle.poll(1_400), Some("second"));
/// assert_eq!(throttle.poll(5_000), None);
/// ```
#[derive(Debug, Clone)]
pub struct SaveThrottle<T> {
    window_ms: u64,
    pending: Option<(T, u64)>,
}

impl<T> SaveThrottle<T> {
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            pending: None,
        }
    }

    pub fn from_settings(settings: &EditorSettings) -> Self {
        Self::new(settings.save_debounce_ms)
    }

    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }

    /// Queues `payload` for saving at `now_ms + window`, dropping any
    /// payload still pending.
    pub fn schedule(&mut self, payload: T, now_ms: u64) {
        self.pending = Some((payload, now_ms.saturating_add(self.window_ms)));
    }

    /// Hands out the pending payload once its window has elapsed.
    pub fn poll(&mut self, now_ms: u64) -> Option<T> {
        if self.due_at().is_some_and(|due| now_ms >= due) {
            self.flush()
        } else {
            None
        }
    }

    /// Hands out the pending payload immediately, e.g. before unload.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(payload, _)| payload)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending payload becomes due.
    pub fn due_at(&self) -> Option<u64> {
        self.pending.as_ref().map(|(_, due)| *due)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

impl<T> Default for SaveThrottle<T> {
    fn default() -> Self {
        Self::from_settings(&EditorSettings::default())
    }
}

// ============================================================================
// ImageGenerations
// ============================================================================

/// Identifies one in-flight image operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ticket {
    card_id: String,
    kind: ImageKind,
    generation: u64,
}

impl Ticket {
    pub fn card_id(&self) -> &str {
        &self.card_id
    }

    pub fn kind(&self) -> ImageKind {
        self.kind
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Per-slot generation counters for asynchronous image work.
///
/// Starting a new operation on a slot supersedes any earlier one, and a
/// result that arrives for a superseded ticket is dropped.
///
/// ```
/// use card_styler::{ImageGenerations, ImageKind};
///
/// let mut gens = ImageGenerations::new();
/// let first = gens.begin("card-1", ImageKind::Icon);
/// let second = gens.begin("card-1", ImageKind::Icon);
/// assert_eq!(gens.accept(first, "old"), None);
/// assert_eq!(gens.accept(second, "new"), Some("new"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImageGenerations {
    latest: HashMap<String, HashMap<ImageKind, u64>>,
}

impl ImageGenerations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new operation on a slot and returns its ticket.
    pub fn begin(&mut self, card_id: &str, kind: ImageKind) -> Ticket {
        let counter = self
            .latest
            .entry(card_id.to_string())
            .or_default()
            .entry(kind)
            .or_insert(0);
        *counter += 1;
        Ticket {
            card_id: card_id.to_string(),
            kind,
            generation: *counter,
        }
    }

    /// Returns true if no newer operation has started on the ticket's slot.
    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.latest
            .get(ticket.card_id.as_str())
            .and_then(|slots| slots.get(&ticket.kind))
            == Some(&ticket.generation)
    }

    /// Passes `value` through if `ticket` is still current.
    pub fn accept<V>(&self, ticket: Ticket, value: V) -> Option<V> {
        self.is_current(&ticket).then_some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_before_window() {
        let mut throttle = SaveThrottle::new(100);
        throttle.schedule(1, 50);
        assert_eq!(throttle.due_at(), Some(150));
        assert_eq!(throttle.poll(149), None);
        assert!(throttle.is_pending());
        assert_eq!(throttle.poll(150), Some(1));
        assert!(!throttle.is_pending());
    }

    #[test]
    fn last_write_wins() {
        let mut throttle = SaveThrottle::new(100);
        for (i, t) in [0, 30, 60, 90].into_iter().enumerate() {
            throttle.schedule(i, t);
        }
        assert_eq!(throttle.poll(150), None);
        assert_eq!(throttle.poll(190), Some(3));
    }

    #[test]
    fn flush_and_cancel() {
        let mut throttle = SaveThrottle::new(1_000);
        throttle.schedule("a", 0);
        assert_eq!(throttle.flush(), Some("a"));
        throttle.schedule("b", 0);
        throttle.cancel();
        assert_eq!(throttle.poll(u64::MAX), None);
    }

    #[test]
    fn window_from_settings() {
        let throttle: SaveThrottle<()> = SaveThrottle::default();
        assert_eq!(throttle.window_ms(), 1_000);
    }

    #[test]
    fn generations_are_per_slot() {
        let mut gens = ImageGenerations::new();
        let icon = gens.begin("a", ImageKind::Icon);
        let content = gens.begin("a", ImageKind::Content);
        let other = gens.begin("b", ImageKind::Icon);
        assert!(gens.is_current(&icon));
        assert!(gens.is_current(&content));
        assert!(gens.is_current(&other));

        let newer = gens.begin("a", ImageKind::Icon);
        assert!(!gens.is_current(&icon));
        assert!(gens.is_current(&newer));
        assert!(gens.is_current(&content));
    }

    #[test]
    fn unknown_slots_are_not_current() {
        let mut gens = ImageGenerations::new();
        let mut other = ImageGenerations::new();
        let foreign = other.begin("a", ImageKind::Icon);
        assert!(!gens.is_current(&foreign));

        gens.begin("a", ImageKind::Content);
        assert!(!gens.is_current(&foreign));
        assert_eq!(gens.begin("a", ImageKind::Icon).generation(), 1);
    }
}
