//! Bounded undo/redo over owned snapshots.
//!
//! [`History`] keeps the value being edited (the *present*) together with
//! the values it replaced (*past*) and the values undone from it (*future*).
//!
//! # Architecture
//!
//! ```text
//! record(s2)
//! ┌────────────────────────────────────┐
//! │ past:    [s0, s1]                  │
//! │ present: s2                        │
//! │ future:  []                        │
//! └────────────────────────────────────┘
//!
//! undo()
//! ┌────────────────────────────────────┐
//! │ past:    [s0]                      │
//! │ present: s1                        │
//! │ future:  [s2]                      │
//! └────────────────────────────────────┘
//!
//! record(s3), no branching: future is dropped
//! ┌────────────────────────────────────┐
//! │ past:    [s0, s1]                  │
//! │ present: s3                        │
//! │ future:  []                        │
//! └────────────────────────────────────┘
//! ```
//!
//! Snapshots are taken by value. Once recorded, nothing the caller does to
//! its own copy can reach a stored entry.

use std::collections::VecDeque;
use std::fmt;

use log::debug;

/// Configuration for a [`History`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Maximum number of past entries kept. The oldest entry is dropped
    /// once this is exceeded.
    pub max_history_length: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_history_length: 50,
        }
    }
}

impl HistoryConfig {
    #[must_use]
    pub fn new(max_history_length: usize) -> Self {
        Self { max_history_length }
    }
}

/// Which way a history can currently move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryState {
    /// Neither undo nor redo is available.
    Clean,
    /// Undo is available and redo is not.
    HasPast,
    /// Redo is available (undo may be too).
    HasFuture,
}

/// A linear undo/redo history.
///
/// # Invariants
///
/// 1. `past.len() <= config.max_history_length` after every operation.
/// 2. `future` is empty right after a `record` that changed the present.
/// 3. Recording a value equal to the present changes nothing.
#[derive(Clone)]
pub struct History<S> {
    /// Oldest first.
    past: VecDeque<S>,
    present: S,
    /// Next redo first.
    future: VecDeque<S>,
    config: HistoryConfig,
}

impl<S> fmt::Debug for History<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("History")
            .field("past_len", &self.past.len())
            .field("future_len", &self.future.len())
            .field("config", &self.config)
            .finish()
    }
}

impl<S: Clone + PartialEq> History<S> {
    /// Creates a history whose present is `present`, with default limits.
    #[must_use]
    pub fn new(present: S) -> Self {
        Self::with_config(present, HistoryConfig::default())
    }

    /// Creates a history with the given configuration.
    #[must_use]
    pub fn with_config(present: S, config: HistoryConfig) -> Self {
        Self {
            past: VecDeque::new(),
            present,
            future: VecDeque::new(),
            config,
        }
    }

    // ====================================================================
    // Core Operations
    // ====================================================================

    /// Makes `snapshot` the present, pushing the old present onto the past.
    ///
    /// Returns false and changes nothing when `snapshot` equals the present.
    /// Otherwise clears the future and evicts the oldest past entry if the
    /// limit is exceeded.
    pub fn record(&mut self, snapshot: S) -> bool {
        if snapshot == self.present {
            return false;
        }

        let previous = std::mem::replace(&mut self.present, snapshot);
        self.past.push_back(previous);
        self.future.clear();
        self.enforce_limit();
        true
    }

    /// Steps back one entry. Returns the new present, or `None` if there
    /// is no past.
    pub fn undo(&mut self) -> Option<&S> {
        let previous = self.past.pop_back()?;
        let current = std::mem::replace(&mut self.present, previous);
        self.future.push_front(current);
        Some(&self.present)
    }

    /// Steps forward one entry. Returns the new present, or `None` if there
    /// is no future.
    pub fn redo(&mut self) -> Option<&S> {
        let next = self.future.pop_front()?;
        let current = std::mem::replace(&mut self.present, next);
        self.past.push_back(current);
        self.enforce_limit();
        Some(&self.present)
    }

    /// Replaces the present without recording anything.
    pub fn set_present(&mut self, present: S) {
        self.present = present;
    }

    /// Empties past and future, keeping the present.
    pub fn clear_history(&mut self) {
        self.past.clear();
        self.future.clear();
    }

    // ====================================================================
    // Query
    // ====================================================================

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    #[must_use]
    pub fn state(&self) -> HistoryState {
        if self.can_redo() {
            HistoryState::HasFuture
        } else if self.can_undo() {
            HistoryState::HasPast
        } else {
            HistoryState::Clean
        }
    }

    #[must_use]
    pub fn present(&self) -> &S {
        &self.present
    }

    /// Past entries, oldest first.
    pub fn past(&self) -> impl ExactSizeIterator<Item = &S> + DoubleEndedIterator {
        self.past.iter()
    }

    /// Future entries, next redo first.
    pub fn future(&self) -> impl ExactSizeIterator<Item = &S> + DoubleEndedIterator {
        self.future.iter()
    }

    #[must_use]
    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    // ====================================================================
    // Internal
    // ====================================================================

    fn enforce_limit(&mut self) {
        while self.past.len() > self.config.max_history_length {
            self.past.pop_front();
            debug!(
                "history limit {} reached, dropped oldest entry",
                self.config.max_history_length
            );
        }
    }
}

impl<S: Clone + PartialEq + Default> Default for History<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

// ============================================================================
// Tests
// ============================================================================
