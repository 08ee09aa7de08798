//! Bounded undo/redo history of whole-state snapshots.
//!
//! Unlike a text editor, a palette is small enough to snapshot outright, so
//! there is no diffing: every accepted action hands the history a complete
//! new state, and undo/redo just swap whole values around.
//!
//! ```text
//!   past (≤ capacity)        current        future (front = next redo)
//!   [s1, s2, s3]  ◄─ undo ─  s4  ─ redo ─►  [s5, s6]
//! ```
//!
//! - [`History::commit`] pushes the *current* state onto `past` (evicting the
//!   oldest beyond capacity), clears `future`, and adopts the new state.
//! - [`History::undo`] / [`History::redo`] move one step and return the new
//!   current state, or `None` (and change nothing) when there is nowhere to
//!   go.
//!
//! States older than `capacity` steps are gone for good once evicted.

use std::collections::VecDeque;

/// Undo depth used when none is configured.
pub const DEFAULT_CAPACITY: usize = 3;

/// Undo/redo history over snapshots of type `T`.
#[derive(Debug, Clone)]
pub struct History<T> {
    past: VecDeque<T>,
    future: VecDeque<T>,
    current: T,
    capacity: usize,
}

impl<T> History<T> {
    /// Start a history at `initial` with the default depth.
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self::with_capacity(initial, DEFAULT_CAPACITY)
    }

    /// Start a history at `initial` keeping at most `capacity` undo steps.
    ///
    /// A capacity of zero is allowed and disables undo entirely.
    #[must_use]
    pub fn with_capacity(initial: T, capacity: usize) -> Self {
        Self {
            past: VecDeque::with_capacity(capacity + 1),
            future: VecDeque::new(),
            current: initial,
            capacity,
        }
    }

    /// The state currently in effect.
    #[inline]
    #[must_use]
    pub const fn current(&self) -> &T {
        &self.current
    }

    /// Adopt `next` as the current state.
    ///
    /// The previous current state becomes the newest undo step. Any redo
    /// path is discarded.
    pub fn commit(&mut self, next: T) {
        let previous = std::mem::replace(&mut self.current, next);
        self.push_past(previous);
        self.future.clear();
    }

    /// Step back one state. Returns the restored state, or `None` if there
    /// is nothing to undo.
    pub fn undo(&mut self) -> Option<&T> {
        let previous = self.past.pop_back()?;
        let undone = std::mem::replace(&mut self.current, previous);
        self.future.push_front(undone);
        Some(&self.current)
    }

    /// Step forward one state. Returns the restored state, or `None` if
    /// there is nothing to redo.
    pub fn redo(&mut self) -> Option<&T> {
        let next = self.future.pop_front()?;
        let redone = std::mem::replace(&mut self.current, next);
        self.push_past(redone);
        Some(&self.current)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Number of undo steps available.
    #[must_use]
    pub fn undo_count(&self) -> usize {
        self.past.len()
    }

    /// Number of redo steps available.
    #[must_use]
    pub fn redo_count(&self) -> usize {
        self.future.len()
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest-first view of the undo steps.
    pub fn past(&self) -> impl Iterator<Item = &T> {
        self.past.iter()
    }

    /// Next-first view of the redo steps.
    pub fn future(&self) -> impl Iterator<Item = &T> {
        self.future.iter()
    }

    fn push_past(&mut self, state: T) {
        self.past.push_back(state);
        while self.past.len() > self.capacity {
            self.past.pop_front();
        }
    }
}

impl<T: Default> Default for History<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
