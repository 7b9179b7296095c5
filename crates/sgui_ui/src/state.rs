//! Persistent per-widget state.
//!
//! Entries are created the first frame an ID asks for them and are never
//! removed; a stale entry is harmless because it only reattaches by ID.

use std::collections::HashMap;

use crate::id::WidgetId;
use crate::layout::Point;
use crate::widget::text_edit::TextEditState;

/// Persistent state of a scroll container.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollState {
    /// Content-space offset of the viewport's top-left corner.
    pub offset: Point,
    /// Extent the container's children occupied last frame.
    pub measured: Point,
}

/// Widget state that outlives a frame, keyed by widget ID.
#[derive(Debug, Default)]
pub struct StateTable {
    text_edits: HashMap<WidgetId, TextEditState>,
    scrolls: HashMap<WidgetId, ScrollState>,
}

impl StateTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Text edit state for `id`, created on first use.
    pub fn text_edit(&mut self, id: WidgetId) -> &mut TextEditState {
        self.text_edits.entry(id).or_default()
    }

    /// Scroll state for `id`, created on first use.
    pub fn scroll(&mut self, id: WidgetId) -> &mut ScrollState {
        self.scrolls.entry(id).or_default()
    }

    /// Text edit state for `id`, without creating it.
    #[must_use]
    pub fn get_text_edit(&self, id: WidgetId) -> Option<&TextEditState> {
        self.text_edits.get(&id)
    }

    /// Scroll state for `id`, without creating it.
    #[must_use]
    pub fn get_scroll(&self, id: WidgetId) -> Option<&ScrollState> {
        self.scrolls.get(&id)
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text_edits.len() + self.scrolls.len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
