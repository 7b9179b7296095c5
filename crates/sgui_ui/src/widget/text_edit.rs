//! Text edit state machine.
//!
//! A field is either [`EditFocus::Unfocused`] or focused with a cursor and a
//! selection anchor. Positions are character indices into the bound string;
//! the selection is the range between anchor and cursor. Every editing
//! operation requires focus: calling one on an unfocused field is a caller
//! error and leaves text and state untouched.

use std::ops::Range;

use crate::error::{contract_violation, UiError};

/// Focus state of a text field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditFocus {
    /// Not receiving keyboard input.
    #[default]
    Unfocused,
    /// Receiving keyboard input.
    Focused {
        /// Character index of the caret.
        cursor: usize,
        /// Character index where the selection started.
        anchor: usize,
    },
}

/// Persistent state of one text field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextEditState {
    focus: EditFocus,
    scroll: f32,
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn byte_index(text: &str, index: usize) -> usize {
    text.char_indices().nth(index).map_or(text.len(), |(byte, _)| byte)
}

impl TextEditState {
    /// Returns the focus state.
    #[must_use]
    pub const fn focus(&self) -> EditFocus {
        self.focus
    }

    /// Returns true while the field has keyboard focus.
    #[must_use]
    pub const fn is_focused(&self) -> bool {
        matches!(self.focus, EditFocus::Focused { .. })
    }

    /// Caret position, if focused.
    #[must_use]
    pub const fn cursor(&self) -> Option<usize> {
        match self.focus {
            EditFocus::Focused { cursor, .. } => Some(cursor),
            EditFocus::Unfocused => None,
        }
    }

    /// Selected character range, if focused and non-empty.
    #[must_use]
    pub fn selection(&self) -> Option<Range<usize>> {
        match self.focus {
            EditFocus::Focused { cursor, anchor } if cursor != anchor => {
                Some(cursor.min(anchor)..cursor.max(anchor))
            }
            _ => None,
        }
    }

    /// Horizontal scroll of the field contents in pixels.
    #[must_use]
    pub const fn scroll(&self) -> f32 {
        self.scroll
    }

    /// Focuses the field with the caret at `index` and no selection.
    pub fn focus_at(&mut self, text: &str, index: usize) {
        let cursor = index.min(char_len(text));
        self.focus = EditFocus::Focused {
            cursor,
            anchor: cursor,
        };
    }

    /// Drops focus. Returns true if the field was focused.
    pub fn blur(&mut self) -> bool {
        let was_focused = self.is_focused();
        self.focus = EditFocus::Unfocused;
        self.scroll = 0.0;
        was_focused
    }

    /// Caret and anchor, clamped to `text`. Reports a contract violation
    /// when unfocused.
    #[track_caller]
    fn caret(&mut self, text: &str) -> Option<(&mut usize, &mut usize)> {
        match &mut self.focus {
            EditFocus::Focused { cursor, anchor } => {
                let len = char_len(text);
                *cursor = (*cursor).min(len);
                *anchor = (*anchor).min(len);
                Some((cursor, anchor))
            }
            EditFocus::Unfocused => {
                contract_violation(&UiError::EditWithoutFocus);
                None
            }
        }
    }

    /// Moves the caret to `index`. With `extend` the anchor stays put.
    #[track_caller]
    pub fn set_cursor(&mut self, text: &str, index: usize, extend: bool) {
        let len = char_len(text);
        if let Some((cursor, anchor)) = self.caret(text) {
            *cursor = index.min(len);
            if !extend {
                *anchor = *cursor;
            }
        }
    }

    /// Arrow left. Without `extend` a selection collapses to its start.
    #[track_caller]
    pub fn move_left(&mut self, text: &str, extend: bool) {
        if let Some((cursor, anchor)) = self.caret(text) {
            if !extend && cursor != anchor {
                let start = (*cursor).min(*anchor);
                *cursor = start;
                *anchor = start;
                return;
            }
            *cursor = cursor.saturating_sub(1);
            if !extend {
                *anchor = *cursor;
            }
        }
    }

    /// Arrow right. Without `extend` a selection collapses to its end.
    #[track_caller]
    pub fn move_right(&mut self, text: &str, extend: bool) {
        let len = char_len(text);
        if let Some((cursor, anchor)) = self.caret(text) {
            if !extend && cursor != anchor {
                let end = (*cursor).max(*anchor);
                *cursor = end;
                *anchor = end;
                return;
            }
            *cursor = (*cursor + 1).min(len);
            if !extend {
                *anchor = *cursor;
            }
        }
    }

    /// Jumps to the start of the line.
    #[track_caller]
    pub fn home(&mut self, text: &str, extend: bool) {
        self.set_cursor(text, 0, extend);
    }

    /// Jumps to the end of the line.
    #[track_caller]
    pub fn end(&mut self, text: &str, extend: bool) {
        self.set_cursor(text, char_len(text), extend);
    }

    /// Selects the whole text with the caret at the end.
    #[track_caller]
    pub fn select_all(&mut self, text: &str) {
        let len = char_len(text);
        if let Some((cursor, anchor)) = self.caret(text) {
            *anchor = 0;
            *cursor = len;
        }
    }

    /// Removes the selected range, if any. Returns true if text changed.
    fn remove_selection(&mut self, text: &mut String) -> bool {
        let Some(range) = self.selection() else {
            return false;
        };
        let start = byte_index(text, range.start);
        let end = byte_index(text, range.end);
        text.replace_range(start..end, "");
        self.focus = EditFocus::Focused {
            cursor: range.start,
            anchor: range.start,
        };
        true
    }

    /// Inserts `input` at the caret, replacing the selection.
    ///
    /// Control characters are dropped. Returns true if text changed.
    #[track_caller]
    pub fn insert(&mut self, text: &mut String, input: &str) -> bool {
        if self.caret(text).is_none() {
            return false;
        }
        let input: String = input.chars().filter(|c| !c.is_control()).collect();
        if input.is_empty() {
            return false;
        }

        self.remove_selection(text);
        if let Some((cursor, anchor)) = self.caret(text) {
            let at = byte_index(text, *cursor);
            text.insert_str(at, &input);
            *cursor += char_len(&input);
            *anchor = *cursor;
        }
        true
    }

    /// Removes the selection, or the character before the caret.
    #[track_caller]
    pub fn backspace(&mut self, text: &mut String) -> bool {
        if self.caret(text).is_none() {
            return false;
        }
        if self.remove_selection(text) {
            return true;
        }
        match self.caret(text) {
            Some((cursor, anchor)) if *cursor > 0 => {
                *cursor -= 1;
                *anchor = *cursor;
                let at = byte_index(text, *cursor);
                text.remove(at);
                true
            }
            _ => false,
        }
    }

    /// Removes the selection, or the character after the caret.
    #[track_caller]
    pub fn delete(&mut self, text: &mut String) -> bool {
        if self.caret(text).is_none() {
            return false;
        }
        if self.remove_selection(text) {
            return true;
        }
        let len = char_len(text);
        match self.caret(text) {
            Some((cursor, _)) if *cursor < len => {
                let at = byte_index(text, *cursor);
                text.remove(at);
                true
            }
            _ => false,
        }
    }

    /// The selected text, if any.
    #[must_use]
    pub fn selected_text(&self, text: &str) -> Option<String> {
        let range = self.selection()?;
        let start = byte_index(text, range.start);
        let end = byte_index(text, range.end);
        text.get(start..end).map(str::to_owned)
    }

    /// Removes and returns the selected text.
    #[track_caller]
    pub fn cut(&mut self, text: &mut String) -> Option<String> {
        self.caret(text)?;
        let selected = self.selected_text(text)?;
        self.remove_selection(text);
        Some(selected)
    }

    /// Adjusts the horizontal scroll by the minimal amount that keeps the
    /// caret inside a field `visible_width` pixels wide.
    #[allow(clippy::cast_precision_loss)]
    pub fn scroll_into_view(&mut self, advance: f32, visible_width: f32) {
        let Some(cursor) = self.cursor() else {
            return;
        };
        let caret_x = cursor as f32 * advance;
        if caret_x < self.scroll {
            self.scroll = caret_x;
        } else if caret_x > self.scroll + visible_width {
            self.scroll = caret_x - visible_width;
        }
        self.scroll = self.scroll.max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn focused(text: &str) -> TextEditState {
        let mut state = TextEditState::default();
        state.focus_at(text, usize::MAX);
        state
    }

    #[test]
    fn test_insert_after_moving_left() {
        let mut text = String::new();
        let mut state = focused(&text);

        assert!(state.insert(&mut text, "abc"));
        state.move_left(&text, false);
        state.move_left(&text, false);
        assert!(state.insert(&mut text, "X"));

        assert_eq!(text, "aXbc");
        assert_eq!(state.cursor(), Some(2));
    }

    #[test]
    fn test_select_all_then_delete_empties() {
        let mut text = String::from("hello world");
        let mut state = focused(&text);
        state.select_all(&text);
        assert!(state.delete(&mut text));
        assert_eq!(text, "");
        assert_eq!(state.cursor(), Some(0));
    }

    #[test]
    fn test_shift_extends_without_collapsing() {
        let text = String::from("abcdef");
        let mut state = focused(&text);
        state.move_left(&text, true);
        state.move_left(&text, true);
        state.home(&text, true);
        assert_eq!(state.selection(), Some(0..6));

        state.move_right(&text, false);
        assert_eq!(state.cursor(), Some(6));
        assert_eq!(state.selection(), None);
    }

    #[test]
    fn test_insert_replaces_selection() {
        let mut text = String::from("hello");
        let mut state = focused(&text);
        state.set_cursor(&text, 1, false);
        state.set_cursor(&text, 4, true);
        state.insert(&mut text, "ipp");
        assert_eq!(text, "hippo");
        assert_eq!(state.cursor(), Some(4));
    }

    #[test]
    fn test_backspace_and_delete_single_chars() {
        let mut text = String::from("añb");
        let mut state = focused(&text);
        state.set_cursor(&text, 2, false);
        assert!(state.backspace(&mut text));
        assert_eq!(text, "ab");
        assert!(state.delete(&mut text));
        assert_eq!(text, "a");
        assert!(!state.delete(&mut text));
        state.home(&text, false);
        assert!(!state.backspace(&mut text));
    }

    #[test]
    fn test_cut_returns_selection() {
        let mut text = String::from("copy me");
        let mut state = focused(&text);
        state.set_cursor(&text, 4, true);
        assert_eq!(state.selected_text(&text).as_deref(), Some(" me"));
        assert_eq!(state.cut(&mut text).as_deref(), Some(" me"));
        assert_eq!(text, "copy");
    }

    #[test]
    fn test_control_characters_are_dropped() {
        let mut text = String::new();
        let mut state = focused(&text);
        assert!(!state.insert(&mut text, "\u{8}\r"));
        assert!(state.insert(&mut text, "a\tb"));
        assert_eq!(text, "ab");
    }

    #[test]
    fn test_scroll_into_view_minimal_delta() {
        let text = "x".repeat(40);
        let mut state = focused(&text);
        state.scroll_into_view(8.0, 100.0);
        assert_eq!(state.scroll(), 320.0 - 100.0);

        state.set_cursor(&text, 30, false);
        state.scroll_into_view(8.0, 100.0);
        assert_eq!(state.scroll(), 220.0);

        state.set_cursor(&text, 5, false);
        state.scroll_into_view(8.0, 100.0);
        assert_eq!(state.scroll(), 40.0);
    }

    #[test]
    fn test_external_shrink_clamps_cursor() {
        let mut text = String::from("abcdef");
        let mut state = focused(&text);
        text.truncate(2);
        assert!(state.insert(&mut text, "Z"));
        assert_eq!(text, "abZ");
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "unfocused")]
    fn test_unfocused_edit_is_contract_violation() {
        let mut text = String::from("abc");
        let mut state = TextEditState::default();
        state.insert(&mut text, "x");
    }

    #[test]
    fn test_blur_reports_previous_focus() {
        let mut state = focused("abc");
        assert!(state.blur());
        assert!(!state.blur());
        assert_eq!(state.focus(), EditFocus::Unfocused);
    }
}
