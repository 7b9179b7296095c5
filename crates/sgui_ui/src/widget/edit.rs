use std::borrow::Cow;

use crate::gui::Gui;
use crate::id::WidgetId;
use crate::input::{InputSource, Key, MouseButton};
use crate::interaction::Sense;
use crate::layout::{Point, Rect};
use crate::render::Renderer;
use crate::widget::EditResponse;

impl<I: InputSource, R: Renderer> Gui<I, R> {
    /// A single-line text field editing `text` in place.
    ///
    /// Clicking focuses the field and places the caret; dragging selects.
    /// Enter commits, and so does losing focus to a click elsewhere, Tab or
    /// Escape. With `password` every character is drawn as the configured
    /// password glyph and copy/cut are disabled; the value itself is edited
    /// unchanged.
    #[allow(clippy::cast_precision_loss, clippy::too_many_lines)]
    pub fn edit(&mut self, id: WidgetId, text: &mut String, password: bool) -> EditResponse {
        let padding = self.metrics().padding;
        let advance = self.font.advance();
        let width = text.chars().count() as f32 * advance + padding * 2.0;
        let Some(slot) = self.allocate(width, self.line_height() + padding * 2.0) else {
            return EditResponse::default();
        };

        let interaction = self.interact(id, slot.hover, Sense::FOCUSABLE);
        let focused = self.interaction.focus() == Some(id);
        let inner = slot.rect.shrink(padding);
        let mut response = EditResponse {
            rect: slot.rect,
            ..EditResponse::default()
        };

        let input = &self.frame_input;
        let state = self.states.text_edit(id);
        if !focused {
            response.committed = state.blur();
        } else {
            if !state.is_focused() {
                state.focus_at(text, usize::MAX);
            }

            let pointer_x = input.pointer.x - inner.x + state.scroll();
            let under_pointer = self.font.glyph_index_at(text, pointer_x);
            if interaction.pressed {
                state.focus_at(text, under_pointer);
            } else if interaction.active && input.button_down(MouseButton::Left) {
                state.set_cursor(text, under_pointer, true);
            }

            let shift = input.shift();
            let ctrl = input.ctrl();
            if input.key_pressed(Key::Left) {
                state.move_left(text, shift);
            }
            if input.key_pressed(Key::Right) {
                state.move_right(text, shift);
            }
            if input.key_pressed(Key::Home) {
                state.home(text, shift);
            }
            if input.key_pressed(Key::End) {
                state.end(text, shift);
            }
            if input.key_pressed(Key::Backspace) {
                response.changed |= state.backspace(text);
            }
            if input.key_pressed(Key::Delete) {
                response.changed |= state.delete(text);
            }

            if ctrl {
                if input.key_pressed(Key::A) {
                    state.select_all(text);
                }
                if input.key_pressed(Key::C) && !password {
                    if let Some(selected) = state.selected_text(text) {
                        self.input.set_clipboard_text(&selected);
                    }
                }
                if input.key_pressed(Key::X) && !password {
                    if let Some(selected) = state.cut(text) {
                        self.input.set_clipboard_text(&selected);
                        response.changed = true;
                    }
                }
                if input.key_pressed(Key::V) {
                    let pasted = self.input.clipboard_text();
                    response.changed |= state.insert(text, &pasted);
                }
            } else if !input.text.is_empty() {
                response.changed |= state.insert(text, &input.text);
            }

            if input.key_pressed(Key::Enter) {
                response.committed = true;
            }
            state.scroll_into_view(advance, inner.width);
        }
        let state = state.clone();
        response.focused = state.is_focused();

        let theme = self.theme();
        let face = if interaction.hovered {
            theme.surface_hover
        } else {
            theme.surface
        };
        let border = if response.focused {
            theme.border_focus
        } else {
            theme.border
        };
        let (selection, caret, text_color) = (theme.selection, theme.caret, theme.text);

        self.commands.fill(slot.rect, face);
        self.commands.stroke(slot.rect, border);

        let origin_x = inner.x - state.scroll();
        if let Some(range) = state.selection() {
            let from = origin_x + range.start as f32 * advance;
            let to = origin_x + range.end as f32 * advance;
            let highlight = Rect::new(from, inner.y, to - from, inner.height).clip_to(&inner);
            self.commands.fill(highlight, selection);
        }

        let display: Cow<'_, str> = if password {
            let glyph = self.metrics().password_glyph;
            Cow::Owned(std::iter::repeat(glyph).take(text.chars().count()).collect())
        } else {
            Cow::Borrowed(text.as_str())
        };
        let y = inner.y + (inner.height - self.line_height()) * 0.5;
        self.paint_text(Point::new(origin_x, y), &display, text_color, inner);

        if let Some(cursor) = state.cursor() {
            let blink = self.metrics().caret_blink_ms;
            let visible = blink == 0 || self.time_ms % blink < blink / 2;
            let x = origin_x + cursor as f32 * advance;
            if visible && x >= inner.x && x <= inner.right() {
                self.commands
                    .line(Point::new(x, inner.y), Point::new(x, inner.bottom()), caret);
            }
        }

        response
    }
}
