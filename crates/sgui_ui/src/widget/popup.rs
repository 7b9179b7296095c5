//! Menus and dropdowns.
//!
//! Both are a header widget in the base layer plus, while open, a list of
//! rows in the overlay layer. Only one popup is open at a time. While it is
//! open nothing in the base layer can become hot, and a press anywhere
//! outside it closes it without reaching the widget underneath.

use crate::gui::Gui;
use crate::id::WidgetId;
use crate::input::InputSource;
use crate::interaction::Sense;
use crate::layout::{Point, Rect};
use crate::render::{Layer, Renderer};
use crate::widget::{face_color, Changed};

/// Item text that renders as a separator line.
pub const SEPARATOR: &str = "-";

/// Salt of the popup background's hover region.
const BACKGROUND_SALT: u64 = u64::MAX;

impl<I: InputSource, R: Renderer> Gui<I, R> {
    /// A menu header that opens a list of `items` below it.
    ///
    /// Returns the index chosen this frame; `changed` is true exactly then.
    /// Items equal to `"-"` are separators and cannot be chosen.
    pub fn menu(&mut self, id: WidgetId, label: &str, items: &[&str]) -> Changed<Option<usize>> {
        let padding = self.metrics().padding;
        let width = self.text_width(label) + padding * 2.0;
        let Some(slot) = self.allocate(width, self.line_height() + padding * 2.0) else {
            return Changed::unchanged(None);
        };

        let interaction = self.interact(id, slot.hover, Sense::CLICK);
        if interaction.clicked {
            self.interaction.open_popup(id);
        }
        let open = self.interaction.popup_open(id);

        let theme = self.theme();
        let (hover, text) = (theme.surface_hover, theme.text);
        if open || interaction.hovered {
            self.commands.fill(slot.rect, hover);
        }
        let x = slot.rect.x + (slot.rect.width - self.text_width(label)).max(0.0) * 0.5;
        self.paint_label(slot.rect, x, label, text);

        if !open {
            return Changed::unchanged(None);
        }
        match self.popup_rows(id, slot.rect, items, None) {
            Some(index) => Changed {
                value: Some(index),
                changed: true,
            },
            None => Changed::unchanged(None),
        }
    }

    /// A dropdown showing `items[selected]` that opens the full list below it.
    ///
    /// `selected` past the end of `items` is treated as no selection. Returns
    /// the selection after this frame; `changed` is true when a different
    /// item was chosen.
    pub fn dropdown(
        &mut self,
        id: WidgetId,
        items: &[&str],
        selected: Option<usize>,
    ) -> Changed<Option<usize>> {
        let selected = selected.filter(|&index| index < items.len());
        let current = selected.map_or("", |index| items[index]);

        let padding = self.metrics().padding;
        let arrow = self.text_width("v");
        let widest = items
            .iter()
            .map(|item| self.text_width(item))
            .fold(0.0, f32::max);
        let width = widest + arrow + padding * 3.0;
        let Some(slot) = self.allocate(width, self.line_height() + padding * 2.0) else {
            return Changed::unchanged(selected);
        };

        let interaction = self.interact(id, slot.hover, Sense::CLICK);
        if interaction.clicked {
            self.interaction.open_popup(id);
        }
        let open = self.interaction.popup_open(id);

        let theme = self.theme();
        let face = face_color(theme, interaction);
        let (border, text) = (if open { theme.border_focus } else { theme.border }, theme.text);
        let rect = slot.rect;
        self.commands.fill(rect, face);
        self.commands.stroke(rect, border);
        let label_bounds = Rect::new(rect.x, rect.y, (rect.width - arrow - padding).max(0.0), rect.height);
        self.paint_label(label_bounds, rect.x + padding, current, text);
        self.paint_label(rect, rect.right() - arrow - padding, "v", text);

        if !open {
            return Changed::unchanged(selected);
        }
        match self.popup_rows(id, rect, items, selected) {
            Some(index) => Changed::compare(&selected, Some(index)),
            None => Changed::unchanged(selected),
        }
    }

    /// Draws an open popup's rows in the overlay layer below `anchor`.
    ///
    /// Returns the row clicked this frame and closes the popup if there is one.
    #[allow(clippy::cast_possible_truncation)]
    fn popup_rows(
        &mut self,
        owner: WidgetId,
        anchor: Rect,
        items: &[&str],
        highlight: Option<usize>,
    ) -> Option<usize> {
        let padding = self.metrics().padding;
        let row_height = self.line_height() + padding * 2.0;
        let separator_height = padding * 2.0 + 1.0;
        let widest = items
            .iter()
            .map(|item| self.text_width(item))
            .fold(0.0, f32::max);
        let width = anchor.width.max(widest + padding * 2.0);
        let height: f32 = items
            .iter()
            .map(|item| if *item == SEPARATOR { separator_height } else { row_height })
            .sum();
        let area = Rect::new(anchor.x, anchor.bottom(), width, height);

        let previous = self.commands.set_layer(Layer::Overlay);
        self.interact(owner.child(BACKGROUND_SALT), area, Sense::HOVER);

        let theme = self.theme();
        let (popup, border, hover, accent, text, muted) = (
            theme.popup,
            theme.border,
            theme.surface_hover,
            theme.accent,
            theme.text,
            theme.text_muted,
        );
        self.commands.fill(area, popup);

        let mut chosen = None;
        let mut y = area.y;
        for (index, item) in items.iter().enumerate() {
            if *item == SEPARATOR {
                let mid = y + separator_height * 0.5;
                self.commands.line(
                    Point::new(area.x + padding, mid),
                    Point::new(area.right() - padding, mid),
                    muted,
                );
                y += separator_height;
                continue;
            }

            let row = Rect::new(area.x, y, width, row_height);
            let interaction = self.interact(owner.child(index as u64), row, Sense::CLICK);
            if interaction.hovered || interaction.active {
                self.commands.fill(row, hover);
            } else if highlight == Some(index) {
                self.commands.fill(row, accent.with_alpha(0.35));
            }
            self.paint_label(row, row.x + padding, item, text);
            if interaction.clicked {
                chosen = Some(index);
            }
            y += row_height;
        }
        self.commands.stroke(area, border);
        self.commands.set_layer(previous);

        if chosen.is_some() {
            self.interaction.close_popup(owner);
        }
        chosen
    }
}

#[cfg(test)]
mod tests {
    use crate::layout::{Dock, Rect};
    use crate::render::Command;
    use crate::testing::Harness;
    use crate::widget::Changed;
    use crate::WidgetId;

    const ITEMS: [&str; 4] = ["Apples", "-", "Oranges", "Grapes"];

    /// Dropdown in a 22px row with a button right below it.
    fn declare(
        harness: &mut Harness,
        id: WidgetId,
        below: WidgetId,
        selected: Option<usize>,
    ) -> (Changed<Option<usize>>, bool) {
        harness.frame(|gui| {
            gui.push_container(0.0, 0.0, 200.0, 200.0);
            gui.push_layout(0.0, 0.0, 0.0, 22.0, Dock::Top, 0.0);
            let result = gui.dropdown(id, &ITEMS, selected);
            gui.pop_layout();
            gui.push_layout(0.0, 0.0, 0.0, 22.0, Dock::Top, 0.0);
            let clicked = gui.button(below, "Below").clicked;
            gui.pop_layout();
            gui.pop_container();
            (result, clicked)
        })
    }

    fn click(harness: &Harness, x: f32, y: f32) {
        harness.move_to(x, y);
        harness.press();
        harness.release();
    }

    #[test]
    fn test_popup_occludes_base_widgets() {
        let mut harness = Harness::new();
        let (id, below) = (crate::gen_id!(), crate::gen_id!());

        harness.move_to(10.0, 10.0);
        declare(&mut harness, id, below, Some(0));
        click(&harness, 10.0, 10.0);
        declare(&mut harness, id, below, Some(0));

        // Rows: Apples 22..42, separator 42..51, Oranges 51..71. The button
        // below the header sits at 22..44, under the popup.
        harness.move_to(10.0, 30.0);
        declare(&mut harness, id, below, Some(0));
        assert_ne!(harness.gui.hot(), Some(below));

        click(&harness, 10.0, 60.0);
        let (result, button_clicked) = declare(&mut harness, id, below, Some(0));
        assert_eq!(result.value, Some(2));
        assert!(result.changed);
        assert!(!button_clicked);
    }

    #[test]
    fn test_outside_press_closes_and_is_consumed() {
        let mut harness = Harness::new();
        let (id, below) = (crate::gen_id!(), crate::gen_id!());

        harness.move_to(10.0, 10.0);
        declare(&mut harness, id, below, None);
        click(&harness, 10.0, 10.0);
        declare(&mut harness, id, below, None);

        click(&harness, 190.0, 150.0);
        let (result, _) = declare(&mut harness, id, below, None);
        assert_eq!(result, Changed { value: None, changed: false });
        declare(&mut harness, id, below, None);
        let overlay_rows = harness
            .gui
            .last_commands()
            .iter()
            .filter(|command| matches!(command, Command::FillRect { rect, .. } if rect.y >= 22.0 && rect.height > 60.0))
            .count();
        assert_eq!(overlay_rows, 0);
    }

    #[test]
    fn test_separator_is_not_selectable() {
        let mut harness = Harness::new();
        let id = crate::gen_id!();
        let mut menu = |harness: &mut Harness| {
            harness.frame(|gui| {
                gui.push_container(0.0, 0.0, 200.0, 22.0);
                gui.push_layout(0.0, 0.0, 60.0, 0.0, Dock::Left, 0.0);
                let result = gui.menu(id, "File", &ITEMS);
                gui.pop_layout();
                gui.pop_container();
                result
            })
        };

        harness.move_to(10.0, 10.0);
        menu(&mut harness);
        click(&harness, 10.0, 10.0);
        menu(&mut harness);

        click(&harness, 10.0, 46.0);
        assert_eq!(menu(&mut harness).value, None);
        assert!(harness.gui.last_commands().iter().any(|command| matches!(
            command,
            Command::FillRect { rect, .. } if *rect == Rect::new(0.0, 22.0, 64.0, 69.0)
        )));

        click(&harness, 10.0, 30.0);
        let result = menu(&mut harness);
        assert_eq!(result.value, Some(0));
        assert!(result.changed);
    }
}
