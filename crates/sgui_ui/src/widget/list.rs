use crate::gui::Gui;
use crate::id::WidgetId;
use crate::input::InputSource;
use crate::interaction::Sense;
use crate::layout::Dock;
use crate::render::Renderer;
use crate::widget::Changed;

impl<I: InputSource, R: Renderer> Gui<I, R> {
    /// A scrollable single-selection list filling the current region.
    ///
    /// `selected` past the end of `items` is treated as no selection.
    /// Clicking a row selects it; `changed` is true when the selection moved.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn list(
        &mut self,
        id: WidgetId,
        items: &[&str],
        selected: Option<usize>,
    ) -> Changed<Option<usize>> {
        let selected = selected.filter(|&index| index < items.len());
        let padding = self.metrics().padding;
        let row_height = self.line_height() + padding * 2.0;
        let widest = items
            .iter()
            .map(|item| self.text_width(item))
            .fold(0.0, f32::max);
        let content_height = items.len() as f32 * row_height;
        let Some(slot) = self.allocate(widest + padding * 2.0, content_height) else {
            return Changed::unchanged(selected);
        };

        let area = slot.rect;
        self.push_scroll_container(id, area.x, area.y, area.width, area.height, 0.0, content_height);

        let theme = self.theme();
        let (hover, accent, text) = (theme.surface_hover, theme.accent, theme.text);
        let mut choice = selected;
        for (index, item) in items.iter().enumerate() {
            self.push_layout(0.0, 0.0, 0.0, row_height, Dock::Top, 0.0);
            if let Some(row) = self.allocate(0.0, row_height) {
                let interaction = self.interact(id.child(index as u64), row.hover, Sense::CLICK);
                if interaction.clicked {
                    choice = Some(index);
                }
                if choice == Some(index) {
                    self.commands.fill(row.rect, accent);
                } else if interaction.hovered {
                    self.commands.fill(row.rect, hover);
                }
                self.paint_label(row.hover, row.rect.x + padding, item, text);
            }
            self.pop_layout();
        }

        self.pop_scroll_container();
        Changed::compare(&selected, choice)
    }
}

#[cfg(test)]
mod tests {
    use crate::layout::Dock;
    use crate::render::Command;
    use crate::style::Theme;
    use crate::testing::Harness;
    use crate::widget::Changed;
    use crate::WidgetId;

    const FRUIT: [&str; 8] = [
        "Apple", "Banana", "Cherry", "Date", "Elder", "Fig", "Grape", "Honeydew",
    ];

    fn declare(harness: &mut Harness, id: WidgetId, selected: Option<usize>) -> Changed<Option<usize>> {
        harness.frame(|gui| {
            gui.push_container(0.0, 0.0, 120.0, 100.0);
            let result = gui.list(id, &FRUIT, selected);
            gui.pop_container();
            result
        })
    }

    #[test]
    fn test_click_selects_row() {
        let mut harness = Harness::new();
        let id = crate::gen_id!();

        harness.move_to(20.0, 50.0);
        let result = declare(&mut harness, id, Some(0));
        assert_eq!(result, Changed::unchanged(Some(0)));

        harness.press();
        harness.release();
        let result = declare(&mut harness, id, Some(0));
        assert_eq!(result.value, Some(2));
        assert!(result.changed);
    }

    #[test]
    fn test_selected_row_uses_accent() {
        let mut harness = Harness::new();
        let id = crate::gen_id!();
        declare(&mut harness, id, Some(1));
        let accent = Theme::DARK.accent;
        let highlighted: Vec<_> = harness
            .gui
            .last_commands()
            .iter()
            .filter_map(|command| match command {
                Command::FillRect { rect, color } if *color == accent => Some(*rect),
                _ => None,
            })
            .collect();
        assert_eq!(highlighted.len(), 1);
        assert_eq!(highlighted[0].y, 20.0);
    }

    #[test]
    fn test_wheel_scrolls_rows_into_view() {
        let mut harness = Harness::new();
        let id = crate::gen_id!();
        harness.move_to(20.0, 50.0);
        declare(&mut harness, id, None);

        harness.wheel(-1.0);
        declare(&mut harness, id, None);
        assert_eq!(harness.gui.scroll_offset(id).y, 20.0);

        // Hit regions follow the new offset one frame later.
        declare(&mut harness, id, None);
        harness.press();
        harness.release();
        let result = declare(&mut harness, id, None);
        assert_eq!(result.value, Some(3));
    }

    #[test]
    fn test_out_of_range_selection_is_none() {
        let mut harness = Harness::new();
        let id = crate::gen_id!();
        assert_eq!(declare(&mut harness, id, Some(42)).value, None);
    }

    #[test]
    fn test_list_inside_docked_layout() {
        let mut harness = Harness::new();
        let id = crate::gen_id!();
        let rect = harness.frame(|gui| {
            gui.push_container(0.0, 0.0, 200.0, 200.0);
            gui.push_layout(0.0, 0.0, 0.0, 60.0, Dock::Bottom, 0.0);
            gui.list(id, &FRUIT, None);
            gui.pop_layout();
            let rest = gui.current_rect();
            gui.pop_container();
            rest
        });
        assert_eq!(rect.map(|r| r.height), Some(140.0));
    }
}
