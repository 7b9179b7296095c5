use crate::gui::Gui;
use crate::id::WidgetId;
use crate::input::InputSource;
use crate::interaction::Sense;
use crate::render::Renderer;
use crate::widget::{face_color, WidgetResponse};

impl<I: InputSource, R: Renderer> Gui<I, R> {
    /// A push button filling the current region.
    ///
    /// `clicked` is true only on the frame the pointer is released over the
    /// button after pressing it.
    pub fn button(&mut self, id: WidgetId, label: &str) -> WidgetResponse {
        let padding = self.metrics().padding;
        let width = self.text_width(label) + padding * 2.0;
        let height = self.line_height() + padding * 2.0;
        let Some(slot) = self.allocate(width, height) else {
            return WidgetResponse::default();
        };

        let interaction = self.interact(id, slot.hover, Sense::CLICK);
        let theme = self.theme();
        let face = face_color(theme, interaction);
        let border = theme.border;
        let text = theme.text;

        self.commands.fill(slot.rect, face);
        self.commands.stroke(slot.rect, border);
        let x = slot.rect.x + (slot.rect.width - self.text_width(label)).max(0.0) * 0.5;
        self.paint_label(slot.rect, x, label, text);

        WidgetResponse::new(interaction, slot.rect)
    }
}

#[cfg(test)]
mod tests {
    use crate::layout::{Dock, Rect};
    use crate::testing::Harness;

    #[test]
    fn test_click_is_edge_triggered() {
        let mut harness = Harness::new();
        let id = crate::gen_id!();
        let mut declare = |harness: &mut Harness| {
            harness.frame(|gui| {
                gui.push_container(0.0, 0.0, 200.0, 100.0);
                gui.push_layout(0.0, 0.0, 0.0, 22.0, Dock::Top, 0.0);
                let response = gui.button(id, "Button");
                gui.pop_layout();
                gui.pop_container();
                response
            })
        };

        harness.move_to(10.0, 10.0);
        let first = declare(&mut harness);
        assert_eq!(first.rect, Rect::new(0.0, 0.0, 200.0, 22.0));
        harness.press();
        assert!(declare(&mut harness).pressed);
        harness.release();
        assert!(declare(&mut harness).clicked);
        assert!(!declare(&mut harness).clicked);
    }

    #[test]
    fn test_label_is_centered_glyph_quads() {
        let mut harness = Harness::new();
        harness.frame(|gui| {
            gui.push_container(0.0, 0.0, 100.0, 20.0);
            gui.button(crate::gen_id!(), "ab");
            gui.pop_container();
        });
        let glyphs = harness.glyph_rects();
        assert_eq!(glyphs.len(), 2);
        assert_eq!(glyphs[0], Rect::new(42.0, 4.0, 8.0, 12.0));
    }
}
