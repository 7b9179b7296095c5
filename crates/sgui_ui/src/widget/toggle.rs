use crate::gui::Gui;
use crate::id::WidgetId;
use crate::input::InputSource;
use crate::interaction::Sense;
use crate::layout::Rect;
use crate::render::Renderer;
use crate::widget::{face_color, Changed};

impl<I: InputSource, R: Renderer> Gui<I, R> {
    /// A check box with a label. A click flips `value`.
    pub fn toggle(&mut self, id: WidgetId, label: &str, value: bool) -> Changed<bool> {
        let padding = self.metrics().padding;
        let side = self.line_height();
        let width = side + padding * 3.0 + self.text_width(label);
        let Some(slot) = self.allocate(width, side + padding * 2.0) else {
            return Changed::unchanged(value);
        };

        let interaction = self.interact(id, slot.hover, Sense::CLICK);
        let next = if interaction.clicked { !value } else { value };

        let theme = self.theme();
        let face = face_color(theme, interaction);
        let (border, accent, text) = (theme.border, theme.accent, theme.text);

        let rect = slot.rect;
        let mark = Rect::new(
            rect.x + padding,
            rect.y + (rect.height - side) * 0.5,
            side,
            side,
        );
        self.commands.fill(mark, face);
        self.commands.stroke(mark, border);
        if next {
            self.commands.fill(mark.shrink(3.0), accent);
        }
        self.paint_label(rect, mark.right() + padding, label, text);

        Changed::compare(&value, next)
    }
}
