use std::fmt::Write;

use crate::gui::Gui;
use crate::id::WidgetId;
use crate::input::InputSource;
use crate::interaction::Sense;
use crate::layout::Rect;
use crate::render::Renderer;
use crate::widget::{face_color, Changed};

impl<I: InputSource, R: Renderer> Gui<I, R> {
    /// A horizontal slider over `[min, max]`.
    ///
    /// While captured, the pointer's x position inside the slider maps
    /// linearly onto the range and is written every frame, also when the
    /// pointer has left the widget. `value` is clamped into range even
    /// without interaction. The label is drawn as `"{label}: {value:.2}"`.
    pub fn slider(
        &mut self,
        id: WidgetId,
        value: f32,
        min: f32,
        max: f32,
        label: &str,
    ) -> Changed<f32> {
        let (low, high) = if min <= max { (min, max) } else { (max, min) };
        let clamped = if value.is_nan() { low } else { value.clamp(low, high) };

        let padding = self.metrics().padding;
        let mut caption = std::mem::take(&mut self.caption);
        write_caption(&mut caption, label, clamped);
        let width = self.text_width(&caption) + padding * 2.0;
        let Some(slot) = self.allocate(width, self.line_height() + padding * 2.0) else {
            self.caption = caption;
            return Changed::compare(&value, clamped);
        };

        let interaction = self.interact(id, slot.hover, Sense::CLICK);
        let rect = slot.rect;
        let next = if interaction.active && rect.width > 0.0 {
            let t = ((self.frame_input.pointer.x - rect.x) / rect.width).clamp(0.0, 1.0);
            low + (high - low) * t
        } else {
            clamped
        };

        let theme = self.theme();
        let face = face_color(theme, interaction);
        let (border, accent, text) = (theme.border, theme.accent, theme.text);

        let t = if high > low { (next - low) / (high - low) } else { 0.0 };
        self.commands.fill(rect, face);
        self.commands
            .fill(Rect::new(rect.x, rect.y, rect.width * t, rect.height), accent);
        self.commands.stroke(rect, border);

        write_caption(&mut caption, label, next);
        let x = rect.x + (rect.width - self.text_width(&caption)).max(0.0) * 0.5;
        self.paint_label(rect, x, &caption, text);
        self.caption = caption;

        Changed::compare(&value, next)
    }
}

/// Formats the slider caption into a buffer reused across frames.
fn write_caption(buffer: &mut String, label: &str, value: f32) {
    buffer.clear();
    if !label.is_empty() {
        buffer.push_str(label);
        buffer.push_str(": ");
    }
    // Writing into a String cannot fail.
    let _ = write!(buffer, "{value:.2}");
}
