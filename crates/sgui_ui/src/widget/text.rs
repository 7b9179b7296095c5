use crate::error::{contract_violation, UiError};
use crate::gui::Gui;
use crate::input::InputSource;
use crate::layout::{Point, Rect};
use crate::render::Renderer;
use crate::widget::Overflow;

impl<I: InputSource, R: Renderer> Gui<I, R> {
    /// Static text at `(x, y)` relative to the current region.
    ///
    /// [`Overflow::Wrap`] breaks lines at the region width and reports the
    /// wrapped height as the intrinsic size, so an auto-sized layout grows to
    /// fit it. Returns the rectangle the text occupies.
    #[allow(clippy::cast_precision_loss)]
    pub fn text(&mut self, x: f32, y: f32, text: &str, overflow: Overflow) -> Rect {
        let Some(region) = self.current_rect() else {
            contract_violation(&UiError::NoOpenFrame);
            return Rect::ZERO;
        };
        let line_height = self.line_height();
        let lines: Vec<&str> = match overflow {
            Overflow::Clip => vec![text],
            Overflow::Wrap => self.font.wrap(text, region.width - x),
        };
        let width = lines
            .iter()
            .map(|line| self.text_width(line))
            .fold(0.0, f32::max);
        let height = lines.len() as f32 * line_height;

        self.stack.report_intrinsic(x + width, y + height);
        let Some(frame) = self.stack.top() else {
            return Rect::ZERO;
        };
        let region = frame.cursor();
        let origin = Point::new(region.x + x, region.y + y);
        let rect = Rect::new(origin.x, origin.y, width, height).clip_to(&region);
        self.stack.occupy(rect);

        let color = self.theme().text;
        for (i, line) in lines.iter().enumerate() {
            let at = Point::new(origin.x, origin.y + i as f32 * line_height);
            self.paint_text(at, line, color, region);
        }
        rect
    }
}
