//! The engine instance.
//!
//! ```text
//! prepare() ─▶ push_container ─▶ push_layout ─▶ widgets ─▶ pop_layout ─▶ pop_container ─▶ finish()
//!    │                                             │                                        │
//!  poll input, pick hot                  read state, interact, emit commands       render, release
//! ```
//!
//! A [`Gui`] owns every piece of per-frame and persistent state, so several
//! instances (one per window) can live side by side.

use crate::config::GuiConfig;
use crate::error::{contract_violation, UiError};
use crate::font::FontAtlas;
use crate::id::WidgetId;
use crate::input::{InputSource, InputState};
use crate::interaction::{Interaction, InteractionState, Sense};
use crate::layout::{Dock, Point, Rect};
use crate::render::{Command, CommandBuffer, Renderer, TextureId};
use crate::stack::{FrameKind, GeometryStack};
use crate::state::StateTable;
use crate::style::{Color, Metrics, Theme};
use crate::widget::OpenScroll;

/// Rectangle handed to a widget, plus the part of it that can be hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Slot {
    pub rect: Rect,
    pub hover: Rect,
}

/// An immediate-mode GUI engine bound to one input source and one renderer.
pub struct Gui<I: InputSource, R: Renderer> {
    pub(crate) input: I,
    pub(crate) renderer: R,
    pub(crate) frame_input: InputState,
    pub(crate) font: FontAtlas,
    pub(crate) font_texture: Option<TextureId>,
    pub(crate) config: GuiConfig,
    pub(crate) stack: GeometryStack,
    pub(crate) commands: CommandBuffer,
    pub(crate) interaction: InteractionState,
    pub(crate) states: StateTable,
    pub(crate) scrolls: Vec<OpenScroll>,
    pub(crate) wheel_consumed: bool,
    pub(crate) time_ms: u64,
    pub(crate) caption: String,
    frame_index: u64,
    submitted: Vec<Command>,
}

impl<I: InputSource, R: Renderer> Gui<I, R> {
    /// Creates an engine with the default configuration.
    pub fn new(input: I, renderer: R, font: FontAtlas) -> Self {
        Self::with_config(input, renderer, font, GuiConfig::default())
    }

    /// Creates an engine, acquiring renderer resources and uploading the font.
    ///
    /// A font upload failure is logged and text renders blank.
    pub fn with_config(input: I, mut renderer: R, font: FontAtlas, config: GuiConfig) -> Self {
        renderer.created();
        let font_texture = match renderer.load_font(font.pixels(), font.width(), font.height()) {
            Ok(texture) => {
                tracing::info!(
                    width = font.width(),
                    height = font.height(),
                    "font atlas uploaded"
                );
                Some(texture)
            }
            Err(err) => {
                tracing::warn!(error = %err, "font atlas upload failed, text will render blank");
                None
            }
        };

        Self {
            input,
            renderer,
            frame_input: InputState::new(),
            font,
            font_texture,
            config,
            stack: GeometryStack::new(),
            commands: CommandBuffer::new(),
            interaction: InteractionState::new(),
            states: StateTable::new(),
            scrolls: Vec::new(),
            wheel_consumed: false,
            time_ms: 0,
            caption: String::new(),
            frame_index: 0,
            submitted: Vec::new(),
        }
    }

    // =========================================================================
    // Frame lifecycle
    // =========================================================================

    /// Begins a frame: drains input and recomputes hot, active and focus.
    pub fn prepare(&mut self) {
        self.frame_index += 1;
        self.frame_input = self.input.poll();
        self.time_ms = self.input.time_ms();
        self.stack.clear();
        self.scrolls.clear();
        self.wheel_consumed = false;
        self.commands.begin_frame();
        self.interaction.begin_frame(&self.frame_input);
        tracing::trace!(frame = self.frame_index, "frame prepared");
    }

    /// Ends a frame and hands its commands to the renderer.
    ///
    /// Frames left open are a caller error; they are closed before rendering.
    pub fn finish(&mut self, viewport_width: f32, viewport_height: f32) {
        let depth = self.stack.depth();
        if depth > 0 {
            self.stack.clear();
            self.scrolls.clear();
            contract_violation(&UiError::UnbalancedFrame { depth });
        }
        self.interaction.end_frame();

        self.submitted = self.commands.finish();
        self.renderer
            .render(&self.submitted, viewport_width, viewport_height);
        tracing::trace!(
            frame = self.frame_index,
            commands = self.submitted.len(),
            "frame finished"
        );
    }

    // =========================================================================
    // Geometry stack
    // =========================================================================

    /// Opens a container at an absolute rectangle. Its children are clipped
    /// to it and lay out from its top-left corner.
    pub fn push_container(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let rect = Rect::new(x, y, width, height);
        let clip = self.stack.push_absolute(FrameKind::Container, rect, rect);
        self.commands.push_clip(clip);
    }

    /// Opens a clipping container carved from the parent's remaining space.
    ///
    /// `width` applies to [`Dock::Left`]/[`Dock::Right`], `height` to
    /// [`Dock::Top`]/[`Dock::Bottom`]; 0 takes all the space available.
    pub fn push_container_docked(&mut self, width: f32, height: f32, dock: Dock) {
        let requested = match dock {
            Dock::Left | Dock::Right => width,
            Dock::Top | Dock::Bottom => height,
            Dock::Fill => 0.0,
        };
        let available = self
            .stack
            .top()
            .map_or(0.0, |frame| dock.available(frame.cursor()));
        let extent = Some(if requested > 0.0 { requested } else { available });
        let pushed = self
            .stack
            .push_docked(FrameKind::Container, dock, extent, 0.0, Point::ZERO, true);
        match pushed {
            Ok(_) => {
                let clip = self.stack.top().map_or(Rect::ZERO, |frame| frame.clip());
                self.commands.push_clip(clip);
            }
            Err(err) => contract_violation(&err),
        }
    }

    /// Closes the innermost container.
    pub fn pop_container(&mut self) {
        match self.stack.pop(FrameKind::Container) {
            Ok(_) => {
                self.commands.pop_clip();
            }
            Err(err) => contract_violation(&err),
        }
    }

    /// Opens a layout docked in the current container's remaining space.
    ///
    /// `width` applies to [`Dock::Left`]/[`Dock::Right`], `height` to
    /// [`Dock::Top`]/[`Dock::Bottom`]. A size of 0 is auto: the layout takes
    /// the intrinsic size of the first widget declared inside it. `x`/`y`
    /// offset the layout inside its slot and `margin` insets it.
    pub fn push_layout(&mut self, x: f32, y: f32, width: f32, height: f32, dock: Dock, margin: f32) {
        let extent = match dock {
            Dock::Left | Dock::Right => Some(width),
            Dock::Top | Dock::Bottom => Some(height),
            Dock::Fill => None,
        }
        .filter(|extent| *extent > 0.0);

        if let Err(err) = self.stack.push_docked(
            FrameKind::Layout,
            dock,
            extent,
            margin,
            Point::new(x, y),
            false,
        ) {
            contract_violation(&err);
        }
    }

    /// Closes the innermost layout.
    pub fn pop_layout(&mut self) {
        if let Err(err) = self.stack.pop(FrameKind::Layout) {
            contract_violation(&err);
        }
    }

    // =========================================================================
    // Custom drawing
    // =========================================================================

    /// Draws a filled rectangle into the current layer.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.fill(rect, color);
    }

    /// Draws a rectangle outline into the current layer.
    pub fn stroke_rect(&mut self, rect: Rect, color: Color) {
        self.commands.stroke(rect, color);
    }

    /// Draws a line into the current layer.
    pub fn line(&mut self, from: Point, to: Point, color: Color) {
        self.commands.line(from, to, color);
    }

    /// Draws part of a texture into the current layer.
    pub fn image(&mut self, texture: TextureId, src: Rect, dst: Rect, color: Color) {
        self.commands.image(texture, src, dst, color);
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Width of `text` in the engine's font.
    #[must_use]
    pub fn text_width(&self, text: &str) -> f32 {
        self.font.text_width(text)
    }

    /// Height of one text line.
    #[must_use]
    pub fn line_height(&self) -> f32 {
        self.font.line_height()
    }

    /// Number of open containers and layouts.
    #[must_use]
    pub fn stack_depth(&self) -> usize {
        self.stack.depth()
    }

    /// Remaining region of the innermost open frame.
    #[must_use]
    pub fn current_rect(&self) -> Option<Rect> {
        self.stack.top().map(|frame| frame.cursor())
    }

    /// Effective clip of the innermost open frame.
    #[must_use]
    pub fn current_clip(&self) -> Option<Rect> {
        self.stack.top().map(|frame| frame.clip())
    }

    /// The widget under the pointer.
    #[must_use]
    pub fn hot(&self) -> Option<WidgetId> {
        self.interaction.hot()
    }

    /// The widget holding pointer capture.
    #[must_use]
    pub fn active(&self) -> Option<WidgetId> {
        self.interaction.active()
    }

    /// The widget holding keyboard focus.
    #[must_use]
    pub fn focus(&self) -> Option<WidgetId> {
        self.interaction.focus()
    }

    /// Moves keyboard focus to `id`, or clears it.
    pub fn set_focus(&mut self, id: Option<WidgetId>) {
        self.interaction.focus_widget(id);
    }

    /// This frame's input snapshot.
    #[must_use]
    pub fn input_state(&self) -> &InputState {
        &self.frame_input
    }

    /// The input source.
    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// The renderer.
    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// The renderer.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Commands submitted by the most recent `finish()`.
    #[must_use]
    pub fn last_commands(&self) -> &[Command] {
        &self.submitted
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &GuiConfig {
        &self.config
    }

    /// Replaces the theme from the next widget on.
    pub fn set_theme(&mut self, theme: Theme) {
        self.config.theme = theme;
    }

    /// Frames prepared so far.
    #[must_use]
    pub const fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Input clock at the start of this frame, in milliseconds.
    #[must_use]
    pub const fn time_ms(&self) -> u64 {
        self.time_ms
    }

    // =========================================================================
    // Widget plumbing
    // =========================================================================

    pub(crate) fn theme(&self) -> &Theme {
        &self.config.theme
    }

    pub(crate) fn metrics(&self) -> &Metrics {
        &self.config.metrics
    }

    /// Places a widget with the given intrinsic size in the innermost frame.
    ///
    /// The widget covers the frame's remaining region; an auto-sized frame
    /// takes its size from the first widget that asks.
    pub(crate) fn allocate(&mut self, width: f32, height: f32) -> Option<Slot> {
        if self.stack.is_empty() {
            contract_violation(&UiError::NoOpenFrame);
            return None;
        }
        self.stack.report_intrinsic(width, height);
        let frame = self.stack.top()?;
        let rect = frame.cursor();
        let hover = rect.clip_to(&frame.clip());
        self.stack.occupy(rect);
        Some(Slot { rect, hover })
    }

    /// Runs interaction for a widget on the current layer.
    pub(crate) fn interact(&mut self, id: WidgetId, hover: Rect, sense: Sense) -> Interaction {
        let layer = self.commands.layer();
        self.interaction
            .interact(id, hover, layer, sense, &self.frame_input)
    }

    /// Draws `text` starting at `origin`, one glyph quad per character.
    ///
    /// Glyphs not fully inside `bounds` horizontally are skipped.
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn paint_text(&mut self, origin: Point, text: &str, color: Color, bounds: Rect) {
        let Some(texture) = self.font_texture else {
            return;
        };
        let advance = self.font.advance();
        let height = self.font.line_height();
        for (i, ch) in text.chars().enumerate() {
            let x = origin.x + i as f32 * advance;
            if x + advance > bounds.right() + 0.5 {
                break;
            }
            if x < bounds.x - 0.5 || ch == ' ' {
                continue;
            }
            if let Some(src) = self.font.glyph_source(ch) {
                let dst = Rect::new(x, origin.y, advance, height);
                self.commands.image(texture, src, dst, color);
            }
        }
    }

    /// Draws a single line of text vertically centered in `rect`.
    pub(crate) fn paint_label(&mut self, rect: Rect, x: f32, text: &str, color: Color) {
        let y = rect.y + (rect.height - self.font.line_height()) * 0.5;
        self.paint_text(Point::new(x, y), text, color, rect);
    }
}

impl<I: InputSource, R: Renderer> Drop for Gui<I, R> {
    fn drop(&mut self) {
        self.renderer.destroyed();
        tracing::info!(frames = self.frame_index, "renderer resources released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::BufferedInput;
    use crate::render::RecordingRenderer;

    fn gui() -> Gui<BufferedInput, RecordingRenderer> {
        Gui::new(
            BufferedInput::new(),
            RecordingRenderer::new(),
            FontAtlas::blank(8, 12),
        )
    }

    #[test]
    fn test_renderer_lifetime_is_bracketed() {
        let renderer = RecordingRenderer::new();
        let log = renderer.log();
        {
            let mut gui = Gui::new(BufferedInput::new(), renderer, FontAtlas::blank(8, 12));
            gui.prepare();
            gui.finish(100.0, 100.0);
            assert_eq!(log.lock().created, 1);
            assert_eq!(log.lock().destroyed, 0);
        }
        let log = log.lock();
        assert_eq!(log.destroyed, 1);
        assert_eq!(log.fonts, vec![(128, 192)]);
        assert_eq!(log.frames.len(), 1);
    }

    #[test]
    fn test_container_brackets_children_with_clip() {
        let mut gui = gui();
        gui.prepare();
        gui.push_container(10.0, 10.0, 100.0, 50.0);
        gui.fill_rect(Rect::new(0.0, 0.0, 5.0, 5.0), Color::WHITE);
        gui.pop_container();
        gui.finish(200.0, 200.0);

        let commands = gui.last_commands();
        assert_eq!(
            commands.first(),
            Some(&Command::SetClip {
                rect: Rect::new(10.0, 10.0, 100.0, 50.0)
            })
        );
        assert_eq!(commands.last(), Some(&Command::UnsetClip));
    }

    #[test]
    fn test_layouts_dock_in_order() {
        let mut gui = gui();
        gui.prepare();
        gui.push_container(0.0, 0.0, 240.0, 400.0);
        gui.push_layout(0.0, 0.0, 0.0, 22.0, Dock::Top, 0.0);
        assert_eq!(gui.current_rect(), Some(Rect::new(0.0, 0.0, 240.0, 22.0)));
        gui.pop_layout();
        gui.push_layout(0.0, 0.0, 64.0, 0.0, Dock::Left, 0.0);
        assert_eq!(gui.current_rect(), Some(Rect::new(0.0, 22.0, 64.0, 378.0)));
        gui.pop_layout();
        gui.pop_container();
        assert_eq!(gui.stack_depth(), 0);
        gui.finish(240.0, 400.0);
    }

    #[test]
    fn test_docked_container_clips_to_its_slot() {
        let mut gui = gui();
        gui.prepare();
        gui.push_container(10.0, 25.0, 240.0, 420.0);
        gui.push_container_docked(0.0, 64.0, Dock::Top);
        assert_eq!(gui.current_clip(), Some(Rect::new(10.0, 25.0, 240.0, 64.0)));
        gui.pop_container();
        assert_eq!(gui.current_rect().map(|r| r.y), Some(89.0));
        gui.pop_container();
        gui.finish(640.0, 480.0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "pop_layout called but the innermost open frame is a container")]
    fn test_mismatched_pop_fails_fast() {
        let mut gui = gui();
        gui.prepare();
        gui.push_container(0.0, 0.0, 10.0, 10.0);
        gui.pop_layout();
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "unclosed")]
    fn test_unbalanced_finish_fails_fast() {
        let mut gui = gui();
        gui.prepare();
        gui.push_container(0.0, 0.0, 10.0, 10.0);
        gui.finish(10.0, 10.0);
    }

    #[test]
    fn test_failed_font_upload_renders_blank_text() {
        let mut gui = Gui::new(
            BufferedInput::new(),
            RecordingRenderer::new().failing_font(),
            FontAtlas::blank(8, 12),
        );
        gui.prepare();
        gui.push_container(0.0, 0.0, 200.0, 20.0);
        gui.text(0.0, 0.0, "hello", crate::widget::Overflow::Clip);
        gui.pop_container();
        gui.finish(200.0, 20.0);

        assert!(!gui
            .last_commands()
            .iter()
            .any(|command| matches!(command, Command::DrawImage { .. })));
    }
}
