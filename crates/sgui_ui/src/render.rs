//! Command buffer and the renderer contract.
//!
//! Widgets append [`Command`]s in draw order. Two layers are recorded: the
//! base layer for ordinary widgets and an overlay layer for popups. At
//! `finish()` the overlay is appended after the base, so popups draw over
//! everything declared before or after them. Each layer keeps its own clip
//! stack and is always handed to the renderer balanced.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{UiError, UiResult};
use crate::layout::{Point, Rect};
use crate::style::Color;

/// Opaque handle to a texture owned by a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u64);

/// One backend-independent drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// One-pixel line.
    DrawLine {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
        /// Line color.
        color: Color,
    },
    /// Rectangle outline.
    DrawRect {
        /// Bounds.
        rect: Rect,
        /// Stroke color.
        color: Color,
    },
    /// Filled rectangle.
    FillRect {
        /// Bounds.
        rect: Rect,
        /// Fill color.
        color: Color,
    },
    /// Textured quad.
    DrawImage {
        /// Source texture.
        texture: TextureId,
        /// Source rectangle in texture pixels.
        src: Rect,
        /// Destination rectangle on screen.
        dst: Rect,
        /// Modulation color.
        color: Color,
    },
    /// Pushes a clip rectangle, already intersected with the enclosing one.
    SetClip {
        /// Clip bounds.
        rect: Rect,
    },
    /// Pops the current clip rectangle.
    UnsetClip,
}

/// Which pass a command is recorded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Layer {
    /// Ordinary widgets.
    #[default]
    Base,
    /// Popups, drawn after the base layer.
    Overlay,
}

#[derive(Debug, Default)]
struct CommandList {
    commands: Vec<Command>,
    clip_stack: Vec<Rect>,
}

impl CommandList {
    fn clear(&mut self) {
        self.commands.clear();
        self.clip_stack.clear();
    }

    fn push_clip(&mut self, rect: Rect) -> Rect {
        let actual = match self.clip_stack.last() {
            Some(current) => rect.clip_to(current),
            None => rect,
        };
        self.clip_stack.push(actual);
        self.commands.push(Command::SetClip { rect: actual });
        actual
    }

    fn pop_clip(&mut self) -> bool {
        if self.clip_stack.pop().is_some() {
            self.commands.push(Command::UnsetClip);
            true
        } else {
            false
        }
    }

    fn close_clips(&mut self) -> usize {
        let open = self.clip_stack.len();
        while self.pop_clip() {}
        open
    }
}

/// Ordered per-frame command list with a base and an overlay layer.
#[derive(Debug)]
pub struct CommandBuffer {
    base: CommandList,
    overlay: CommandList,
    layer: Layer,
}

impl CommandBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base: CommandList {
                commands: Vec::with_capacity(4096),
                clip_stack: Vec::with_capacity(16),
            },
            overlay: CommandList::default(),
            layer: Layer::Base,
        }
    }

    /// Begins a new frame.
    pub fn begin_frame(&mut self) {
        self.base.clear();
        self.overlay.clear();
        self.layer = Layer::Base;
    }

    fn list(&mut self) -> &mut CommandList {
        match self.layer {
            Layer::Base => &mut self.base,
            Layer::Overlay => &mut self.overlay,
        }
    }

    /// Switches the layer subsequent commands go to. Returns the previous one.
    pub fn set_layer(&mut self, layer: Layer) -> Layer {
        std::mem::replace(&mut self.layer, layer)
    }

    /// The layer commands currently go to.
    #[must_use]
    pub const fn layer(&self) -> Layer {
        self.layer
    }

    /// Adds a command to the current layer.
    pub fn push(&mut self, command: Command) {
        self.list().commands.push(command);
    }

    /// Adds a line.
    pub fn line(&mut self, from: Point, to: Point, color: Color) {
        self.push(Command::DrawLine { from, to, color });
    }

    /// Adds a rectangle outline.
    pub fn stroke(&mut self, rect: Rect, color: Color) {
        self.push(Command::DrawRect { rect, color });
    }

    /// Adds a filled rectangle.
    pub fn fill(&mut self, rect: Rect, color: Color) {
        self.push(Command::FillRect { rect, color });
    }

    /// Adds a textured quad.
    pub fn image(&mut self, texture: TextureId, src: Rect, dst: Rect, color: Color) {
        self.push(Command::DrawImage {
            texture,
            src,
            dst,
            color,
        });
    }

    /// Pushes a clip rect on the current layer.
    ///
    /// The rect is intersected with the layer's current clip; the
    /// intersection is what gets recorded and returned.
    pub fn push_clip(&mut self, rect: Rect) -> Rect {
        self.list().push_clip(rect)
    }

    /// Pops the current layer's clip rect. Returns false if none was open.
    pub fn pop_clip(&mut self) -> bool {
        self.list().pop_clip()
    }

    /// Returns the current layer's clip rect.
    #[must_use]
    pub fn current_clip(&self) -> Option<Rect> {
        match self.layer {
            Layer::Base => self.base.clip_stack.last().copied(),
            Layer::Overlay => self.overlay.clip_stack.last().copied(),
        }
    }

    /// Returns the total command count across both layers.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.base.commands.len() + self.overlay.commands.len()
    }

    /// Ends the frame: closes leftover clips and returns base then overlay.
    pub fn finish(&mut self) -> Vec<Command> {
        let unclosed = self.base.close_clips() + self.overlay.close_clips();
        if unclosed > 0 {
            tracing::debug!(unclosed, "closed clip rects left open at frame end");
        }

        let mut commands = std::mem::take(&mut self.base.commands);
        commands.append(&mut self.overlay.commands);
        self.layer = Layer::Base;
        commands
    }
}

impl Default for CommandBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// A rendering backend.
///
/// The engine calls [`created`](Self::created) and then
/// [`load_font`](Self::load_font) once when it is constructed,
/// [`render`](Self::render) once per frame, and
/// [`destroyed`](Self::destroyed) once when it is dropped.
pub trait Renderer {
    /// Acquires backend resources.
    fn created(&mut self) {}

    /// Releases backend resources.
    fn destroyed(&mut self) {}

    /// Uploads an RGBA8 font atlas and returns its texture handle.
    ///
    /// # Errors
    ///
    /// [`UiError::Resource`] if the backend cannot create the texture.
    fn load_font(&mut self, pixels: &[u8], width: u32, height: u32) -> UiResult<TextureId>;

    /// Renders one frame's commands in order.
    fn render(&mut self, commands: &[Command], viewport_width: f32, viewport_height: f32);
}

/// Everything a [`RecordingRenderer`] has been asked to do.
#[derive(Debug, Default, Clone)]
pub struct RenderLog {
    /// Times `created` was called.
    pub created: u32,
    /// Times `destroyed` was called.
    pub destroyed: u32,
    /// Sizes of the font atlases loaded.
    pub fonts: Vec<(u32, u32)>,
    /// Every rendered frame's commands, oldest first.
    pub frames: Vec<Vec<Command>>,
    /// Viewport of the most recent frame.
    pub viewport: (f32, f32),
}

impl RenderLog {
    /// Commands of the most recent frame.
    #[must_use]
    pub fn last_frame(&self) -> &[Command] {
        self.frames.last().map_or(&[], Vec::as_slice)
    }
}

/// Renderer that records instead of drawing. Used by tests and benchmarks.
#[derive(Debug, Clone)]
pub struct RecordingRenderer {
    log: Arc<Mutex<RenderLog>>,
    fail_font: bool,
    keep_frames: bool,
}

impl Default for RecordingRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingRenderer {
    /// Creates a renderer that keeps every frame.
    #[must_use]
    pub fn new() -> Self {
        Self {
            log: Arc::default(),
            fail_font: false,
            keep_frames: true,
        }
    }

    /// Creates a renderer that only keeps the most recent frame.
    #[must_use]
    pub fn last_frame_only() -> Self {
        Self {
            keep_frames: false,
            ..Self::new()
        }
    }

    /// Makes `load_font` fail.
    #[must_use]
    pub fn failing_font(mut self) -> Self {
        self.fail_font = true;
        self
    }

    /// Shared handle to the log, valid after the renderer moves into a `Gui`.
    #[must_use]
    pub fn log(&self) -> Arc<Mutex<RenderLog>> {
        Arc::clone(&self.log)
    }
}

impl Renderer for RecordingRenderer {
    fn created(&mut self) {
        self.log.lock().created += 1;
    }

    fn destroyed(&mut self) {
        self.log.lock().destroyed += 1;
    }

    fn load_font(&mut self, _pixels: &[u8], width: u32, height: u32) -> UiResult<TextureId> {
        if self.fail_font {
            return Err(UiError::Resource("font texture rejected".into()));
        }
        let mut log = self.log.lock();
        log.fonts.push((width, height));
        Ok(TextureId(log.fonts.len() as u64))
    }

    fn render(&mut self, commands: &[Command], viewport_width: f32, viewport_height: f32) {
        let mut log = self.log.lock();
        if !self.keep_frames {
            log.frames.clear();
        }
        log.frames.push(commands.to_vec());
        log.viewport = (viewport_width, viewport_height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_recorder_keeps_every_frame() {
        let run = |mut renderer: RecordingRenderer| {
            let log = renderer.log();
            renderer.render(&[Command::UnsetClip], 10.0, 10.0);
            renderer.render(&[], 10.0, 10.0);
            let frames = log.lock().frames.len();
            frames
        };
        assert_eq!(run(RecordingRenderer::default()), 2);
        assert_eq!(run(RecordingRenderer::new()), 2);
        assert_eq!(run(RecordingRenderer::last_frame_only()), 1);
    }

    #[test]
    fn test_overlay_follows_base() {
        let mut buffer = CommandBuffer::new();
        buffer.begin_frame();

        buffer.set_layer(Layer::Overlay);
        buffer.fill(Rect::new(0.0, 0.0, 10.0, 10.0), Color::WHITE);
        buffer.set_layer(Layer::Base);
        buffer.fill(Rect::new(5.0, 5.0, 10.0, 10.0), Color::BLACK);

        let commands = buffer.finish();
        assert_eq!(commands.len(), 2);
        assert!(matches!(commands[1], Command::FillRect { color, .. } if color == Color::WHITE));
    }

    #[test]
    fn test_clip_stack_intersects() {
        let mut buffer = CommandBuffer::new();
        buffer.begin_frame();

        buffer.push_clip(Rect::new(0.0, 0.0, 100.0, 100.0));
        let inner = buffer.push_clip(Rect::new(50.0, 50.0, 100.0, 100.0));
        assert_eq!(inner, Rect::new(50.0, 50.0, 50.0, 50.0));

        assert!(buffer.pop_clip());
        assert!(buffer.pop_clip());
        assert!(!buffer.pop_clip());
        assert!(buffer.current_clip().is_none());
    }

    #[test]
    fn test_finish_balances_clips() {
        let mut buffer = CommandBuffer::new();
        buffer.begin_frame();
        buffer.push_clip(Rect::new(0.0, 0.0, 10.0, 10.0));
        buffer.set_layer(Layer::Overlay);
        buffer.push_clip(Rect::new(0.0, 0.0, 5.0, 5.0));

        let commands = buffer.finish();
        let sets = commands
            .iter()
            .filter(|c| matches!(c, Command::SetClip { .. }))
            .count();
        let unsets = commands
            .iter()
            .filter(|c| matches!(c, Command::UnsetClip))
            .count();
        assert_eq!(sets, 2);
        assert_eq!(unsets, 2);
        assert_eq!(commands[1], Command::UnsetClip);
    }

    #[test]
    fn test_recording_renderer_shares_log() {
        let renderer = RecordingRenderer::new();
        let log = renderer.log();
        let mut boxed: Box<dyn Renderer> = Box::new(renderer);

        boxed.created();
        let texture = boxed.load_font(&[0; 64], 4, 4).unwrap();
        boxed.render(&[Command::UnsetClip], 320.0, 200.0);
        boxed.destroyed();

        let log = log.lock();
        assert_eq!(texture, TextureId(1));
        assert_eq!((log.created, log.destroyed), (1, 1));
        assert_eq!(log.last_frame(), &[Command::UnsetClip]);
        assert_eq!(log.viewport, (320.0, 200.0));
    }
}
