//! Frame-driving harness shared by the unit tests.

use crate::font::FontAtlas;
use crate::gui::Gui;
use crate::input::{BufferedInput, EventSender, InputEvent, Key, ManualClock, MouseButton};
use crate::layout::Rect;
use crate::render::{Command, RecordingRenderer};

pub(crate) type TestGui = Gui<BufferedInput, RecordingRenderer>;

pub(crate) struct Harness {
    pub gui: TestGui,
    events: EventSender,
    clock: ManualClock,
}

impl Harness {
    pub fn new() -> Self {
        let clock = ManualClock::new();
        let input = BufferedInput::new().with_clock(clock.clone());
        let events = input.sender();
        let gui = Gui::new(
            input,
            RecordingRenderer::last_frame_only(),
            FontAtlas::blank(8, 12),
        );
        Self { gui, events, clock }
    }

    /// Runs one full frame around `declare`.
    pub fn frame<T>(&mut self, declare: impl FnOnce(&mut TestGui) -> T) -> T {
        self.gui.prepare();
        let out = declare(&mut self.gui);
        self.gui.finish(640.0, 480.0);
        self.clock.advance(16);
        out
    }

    pub fn send(&self, event: InputEvent) {
        self.events.send(event);
    }

    pub fn move_to(&self, x: f32, y: f32) {
        self.send(InputEvent::PointerMoved { x, y });
    }

    pub fn press(&self) {
        self.send(InputEvent::ButtonDown(MouseButton::Left));
    }

    pub fn release(&self) {
        self.send(InputEvent::ButtonUp(MouseButton::Left));
    }

    pub fn tap(&self, key: Key) {
        self.send(InputEvent::KeyDown(key));
        self.send(InputEvent::KeyUp(key));
    }

    pub fn hold(&self, key: Key) {
        self.send(InputEvent::KeyDown(key));
    }

    pub fn lift(&self, key: Key) {
        self.send(InputEvent::KeyUp(key));
    }

    pub fn type_text(&self, text: &str) {
        self.send(InputEvent::Text(text.to_owned()));
    }

    pub fn wheel(&self, dy: f32) {
        self.send(InputEvent::Wheel { dx: 0.0, dy });
    }

    pub fn advance(&self, ms: u64) {
        self.clock.advance(ms);
    }

    /// Destination rects of every glyph quad in the last frame.
    pub fn glyph_rects(&self) -> Vec<Rect> {
        self.gui
            .last_commands()
            .iter()
            .filter_map(|command| match command {
                Command::DrawImage { dst, .. } => Some(*dst),
                _ => None,
            })
            .collect()
    }
}
