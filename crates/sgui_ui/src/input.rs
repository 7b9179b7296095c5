//! Input handling.
//!
//! The platform adapter translates native events into [`InputEvent`]s and
//! sends them through an [`EventSender`]. Once per frame the engine polls its
//! [`InputSource`], which drains everything buffered since the last poll
//! into an [`InputState`] snapshot. Events sent while the frame is being
//! declared stay queued for the next one.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crossbeam_channel::{Receiver, Sender};
use parking_lot::Mutex;
use serde::Deserialize;

use crate::layout::Point;

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    /// Left mouse button.
    Left,
    /// Right mouse button.
    Right,
    /// Middle mouse button (scroll wheel click).
    Middle,
}

impl MouseButton {
    const COUNT: usize = 3;

    const fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
            Self::Middle => 2,
        }
    }
}

/// Logical keys the engine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    /// Alt modifier.
    Alt,
    /// Backspace key.
    Backspace,
    /// Control modifier.
    Ctrl,
    /// Shift modifier.
    Shift,
    /// Delete key.
    Delete,
    /// End key.
    End,
    /// Enter/Return key.
    Enter,
    /// Escape key.
    Escape,
    /// Home key.
    Home,
    /// Arrow left.
    Left,
    /// Arrow right.
    Right,
    /// Tab key.
    Tab,
    /// `A` (select all with Ctrl).
    A,
    /// `C` (copy with Ctrl).
    C,
    /// `V` (paste with Ctrl).
    V,
    /// `X` (cut with Ctrl).
    X,
}

impl Key {
    const COUNT: usize = 16;

    const fn index(self) -> usize {
        self as usize
    }
}

/// Down/pressed/released state of one key or button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    /// Currently held.
    pub down: bool,
    /// Went down since the previous frame.
    pub pressed: bool,
    /// Went up since the previous frame.
    pub released: bool,
}

impl ButtonState {
    fn press(&mut self) {
        self.down = true;
        self.pressed = true;
    }

    fn release(&mut self) {
        self.down = false;
        self.released = true;
    }

    fn clear_edges(&mut self) {
        self.pressed = false;
        self.released = false;
    }
}

/// An abstract input event produced by a platform adapter.
///
/// Deserializes from the externally tagged form used by input scripts, e.g.
/// `{ pointer_moved = { x = 10.0, y = 4.0 } }` or `{ key_down = "tab" }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputEvent {
    /// The pointer moved to an absolute position.
    PointerMoved {
        /// X position.
        x: f32,
        /// Y position.
        y: f32,
    },
    /// A mouse button went down.
    ButtonDown(MouseButton),
    /// A mouse button went up.
    ButtonUp(MouseButton),
    /// A key went down. Platform key repeat may send this repeatedly.
    KeyDown(Key),
    /// A key went up.
    KeyUp(Key),
    /// Text was entered.
    Text(String),
    /// The wheel scrolled, in notches.
    Wheel {
        /// Horizontal notches.
        dx: f32,
        /// Vertical notches; positive scrolls content towards the top.
        dy: f32,
    },
}

/// Input state for the current frame.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Current pointer position.
    pub pointer: Point,
    /// Pointer position at the previous poll.
    pub prev_pointer: Point,
    /// Wheel notches accumulated this frame.
    pub wheel: Point,
    /// Text entered this frame.
    pub text: String,
    buttons: [ButtonState; MouseButton::COUNT],
    keys: [ButtonState; Key::COUNT],
}

impl InputState {
    /// Creates a new empty input state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begins a new frame, clearing per-frame state.
    pub fn begin_frame(&mut self) {
        self.prev_pointer = self.pointer;
        self.wheel = Point::ZERO;
        self.text.clear();
        self.buttons.iter_mut().for_each(ButtonState::clear_edges);
        self.keys.iter_mut().for_each(ButtonState::clear_edges);
    }

    /// Folds one event into the state.
    pub fn apply(&mut self, event: &InputEvent) {
        match event {
            InputEvent::PointerMoved { x, y } => self.pointer = Point::new(*x, *y),
            InputEvent::ButtonDown(button) => self.buttons[button.index()].press(),
            InputEvent::ButtonUp(button) => self.buttons[button.index()].release(),
            InputEvent::KeyDown(key) => self.keys[key.index()].press(),
            InputEvent::KeyUp(key) => self.keys[key.index()].release(),
            InputEvent::Text(text) => self.text.push_str(text),
            InputEvent::Wheel { dx, dy } => {
                self.wheel.x += dx;
                self.wheel.y += dy;
            }
        }
    }

    /// State of a mouse button.
    #[must_use]
    pub fn button(&self, button: MouseButton) -> ButtonState {
        self.buttons[button.index()]
    }

    /// State of a key.
    #[must_use]
    pub fn key(&self, key: Key) -> ButtonState {
        self.keys[key.index()]
    }

    /// Returns true if the mouse button went down this frame.
    #[must_use]
    pub fn button_pressed(&self, button: MouseButton) -> bool {
        self.button(button).pressed
    }

    /// Returns true if the mouse button went up this frame.
    #[must_use]
    pub fn button_released(&self, button: MouseButton) -> bool {
        self.button(button).released
    }

    /// Returns true if the mouse button is currently held.
    #[must_use]
    pub fn button_down(&self, button: MouseButton) -> bool {
        self.button(button).down
    }

    /// Returns true if the key went down this frame.
    #[must_use]
    pub fn key_pressed(&self, key: Key) -> bool {
        self.key(key).pressed
    }

    /// Returns true if the key is currently held.
    #[must_use]
    pub fn key_down(&self, key: Key) -> bool {
        self.key(key).down
    }

    /// Returns true if Ctrl is held.
    #[must_use]
    pub fn ctrl(&self) -> bool {
        self.key_down(Key::Ctrl)
    }

    /// Returns true if Shift is held.
    #[must_use]
    pub fn shift(&self) -> bool {
        self.key_down(Key::Shift)
    }

    /// Returns the pointer movement since the previous poll.
    #[must_use]
    pub fn pointer_delta(&self) -> Point {
        Point::new(
            self.pointer.x - self.prev_pointer.x,
            self.pointer.y - self.prev_pointer.y,
        )
    }
}

/// Everything the engine reads from the platform, once per frame.
pub trait InputSource {
    /// Drains buffered events and returns this frame's snapshot.
    fn poll(&mut self) -> InputState;

    /// Current clipboard contents.
    fn clipboard_text(&mut self) -> String;

    /// Replaces the clipboard contents.
    fn set_clipboard_text(&mut self, text: &str);

    /// Monotonic clock in milliseconds.
    fn time_ms(&self) -> u64;
}

/// Platform clipboard access.
pub trait Clipboard {
    /// Current contents.
    fn get(&mut self) -> String;
    /// Replaces the contents.
    fn set(&mut self, text: &str);
}

/// Process-local clipboard, shareable between the host and the engine.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Arc<Mutex<String>>,
}

impl MemoryClipboard {
    /// Creates an empty clipboard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the contents.
    #[must_use]
    pub fn contents(&self) -> String {
        self.contents.lock().clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn get(&mut self) -> String {
        self.contents.lock().clone()
    }

    fn set(&mut self, text: &str) {
        let mut contents = self.contents.lock();
        contents.clear();
        contents.push_str(text);
    }
}

/// A clock advanced by hand, for tests and fixed-step hosts.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now_ms: Arc<AtomicU64>,
}

impl ManualClock {
    /// Creates a clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the clock forward.
    pub fn advance(&self, ms: u64) {
        self.now_ms.fetch_add(ms, Ordering::Relaxed);
    }

    /// Current time in milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms.load(Ordering::Relaxed)
    }
}

#[derive(Debug)]
enum Clock {
    Monotonic(Instant),
    Manual(ManualClock),
}

/// Cloneable handle the platform pump uses to feed events to the engine.
#[derive(Debug, Clone)]
pub struct EventSender {
    sender: Sender<InputEvent>,
}

impl EventSender {
    /// Queues an event for the next frame.
    ///
    /// Returns false if the engine's input source has been dropped.
    pub fn send(&self, event: InputEvent) -> bool {
        self.sender.send(event).is_ok()
    }
}

/// Channel-buffered [`InputSource`].
pub struct BufferedInput {
    sender: Sender<InputEvent>,
    receiver: Receiver<InputEvent>,
    state: InputState,
    clipboard: Box<dyn Clipboard>,
    clock: Clock,
}

impl BufferedInput {
    /// Creates an input source with a memory clipboard and a monotonic clock.
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = crossbeam_channel::unbounded();
        Self {
            sender,
            receiver,
            state: InputState::new(),
            clipboard: Box::new(MemoryClipboard::new()),
            clock: Clock::Monotonic(Instant::now()),
        }
    }

    /// Replaces the clipboard backend.
    #[must_use]
    pub fn with_clipboard(mut self, clipboard: impl Clipboard + 'static) -> Self {
        self.clipboard = Box::new(clipboard);
        self
    }

    /// Drives time from a [`ManualClock`] instead of the system clock.
    #[must_use]
    pub fn with_clock(mut self, clock: ManualClock) -> Self {
        self.clock = Clock::Manual(clock);
        self
    }

    /// Returns a handle for queuing events.
    #[must_use]
    pub fn sender(&self) -> EventSender {
        EventSender {
            sender: self.sender.clone(),
        }
    }
}

impl Default for BufferedInput {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BufferedInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferedInput")
            .field("queued", &self.receiver.len())
            .field("state", &self.state)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

impl InputSource for BufferedInput {
    fn poll(&mut self) -> InputState {
        self.state.begin_frame();
        for event in self.receiver.try_iter() {
            self.state.apply(&event);
        }
        self.state.clone()
    }

    fn clipboard_text(&mut self) -> String {
        self.clipboard.get()
    }

    fn set_clipboard_text(&mut self, text: &str) {
        self.clipboard.set(text);
    }

    #[allow(clippy::cast_possible_truncation)]
    fn time_ms(&self) -> u64 {
        match &self.clock {
            Clock::Monotonic(start) => start.elapsed().as_millis() as u64,
            Clock::Manual(clock) => clock.now_ms(),
        }
    }
}
