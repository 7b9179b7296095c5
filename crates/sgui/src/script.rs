//! Scripted input timelines.
//!
//! A script lists input events by the frame they arrive in. A host replays
//! it by sending each step's events just before that frame's `prepare()`.
//!
//! ```toml
//! [[step]]
//! frame = 2
//! events = [{ pointer_moved = { x = 72.0, y = 11.0 } }]
//!
//! [[step]]
//! frame = 3
//! events = [{ button_down = "left" }, { button_up = "left" }]
//! ```

use std::path::Path;

use serde::Deserialize;
use sgui_ui::{EventSender, InputEvent, Key, MouseButton, UiResult};

/// Events delivered at the start of one frame.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScriptStep {
    /// Zero-based frame index.
    pub frame: u64,
    /// Events in delivery order.
    #[serde(default)]
    pub events: Vec<InputEvent>,
}

/// An input timeline.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InputScript {
    #[serde(default, rename = "step")]
    steps: Vec<ScriptStep>,
}

impl InputScript {
    /// Creates an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a TOML script.
    ///
    /// # Errors
    ///
    /// [`sgui_ui::UiError::InvalidConfig`] if the text is not a valid script.
    pub fn from_toml_str(text: &str) -> UiResult<Self> {
        let mut script: Self = toml::from_str(text)?;
        script.steps.sort_by_key(|step| step.frame);
        tracing::debug!(steps = script.steps.len(), "input script parsed");
        Ok(script)
    }

    /// Reads and parses a TOML script file.
    ///
    /// # Errors
    ///
    /// [`sgui_ui::UiError::Io`] if the file cannot be read, otherwise as
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn from_toml_file(path: impl AsRef<Path>) -> UiResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Appends events at `frame`.
    #[must_use]
    pub fn at(mut self, frame: u64, events: impl IntoIterator<Item = InputEvent>) -> Self {
        let events = events.into_iter().collect::<Vec<_>>();
        match self.steps.iter_mut().find(|step| step.frame == frame) {
            Some(step) => step.events.extend(events),
            None => {
                let at = self.steps.partition_point(|step| step.frame < frame);
                self.steps.insert(at, ScriptStep { frame, events });
            }
        }
        self
    }

    /// Moves the pointer at `frame`.
    #[must_use]
    pub fn move_to(self, frame: u64, x: f32, y: f32) -> Self {
        self.at(frame, [InputEvent::PointerMoved { x, y }])
    }

    /// Presses and releases the left button at `frame`.
    #[must_use]
    pub fn click(self, frame: u64) -> Self {
        self.at(
            frame,
            [
                InputEvent::ButtonDown(MouseButton::Left),
                InputEvent::ButtonUp(MouseButton::Left),
            ],
        )
    }

    /// Presses and releases `key` at `frame`.
    #[must_use]
    pub fn tap(self, frame: u64, key: Key) -> Self {
        self.at(frame, [InputEvent::KeyDown(key), InputEvent::KeyUp(key)])
    }

    /// Types `text` at `frame`.
    #[must_use]
    pub fn type_text(self, frame: u64, text: &str) -> Self {
        self.at(frame, [InputEvent::Text(text.to_owned())])
    }

    /// All steps, ordered by frame.
    #[must_use]
    pub fn steps(&self) -> &[ScriptStep] {
        &self.steps
    }

    /// Events scheduled for `frame`.
    pub fn events_at(&self, frame: u64) -> impl Iterator<Item = &InputEvent> {
        self.steps
            .iter()
            .filter(move |step| step.frame == frame)
            .flat_map(|step| step.events.iter())
    }

    /// Index of the last frame with events, if any.
    #[must_use]
    pub fn last_frame(&self) -> Option<u64> {
        self.steps.last().map(|step| step.frame)
    }

    /// Sends `frame`'s events. Returns how many were delivered.
    pub fn deliver(&self, frame: u64, sender: &EventSender) -> usize {
        let mut delivered = 0;
        for event in self.events_at(frame) {
            if sender.send(event.clone()) {
                delivered += 1;
            }
        }
        delivered
    }
}
