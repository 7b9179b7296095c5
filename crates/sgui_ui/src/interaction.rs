//! Hot, active and focus tracking.
//!
//! Widgets register a hover region every frame they are declared. Hot is
//! picked once, in [`InteractionState::begin_frame`], by testing the pointer
//! against the regions recorded during the previous frame: overlay regions
//! beat base regions, and within a layer the last declared region wins. The
//! geometry it tests against is therefore one frame old, which is invisible
//! at interactive frame rates.
//!
//! Active is the widget holding pointer capture. It is taken on press,
//! survives the pointer leaving the widget, and is released on button up,
//! on Escape, or when the widget stops being declared.

use crate::id::WidgetId;
use crate::input::{InputState, Key, MouseButton};
use crate::layout::Rect;
use crate::render::Layer;

/// A widget's hit-test rectangle for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverRegion {
    /// Owning widget.
    pub id: WidgetId,
    /// Widget rectangle intersected with its clip.
    pub rect: Rect,
    /// Layer the widget was drawn on.
    pub layer: Layer,
}

/// What kinds of interaction a widget takes part in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sense {
    /// Takes pointer capture on press.
    pub capture: bool,
    /// Takes keyboard focus on press and joins the Tab order.
    pub focus: bool,
}

impl Sense {
    /// Hover only.
    pub const HOVER: Self = Self {
        capture: false,
        focus: false,
    };
    /// Press, drag and click.
    pub const CLICK: Self = Self {
        capture: true,
        focus: false,
    };
    /// Click plus keyboard focus.
    pub const FOCUSABLE: Self = Self {
        capture: true,
        focus: true,
    };
}

/// Outcome of one widget's interaction this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Interaction {
    /// The widget is hot.
    pub hovered: bool,
    /// The widget took capture this frame.
    pub pressed: bool,
    /// The widget holds capture (including the frame it is released).
    pub active: bool,
    /// Capture ended this frame with the pointer over the widget.
    pub clicked: bool,
    /// Capture ended this frame.
    pub released: bool,
}

/// Global interaction slots for one engine instance.
#[derive(Debug, Default)]
pub struct InteractionState {
    hot: Option<WidgetId>,
    hot_layer: Option<Layer>,
    active: Option<WidgetId>,
    focus: Option<WidgetId>,
    open_popup: Option<WidgetId>,
    regions: Vec<HoverRegion>,
    prev_regions: Vec<HoverRegion>,
    focusables: Vec<WidgetId>,
    prev_focusables: Vec<WidgetId>,
    press_consumed: bool,
    active_seen: bool,
    focus_seen: bool,
    popup_seen: bool,
}

impl InteractionState {
    /// Creates empty interaction state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recomputes hot and applies frame-level keyboard and pointer rules.
    pub fn begin_frame(&mut self, input: &InputState) {
        std::mem::swap(&mut self.regions, &mut self.prev_regions);
        self.regions.clear();
        std::mem::swap(&mut self.focusables, &mut self.prev_focusables);
        self.focusables.clear();
        self.press_consumed = false;
        self.active_seen = false;
        self.focus_seen = false;
        self.popup_seen = false;

        self.pick_hot(input);

        if input.key_pressed(Key::Escape) {
            if let Some(id) = self.active.take() {
                tracing::debug!(%id, "capture cancelled");
            }
            self.set_focus(None);
            self.open_popup = None;
        }

        let pressed = input.button_pressed(MouseButton::Left);
        if pressed && self.open_popup.is_some() && self.hot_layer != Some(Layer::Overlay) {
            tracing::debug!("press outside popup closes it");
            self.open_popup = None;
            self.press_consumed = true;
        }

        if input.key_pressed(Key::Tab) && self.active.is_none() {
            self.cycle_focus(input.shift());
        }

        if pressed && !self.press_consumed && self.hot != self.focus {
            self.set_focus(None);
        }
    }

    fn pick_hot(&mut self, input: &InputState) {
        let pointer = input.pointer;
        let under = |layer: Layer| {
            self.prev_regions
                .iter()
                .rev()
                .find(|region| region.layer == layer && region.rect.contains_point(pointer))
        };

        let region = match under(Layer::Overlay) {
            Some(region) => Some(region),
            None if self.open_popup.is_none() => under(Layer::Base),
            None => None,
        };
        self.hot = region.map(|region| region.id);
        self.hot_layer = region.map(|region| region.layer);
    }

    fn cycle_focus(&mut self, backwards: bool) {
        let count = self.prev_focusables.len();
        if count == 0 {
            return;
        }
        let current = self
            .focus
            .and_then(|id| self.prev_focusables.iter().position(|&f| f == id));
        let next = match (current, backwards) {
            (Some(i), false) => (i + 1) % count,
            (Some(i), true) => (i + count - 1) % count,
            (None, false) => 0,
            (None, true) => count - 1,
        };
        self.set_focus(Some(self.prev_focusables[next]));
    }

    fn set_focus(&mut self, focus: Option<WidgetId>) {
        if self.focus != focus {
            tracing::debug!(from = ?self.focus, to = ?focus, "focus moved");
            self.focus = focus;
        }
    }

    /// Registers a widget for this frame and returns its interaction.
    pub fn interact(
        &mut self,
        id: WidgetId,
        rect: Rect,
        layer: Layer,
        sense: Sense,
        input: &InputState,
    ) -> Interaction {
        if !rect.is_empty() {
            self.regions.push(HoverRegion { id, rect, layer });
        }
        if sense.focus {
            self.focusables.push(id);
        }
        if self.focus == Some(id) {
            self.focus_seen = true;
        }

        let hovered = self.hot == Some(id);
        let mut response = Interaction {
            hovered,
            ..Interaction::default()
        };

        if sense.capture
            && hovered
            && self.active.is_none()
            && !self.press_consumed
            && input.button_pressed(MouseButton::Left)
        {
            tracing::debug!(%id, "capture taken");
            self.active = Some(id);
            self.press_consumed = true;
            response.pressed = true;
            if sense.focus {
                self.set_focus(Some(id));
                self.focus_seen = true;
            }
        }

        if self.active == Some(id) {
            self.active_seen = true;
            response.active = true;
            if input.button_released(MouseButton::Left) {
                response.released = true;
                response.clicked = hovered;
                self.active = None;
            }
        }

        response
    }

    /// Releases capture and focus held by widgets not declared this frame.
    pub fn end_frame(&mut self) {
        if !self.active_seen {
            if let Some(id) = self.active.take() {
                tracing::debug!(%id, "active widget vanished, capture released");
            }
        }
        if !self.focus_seen && self.focus.is_some() {
            self.set_focus(None);
        }
        if !self.popup_seen {
            self.open_popup = None;
        }
    }

    /// The widget under the pointer.
    #[must_use]
    pub const fn hot(&self) -> Option<WidgetId> {
        self.hot
    }

    /// The widget holding pointer capture.
    #[must_use]
    pub const fn active(&self) -> Option<WidgetId> {
        self.active
    }

    /// The widget holding keyboard focus.
    #[must_use]
    pub const fn focus(&self) -> Option<WidgetId> {
        self.focus
    }

    /// Gives keyboard focus to `id`, or clears it.
    pub fn focus_widget(&mut self, id: Option<WidgetId>) {
        self.set_focus(id);
    }

    /// Returns true if the popup owned by `id` is open, and marks it alive.
    pub fn popup_open(&mut self, id: WidgetId) -> bool {
        let open = self.open_popup == Some(id);
        self.popup_seen |= open;
        open
    }

    /// Opens the popup owned by `id`, closing any other.
    pub fn open_popup(&mut self, id: WidgetId) {
        tracing::debug!(%id, "popup opened");
        self.open_popup = Some(id);
        self.popup_seen = true;
    }

    /// Closes the popup owned by `id` if it is the open one.
    pub fn close_popup(&mut self, id: WidgetId) {
        if self.open_popup == Some(id) {
            self.open_popup = None;
        }
    }

    /// Returns true if any popup is open.
    #[must_use]
    pub const fn any_popup_open(&self) -> bool {
        self.open_popup.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputEvent;

    fn frame(state: &mut InputState, events: &[InputEvent]) -> InputState {
        state.begin_frame();
        for event in events {
            state.apply(event);
        }
        state.clone()
    }

    fn moved(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerMoved { x, y }
    }

    const BUTTON: Rect = Rect::new(0.0, 0.0, 50.0, 20.0);

    #[test]
    fn test_last_declared_region_wins() {
        let mut tracker = InteractionState::new();
        let mut input = InputState::new();
        let (a, b) = (WidgetId::new(1), WidgetId::new(2));

        let snapshot = frame(&mut input, &[moved(10.0, 10.0)]);
        tracker.begin_frame(&snapshot);
        tracker.interact(a, BUTTON, Layer::Base, Sense::CLICK, &snapshot);
        tracker.interact(b, BUTTON, Layer::Base, Sense::CLICK, &snapshot);
        tracker.end_frame();

        let snapshot = frame(&mut input, &[]);
        tracker.begin_frame(&snapshot);
        assert_eq!(tracker.hot(), Some(b));
    }

    #[test]
    fn test_click_is_press_then_release_inside() {
        let mut tracker = InteractionState::new();
        let mut input = InputState::new();
        let id = WidgetId::new(1);

        let mut run = |events: &[InputEvent]| {
            let snapshot = frame(&mut input, events);
            tracker.begin_frame(&snapshot);
            let response = tracker.interact(id, BUTTON, Layer::Base, Sense::CLICK, &snapshot);
            tracker.end_frame();
            response
        };

        run(&[moved(5.0, 5.0)]);
        let pressed = run(&[InputEvent::ButtonDown(MouseButton::Left)]);
        assert!(pressed.pressed && pressed.active && !pressed.clicked);
        let released = run(&[InputEvent::ButtonUp(MouseButton::Left)]);
        assert!(released.clicked && released.released);
        let after = run(&[]);
        assert!(!after.active && !after.clicked);
    }

    #[test]
    fn test_release_outside_is_not_a_click() {
        let mut tracker = InteractionState::new();
        let mut input = InputState::new();
        let id = WidgetId::new(1);

        let mut run = |events: &[InputEvent]| {
            let snapshot = frame(&mut input, events);
            tracker.begin_frame(&snapshot);
            let response = tracker.interact(id, BUTTON, Layer::Base, Sense::CLICK, &snapshot);
            tracker.end_frame();
            response
        };

        run(&[moved(5.0, 5.0)]);
        run(&[InputEvent::ButtonDown(MouseButton::Left)]);
        let dragged = run(&[moved(500.0, 500.0)]);
        assert!(dragged.active && !dragged.hovered);
        let released = run(&[InputEvent::ButtonUp(MouseButton::Left)]);
        assert!(released.released && !released.clicked);
    }

    #[test]
    fn test_undeclared_active_is_released() {
        let mut tracker = InteractionState::new();
        let mut input = InputState::new();
        let id = WidgetId::new(1);

        let snapshot = frame(&mut input, &[moved(5.0, 5.0)]);
        tracker.begin_frame(&snapshot);
        tracker.interact(id, BUTTON, Layer::Base, Sense::CLICK, &snapshot);
        tracker.end_frame();

        let snapshot = frame(&mut input, &[InputEvent::ButtonDown(MouseButton::Left)]);
        tracker.begin_frame(&snapshot);
        tracker.interact(id, BUTTON, Layer::Base, Sense::CLICK, &snapshot);
        tracker.end_frame();
        assert_eq!(tracker.active(), Some(id));

        let snapshot = frame(&mut input, &[]);
        tracker.begin_frame(&snapshot);
        tracker.end_frame();
        assert_eq!(tracker.active(), None);
    }

    #[test]
    fn test_tab_cycles_focus_in_declaration_order() {
        let mut tracker = InteractionState::new();
        let mut input = InputState::new();
        let ids = [WidgetId::new(1), WidgetId::new(2), WidgetId::new(3)];

        let mut run = |tracker: &mut InteractionState, events: &[InputEvent]| {
            let snapshot = frame(&mut input, events);
            tracker.begin_frame(&snapshot);
            for (i, id) in ids.iter().enumerate() {
                #[allow(clippy::cast_precision_loss)]
                let rect = BUTTON.translate(0.0, i as f32 * 30.0);
                tracker.interact(*id, rect, Layer::Base, Sense::FOCUSABLE, &snapshot);
            }
            tracker.end_frame();
        };

        run(&mut tracker, &[]);
        run(&mut tracker, &[InputEvent::KeyDown(Key::Tab)]);
        assert_eq!(tracker.focus(), Some(ids[0]));
        run(&mut tracker, &[InputEvent::KeyDown(Key::Tab)]);
        assert_eq!(tracker.focus(), Some(ids[1]));
        run(
            &mut tracker,
            &[
                InputEvent::KeyDown(Key::Shift),
                InputEvent::KeyDown(Key::Tab),
            ],
        );
        assert_eq!(tracker.focus(), Some(ids[0]));
        run(&mut tracker, &[InputEvent::KeyDown(Key::Escape)]);
        assert_eq!(tracker.focus(), None);
    }

    #[test]
    fn test_press_keeps_focus_past_end_of_frame() {
        let mut tracker = InteractionState::new();
        let mut input = InputState::new();
        let id = WidgetId::new(1);

        let mut run = |tracker: &mut InteractionState, events: &[InputEvent]| {
            let snapshot = frame(&mut input, events);
            tracker.begin_frame(&snapshot);
            let response = tracker.interact(id, BUTTON, Layer::Base, Sense::FOCUSABLE, &snapshot);
            tracker.end_frame();
            response
        };

        run(&mut tracker, &[moved(5.0, 5.0)]);
        let pressed = run(
            &mut tracker,
            &[
                InputEvent::ButtonDown(MouseButton::Left),
                InputEvent::ButtonUp(MouseButton::Left),
            ],
        );
        assert!(pressed.pressed && pressed.clicked);
        assert_eq!(tracker.focus(), Some(id));
        run(&mut tracker, &[]);
        assert_eq!(tracker.focus(), Some(id));
    }

    #[test]
    fn test_open_popup_hides_base_and_eats_outside_press() {
        let mut tracker = InteractionState::new();
        let mut input = InputState::new();
        let (base, owner, row) = (WidgetId::new(1), WidgetId::new(2), WidgetId::new(3));
        let popup_rect = Rect::new(0.0, 100.0, 50.0, 50.0);

        let snapshot = frame(&mut input, &[moved(5.0, 5.0)]);
        tracker.begin_frame(&snapshot);
        tracker.interact(base, BUTTON, Layer::Base, Sense::CLICK, &snapshot);
        tracker.open_popup(owner);
        tracker.interact(row, popup_rect, Layer::Overlay, Sense::CLICK, &snapshot);
        tracker.end_frame();

        let snapshot = frame(&mut input, &[InputEvent::ButtonDown(MouseButton::Left)]);
        tracker.begin_frame(&snapshot);
        assert_eq!(tracker.hot(), None);
        assert!(!tracker.any_popup_open());
        let response = tracker.interact(base, BUTTON, Layer::Base, Sense::CLICK, &snapshot);
        assert!(!response.pressed);
        tracker.end_frame();
    }
}
