//! Core widget result types.

use crate::interaction::Interaction;
use crate::layout::Rect;
use crate::style::{Color, Theme};

/// Response from a clickable widget.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WidgetResponse {
    /// Pressed and released over the widget this frame. Edge triggered.
    pub clicked: bool,
    /// Took pointer capture this frame.
    pub pressed: bool,
    /// Holds pointer capture.
    pub active: bool,
    /// Under the pointer.
    pub hovered: bool,
    /// Rectangle the widget was laid out in.
    pub rect: Rect,
}

impl WidgetResponse {
    pub(crate) fn new(interaction: Interaction, rect: Rect) -> Self {
        Self {
            clicked: interaction.clicked,
            pressed: interaction.pressed,
            active: interaction.active,
            hovered: interaction.hovered,
            rect,
        }
    }
}

/// A value widget's result: the value after this frame plus whether it changed.
///
/// The caller owns the value and stores `value` back:
///
/// ```rust,ignore
/// volume = gui.slider(gen_id!(), volume, 0.0, 1.0, "Volume").value;
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Changed<T> {
    /// The value after this frame's interaction.
    pub value: T,
    /// True if the interaction changed the value this frame.
    pub changed: bool,
}

impl<T: PartialEq> Changed<T> {
    pub(crate) fn compare(before: &T, value: T) -> Self {
        let changed = *before != value;
        Self { value, changed }
    }

    pub(crate) const fn unchanged(value: T) -> Self {
        Self {
            value,
            changed: false,
        }
    }
}

/// Response from a text field.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EditResponse {
    /// The text changed this frame.
    pub changed: bool,
    /// The edit was committed this frame, by Enter or by losing focus.
    pub committed: bool,
    /// The field has keyboard focus after this frame.
    pub focused: bool,
    /// Rectangle the field was laid out in.
    pub rect: Rect,
}

/// How [`text`](crate::Gui::text) handles lines wider than the region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overflow {
    /// Single line; glyphs past the right edge are hidden.
    #[default]
    Clip,
    /// Word wrap at the region width.
    Wrap,
}

/// Face color of a clickable widget.
pub(crate) fn face_color(theme: &Theme, interaction: Interaction) -> Color {
    if interaction.active {
        theme.surface_active
    } else if interaction.hovered {
        theme.surface_hover
    } else {
        theme.surface
    }
}
