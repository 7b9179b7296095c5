//! Scroll containers.
//!
//! Children lay out in a virtual content rectangle shifted by the persisted
//! scroll offset and clipped to the viewport. Wheel and scrollbar input is
//! applied when the container is popped, after its children had their
//! chance at the pointer, and takes effect from the next frame on.

use crate::error::contract_violation;
use crate::gui::Gui;
use crate::id::WidgetId;
use crate::input::InputSource;
use crate::interaction::{Interaction, Sense};
use crate::layout::{Point, Rect};
use crate::render::Renderer;
use crate::stack::FrameKind;
use crate::style::{Color, Theme};

/// Vertical layout budget of a scroll container whose content height is
/// measured rather than given.
const AUTO_HEIGHT_BUDGET: f32 = 1.0e6;

/// Bookkeeping for an open scroll container, consumed by the matching pop.
#[derive(Debug, Clone, Copy)]
pub(crate) struct OpenScroll {
    id: WidgetId,
    viewport: Rect,
    inner: Rect,
    content: Option<Point>,
    vertical: bool,
    horizontal: bool,
}

/// Largest offset that still keeps the viewport inside the content.
fn max_offset(content: Point, inner: Rect) -> Point {
    Point::new(
        (content.x - inner.width).max(0.0),
        (content.y - inner.height).max(0.0),
    )
}

fn clamp_offset(offset: Point, max: Point) -> Point {
    Point::new(offset.x.clamp(0.0, max.x), offset.y.clamp(0.0, max.y))
}

/// Thumb position and length along a track.
fn thumb_span(track: f32, visible: f32, content: f32, offset: f32, min_thumb: f32) -> (f32, f32) {
    if content <= 0.0 || track <= 0.0 {
        return (0.0, track.max(0.0));
    }
    let length = (track * visible / content).clamp(min_thumb.min(track), track);
    let range = (content - visible).max(0.0);
    let start = if range > 0.0 {
        (track - length) * (offset / range)
    } else {
        0.0
    };
    (start, length)
}

fn thumb_fill(theme: &Theme, interaction: Interaction) -> Color {
    if interaction.active || interaction.hovered {
        theme.accent
    } else {
        theme.scroll_thumb
    }
}

impl<I: InputSource, R: Renderer> Gui<I, R> {
    /// Opens a scroll container with its viewport at an absolute rectangle.
    ///
    /// `content_width` of 0 uses the viewport width. `content_height` of 0
    /// uses the height the children occupied last frame; the children then
    /// lay out in an open-ended column, so size them with fixed docks.
    #[allow(clippy::too_many_arguments)]
    pub fn push_scroll_container(
        &mut self,
        id: WidgetId,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        content_width: f32,
        content_height: f32,
    ) {
        let viewport = Rect::new(x, y, width.max(0.0), height.max(0.0));
        let bar = self.metrics().scrollbar_width;
        let measured = self.states.scroll(id).measured;
        let content_height_known = if content_height > 0.0 {
            content_height
        } else {
            measured.y
        };

        let mut vertical = content_height_known > viewport.height;
        let content_width_known = if content_width > 0.0 {
            content_width
        } else {
            viewport.width - if vertical { bar } else { 0.0 }
        };
        let horizontal = content_width_known > viewport.width - if vertical { bar } else { 0.0 };
        vertical = vertical || (horizontal && content_height_known > viewport.height - bar);

        let inner = Rect::new(
            viewport.x,
            viewport.y,
            (viewport.width - if vertical { bar } else { 0.0 }).max(0.0),
            (viewport.height - if horizontal { bar } else { 0.0 }).max(0.0),
        );
        let content_width_known = if content_width > 0.0 {
            content_width
        } else {
            inner.width
        };
        let content = Point::new(content_width_known, content_height_known);

        let state = self.states.scroll(id);
        state.offset = clamp_offset(state.offset, max_offset(content, inner));
        let offset = state.offset;

        let layout_height = if content_height > 0.0 {
            content_height.max(inner.height)
        } else {
            AUTO_HEIGHT_BUDGET
        };
        let content_rect = Rect::new(
            inner.x - offset.x,
            inner.y - offset.y,
            content_width_known.max(inner.width),
            layout_height,
        );

        let clip = self
            .stack
            .push_absolute(FrameKind::Scroll, content_rect, inner);
        self.commands.push_clip(clip);
        let background = self.theme().background;
        self.commands.fill(inner, background);

        self.scrolls.push(OpenScroll {
            id,
            viewport,
            inner,
            content: (content_height > 0.0).then_some(content),
            vertical,
            horizontal,
        });
    }

    /// Closes the innermost scroll container and applies wheel and
    /// scrollbar input to its offset.
    pub fn pop_scroll_container(&mut self) {
        let frame = match self.stack.pop(FrameKind::Scroll) {
            Ok(frame) => frame,
            Err(err) => {
                contract_violation(&err);
                return;
            }
        };
        self.commands.pop_clip();
        let Some(open) = self.scrolls.pop() else {
            return;
        };

        let used = frame.used();
        let content = open.content.unwrap_or_else(|| {
            Point::new(open.inner.width, used.y.min(AUTO_HEIGHT_BUDGET))
        });
        let max = max_offset(content, open.inner);
        let parent_clip = self.current_clip().unwrap_or(open.viewport);

        let metrics = self.metrics();
        let (bar, min_thumb, wheel_step) = (metrics.scrollbar_width, metrics.min_thumb, metrics.wheel_step);
        let mut offset = self.states.scroll(open.id).offset;

        let input = &self.frame_input;
        let over = open.inner.clip_to(&parent_clip).contains_point(input.pointer);
        let wheel = input.wheel;
        if over && !self.wheel_consumed && !self.interaction.any_popup_open() {
            let before = offset;
            offset.y -= wheel.y * wheel_step;
            offset.x -= wheel.x * wheel_step;
            offset = clamp_offset(offset, max);
            self.wheel_consumed = offset != before;
        }

        let delta = input.pointer_delta();
        if open.vertical {
            let track = Rect::new(open.inner.right(), open.viewport.y, bar, open.inner.height);
            let (start, length) = thumb_span(track.height, open.inner.height, content.y, offset.y, min_thumb);
            let thumb = Rect::new(track.x, track.y + start, bar, length);
            let interaction = self.interact(open.id.child(0), thumb.clip_to(&parent_clip), Sense::CLICK);
            let travel = track.height - length;
            if interaction.active && travel > 0.0 {
                offset.y += delta.y * max.y / travel;
            }
            let theme = self.theme();
            let (track_color, thumb_color) = (theme.scroll_track, thumb_fill(theme, interaction));
            self.commands.fill(track, track_color);
            self.commands.fill(thumb, thumb_color);
        }
        if open.horizontal {
            let track = Rect::new(open.viewport.x, open.inner.bottom(), open.inner.width, bar);
            let (start, length) = thumb_span(track.width, open.inner.width, content.x, offset.x, min_thumb);
            let thumb = Rect::new(track.x + start, track.y, length, bar);
            let interaction = self.interact(open.id.child(1), thumb.clip_to(&parent_clip), Sense::CLICK);
            let travel = track.width - length;
            if interaction.active && travel > 0.0 {
                offset.x += delta.x * max.x / travel;
            }
            let theme = self.theme();
            let (track_color, thumb_color) = (theme.scroll_track, thumb_fill(theme, interaction));
            self.commands.fill(track, track_color);
            self.commands.fill(thumb, thumb_color);
        }
        let border = self.theme().border;
        self.commands.stroke(open.viewport, border);

        let state = self.states.scroll(open.id);
        state.offset = clamp_offset(offset, max);
        state.measured = Point::new(used.x, used.y.min(AUTO_HEIGHT_BUDGET));
    }

    /// Current offset of a scroll container.
    #[must_use]
    pub fn scroll_offset(&self, id: WidgetId) -> Point {
        self.states.get_scroll(id).map_or(Point::ZERO, |state| state.offset)
    }

    /// Sets a scroll container's offset. Clamped when the container is next
    /// declared.
    pub fn set_scroll_offset(&mut self, id: WidgetId, offset: Point) {
        self.states.scroll(id).offset = offset;
    }
}
