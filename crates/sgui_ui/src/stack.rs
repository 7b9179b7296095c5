//! The geometry stack.
//!
//! Every open container, layout and scroll container is one [`LayoutFrame`].
//! Frames carve their rectangle out of the parent's remaining region (its
//! cursor) and give the space back as consumed when they are popped, so
//! siblings docked in declaration order never overlap.

use std::fmt;

use crate::error::{UiError, UiResult};
use crate::layout::{carve, Dock, Point, Rect};

/// What kind of push opened a frame. Pops must name the same kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameKind {
    /// Opened by `push_container`: clips its children.
    Container,
    /// Opened by `push_layout`: a docked child region, no clipping.
    Layout,
    /// Opened by `push_scroll_container`: clips to a viewport over a
    /// scrolled virtual content rectangle.
    Scroll,
}

impl fmt::Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Container => "container",
            Self::Layout => "layout",
            Self::Scroll => "scroll_container",
        })
    }
}

/// How a frame was carved from its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Placement {
    dock: Dock,
    /// `None` means auto: sized by the first child declared inside.
    extent: Option<f32>,
    margin: f32,
}

/// One open container on the geometry stack.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutFrame {
    kind: FrameKind,
    rect: Rect,
    cursor: Rect,
    clip: Rect,
    clips: bool,
    /// Rectangle an absolute frame takes up in its parent.
    footprint: Rect,
    used: Point,
    placement: Option<Placement>,
    measured: bool,
}

impl LayoutFrame {
    fn new(kind: FrameKind, rect: Rect, clip: Rect, clips: bool, placement: Option<Placement>) -> Self {
        Self {
            kind,
            rect,
            cursor: rect,
            clip,
            clips,
            footprint: rect,
            used: Point::ZERO,
            placement,
            measured: false,
        }
    }

    /// The kind of push that opened this frame.
    #[must_use]
    pub const fn kind(&self) -> FrameKind {
        self.kind
    }

    /// The frame's full rectangle.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    /// The region still free for docked children and widgets.
    #[must_use]
    pub const fn cursor(&self) -> Rect {
        self.cursor
    }

    /// The effective clip rectangle, already intersected with every ancestor.
    #[must_use]
    pub const fn clip(&self) -> Rect {
        self.clip
    }

    /// Extent occupied by children, measured from the frame's top-left corner.
    #[must_use]
    pub const fn used(&self) -> Point {
        self.used
    }

    fn occupy(&mut self, rect: Rect) {
        self.used.x = self.used.x.max(rect.right() - self.rect.x);
        self.used.y = self.used.y.max(rect.bottom() - self.rect.y);
    }

    /// Resolves an auto-sized frame from the first child's intrinsic size.
    fn measure(&mut self, width: f32, height: f32) {
        if self.measured {
            return;
        }
        self.measured = true;

        let Some(placement) = self.placement else {
            return;
        };
        if placement.extent.is_some() {
            return;
        }

        let rect = &mut self.rect;
        match placement.dock {
            Dock::Left => rect.width = width.clamp(0.0, rect.width),
            Dock::Right => {
                let right = rect.right();
                rect.width = width.clamp(0.0, rect.width);
                rect.x = right - rect.width;
            }
            Dock::Top => rect.height = height.clamp(0.0, rect.height),
            Dock::Bottom => {
                let bottom = rect.bottom();
                rect.height = height.clamp(0.0, rect.height);
                rect.y = bottom - rect.height;
            }
            Dock::Fill => return,
        }

        self.cursor = self.cursor.clip_to(&self.rect);
        if self.clips {
            self.clip = self.clip.clip_to(&self.rect);
        }
    }

    /// Space this frame takes from its parent, margin included.
    fn outer_extent(&self, placement: Placement) -> f32 {
        let outer = self.rect.expand(placement.margin);
        match placement.dock {
            Dock::Left | Dock::Right => outer.width,
            Dock::Top | Dock::Bottom => outer.height,
            Dock::Fill => f32::INFINITY,
        }
    }
}

/// Stack of open frames for the current UI frame.
#[derive(Debug, Default)]
pub struct GeometryStack {
    frames: Vec<LayoutFrame>,
}

impl GeometryStack {
    /// Creates an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self {
            frames: Vec::with_capacity(32),
        }
    }

    /// Drops every open frame.
    pub fn clear(&mut self) {
        self.frames.clear();
    }

    /// Number of open frames.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Returns true if no frame is open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// The innermost open frame.
    #[must_use]
    pub fn top(&self) -> Option<&LayoutFrame> {
        self.frames.last()
    }

    /// Opens a frame at an absolute rectangle, clipped to `viewport`.
    ///
    /// `rect` is the space children lay out in; for a scroll container it is
    /// the virtual content rectangle and `viewport` the visible part. Returns
    /// the effective clip (viewport intersected with the parent clip).
    pub fn push_absolute(&mut self, kind: FrameKind, rect: Rect, viewport: Rect) -> Rect {
        let clip = match self.frames.last() {
            Some(parent) => viewport.clip_to(&parent.clip),
            None => viewport,
        };
        let mut frame = LayoutFrame::new(kind, rect, clip, true, None);
        frame.footprint = viewport;
        self.frames.push(frame);
        clip
    }

    /// Opens a frame carved from the parent's remaining region.
    ///
    /// `extent` of `None` sizes the frame from its first child. `clips`
    /// narrows the clip rectangle to the frame. Returns the new frame's rect.
    ///
    /// # Errors
    ///
    /// [`UiError::NoOpenFrame`] if there is no parent to carve from.
    pub fn push_docked(
        &mut self,
        kind: FrameKind,
        dock: Dock,
        extent: Option<f32>,
        margin: f32,
        offset: Point,
        clips: bool,
    ) -> UiResult<Rect> {
        let parent = self.frames.last().ok_or(UiError::NoOpenFrame)?;
        let size = extent.unwrap_or_else(|| dock.available(parent.cursor));
        let (slot, _) = carve(parent.cursor, dock, size);
        let rect = slot.shrink(margin).translate(offset.x, offset.y);
        let clip = if clips { rect.clip_to(&parent.clip) } else { parent.clip };

        let placement = Placement { dock, extent, margin };
        self.frames
            .push(LayoutFrame::new(kind, rect, clip, clips, Some(placement)));
        Ok(rect)
    }

    /// Closes the innermost frame, which must be of `kind`.
    ///
    /// The parent's cursor gives up the space the frame resolved to.
    ///
    /// # Errors
    ///
    /// [`UiError::StackUnderflow`] on an empty stack and
    /// [`UiError::StackMismatch`] when the innermost frame is of another
    /// kind. The stack is left untouched in both cases.
    pub fn pop(&mut self, kind: FrameKind) -> UiResult<LayoutFrame> {
        let found = self
            .frames
            .last()
            .ok_or(UiError::StackUnderflow { expected: kind })?
            .kind;
        if found != kind {
            return Err(UiError::StackMismatch { expected: kind, found });
        }
        let frame = self
            .frames
            .pop()
            .ok_or(UiError::StackUnderflow { expected: kind })?;

        if let Some(parent) = self.frames.last_mut() {
            let outer = match frame.placement {
                Some(placement) => {
                    let extent = frame.outer_extent(placement);
                    parent.cursor = carve(parent.cursor, placement.dock, extent).1;
                    frame.rect.expand(placement.margin)
                }
                None => frame.footprint,
            };
            parent.measure(outer.width, outer.height);
            parent.occupy(outer);
        }
        Ok(frame)
    }

    /// Reports the intrinsic size of a widget declared in the innermost
    /// frame. Only the first report resolves an auto-sized frame.
    pub fn report_intrinsic(&mut self, width: f32, height: f32) {
        if let Some(top) = self.frames.last_mut() {
            top.measure(width, height);
        }
    }

    /// Records that `rect` is occupied inside the innermost frame.
    pub fn occupy(&mut self, rect: Rect) {
        if let Some(top) = self.frames.last_mut() {
            top.occupy(rect);
        }
    }
}
