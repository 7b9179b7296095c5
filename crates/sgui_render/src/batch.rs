//! Batched vertex backend.
//!
//! Converts a frame's command list into one vertex stream and a list of
//! contiguous draw batches. A new batch starts whenever the primitive type,
//! the texture or the scissor rectangle changes, so a GPU backend issues one
//! draw call per batch and uploads the whole stream at once.
//!
//! Lines become line-list pairs, outlines four line segments, fills and
//! images two triangles each.

use std::collections::HashMap;

use sgui_ui::{Color, Command, Rect, Renderer, TextureId, UiResult};

use crate::error::{validate_texture, RenderResult};
use crate::vertex::{ortho, UIVertex};

/// Default vertex budget per frame.
pub const DEFAULT_VERTEX_CAPACITY: usize = 100_000;

/// How a batch's vertices are assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// Each pair of vertices is a line.
    Lines,
    /// Each triple of vertices is a triangle.
    Triangles,
}

/// Scissor rectangle in whole window pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScissorRect {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width.
    pub width: u32,
    /// Height.
    pub height: u32,
}

impl ScissorRect {
    /// Smallest pixel rectangle covering `rect`, limited to the viewport.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn covering(rect: Rect, viewport_width: f32, viewport_height: f32) -> Self {
        let x0 = rect.x.floor().clamp(0.0, viewport_width.max(0.0));
        let y0 = rect.y.floor().clamp(0.0, viewport_height.max(0.0));
        let x1 = rect.right().ceil().clamp(x0, viewport_width.max(x0));
        let y1 = rect.bottom().ceil().clamp(y0, viewport_height.max(y0));
        Self {
            x: x0 as u32,
            y: y0 as u32,
            width: (x1 - x0) as u32,
            height: (y1 - y0) as u32,
        }
    }

    /// Returns true if nothing can pass the scissor.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A contiguous vertex range drawn with one pipeline state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawBatch {
    /// Primitive type.
    pub primitive: Primitive,
    /// Texture to sample; `None` for solid color.
    pub texture: Option<TextureId>,
    /// Scissor rectangle.
    pub scissor: ScissorRect,
    /// Index of the first vertex.
    pub first_vertex: u32,
    /// Number of vertices.
    pub vertex_count: u32,
}

/// Counters for the last built frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    /// Commands processed.
    pub commands: u32,
    /// Batches produced, i.e. draw calls.
    pub batches: u32,
    /// Vertices emitted.
    pub vertices: u32,
    /// Vertices dropped because the frame hit the vertex budget.
    pub dropped_vertices: u32,
    /// Draw commands skipped because their scissor was empty.
    pub clipped_commands: u32,
}

#[derive(Debug, Clone, Copy)]
struct TextureInfo {
    width: u32,
    height: u32,
}

/// Renderer producing an upload-ready vertex stream.
#[derive(Debug)]
pub struct BatchRenderer {
    vertices: Vec<UIVertex>,
    batches: Vec<DrawBatch>,
    clip_stack: Vec<ScissorRect>,
    textures: HashMap<TextureId, TextureInfo>,
    next_texture: u64,
    capacity: usize,
    viewport: (f32, f32),
    stats: BatchStats,
    overflow_logged: bool,
}

impl BatchRenderer {
    /// Creates a renderer with the default vertex budget.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_VERTEX_CAPACITY)
    }

    /// Creates a renderer that emits at most `capacity` vertices per frame.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(capacity.min(DEFAULT_VERTEX_CAPACITY)),
            batches: Vec::with_capacity(64),
            clip_stack: Vec::with_capacity(16),
            textures: HashMap::new(),
            next_texture: 1,
            capacity,
            viewport: (0.0, 0.0),
            stats: BatchStats::default(),
            overflow_logged: false,
        }
    }

    /// Registers an RGBA8 texture and returns its handle.
    ///
    /// Only the size is kept; the pixels belong to whoever uploads them.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer does not match the dimensions.
    pub fn register_texture(&mut self, pixels: &[u8], width: u32, height: u32) -> RenderResult<TextureId> {
        validate_texture(pixels, width, height)?;
        let id = TextureId(self.next_texture);
        self.next_texture += 1;
        self.textures.insert(id, TextureInfo { width, height });
        tracing::debug!(texture = id.0, width, height, "texture registered");
        Ok(id)
    }

    /// Size of a registered texture.
    #[must_use]
    pub fn texture_size(&self, texture: TextureId) -> Option<(u32, u32)> {
        self.textures.get(&texture).map(|info| (info.width, info.height))
    }

    /// Builds vertices and batches for one frame, replacing the previous one.
    pub fn build(&mut self, commands: &[Command], viewport_width: f32, viewport_height: f32) {
        self.vertices.clear();
        self.batches.clear();
        self.clip_stack.clear();
        self.stats = BatchStats::default();
        self.overflow_logged = false;
        self.viewport = (viewport_width, viewport_height);

        let full = Rect::new(0.0, 0.0, viewport_width, viewport_height);
        self.clip_stack
            .push(ScissorRect::covering(full, viewport_width, viewport_height));

        for command in commands {
            self.stats.commands += 1;
            self.encode(command);
        }

        self.stats.batches = u32::try_from(self.batches.len()).unwrap_or(u32::MAX);
        self.stats.vertices = u32::try_from(self.vertices.len()).unwrap_or(u32::MAX);
        tracing::trace!(
            commands = self.stats.commands,
            batches = self.stats.batches,
            vertices = self.stats.vertices,
            "frame batched"
        );
    }

    fn encode(&mut self, command: &Command) {
        match *command {
            Command::SetClip { rect } => {
                let (w, h) = self.viewport;
                self.clip_stack.push(ScissorRect::covering(rect, w, h));
            }
            Command::UnsetClip => {
                if self.clip_stack.len() > 1 {
                    self.clip_stack.pop();
                }
            }
            Command::DrawLine { from, to, color } => {
                self.emit(
                    Primitive::Lines,
                    None,
                    &[
                        UIVertex::solid(from.x, from.y, color),
                        UIVertex::solid(to.x, to.y, color),
                    ],
                );
            }
            Command::DrawRect { rect, color } => {
                let (l, t, r, b) = (rect.x, rect.y, rect.right(), rect.bottom());
                let corner = |x: f32, y: f32| UIVertex::solid(x, y, color);
                self.emit(
                    Primitive::Lines,
                    None,
                    &[
                        corner(l, t),
                        corner(r, t),
                        corner(r, t),
                        corner(r, b),
                        corner(r, b),
                        corner(l, b),
                        corner(l, b),
                        corner(l, t),
                    ],
                );
            }
            Command::FillRect { rect, color } => {
                let corners = quad(rect, [0.0, 0.0, 0.0, 0.0], color);
                self.emit(Primitive::Triangles, None, &corners);
            }
            Command::DrawImage {
                texture,
                src,
                dst,
                color,
            } => {
                let Some(info) = self.textures.get(&texture).copied() else {
                    tracing::debug!(texture = texture.0, "image with unknown texture skipped");
                    return;
                };
                #[allow(clippy::cast_precision_loss)]
                let (tw, th) = (info.width as f32, info.height as f32);
                let uv = [src.x / tw, src.y / th, src.right() / tw, src.bottom() / th];
                let corners = quad(dst, uv, color);
                self.emit(Primitive::Triangles, Some(texture), &corners);
            }
        }
    }

    fn emit(&mut self, primitive: Primitive, texture: Option<TextureId>, vertices: &[UIVertex]) {
        let scissor = self.clip_stack.last().copied().unwrap_or_default();
        if scissor.is_empty() {
            self.stats.clipped_commands += 1;
            return;
        }

        let count = u32::try_from(vertices.len()).unwrap_or(u32::MAX);
        if self.vertices.len() + vertices.len() > self.capacity {
            self.stats.dropped_vertices += count;
            if !self.overflow_logged {
                self.overflow_logged = true;
                tracing::warn!(capacity = self.capacity, "vertex budget exceeded, dropping geometry");
            }
            return;
        }

        let first = u32::try_from(self.vertices.len()).unwrap_or(u32::MAX);
        self.vertices.extend_from_slice(vertices);
        match self.batches.last_mut() {
            Some(batch)
                if batch.primitive == primitive
                    && batch.texture == texture
                    && batch.scissor == scissor =>
            {
                batch.vertex_count += count;
            }
            _ => self.batches.push(DrawBatch {
                primitive,
                texture,
                scissor,
                first_vertex: first,
                vertex_count: count,
            }),
        }
    }

    /// Vertices of the last built frame.
    #[must_use]
    pub fn vertices(&self) -> &[UIVertex] {
        &self.vertices
    }

    /// Vertices as bytes for upload.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Batches of the last built frame.
    #[must_use]
    pub fn batches(&self) -> &[DrawBatch] {
        &self.batches
    }

    /// Counters of the last built frame.
    #[must_use]
    pub const fn stats(&self) -> BatchStats {
        self.stats
    }

    /// Projection for the last built frame's viewport.
    #[must_use]
    pub fn projection(&self) -> [[f32; 4]; 4] {
        ortho(self.viewport.0, self.viewport.1)
    }
}

impl Default for BatchRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn quad(rect: Rect, uv: [f32; 4], color: Color) -> [UIVertex; 6] {
    let c = color.to_array();
    let (l, t, r, b) = (rect.x, rect.y, rect.right(), rect.bottom());
    let [u0, v0, u1, v1] = uv;
    let tl = UIVertex::new(l, t, u0, v0, c);
    let tr = UIVertex::new(r, t, u1, v0, c);
    let br = UIVertex::new(r, b, u1, v1, c);
    let bl = UIVertex::new(l, b, u0, v1, c);
    [tl, tr, br, tl, br, bl]
}

impl Renderer for BatchRenderer {
    fn created(&mut self) {
        tracing::info!(capacity = self.capacity, "batch renderer created");
    }

    fn destroyed(&mut self) {
        self.textures.clear();
        self.vertices.clear();
        self.batches.clear();
        tracing::info!("batch renderer destroyed");
    }

    fn load_font(&mut self, pixels: &[u8], width: u32, height: u32) -> UiResult<TextureId> {
        Ok(self.register_texture(pixels, width, height)?)
    }

    fn render(&mut self, commands: &[Command], viewport_width: f32, viewport_height: f32) {
        self.build(commands, viewport_width, viewport_height);
    }
}
