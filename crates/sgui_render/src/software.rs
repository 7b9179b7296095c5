//! Software rasterizer.
//!
//! Draws straight into an RGBA8 framebuffer with source-over blending.
//! Coordinates are rounded to whole pixels; a rectangle covers the pixels
//! `[x, x + width) × [y, y + height)`. Image sampling is nearest-neighbour.

use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

use sgui_ui::{Color, Command, Point, Rect, Renderer, TextureId, UiResult};

use crate::error::{validate_texture, RenderResult};

/// Pixel rectangle with exclusive right and bottom edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PixelRect {
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
}

impl PixelRect {
    #[allow(clippy::cast_possible_truncation)]
    fn from_rect(rect: Rect) -> Self {
        Self {
            x0: rect.x.round() as i32,
            y0: rect.y.round() as i32,
            x1: rect.right().round() as i32,
            y1: rect.bottom().round() as i32,
        }
    }

    fn intersect(self, other: Self) -> Self {
        Self {
            x0: self.x0.max(other.x0),
            y0: self.y0.max(other.y0),
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
        }
    }

    const fn contains(self, x: i32, y: i32) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }
}

#[derive(Debug, Clone)]
struct Texture {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Texture {
    fn texel(&self, x: u32, y: u32) -> [u8; 4] {
        let x = x.min(self.width - 1) as usize;
        let y = y.min(self.height - 1) as usize;
        let at = (y * self.width as usize + x) * 4;
        [
            self.pixels[at],
            self.pixels[at + 1],
            self.pixels[at + 2],
            self.pixels[at + 3],
        ]
    }
}

/// Renderer that rasterizes into memory.
#[derive(Debug)]
pub struct SoftwareRenderer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    textures: HashMap<TextureId, Texture>,
    next_texture: u64,
    clip_stack: Vec<PixelRect>,
    clear_color: Color,
    frames: u64,
}

impl SoftwareRenderer {
    /// Creates a framebuffer of the given size cleared to black.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let mut renderer = Self {
            width: 0,
            height: 0,
            pixels: Vec::new(),
            textures: HashMap::new(),
            next_texture: 1,
            clip_stack: Vec::with_capacity(16),
            clear_color: Color::BLACK,
            frames: 0,
        };
        renderer.resize(width, height);
        renderer
    }

    /// Sets the color each frame starts from.
    #[must_use]
    pub const fn with_clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    /// Sets the color each frame starts from.
    pub fn set_clear_color(&mut self, color: Color) {
        self.clear_color = color;
    }

    /// Resizes the framebuffer, discarding its contents.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == self.width && height == self.height {
            return;
        }
        tracing::debug!(width, height, "framebuffer resized");
        self.width = width;
        self.height = height;
        self.pixels = vec![0; width as usize * height as usize * 4];
    }

    /// Framebuffer width.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Framebuffer height.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 framebuffer, row-major.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Number of frames rendered.
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// The pixel at `(x, y)`, or `None` outside the framebuffer.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let at = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.pixels[at],
            self.pixels[at + 1],
            self.pixels[at + 2],
            self.pixels[at + 3],
        ])
    }

    /// Registers an RGBA8 texture.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer does not match the dimensions.
    pub fn register_texture(&mut self, pixels: &[u8], width: u32, height: u32) -> RenderResult<TextureId> {
        validate_texture(pixels, width, height)?;
        let id = TextureId(self.next_texture);
        self.next_texture += 1;
        self.textures.insert(
            id,
            Texture {
                width,
                height,
                pixels: pixels.to_vec(),
            },
        );
        Ok(id)
    }

    /// Fills the whole framebuffer with one color.
    pub fn clear(&mut self, color: Color) {
        let bytes = color.to_bytes();
        for pixel in self.pixels.chunks_exact_mut(4) {
            pixel.copy_from_slice(&bytes);
        }
    }

    /// Executes commands on top of the current framebuffer contents.
    pub fn rasterize(&mut self, commands: &[Command]) {
        self.clip_stack.clear();
        for command in commands {
            match *command {
                Command::DrawLine { from, to, color } => self.line(from, to, color),
                Command::DrawRect { rect, color } => self.stroke(rect, color),
                Command::FillRect { rect, color } => self.fill(rect, color),
                Command::DrawImage {
                    texture,
                    src,
                    dst,
                    color,
                } => self.image(texture, src, dst, color),
                Command::SetClip { rect } => {
                    let clip = PixelRect::from_rect(rect).intersect(self.clip());
                    self.clip_stack.push(clip);
                }
                Command::UnsetClip => {
                    self.clip_stack.pop();
                }
            }
        }
    }

    #[allow(clippy::cast_possible_wrap)]
    fn clip(&self) -> PixelRect {
        let screen = PixelRect {
            x0: 0,
            y0: 0,
            x1: self.width as i32,
            y1: self.height as i32,
        };
        self.clip_stack.last().map_or(screen, |clip| clip.intersect(screen))
    }

    #[allow(clippy::cast_sign_loss)]
    fn blend(&mut self, x: i32, y: i32, src: [f32; 4], clip: PixelRect) {
        if !clip.contains(x, y) {
            return;
        }
        let at = (y as usize * self.width as usize + x as usize) * 4;
        let alpha = src[3].clamp(0.0, 1.0);
        let pixel = &mut self.pixels[at..at + 4];
        for channel in 0..3 {
            let dst = f32::from(pixel[channel]) / 255.0;
            let out = src[channel].clamp(0.0, 1.0) * alpha + dst * (1.0 - alpha);
            pixel[channel] = to_byte(out);
        }
        let dst_alpha = f32::from(pixel[3]) / 255.0;
        pixel[3] = to_byte(alpha + dst_alpha * (1.0 - alpha));
    }

    #[allow(clippy::cast_possible_truncation)]
    fn line(&mut self, from: Point, to: Point, color: Color) {
        let clip = self.clip();
        let rgba = color.to_array();
        let (mut x, mut y) = (from.x.floor() as i32, from.y.floor() as i32);
        let (x1, y1) = (to.x.floor() as i32, to.y.floor() as i32);
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.blend(x, y, rgba, clip);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn fill(&mut self, rect: Rect, color: Color) {
        let area = PixelRect::from_rect(rect).intersect(self.clip());
        let rgba = color.to_array();
        for y in area.y0..area.y1 {
            for x in area.x0..area.x1 {
                self.blend(x, y, rgba, area);
            }
        }
    }

    fn stroke(&mut self, rect: Rect, color: Color) {
        let outline = PixelRect::from_rect(rect);
        if outline.x1 <= outline.x0 || outline.y1 <= outline.y0 {
            return;
        }
        let clip = self.clip();
        let rgba = color.to_array();
        let (right, bottom) = (outline.x1 - 1, outline.y1 - 1);
        for x in outline.x0..outline.x1 {
            self.blend(x, outline.y0, rgba, clip);
            if bottom != outline.y0 {
                self.blend(x, bottom, rgba, clip);
            }
        }
        for y in outline.y0 + 1..bottom {
            self.blend(outline.x0, y, rgba, clip);
            if right != outline.x0 {
                self.blend(right, y, rgba, clip);
            }
        }
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn image(&mut self, id: TextureId, src: Rect, dst: Rect, color: Color) {
        if dst.width <= 0.0 || dst.height <= 0.0 {
            return;
        }
        // Taken out of the map for the duration so blending can borrow self.
        let Some(texture) = self.textures.remove(&id) else {
            tracing::debug!(texture = id.0, "image with unknown texture skipped");
            return;
        };
        let area = PixelRect::from_rect(dst).intersect(self.clip());
        let tint = color.to_array();
        let (scale_x, scale_y) = (src.width / dst.width, src.height / dst.height);
        for y in area.y0..area.y1 {
            let ty = (src.y + (y as f32 + 0.5 - dst.y) * scale_y).max(0.0) as u32;
            for x in area.x0..area.x1 {
                let tx = (src.x + (x as f32 + 0.5 - dst.x) * scale_x).max(0.0) as u32;
                let texel = texture.texel(tx, ty);
                let rgba = [
                    f32::from(texel[0]) / 255.0 * tint[0],
                    f32::from(texel[1]) / 255.0 * tint[1],
                    f32::from(texel[2]) / 255.0 * tint[2],
                    f32::from(texel[3]) / 255.0 * tint[3],
                ];
                if rgba[3] > 0.0 {
                    self.blend(x, y, rgba, area);
                }
            }
        }
        self.textures.insert(id, texture);
    }

    /// Writes the framebuffer as a binary PPM (alpha dropped).
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn encode_ppm(&self, out: &mut impl Write) -> RenderResult<()> {
        write!(out, "P6\n{} {}\n255\n", self.width, self.height)?;
        let mut rgb = Vec::with_capacity(self.width as usize * self.height as usize * 3);
        for pixel in self.pixels.chunks_exact(4) {
            rgb.extend_from_slice(&pixel[..3]);
        }
        out.write_all(&rgb)?;
        Ok(())
    }

    /// Writes the framebuffer to a PPM file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn write_ppm(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        let path = path.as_ref();
        let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
        self.encode_ppm(&mut file)?;
        file.flush()?;
        tracing::info!(path = %path.display(), "framebuffer written");
        Ok(())
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_byte(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl Renderer for SoftwareRenderer {
    fn created(&mut self) {
        tracing::info!(width = self.width, height = self.height, "software renderer created");
    }

    fn destroyed(&mut self) {
        self.textures.clear();
        tracing::info!(frames = self.frames, "software renderer destroyed");
    }

    fn load_font(&mut self, pixels: &[u8], width: u32, height: u32) -> UiResult<TextureId> {
        Ok(self.register_texture(pixels, width, height)?)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn render(&mut self, commands: &[Command], viewport_width: f32, viewport_height: f32) {
        self.resize(
            viewport_width.max(0.0).round() as u32,
            viewport_height.max(0.0).round() as u32,
        );
        self.clear(self.clear_color);
        self.rasterize(commands);
        self.frames += 1;
    }
}
