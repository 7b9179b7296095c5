//! Monospace bitmap font atlas.
//!
//! The atlas is an RGBA8 image split into a 16x16 grid of equally sized
//! cells, one per code point 0-255 in row-major order. Code points outside
//! that range have no glyph and render blank.

use crate::error::{UiError, UiResult};
use crate::layout::Rect;

/// Glyph cells per atlas row and column.
pub const GRID: u32 = 16;

/// RGBA8 glyph atlas plus the metrics derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct FontAtlas {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    cell_width: u32,
    cell_height: u32,
}

impl FontAtlas {
    /// Wraps an RGBA8 atlas image.
    ///
    /// # Errors
    ///
    /// [`UiError::FontAtlasSize`] if `pixels` is not `width * height * 4`
    /// bytes, [`UiError::FontAtlasGrid`] if either dimension is not a
    /// non-zero multiple of 16.
    pub fn new(pixels: Vec<u8>, width: u32, height: u32) -> UiResult<Self> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(UiError::FontAtlasSize {
                expected,
                actual: pixels.len(),
            });
        }
        if width == 0 || height == 0 || width % GRID != 0 || height % GRID != 0 {
            return Err(UiError::FontAtlasGrid { width, height });
        }

        Ok(Self {
            pixels,
            width,
            height,
            cell_width: width / GRID,
            cell_height: height / GRID,
        })
    }

    /// A fully transparent atlas with the given cell size.
    ///
    /// Headless hosts and tests get correct metrics without any glyph art.
    #[must_use]
    pub fn blank(cell_width: u32, cell_height: u32) -> Self {
        let cell_width = cell_width.max(1);
        let cell_height = cell_height.max(1);
        let width = cell_width * GRID;
        let height = cell_height * GRID;
        Self {
            pixels: vec![0; width as usize * height as usize * 4],
            width,
            height,
            cell_width,
            cell_height,
        }
    }

    /// Raw RGBA8 pixels.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Atlas width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Atlas height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Horizontal advance of every glyph.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn advance(&self) -> f32 {
        self.cell_width as f32
    }

    /// Height of one text line.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn line_height(&self) -> f32 {
        self.cell_height as f32
    }

    /// Source rectangle of a glyph in atlas pixels, if the atlas has one.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn glyph_source(&self, ch: char) -> Option<Rect> {
        let code = u32::from(ch);
        if code >= GRID * GRID {
            return None;
        }
        let column = code % GRID;
        let row = code / GRID;
        Some(Rect::new(
            (column * self.cell_width) as f32,
            (row * self.cell_height) as f32,
            self.cell_width as f32,
            self.cell_height as f32,
        ))
    }

    /// Width of the widest line of `text`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn text_width(&self, text: &str) -> f32 {
        let widest = text.split('\n').map(|line| line.chars().count()).max().unwrap_or(0);
        widest as f32 * self.advance()
    }

    /// Character boundary nearest to `x`, measured from the start of `text`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn glyph_index_at(&self, text: &str, x: f32) -> usize {
        if x <= 0.0 || self.advance() <= 0.0 {
            return 0;
        }
        let index = (x / self.advance()).round() as usize;
        index.min(text.chars().count())
    }

    /// Greedy word wrap to `max_width`.
    ///
    /// Breaks at spaces, hard-breaks words longer than a line, and always
    /// starts a new line at `'\n'`. Every returned line fits `max_width`
    /// except when not even one glyph does, in which case lines hold one.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn wrap<'a>(&self, text: &'a str, max_width: f32) -> Vec<&'a str> {
        let max_chars = if self.advance() > 0.0 {
            ((max_width / self.advance()).floor() as usize).max(1)
        } else {
            usize::MAX
        };

        let mut lines = Vec::new();
        for paragraph in text.split('\n') {
            let mut rest = paragraph;
            loop {
                let Some((cut, _)) = rest.char_indices().nth(max_chars) else {
                    lines.push(rest);
                    break;
                };
                let (line, next) = if rest[cut..].starts_with(' ') {
                    (&rest[..cut], &rest[cut + 1..])
                } else {
                    match rest[..cut].rfind(' ') {
                        Some(space) if space > 0 => (&rest[..space], &rest[space + 1..]),
                        _ => (&rest[..cut], &rest[cut..]),
                    }
                };
                lines.push(line.trim_end_matches(' '));
                rest = next.trim_start_matches(' ');
                if rest.is_empty() {
                    break;
                }
            }
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn font() -> FontAtlas {
        FontAtlas::blank(8, 12)
    }

    #[test]
    fn test_rejects_bad_buffers() {
        assert!(matches!(
            FontAtlas::new(vec![0; 10], 16, 16),
            Err(UiError::FontAtlasSize { expected: 1024, actual: 10 })
        ));
        assert!(matches!(
            FontAtlas::new(vec![0; 20 * 16 * 4], 20, 16),
            Err(UiError::FontAtlasGrid { .. })
        ));
        assert!(FontAtlas::new(vec![0; 128 * 128 * 4], 128, 128).is_ok());
    }

    #[test]
    fn test_glyph_grid_lookup() {
        let font = font();
        assert_eq!(font.glyph_source('A'), Some(Rect::new(8.0, 48.0, 8.0, 12.0)));
        assert_eq!(font.glyph_source('\u{ff}'), Some(Rect::new(120.0, 180.0, 8.0, 12.0)));
        assert_eq!(font.glyph_source('€'), None);
    }

    #[test]
    fn test_metrics() {
        let font = font();
        assert_eq!(font.text_width("hello"), 40.0);
        assert_eq!(font.text_width("ab\nlonger"), 48.0);
        assert_eq!(font.line_height(), 12.0);
        assert_eq!(font.glyph_index_at("abc", 11.0), 1);
        assert_eq!(font.glyph_index_at("abc", 13.0), 2);
        assert_eq!(font.glyph_index_at("abc", 400.0), 3);
        assert_eq!(font.glyph_index_at("abc", -5.0), 0);
    }

    #[test]
    fn test_wrap_breaks_on_spaces() {
        let font = font();
        let lines = font.wrap("the quick brown fox", 80.0);
        assert_eq!(lines, vec!["the quick", "brown fox"]);
        for line in &lines {
            assert!(font.text_width(line) <= 80.0);
        }
    }

    #[test]
    fn test_wrap_hard_breaks_long_words_and_newlines() {
        let font = font();
        assert_eq!(font.wrap("abcdefgh", 24.0), vec!["abc", "def", "gh"]);
        assert_eq!(font.wrap("a\nb", 400.0), vec!["a", "b"]);
        assert_eq!(font.wrap("", 400.0), vec![""]);
    }
}
