//! Backend errors.

use sgui_ui::UiError;
use thiserror::Error;

/// Errors raised by the render backends.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// A texture has a zero dimension.
    #[error("texture has zero size ({width}x{height})")]
    EmptyTexture {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },

    /// Pixel buffer length does not match the texture dimensions.
    #[error("texture {width}x{height} needs {expected} RGBA8 bytes, got {actual}")]
    TextureSize {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
        /// Bytes required.
        expected: usize,
        /// Bytes supplied.
        actual: usize,
    },

    /// Writing an image failed.
    #[error("image write failed: {0}")]
    Io(String),
}

/// Result type for backend operations.
pub type RenderResult<T> = Result<T, RenderError>;

impl From<std::io::Error> for RenderError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<RenderError> for UiError {
    fn from(err: RenderError) -> Self {
        Self::Resource(err.to_string())
    }
}

/// Checks an RGBA8 buffer against its dimensions.
pub(crate) fn validate_texture(pixels: &[u8], width: u32, height: u32) -> RenderResult<()> {
    if width == 0 || height == 0 {
        return Err(RenderError::EmptyTexture { width, height });
    }
    let expected = width as usize * height as usize * 4;
    if pixels.len() != expected {
        return Err(RenderError::TextureSize {
            width,
            height,
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}
