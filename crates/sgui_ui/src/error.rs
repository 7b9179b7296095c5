//! # Engine Error Types
//!
//! All errors that can occur inside the engine, plus the single policy
//! function for caller-contract violations.

use thiserror::Error;

use crate::stack::FrameKind;

/// Errors that can occur in the engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UiError {
    /// A pop was issued with no open frame on the stack.
    #[error("pop_{expected} called with an empty layout stack")]
    StackUnderflow {
        /// The kind of frame the caller tried to pop.
        expected: FrameKind,
    },

    /// A pop did not match the kind of the innermost open frame.
    #[error("pop_{expected} called but the innermost open frame is a {found}")]
    StackMismatch {
        /// The kind of frame the caller tried to pop.
        expected: FrameKind,
        /// The kind of frame actually on top of the stack.
        found: FrameKind,
    },

    /// `finish()` was reached with frames still open.
    #[error("frame finished with {depth} unclosed container/layout frame(s)")]
    UnbalancedFrame {
        /// Number of frames left open.
        depth: usize,
    },

    /// A widget or layout was declared outside of any container.
    #[error("widget or layout declared outside of any container")]
    NoOpenFrame,

    /// An edit operation was applied to a text field without focus.
    #[error("text edit operation applied to an unfocused field")]
    EditWithoutFocus,

    /// The font atlas pixel buffer does not match its declared size.
    #[error("font atlas expects {expected} bytes of RGBA8 data, got {actual}")]
    FontAtlasSize {
        /// Byte count implied by width * height * 4.
        expected: usize,
        /// Byte count supplied.
        actual: usize,
    },

    /// The font atlas is not divisible into a 16x16 glyph grid.
    #[error("font atlas {width}x{height} is not divisible into a 16x16 glyph grid")]
    FontAtlasGrid {
        /// Atlas width in pixels.
        width: u32,
        /// Atlas height in pixels.
        height: u32,
    },

    /// Invalid configuration file.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O failure while reading configuration.
    #[error("i/o error: {0}")]
    Io(String),

    /// A render backend failed to create a resource.
    #[error("render resource failure: {0}")]
    Resource(String),
}

/// Result type for engine operations.
pub type UiResult<T> = Result<T, UiError>;

impl From<std::io::Error> for UiError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<toml::de::Error> for UiError {
    fn from(err: toml::de::Error) -> Self {
        Self::InvalidConfig(err.to_string())
    }
}

/// Reports a caller-contract violation.
///
/// Debug builds fail fast. Release builds log and let the caller turn the
/// offending call into a no-op, leaving engine state untouched.
#[track_caller]
pub(crate) fn contract_violation(err: &UiError) {
    tracing::error!(error = %err, location = %std::panic::Location::caller(), "caller contract violated");
    if cfg!(debug_assertions) {
        panic!("{err}");
    }
}
