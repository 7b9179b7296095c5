//! # SGUI Render Backends
//!
//! Implementations of [`sgui_ui::Renderer`]:
//!
//! - [`BatchRenderer`] produces one vertex stream plus draw batches, the
//!   CPU half of a GPU backend. Upload [`BatchRenderer::as_bytes`], then
//!   issue one draw per [`DrawBatch`] with its scissor and texture.
//! - [`SoftwareRenderer`] rasterizes into an RGBA8 framebuffer and can dump
//!   it as PPM. It needs no GPU, which makes it the headless default.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod batch;
pub mod error;
pub mod software;
pub mod vertex;

pub use batch::{BatchRenderer, BatchStats, DrawBatch, Primitive, ScissorRect, DEFAULT_VERTEX_CAPACITY};
pub use error::{RenderError, RenderResult};
pub use software::SoftwareRenderer;
pub use vertex::{ortho, UIVertex};
