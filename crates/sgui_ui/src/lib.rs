//! # SGUI UI Engine
//!
//! A small immediate-mode GUI: the application declares its whole interface
//! every frame as a sequence of calls, and the engine turns that sequence
//! into a flat list of draw commands.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        FRAME PIPELINE                        │
//! ├──────────────────────────────────────────────────────────────┤
//! │  InputSource → prepare → containers/layouts/widgets → finish │
//! │       ↓           ↓                 ↓                   ↓    │
//! │   events      pick hot      dock, interact, emit     Renderer│
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - Widgets are identified by a [`WidgetId`] derived from their call site,
//!   so no retained tree exists. [`gen_id!`] is the usual way to get one.
//! - Geometry comes from a stack of containers and docked layouts.
//! - Hot, active and focus are single global slots; one popup can be open.
//! - Base-layer commands render first, then the overlay layer on top.
//!
//! ```ignore
//! gui.prepare();
//! gui.push_container(0.0, 0.0, 320.0, 240.0);
//! gui.push_layout(0.0, 0.0, 0.0, 24.0, Dock::Top, 2.0);
//! if gui.button(gen_id!(), "Save").clicked {
//!     save();
//! }
//! gui.pop_layout();
//! gui.pop_container();
//! gui.finish(320.0, 240.0);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod font;
pub mod gui;
pub mod id;
pub mod input;
pub mod interaction;
pub mod layout;
pub mod render;
pub mod stack;
pub mod state;
pub mod style;
pub mod widget;

#[cfg(test)]
mod testing;

pub use config::GuiConfig;
pub use error::{UiError, UiResult};
pub use font::FontAtlas;
pub use gui::Gui;
pub use id::WidgetId;
pub use input::{
    BufferedInput, Clipboard, EventSender, InputEvent, InputSource, InputState, Key, ManualClock,
    MemoryClipboard, MouseButton,
};
pub use layout::{Dock, Point, Rect};
pub use render::{Command, CommandBuffer, Layer, RecordingRenderer, RenderLog, Renderer, TextureId};
pub use style::{Color, Metrics, Theme};
pub use widget::{Changed, EditResponse, Overflow, WidgetResponse, SEPARATOR};
