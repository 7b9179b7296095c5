//! # SGUI
//!
//! One import for the immediate-mode engine and its render backends, plus
//! the pieces a host needs around them.
//!
//! ```text
//! ┌──────────────┐   events    ┌───────────┐   commands   ┌──────────────┐
//! │ InputScript  │ ──────────▶ │  ui::Gui  │ ───────────▶ │   render::*  │
//! │ (or a window)│             │           │              │ batch / soft │
//! └──────────────┘             └───────────┘              └──────────────┘
//! ```
//!
//! - [`ui`] is the engine: identity, docking layout, interaction, widgets.
//! - [`render`] holds the batched GPU-ready backend and the software one.
//! - [`demo`] declares the reference form UI and runs it headlessly.
//! - [`script`] replays input timelines, from code or TOML.
//! - [`logging`] installs the log subscriber binaries use.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub use sgui_render as render;
pub use sgui_ui as ui;

pub mod demo;
pub mod logging;
pub mod script;

pub use demo::{declare_ui, run_headless, tour, DemoReport, DemoState, HeadlessOptions};
pub use script::{InputScript, ScriptStep};
pub use sgui_ui::{gen_id, Gui, GuiConfig, UiError, UiResult};
