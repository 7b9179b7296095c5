//! The widget library.
//!
//! Every widget is a method on [`Gui`](crate::Gui) built from the same three
//! steps: allocate a rectangle from the geometry stack, run interaction for
//! its ID, and append draw commands. None of them keeps state of its own
//! beyond what the persistent state table holds for its ID.

mod button;
mod core;
mod edit;
mod list;
mod popup;
mod scroll;
mod slider;
mod text;
pub mod text_edit;
mod toggle;

pub use self::core::{Changed, EditResponse, Overflow, WidgetResponse};
pub use popup::SEPARATOR;
pub use text_edit::{EditFocus, TextEditState};

pub(crate) use self::core::face_color;
pub(crate) use scroll::OpenScroll;
