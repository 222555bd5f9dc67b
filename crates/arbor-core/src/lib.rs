//! Core types and traits for the arbor terminal UI toolkit.
//!
//! Arbor turns a raw character stream into logical key events
//! ([`event::Decoder`]) and routes those events through an arena-backed tree
//! of widgets that own cursor state, focus, and invalidation ([`Window`]).

pub mod actions;
pub mod cursor;
pub mod error;
pub mod event;
mod focus;
pub mod geom;
pub mod node;
pub mod observers;
pub mod render;
pub mod tutils;
pub mod widget;
mod window;

pub use cursor::{Cursor, CursorShape};
pub use error::{Error, Result};
pub use geom::{Expanse, Line, Point, Rect};
pub use node::NodeId;
pub use observers::ObserverId;
pub use render::{Render, RenderBackend, Style};
pub use widget::{FocusDirection, KeyOutcome, Widget};
pub use window::{Window, WindowEvent};
