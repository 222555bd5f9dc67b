//! Concrete widgets for the arbor toolkit.

mod button;
mod input;
mod label;
mod panel;

pub use button::Button;
pub use input::{Input, TextBuf};
pub use label::Label;
pub use panel::{Orientation, Panel};
