mod controls;
mod pointer;

pub use controls::{wire_carousel, wire_feedback, wire_modal, wire_trigger};
pub use pointer::wire_input;
