//! Morphbot Runtime - Frame loop building blocks
//!
//! - `FrameClock` - paces frames with a fixed inter-frame delay
//! - `StepGate` - fires every Nth frame to pace the morph driver
//! - `InputState` - keyboard and mouse tracking with action bindings and a drag session

mod clock;
pub mod input;

pub use clock::{FrameClock, StepGate};
pub use input::InputState;
