//! Morphbot Robot - the articulated model and its morph driver
//!
//! [`Robot`] owns a fixed scene graph (body, head, arms, legs on a pelvis,
//! wheels and a tail) and drives six controlling joints between the
//! dinosaur and car presets in lockstep.

mod robot;
mod topology;

pub use morphbot_scene::Preset;
pub use robot::{JointControl, Robot, WIREFRAME_ONLY_COLOR};
pub use topology::Parts;
