//! Morphbot Scene - hierarchical scene graph with articulated joints
//!
//! Nodes live in a [`SceneGraph`] arena and are addressed by [`NodeId`].
//! Every node carries a parent-relative translation and axis-angle rotation,
//! a [`Geometry`] variant that knows how to draw itself, and optionally a
//! [`Joint`] that constrains its rotation and drives its direct children.
//!
//! Rendering walks the tree depth-first through the [`Canvas`] capability,
//! pushing and popping the accumulated transform around every subtree.

mod canvas;
mod geometry;
mod graph;
mod joint;
mod node;

pub use canvas::{Canvas, DrawList, DrawVertex, MatrixStack, RenderStyle};
pub use geometry::{Cube, Cylinder, Drawable, Geometry, ShapePaint, Sphere, Wheel};
pub use graph::SceneGraph;
pub use joint::{Joint, Preset, STEP_COUNT};
pub use node::{Node, NodeId, Rotation};
