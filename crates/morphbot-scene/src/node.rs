//! Scene nodes

use crate::geometry::Geometry;
use crate::joint::Joint;
use morphbot_core::{Color, Vec3};
use std::sync::atomic::{AtomicU64, Ordering};

/// Index of a node inside its [`SceneGraph`](crate::SceneGraph)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

static ROTATION_WRITES: AtomicU64 = AtomicU64::new(1);

/// Order of a rotation write. Later writes compare greater; 0 means never written.
pub(crate) fn next_rotation_stamp() -> u64 {
    ROTATION_WRITES.fetch_add(1, Ordering::Relaxed)
}

/// A single axis-angle rotation. An angle of zero applies no rotation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rotation {
    /// Angle in degrees
    pub angle: f32,
    pub axis: Vec3,
}

impl Rotation {
    pub const NONE: Self = Self {
        angle: 0.0,
        axis: Vec3::ZERO,
    };

    pub const fn new(angle: f32, axis: Vec3) -> Self {
        Self { angle, axis }
    }

    pub fn is_identity(&self) -> bool {
        self.angle == 0.0
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::NONE
    }
}

/// A positioned element of the scene tree
#[derive(Clone, Debug)]
pub struct Node {
    pub name: String,
    /// Offset applied before rotation, in the parent's frame
    pub translation: Vec3,
    /// Stored rotation. A joint, or a driving parent joint, overrides it
    /// whenever its angle was set more recently.
    pub rotation: Rotation,
    pub(crate) rotation_stamp: u64,
    /// When false, `draw` is skipped; children still render
    pub visible: bool,
    /// Solid fill (true) or outline only (false)
    pub fill: bool,
    /// Fill color, only used when `fill` is set
    pub color: Color,
    pub geometry: Geometry,
    pub joint: Option<Joint>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    /// A plain node with the given geometry
    pub fn new(name: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            name: name.into(),
            translation: Vec3::ZERO,
            rotation: Rotation::NONE,
            rotation_stamp: 0,
            visible: true,
            fill: true,
            color: Color::WHITE,
            geometry,
            joint: None,
            parent: None,
            children: Vec::new(),
        }
    }

    /// A group node with no geometry
    pub fn group(name: impl Into<String>) -> Self {
        Self::new(name, Geometry::None)
    }

    /// A joint pivot. Joints are hidden outline-only markers by default.
    pub fn joint(name: impl Into<String>, joint: Joint) -> Self {
        Self {
            visible: false,
            fill: false,
            joint: Some(joint),
            ..Self::new(name, Geometry::joint_marker())
        }
    }

    pub fn with_translation(mut self, x: f32, y: f32, z: f32) -> Self {
        self.translation = Vec3::new(x, y, z);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_joint(&self) -> bool {
        self.joint.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_node_defaults() {
        let node = Node::group("pivot");
        assert_eq!(node.name, "pivot");
        assert!(node.visible);
        assert!(node.fill);
        assert_eq!(node.color, Color::WHITE);
        assert!(node.rotation.is_identity());
        assert!(node.parent().is_none());
        assert!(node.children().is_empty());
    }

    #[test]
    fn test_joint_node_is_hidden_marker() {
        let node = Node::joint("hip", Joint::new((0.0, 60.0), Vec3::X));
        assert!(!node.visible);
        assert!(!node.fill);
        assert!(node.is_joint());
        assert!(matches!(node.geometry, Geometry::Sphere(_)));
    }
}
