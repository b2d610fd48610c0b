//! Node arena and depth-first rendering

use crate::canvas::{Canvas, RenderStyle};
use crate::geometry::{Drawable, ShapePaint};
use crate::joint::Joint;
use crate::node::{next_rotation_stamp, Node, NodeId, Rotation};
use morphbot_core::{Color, Vec3};
use std::fmt::Write;

/// Owns every node of a scene. Nodes are never removed.
#[derive(Clone, Debug, Default)]
pub struct SceneGraph {
    nodes: Vec<Node>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a detached node
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        tracing::trace!(name = %node.name, index = id.0, "added node");
        self.nodes.push(node);
        id
    }

    /// Append `child` to `parent`'s children and return `child`.
    ///
    /// A child attached elsewhere is detached from its previous parent first.
    /// Attaching to the same parent twice renders the child twice. An edge
    /// that would close a cycle is refused.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> NodeId {
        if self.is_ancestor_or_self(child, parent) {
            tracing::warn!(
                parent = %self.nodes[parent.0].name,
                child = %self.nodes[child.0].name,
                "refusing to attach a node under its own subtree"
            );
            return child;
        }

        if let Some(old) = self.nodes[child.0].parent {
            if old != parent {
                self.nodes[old.0].children.retain(|&c| c != child);
            }
        }

        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
        child
    }

    /// Create `node` and attach it under `parent` in one call
    pub fn attach(&mut self, parent: NodeId, node: Node) -> NodeId {
        let id = self.add_node(node);
        self.add_child(parent, id)
    }

    fn is_ancestor_or_self(&self, candidate: NodeId, mut id: NodeId) -> bool {
        loop {
            if id == candidate {
                return true;
            }
            match self.nodes[id.0].parent {
                Some(parent) => id = parent,
                None => return false,
            }
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn joint(&self, id: NodeId) -> Option<&Joint> {
        self.nodes[id.0].joint.as_ref()
    }

    pub fn joint_mut(&mut self, id: NodeId) -> Option<&mut Joint> {
        self.nodes[id.0].joint.as_mut()
    }

    /// First node with the given name, in insertion order
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.name == name).map(NodeId)
    }

    pub fn set_translation(&mut self, id: NodeId, x: f32, y: f32, z: f32) {
        self.nodes[id.0].translation = Vec3::new(x, y, z);
    }

    /// Store a rotation on `id`.
    ///
    /// It applies until a joint that would override it is set again: the node's
    /// own joint, or a joint parent.
    pub fn set_rotation(&mut self, id: NodeId, angle: f32, x: f32, y: f32, z: f32) {
        let node = &mut self.nodes[id.0];
        node.rotation = Rotation::new(angle, Vec3::new(x, y, z));
        node.rotation_stamp = next_rotation_stamp();
        if node.joint.is_some() {
            tracing::debug!(name = %node.name, "joint rotation overridden until its next set_angle");
        }
    }

    pub fn set_color(&mut self, id: NodeId, r: f32, g: f32, b: f32) {
        self.nodes[id.0].color = Color::rgb(r, g, b);
    }

    pub fn set_fill(&mut self, id: NodeId, fill: bool) {
        self.nodes[id.0].fill = fill;
    }

    pub fn set_visible(&mut self, id: NodeId, visible: bool) {
        self.nodes[id.0].visible = visible;
    }

    /// Rotation applied when rendering `id`.
    ///
    /// The most recent write wins. A joint starts out at its own `(angle, axis)`.
    /// A stored rotation set later replaces it. A parent joint whose angle was
    /// set after both replaces them with the parent's `(angle, axis)`, whether
    /// the child is a joint or not.
    pub fn effective_rotation(&self, id: NodeId) -> Rotation {
        let node = &self.nodes[id.0];
        let (own, own_stamp) = match &node.joint {
            Some(joint) if joint.set_stamp() >= node.rotation_stamp => {
                (joint.rotation(), joint.set_stamp())
            }
            _ => (node.rotation, node.rotation_stamp),
        };
        node.parent
            .and_then(|p| self.nodes[p.0].joint.as_ref())
            .filter(|parent| parent.set_stamp() > own_stamp)
            .map(Joint::rotation)
            .unwrap_or(own)
    }

    /// Render `id` and its subtree. The canvas transform is restored on return.
    pub fn render(&self, id: NodeId, canvas: &mut dyn Canvas, style: &RenderStyle) {
        let node = &self.nodes[id.0];
        canvas.push();

        canvas.translate(node.translation);
        let rotation = self.effective_rotation(id);
        if !rotation.is_identity() {
            canvas.rotate(rotation.angle, rotation.axis);
        }

        if node.visible {
            let paint = ShapePaint {
                fill: node.fill.then_some(node.color),
                outline: style.wireframe_color,
            };
            node.geometry.draw(canvas, &paint);
        }

        for &child in &node.children {
            self.render(child, canvas, style);
        }

        canvas.pop();
    }

    /// Indented dump of the subtree under `id`
    pub fn describe(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.describe_into(id, 0, &mut out);
        out
    }

    fn describe_into(&self, id: NodeId, depth: usize, out: &mut String) {
        let node = &self.nodes[id.0];
        let t = node.translation;
        let _ = write!(
            out,
            "{:indent$}{} [{}] at ({}, {}, {})",
            "",
            node.name,
            node.geometry.kind(),
            t.x,
            t.y,
            t.z,
            indent = depth * 2
        );
        if let Some(joint) = &node.joint {
            let axis = joint.axis();
            let _ = write!(
                out,
                " joint {}..{} about ({}, {}, {}) angle {} step {}",
                joint.min_angle(),
                joint.max_angle(),
                axis.x,
                axis.y,
                axis.z,
                joint.angle(),
                joint.step()
            );
        }
        out.push('\n');
        for &child in &node.children {
            self.describe_into(child, depth + 1, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawList, MatrixStack};
    use crate::geometry::{Cube, Geometry};
    use morphbot_core::Mat4;

    /// Records the transform seen at every draw call
    #[derive(Default)]
    struct RecordingCanvas {
        stack: MatrixStack,
        seen: Vec<Mat4>,
    }

    impl Canvas for RecordingCanvas {
        fn push(&mut self) {
            self.stack.push();
        }
        fn pop(&mut self) {
            self.stack.pop();
        }
        fn translate(&mut self, offset: Vec3) {
            self.stack.translate(offset);
        }
        fn rotate(&mut self, angle_degrees: f32, axis: Vec3) {
            self.stack.rotate(angle_degrees, axis);
        }
        fn transform(&self) -> Mat4 {
            *self.stack.current()
        }
        fn fill_triangles(&mut self, _vertices: &[Vec3], _color: Color) {}
        fn stroke_segments(&mut self, _vertices: &[Vec3], _color: Color) {
            self.seen.push(*self.stack.current());
        }
    }

    fn cube(name: &str) -> Node {
        Node::new(name, Geometry::Cube(Cube::new(Vec3::new(1.0, 1.0, 1.0))))
    }

    fn joint_with_children(count: usize) -> (SceneGraph, NodeId, Vec<NodeId>) {
        let mut graph = SceneGraph::new();
        let joint = graph.add_node(Node::joint("j", Joint::new((0.0, 60.0), Vec3::X)));
        let children = (0..count)
            .map(|i| graph.attach(joint, cube(&format!("c{}", i))))
            .collect();
        (graph, joint, children)
    }

    #[test]
    fn test_children_follow_driving_joint() {
        for count in [0, 1, 3] {
            let (mut graph, joint, children) = joint_with_children(count);
            graph.joint_mut(joint).unwrap().set_angle(30.0);

            let expected = Rotation::new(30.0, Vec3::X);
            assert_eq!(graph.effective_rotation(joint), expected);
            for child in children {
                assert_eq!(graph.effective_rotation(child), expected);
            }
        }
    }

    #[test]
    fn test_joint_child_follows_driving_joint() {
        let mut graph = SceneGraph::new();
        let outer = graph.add_node(Node::joint("outer", Joint::new((0.0, 60.0), Vec3::X)));
        let inner = graph.attach(outer, Node::joint("inner", Joint::new((10.0, 20.0), Vec3::Y)));
        assert_eq!(graph.effective_rotation(inner), Rotation::new(10.0, Vec3::Y));

        graph.joint_mut(outer).unwrap().set_angle(30.0);
        assert_eq!(graph.effective_rotation(inner), Rotation::new(30.0, Vec3::X));

        // The inner joint's own set takes over until the outer one moves again
        graph.joint_mut(inner).unwrap().set_angle(15.0);
        assert_eq!(graph.effective_rotation(inner), Rotation::new(15.0, Vec3::Y));
        graph.joint_mut(outer).unwrap().add_step();
        assert_eq!(graph.effective_rotation(inner), Rotation::new(3.0, Vec3::X));
    }

    #[test]
    fn test_stored_rotation_lasts_until_next_set_angle() {
        let (mut graph, joint, children) = joint_with_children(1);
        let child = children[0];
        graph.joint_mut(joint).unwrap().set_angle(30.0);

        graph.set_rotation(child, 5.0, 0.0, 0.0, 1.0);
        assert_eq!(graph.effective_rotation(child), Rotation::new(5.0, Vec3::Z));
        graph.set_rotation(joint, 7.0, 0.0, 1.0, 0.0);
        assert_eq!(graph.effective_rotation(joint), Rotation::new(7.0, Vec3::Y));

        graph.joint_mut(joint).unwrap().set_angle(40.0);
        let expected = Rotation::new(40.0, Vec3::X);
        assert_eq!(graph.effective_rotation(joint), expected);
        assert_eq!(graph.effective_rotation(child), expected);
    }

    #[test]
    fn test_idle_joint_keeps_child_rotation() {
        let mut graph = SceneGraph::new();
        let pelvis = graph.add_node(Node::joint("pelvis", Joint::new((90.0, 90.0), Vec3::Z)));
        let body = graph.attach(pelvis, cube("body"));

        assert_eq!(graph.effective_rotation(pelvis), Rotation::new(90.0, Vec3::Z));
        assert!(graph.effective_rotation(body).is_identity());

        graph.set_rotation(body, 10.0, 0.0, 1.0, 0.0);
        assert_eq!(graph.effective_rotation(body), Rotation::new(10.0, Vec3::Y));
    }

    #[test]
    fn test_render_restores_transform() {
        let (mut graph, joint, _) = joint_with_children(3);
        graph.set_translation(joint, 1.0, 2.0, 3.0);
        graph.joint_mut(joint).unwrap().set_angle(45.0);

        let mut canvas = RecordingCanvas::default();
        canvas.translate(Vec3::new(0.0, 0.0, -15.0));
        let before = canvas.transform();

        graph.render(joint, &mut canvas, &RenderStyle::default());
        assert_eq!(canvas.transform(), before);
        assert_eq!(canvas.stack.depth(), 0);
    }

    #[test]
    fn test_siblings_see_parent_transform() {
        let mut graph = SceneGraph::new();
        let root = graph.add_node(Node::group("root").with_translation(0.0, 1.0, 0.0));
        let a = graph.attach(root, cube("a").with_translation(5.0, 0.0, 0.0));
        let b = graph.attach(root, cube("b"));
        graph.set_rotation(a, 90.0, 0.0, 0.0, 1.0);

        let mut canvas = RecordingCanvas::default();
        graph.render(root, &mut canvas, &RenderStyle::default());

        // Each cube strokes 6 loops; the first stroke of b is at index 6
        assert_eq!(canvas.seen.len(), 12);
        let b_transform = canvas.seen[6];
        let mut expected = MatrixStack::new();
        expected.translate(Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(b_transform, *expected.current());
        assert_eq!(graph.node(b).parent(), Some(root));
    }

    #[test]
    fn test_invisible_node_still_renders_children() {
        let mut graph = SceneGraph::new();
        let root = graph.add_node(cube("hidden"));
        graph.set_visible(root, false);
        graph.attach(root, cube("shown"));

        let mut list = DrawList::new();
        graph.render(root, &mut list, &RenderStyle::default());
        assert_eq!(list.lines().len(), 48);
    }

    #[test]
    fn test_fill_flag_controls_faces() {
        let mut graph = SceneGraph::new();
        let root = graph.add_node(cube("box"));
        let style = RenderStyle {
            wireframe_color: Color::RED,
        };

        let mut list = DrawList::new();
        graph.render(root, &mut list, &style);
        assert_eq!(list.triangles().len(), 36);
        assert!(list.lines().iter().all(|v| v.color == Color::RED.to_array()));

        graph.set_fill(root, false);
        list.clear();
        graph.render(root, &mut list, &style);
        assert!(list.triangles().is_empty());
        assert_eq!(list.lines().len(), 48);
    }

    #[test]
    fn test_duplicate_add_renders_twice() {
        let mut graph = SceneGraph::new();
        let root = graph.add_node(Node::group("root"));
        let leaf = graph.add_node(cube("leaf"));
        graph.add_child(root, leaf);
        graph.add_child(root, leaf);
        assert_eq!(graph.node(root).children(), &[leaf, leaf]);

        let mut list = DrawList::new();
        graph.render(root, &mut list, &RenderStyle::default());
        assert_eq!(list.lines().len(), 96);
    }

    #[test]
    fn test_reparent_last_call_wins() {
        let mut graph = SceneGraph::new();
        let a = graph.add_node(Node::group("a"));
        let b = graph.add_node(Node::group("b"));
        let leaf = graph.add_node(cube("leaf"));

        assert_eq!(graph.add_child(a, leaf), leaf);
        graph.add_child(b, leaf);

        assert!(graph.node(a).children().is_empty());
        assert_eq!(graph.node(b).children(), &[leaf]);
        assert_eq!(graph.node(leaf).parent(), Some(b));
    }

    #[test]
    fn test_cycle_is_refused() {
        let mut graph = SceneGraph::new();
        let a = graph.add_node(Node::group("a"));
        let b = graph.attach(a, Node::group("b"));
        graph.add_child(b, a);
        graph.add_child(a, a);

        assert!(graph.node(a).parent().is_none());
        assert_eq!(graph.node(a).children(), &[b]);
    }

    #[test]
    fn test_find_and_describe() {
        let (graph, joint, children) = joint_with_children(2);
        assert_eq!(graph.find("c1"), Some(children[1]));
        assert_eq!(graph.find("missing"), None);

        let text = graph.describe(joint);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("j [sphere]"));
        assert!(lines[0].contains("joint 0..60"));
        assert!(lines[1].starts_with("  c0 [cube]"));
    }
}
