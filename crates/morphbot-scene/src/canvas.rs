//! Drawing surface for the render pass
//!
//! [`Canvas`] is the immediate-mode capability that scene nodes draw through:
//! a push/pop transform stack plus two primitive sinks (filled triangles and
//! line segments). [`DrawList`] is the implementation used by the viewer; it
//! bakes the current transform into every vertex so the GPU side only needs a
//! single view-projection matrix per frame.

use morphbot_core::math::{self, Mat4};
use morphbot_core::{Color, Vec3};

/// Style shared by every shape during one render pass
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderStyle {
    /// Color of the outline drawn around every shape
    pub wireframe_color: Color,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            wireframe_color: Color::BLACK,
        }
    }
}

/// An immediate-mode drawing target with a transform stack
pub trait Canvas {
    /// Save the current transform
    fn push(&mut self);
    /// Restore the most recently saved transform
    fn pop(&mut self);
    /// Post-multiply the current transform by a translation
    fn translate(&mut self, offset: Vec3);
    /// Post-multiply the current transform by an axis-angle rotation (degrees)
    fn rotate(&mut self, angle_degrees: f32, axis: Vec3);
    /// The current accumulated transform
    fn transform(&self) -> Mat4;
    /// Emit a triangle list (three vertices per triangle) in local space
    fn fill_triangles(&mut self, vertices: &[Vec3], color: Color);
    /// Emit a line list (two vertices per segment) in local space
    fn stroke_segments(&mut self, vertices: &[Vec3], color: Color);

    /// Fill a convex polygon as a triangle fan
    fn fill_polygon(&mut self, points: &[Vec3], color: Color) {
        if points.len() < 3 {
            return;
        }
        let mut triangles = Vec::with_capacity((points.len() - 2) * 3);
        for i in 1..points.len() - 1 {
            triangles.extend_from_slice(&[points[0], points[i], points[i + 1]]);
        }
        self.fill_triangles(&triangles, color);
    }

    /// Fill a strip of quads given as alternating edge pairs
    fn fill_quad_strip(&mut self, points: &[Vec3], color: Color) {
        if points.len() < 4 {
            return;
        }
        let mut triangles = Vec::with_capacity((points.len() / 2 - 1) * 6);
        for pair in 0..points.len() / 2 - 1 {
            let (a, b, c, d) = (
                points[pair * 2],
                points[pair * 2 + 1],
                points[pair * 2 + 3],
                points[pair * 2 + 2],
            );
            triangles.extend_from_slice(&[a, b, c, a, c, d]);
        }
        self.fill_triangles(&triangles, color);
    }

    /// Stroke a closed loop through `points`
    fn stroke_loop(&mut self, points: &[Vec3], color: Color) {
        if points.len() < 2 {
            return;
        }
        let mut segments = Vec::with_capacity(points.len() * 2);
        for i in 0..points.len() {
            segments.push(points[i]);
            segments.push(points[(i + 1) % points.len()]);
        }
        self.stroke_segments(&segments, color);
    }
}

/// Push/pop stack of accumulated transforms
#[derive(Clone, Debug)]
pub struct MatrixStack {
    current: Mat4,
    saved: Vec<Mat4>,
}

impl Default for MatrixStack {
    fn default() -> Self {
        Self::new()
    }
}

impl MatrixStack {
    pub fn new() -> Self {
        Self::with_base(math::IDENTITY)
    }

    /// Start from a base transform (e.g. a model offset)
    pub fn with_base(base: Mat4) -> Self {
        Self {
            current: base,
            saved: Vec::new(),
        }
    }

    pub fn current(&self) -> &Mat4 {
        &self.current
    }

    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn push(&mut self) {
        self.saved.push(self.current);
    }

    /// Restore the last pushed transform. Popping an empty stack is ignored.
    pub fn pop(&mut self) {
        match self.saved.pop() {
            Some(m) => self.current = m,
            None => tracing::warn!("matrix stack underflow"),
        }
    }

    pub fn translate(&mut self, offset: Vec3) {
        self.current = math::mat4_mul(&self.current, &math::translation(offset));
    }

    pub fn rotate(&mut self, angle_degrees: f32, axis: Vec3) {
        self.current = math::mat4_mul(&self.current, &math::axis_angle(angle_degrees, axis));
    }

    pub fn apply(&self, p: Vec3) -> Vec3 {
        math::transform_point(&self.current, p)
    }
}

/// A world-space vertex ready for upload
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

/// Canvas that records transformed geometry for one frame
#[derive(Debug, Default)]
pub struct DrawList {
    stack: MatrixStack,
    triangles: Vec<DrawVertex>,
    lines: Vec<DrawVertex>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all recorded geometry and reset the transform, keeping allocations
    pub fn clear(&mut self) {
        self.stack = MatrixStack::new();
        self.triangles.clear();
        self.lines.clear();
    }

    /// Triangle-list vertices
    pub fn triangles(&self) -> &[DrawVertex] {
        &self.triangles
    }

    /// Line-list vertices
    pub fn lines(&self) -> &[DrawVertex] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty() && self.lines.is_empty()
    }

    fn record(stack: &MatrixStack, out: &mut Vec<DrawVertex>, vertices: &[Vec3], color: Color) {
        let color = color.to_array();
        out.extend(vertices.iter().map(|&v| DrawVertex {
            position: stack.apply(v).to_array(),
            color,
        }));
    }
}

impl Canvas for DrawList {
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

    fn fill_triangles(&mut self, vertices: &[Vec3], color: Color) {
        Self::record(&self.stack, &mut self.triangles, vertices, color);
    }

    fn stroke_segments(&mut self, vertices: &[Vec3], color: Color) {
        Self::record(&self.stack, &mut self.lines, vertices, color);
    }
}
