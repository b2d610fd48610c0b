//! Shape leaves: the drawable geometry a node can carry
//!
//! All shapes are centered on the node origin. Cylinders and wheels stand
//! along the local Y axis; spheres use Z as the polar axis.

use crate::canvas::Canvas;
use morphbot_core::{Color, Vec3};
use std::f32::consts::TAU;

/// Colors a shape is drawn with
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapePaint {
    /// Solid face color, `None` for outline only
    pub fill: Option<Color>,
    /// Outline color, always drawn
    pub outline: Color,
}

/// Anything that can emit itself into a [`Canvas`] in local space
pub trait Drawable {
    fn draw(&self, canvas: &mut dyn Canvas, paint: &ShapePaint);
}

/// Geometry attached to a node
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Geometry {
    /// Pure transform node
    #[default]
    None,
    Cube(Cube),
    Sphere(Sphere),
    Cylinder(Cylinder),
    Wheel(Wheel),
}

impl Geometry {
    /// Marker sphere shown at joint pivots
    pub fn joint_marker() -> Self {
        Self::Sphere(Sphere::default())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Cube(_) => "cube",
            Self::Sphere(_) => "sphere",
            Self::Cylinder(_) => "cylinder",
            Self::Wheel(_) => "wheel",
        }
    }
}

impl Drawable for Geometry {
    fn draw(&self, canvas: &mut dyn Canvas, paint: &ShapePaint) {
        match self {
            Self::None => {}
            Self::Cube(cube) => cube.draw(canvas, paint),
            Self::Sphere(sphere) => sphere.draw(canvas, paint),
            Self::Cylinder(cylinder) => cylinder.draw(canvas, paint),
            Self::Wheel(wheel) => wheel.draw(canvas, paint),
        }
    }
}

/// Corners of the unit cube, in face-index order
const UNIT_CUBE: [Vec3; 8] = [
    Vec3::new(0.5, 0.5, -0.5),
    Vec3::new(-0.5, 0.5, -0.5),
    Vec3::new(-0.5, -0.5, -0.5),
    Vec3::new(0.5, -0.5, -0.5),
    Vec3::new(0.5, 0.5, 0.5),
    Vec3::new(-0.5, 0.5, 0.5),
    Vec3::new(-0.5, -0.5, 0.5),
    Vec3::new(0.5, -0.5, 0.5),
];

const CUBE_FACES: [[usize; 4]; 6] = [
    [0, 1, 2, 3],
    [4, 5, 6, 7],
    [0, 4, 7, 3],
    [1, 5, 6, 2],
    [0, 1, 5, 4],
    [3, 2, 6, 7],
];

/// Axis-aligned box with baked vertices
#[derive(Clone, Debug, PartialEq)]
pub struct Cube {
    scale: Vec3,
    vertices: [Vec3; 8],
}

impl Cube {
    pub fn new(scale: Vec3) -> Self {
        Self {
            scale,
            vertices: UNIT_CUBE.map(|v| v * scale),
        }
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn vertices(&self) -> &[Vec3; 8] {
        &self.vertices
    }

    /// Offset the stored vertices so the node's pivot sits off-center
    pub fn move_by(&mut self, dx: f32, dy: f32, dz: f32) {
        let offset = Vec3::new(dx, dy, dz);
        for v in &mut self.vertices {
            *v = *v + offset;
        }
    }

    /// Builder form of [`Cube::move_by`]
    pub fn moved(mut self, dx: f32, dy: f32, dz: f32) -> Self {
        self.move_by(dx, dy, dz);
        self
    }

    fn face(&self, face: [usize; 4]) -> [Vec3; 4] {
        face.map(|i| self.vertices[i])
    }
}

impl Drawable for Cube {
    fn draw(&self, canvas: &mut dyn Canvas, paint: &ShapePaint) {
        if let Some(color) = paint.fill {
            for face in CUBE_FACES {
                canvas.fill_polygon(&self.face(face), color);
            }
        }
        for face in CUBE_FACES {
            canvas.stroke_loop(&self.face(face), paint.outline);
        }
    }
}

/// Latitude/longitude sphere
#[derive(Clone, Debug, PartialEq)]
pub struct Sphere {
    pub radius: f32,
    pub slices: u32,
    pub stacks: u32,
}

impl Default for Sphere {
    fn default() -> Self {
        Self {
            radius: 0.5,
            slices: 16,
            stacks: 16,
        }
    }
}

impl Sphere {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            ..Default::default()
        }
    }

    /// Point at latitude ring `stack` (0 = +Z pole) and longitude `slice`
    fn point(&self, stack: u32, slice: u32) -> Vec3 {
        let polar = std::f32::consts::PI * stack as f32 / self.stacks as f32;
        let azimuth = TAU * slice as f32 / self.slices as f32;
        let (sp, cp) = polar.sin_cos();
        let (sa, ca) = azimuth.sin_cos();
        Vec3::new(sp * ca, sp * sa, cp) * self.radius
    }
}

impl Drawable for Sphere {
    fn draw(&self, canvas: &mut dyn Canvas, paint: &ShapePaint) {
        if self.slices == 0 || self.stacks == 0 {
            return;
        }

        if let Some(color) = paint.fill {
            for stack in 0..self.stacks {
                let band: Vec<Vec3> = (0..=self.slices)
                    .flat_map(|slice| [self.point(stack, slice), self.point(stack + 1, slice)])
                    .collect();
                canvas.fill_quad_strip(&band, color);
            }
        }

        // Inner latitude rings, then meridians pole to pole
        for stack in 1..self.stacks {
            let ring: Vec<Vec3> = (0..self.slices).map(|s| self.point(stack, s)).collect();
            canvas.stroke_loop(&ring, paint.outline);
        }
        let mut meridians = Vec::with_capacity((self.slices * self.stacks * 2) as usize);
        for slice in 0..self.slices {
            for stack in 0..self.stacks {
                meridians.push(self.point(stack, slice));
                meridians.push(self.point(stack + 1, slice));
            }
        }
        canvas.stroke_segments(&meridians, paint.outline);
    }
}

/// Point on a circle of `radius` in the XZ plane at height `y`
fn ring_point(radius: f32, y: f32, i: u32, segments: u32) -> Vec3 {
    let angle = TAU * i as f32 / segments as f32;
    Vec3::new(radius * angle.cos(), y, radius * angle.sin())
}

fn ring(radius: f32, y: f32, segments: u32) -> Vec<Vec3> {
    (0..segments).map(|i| ring_point(radius, y, i, segments)).collect()
}

/// Vertical segments joining the top and bottom rings
fn ribs(radius: f32, half_height: f32, segments: u32) -> Vec<Vec3> {
    (0..segments)
        .flat_map(|i| {
            [
                ring_point(radius, half_height, i, segments),
                ring_point(radius, -half_height, i, segments),
            ]
        })
        .collect()
}

/// Side wall as a closed quad strip
fn wall(radius: f32, half_height: f32, segments: u32) -> Vec<Vec3> {
    (0..=segments)
        .flat_map(|i| {
            [
                ring_point(radius, half_height, i, segments),
                ring_point(radius, -half_height, i, segments),
            ]
        })
        .collect()
}

/// Solid cylinder along Y
#[derive(Clone, Debug, PartialEq)]
pub struct Cylinder {
    pub radius: f32,
    pub height: f32,
    pub segments: u32,
}

impl Default for Cylinder {
    fn default() -> Self {
        Self {
            radius: 0.5,
            height: 1.0,
            segments: 32,
        }
    }
}

impl Cylinder {
    pub fn new(radius: f32, height: f32, segments: u32) -> Self {
        Self {
            radius,
            height,
            segments,
        }
    }
}

impl Drawable for Cylinder {
    fn draw(&self, canvas: &mut dyn Canvas, paint: &ShapePaint) {
        if self.segments == 0 {
            return;
        }
        let h = self.height / 2.0;

        if let Some(color) = paint.fill {
            for y in [h, -h] {
                canvas.fill_polygon(&ring(self.radius, y, self.segments), color);
            }
            canvas.fill_quad_strip(&wall(self.radius, h, self.segments), color);
        }

        for y in [h, -h] {
            canvas.stroke_loop(&ring(self.radius, y, self.segments), paint.outline);
        }
        canvas.stroke_segments(&ribs(self.radius, h, self.segments), paint.outline);
    }
}

/// Hollow cylinder (annulus extruded along Y)
#[derive(Clone, Debug, PartialEq)]
pub struct Wheel {
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub height: f32,
    pub segments: u32,
}

impl Default for Wheel {
    fn default() -> Self {
        Self {
            inner_radius: 0.3,
            outer_radius: 0.5,
            height: 0.2,
            segments: 32,
        }
    }
}

impl Wheel {
    pub fn new(inner_radius: f32, outer_radius: f32, height: f32, segments: u32) -> Self {
        Self {
            inner_radius,
            outer_radius,
            height,
            segments,
        }
    }
}

impl Drawable for Wheel {
    fn draw(&self, canvas: &mut dyn Canvas, paint: &ShapePaint) {
        if self.segments == 0 {
            return;
        }
        let h = self.height / 2.0;
        let radii = [self.outer_radius, self.inner_radius];

        if let Some(color) = paint.fill {
            for y in [h, -h] {
                let cap: Vec<Vec3> = (0..=self.segments)
                    .flat_map(|i| {
                        [
                            ring_point(self.outer_radius, y, i, self.segments),
                            ring_point(self.inner_radius, y, i, self.segments),
                        ]
                    })
                    .collect();
                canvas.fill_quad_strip(&cap, color);
            }
            for radius in radii {
                canvas.fill_quad_strip(&wall(radius, h, self.segments), color);
            }
        }

        for y in [h, -h] {
            for radius in radii {
                canvas.stroke_loop(&ring(radius, y, self.segments), paint.outline);
            }
        }
        for radius in radii {
            canvas.stroke_segments(&ribs(radius, h, self.segments), paint.outline);
        }
    }
}
