//! Fixed part layout of the robot

use morphbot_core::{Color, Vec3};
use morphbot_scene::{Cube, Cylinder, Geometry, Joint, Node, NodeId, SceneGraph, Sphere, Wheel};

const BODY_SCALE: Vec3 = Vec3::new(2.5, 1.5, 5.0);
const HEAD_SCALE: Vec3 = Vec3::new(3.0, 1.5, 2.0);
const MOUTH_SCALE: Vec3 = Vec3::new(3.0, 0.5, 2.0);
const HAND_SCALE: Vec3 = Vec3::new(0.3, 0.3, 2.0);
const LEG_SCALE: Vec3 = Vec3::new(2.0, 0.3, 4.0);
const TAIL_SCALE: Vec3 = Vec3::new(2.5, 0.3, 5.0);

const EYE_RADIUS: f32 = 0.3;
const PELVIS_RADIUS: f32 = 0.5;
const PELVIS_HEIGHT: f32 = 4.0;
const SEGMENTS: u32 = 32;

const NEG_X: Vec3 = Vec3::new(-1.0, 0.0, 0.0);
const NEG_Y: Vec3 = Vec3::new(0.0, -1.0, 0.0);

fn light_blue() -> Color {
    Color::from_rgb8(173, 216, 230)
}

fn hand_yellow() -> Color {
    Color::from_rgb8(238, 221, 102)
}

/// Handles to every named part of the robot
#[derive(Clone, Debug)]
pub struct Parts {
    pub root_joint: NodeId,
    pub body: NodeId,
    pub neck_joint_0: NodeId,
    pub neck_joint_1: NodeId,
    pub head: NodeId,
    pub mouth: NodeId,
    pub eye_left: NodeId,
    pub eye_right: NodeId,
    pub left_shoulder_joint: NodeId,
    pub left_hand: NodeId,
    pub right_shoulder_joint: NodeId,
    pub right_hand: NodeId,
    pub pelvis_joint: NodeId,
    pub pelvis: NodeId,
    pub right_leg_joint: NodeId,
    pub left_leg_joint: NodeId,
    pub right_leg: NodeId,
    pub left_leg: NodeId,
    pub front_right_wheel: NodeId,
    pub front_left_wheel: NodeId,
    pub back_right_wheel: NodeId,
    pub back_left_wheel: NodeId,
    pub tail_joint: NodeId,
    pub tail: NodeId,
}

impl Parts {
    /// Shapes whose fill flag follows the robot's fill mode
    pub fn fill_switchable(&self) -> [NodeId; 15] {
        [
            self.body,
            self.head,
            self.mouth,
            self.eye_left,
            self.eye_right,
            self.left_hand,
            self.right_hand,
            self.pelvis,
            self.left_leg,
            self.right_leg,
            self.front_left_wheel,
            self.front_right_wheel,
            self.back_left_wheel,
            self.back_right_wheel,
            self.tail,
        ]
    }

    /// Every joint pivot, including the ones the driver never moves
    pub fn joints(&self) -> [NodeId; 9] {
        [
            self.root_joint,
            self.neck_joint_0,
            self.neck_joint_1,
            self.left_shoulder_joint,
            self.right_shoulder_joint,
            self.pelvis_joint,
            self.right_leg_joint,
            self.left_leg_joint,
            self.tail_joint,
        ]
    }
}

fn cube(name: &str, scale: Vec3, color: Color) -> Node {
    Node::new(name, Geometry::Cube(Cube::new(scale))).with_color(color)
}

/// Cube whose vertices are shifted off its pivot
fn offset_cube(name: &str, scale: Vec3, color: Color, offset: Vec3) -> Node {
    let shape = Cube::new(scale).moved(offset.x, offset.y, offset.z);
    Node::new(name, Geometry::Cube(shape)).with_color(color)
}

fn joint(name: &str, limit: (f32, f32), axis: Vec3) -> Node {
    Node::joint(name, Joint::new(limit, axis))
}

fn wheel(name: &str, x: f32, y: f32, z: f32) -> Node {
    Node::new(name, Geometry::Wheel(Wheel::new(0.5, 1.0, 0.2, SEGMENTS)))
        .with_color(Color::GREEN)
        .with_translation(x, y, z)
}

/// Build the robot into `graph` and return handles to its parts
pub fn build(graph: &mut SceneGraph) -> Parts {
    let root_joint = graph.add_node(joint("root_joint", (0.0, 45.0), NEG_X));
    let body = graph.attach(root_joint, cube("body", BODY_SCALE, Color::WHITE));

    // Head and jaw hinge at the front of the body
    let neck_joint_0 = graph.attach(
        body,
        joint("neck_joint_0", (0.0, 15.0), Vec3::X).with_translation(0.0, 0.4, BODY_SCALE.z / 2.0),
    );
    let neck_joint_1 = graph.attach(
        body,
        joint("neck_joint_1", (0.0, 15.0), Vec3::X).with_translation(0.0, -0.6, BODY_SCALE.z / 2.0),
    );
    let head = graph.attach(
        neck_joint_0,
        offset_cube("head", HEAD_SCALE, light_blue(), Vec3::new(0.0, 0.0, HEAD_SCALE.z / 2.0)),
    );
    let mouth = graph.attach(
        neck_joint_1,
        offset_cube("mouth", MOUTH_SCALE, light_blue(), Vec3::new(0.0, 0.0, MOUTH_SCALE.z / 2.0)),
    );

    let eye = |name: &str, x: f32| {
        Node::new(name, Geometry::Sphere(Sphere::new(EYE_RADIUS)))
            .with_color(Color::RED)
            .with_translation(x, 0.4, 0.5)
    };
    let eye_left = graph.attach(head, eye("eye_left", HEAD_SCALE.x / 2.0));
    let eye_right = graph.attach(head, eye("eye_right", -HEAD_SCALE.x / 2.0));

    let left_shoulder_joint = graph.attach(
        body,
        joint("left_shoulder_joint", (0.0, 60.0), NEG_X).with_translation(BODY_SCALE.x / 2.0, 0.0, 2.0),
    );
    let left_hand = graph.attach(
        left_shoulder_joint,
        offset_cube(
            "left_hand",
            HAND_SCALE,
            hand_yellow(),
            Vec3::new(HAND_SCALE.x / 2.0, 0.0, -HAND_SCALE.z / 2.0),
        ),
    );

    let right_shoulder_joint = graph.attach(
        body,
        joint("right_shoulder_joint", (0.0, 60.0), NEG_X).with_translation(-BODY_SCALE.x / 2.0, 0.0, 2.0),
    );
    let right_hand = graph.attach(
        right_shoulder_joint,
        offset_cube(
            "right_hand",
            HAND_SCALE,
            hand_yellow(),
            Vec3::new(-HAND_SCALE.x / 2.0, 0.0, -HAND_SCALE.z / 2.0),
        ),
    );

    // Fixed 90 degree hip; the pelvis bar runs across the body
    let pelvis_joint = graph.attach(
        body,
        joint("pelvis_joint", (90.0, 90.0), Vec3::Z).with_translation(0.0, 0.0, -1.5),
    );
    let pelvis = graph.attach(
        pelvis_joint,
        Node::new(
            "pelvis",
            Geometry::Cylinder(Cylinder::new(PELVIS_RADIUS, PELVIS_HEIGHT, SEGMENTS)),
        )
        .with_color(Color::BLUE),
    );

    let right_leg_joint = graph.attach(
        pelvis,
        joint("right_leg_joint", (0.0, 60.0), NEG_Y).with_translation(0.0, PELVIS_HEIGHT / 2.0, 0.0),
    );
    let left_leg_joint = graph.attach(
        pelvis,
        joint("left_leg_joint", (0.0, 60.0), NEG_Y).with_translation(0.0, -PELVIS_HEIGHT / 2.0, 0.0),
    );

    let leg_offset = Vec3::new(0.0, 0.0, LEG_SCALE.z / 2.0);
    let right_leg = graph.attach(
        right_leg_joint,
        offset_cube("right_leg", LEG_SCALE, Color::RED, leg_offset),
    );
    let left_leg = graph.attach(
        left_leg_joint,
        offset_cube("left_leg", LEG_SCALE, Color::RED, leg_offset),
    );

    let rim = LEG_SCALE.y / 2.0;
    let front_right_wheel = graph.attach(right_leg, wheel("front_right_wheel", 0.0, rim, LEG_SCALE.z));
    let front_left_wheel = graph.attach(left_leg, wheel("front_left_wheel", 0.0, -rim, LEG_SCALE.z));
    let back_right_wheel = graph.attach(right_leg, wheel("back_right_wheel", 0.0, rim, 0.0));
    let back_left_wheel = graph.attach(left_leg, wheel("back_left_wheel", 0.0, -rim, 0.0));

    let tail_joint = graph.attach(
        body,
        joint("tail_joint", (0.0, 100.0), NEG_X).with_translation(
            0.0,
            BODY_SCALE.y / 2.0,
            -BODY_SCALE.z / 2.0,
        ),
    );
    let tail = graph.attach(
        tail_joint,
        offset_cube(
            "tail",
            TAIL_SCALE,
            light_blue(),
            Vec3::new(0.0, TAIL_SCALE.y / 2.0, TAIL_SCALE.z / 2.0),
        ),
    );

    tracing::debug!(nodes = graph.len(), "built robot topology");

    Parts {
        root_joint,
        body,
        neck_joint_0,
        neck_joint_1,
        head,
        mouth,
        eye_left,
        eye_right,
        left_shoulder_joint,
        left_hand,
        right_shoulder_joint,
        right_hand,
        pelvis_joint,
        pelvis,
        right_leg_joint,
        left_leg_joint,
        right_leg,
        left_leg,
        front_right_wheel,
        front_left_wheel,
        back_right_wheel,
        back_left_wheel,
        tail_joint,
        tail,
    }
}
