//! The morphing robot and its stepwise driver

use crate::topology::{self, Parts};
use morphbot_core::Color;
use morphbot_scene::{Canvas, Joint, NodeId, Preset, RenderStyle, SceneGraph, STEP_COUNT};

/// Outline color used while shapes are drawn without fill
pub const WIREFRAME_ONLY_COLOR: Color = Color::rgb(173.0 / 255.0, 217.0 / 255.0, 0.0);

/// A joint the user (or the morph driver) can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JointControl {
    Root,
    LeftShoulder,
    RightShoulder,
    LeftLeg,
    RightLeg,
    Tail,
}

impl JointControl {
    /// Driver order
    pub const ALL: [JointControl; 6] = [
        JointControl::Root,
        JointControl::LeftShoulder,
        JointControl::RightShoulder,
        JointControl::LeftLeg,
        JointControl::RightLeg,
        JointControl::Tail,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::LeftShoulder => "left_shoulder",
            Self::RightShoulder => "right_shoulder",
            Self::LeftLeg => "left_leg",
            Self::RightLeg => "right_leg",
            Self::Tail => "tail",
        }
    }

    fn node(self, parts: &Parts) -> NodeId {
        match self {
            Self::Root => parts.root_joint,
            Self::LeftShoulder => parts.left_shoulder_joint,
            Self::RightShoulder => parts.right_shoulder_joint,
            Self::LeftLeg => parts.left_leg_joint,
            Self::RightLeg => parts.right_leg_joint,
            Self::Tail => parts.tail_joint,
        }
    }
}

/// The articulated robot.
///
/// The global `step` and each joint's own step are tracked separately;
/// direct joint control moves only the joint, so they can drift apart.
pub struct Robot {
    graph: SceneGraph,
    parts: Parts,
    preset: Preset,
    step: i32,
    fill: bool,
    style: RenderStyle,
    markers: bool,
}

impl Default for Robot {
    fn default() -> Self {
        Self::new()
    }
}

impl Robot {
    pub fn new() -> Self {
        let mut graph = SceneGraph::new();
        let parts = topology::build(&mut graph);
        Self {
            graph,
            parts,
            preset: Preset::Dinosaur,
            step: 0,
            fill: true,
            style: RenderStyle::default(),
            markers: false,
        }
    }

    pub fn preset(&self) -> Preset {
        self.preset
    }

    /// Global morph step
    pub fn step(&self) -> i32 {
        self.step
    }

    pub fn fill(&self) -> bool {
        self.fill
    }

    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn parts(&self) -> &Parts {
        &self.parts
    }

    pub fn joint(&self, control: JointControl) -> &Joint {
        self.graph
            .joint(control.node(&self.parts))
            .unwrap_or_else(|| unreachable!("{} is built as a joint", control.name()))
    }

    fn joint_mut(&mut self, control: JointControl) -> &mut Joint {
        let id = control.node(&self.parts);
        self.graph
            .joint_mut(id)
            .unwrap_or_else(|| unreachable!("{} is built as a joint", control.name()))
    }

    /// Advance to the next preset and push it onto the controlling joints
    pub fn change_state(&mut self) {
        let preset = self.preset.next();
        self.preset = preset;
        for control in JointControl::ALL {
            self.joint_mut(control).set_state(preset);
        }
        tracing::debug!(preset = %self.preset, step = self.step, "changed preset");
    }

    /// Toggle solid fill on every shape and swap the outline color to match
    pub fn change_fill(&mut self) {
        self.fill = !self.fill;
        self.style.wireframe_color = if self.fill {
            Color::BLACK
        } else {
            WIREFRAME_ONLY_COLOR
        };
        for id in self.parts.fill_switchable() {
            self.graph.set_fill(id, self.fill);
        }
        tracing::debug!(fill = self.fill, "changed fill mode");
    }

    /// One morph tick: move the global step, flip the preset at either end,
    /// then step every controlling joint.
    pub fn all_add_step(&mut self) {
        self.step += match self.preset {
            Preset::Dinosaur => 1,
            Preset::Car => -1,
        };

        if self.step > STEP_COUNT {
            self.step = STEP_COUNT;
            if self.preset == Preset::Dinosaur {
                self.change_state();
            }
        } else if self.step < 0 {
            self.step = 0;
            if self.preset == Preset::Car {
                self.change_state();
            }
        }

        for control in JointControl::ALL {
            self.joint_mut(control).add_step();
        }
        tracing::trace!(step = self.step, preset = %self.preset, "morph step");
    }

    /// Nudge a single joint one step in its current direction
    pub fn rotate_joint(&mut self, control: JointControl) {
        let joint = self.joint_mut(control);
        joint.rotate();
        tracing::trace!(joint = control.name(), angle = joint.angle(), "rotated joint");
    }

    pub fn joint_markers(&self) -> bool {
        self.markers
    }

    /// Show or hide the sphere markers at every joint pivot
    pub fn set_joint_markers(&mut self, visible: bool) {
        self.markers = visible;
        for id in self.parts.joints() {
            self.graph.set_visible(id, visible);
        }
    }

    /// Render the body subtree with the current style
    pub fn render(&self, canvas: &mut dyn Canvas) {
        self.graph.render(self.parts.body, canvas, &self.style);
    }

    /// Indented dump of the whole model
    pub fn describe(&self) -> String {
        self.graph.describe(self.parts.root_joint)
    }
}
