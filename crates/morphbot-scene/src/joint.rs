//! Constrained rotational joints and the stepwise articulation state machine

use crate::node::{next_rotation_stamp, Rotation};
use morphbot_core::Vec3;
use std::fmt;

/// Number of steps between a joint's minimum and maximum angle
pub const STEP_COUNT: i32 = 20;

/// Articulation preset; selects the direction the stepwise driver sweeps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// Sweep from `min_angle` toward `max_angle`
    #[default]
    Dinosaur,
    /// Sweep from `max_angle` toward `min_angle`
    Car,
}

impl Preset {
    /// All presets in cycling order
    pub const ALL: [Preset; 2] = [Preset::Dinosaur, Preset::Car];

    pub fn name(self) -> &'static str {
        match self {
            Self::Dinosaur => "dinosaur",
            Self::Car => "car",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::Dinosaur => 0,
            Self::Car => 1,
        }
    }

    /// The preset after this one, wrapping around
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rotation constraint held by a joint node.
///
/// The joint's own rotation is `(angle, axis)`. Each time the angle is set,
/// every direct child of the joint node takes the same rotation until the child
/// is rotated again; see [`SceneGraph::effective_rotation`](crate::SceneGraph::effective_rotation).
#[derive(Clone, Debug)]
pub struct Joint {
    min_angle: f32,
    max_angle: f32,
    axis: Vec3,
    angle: f32,
    state: Preset,
    step: i32,
    set_stamp: u64,
}

impl Default for Joint {
    fn default() -> Self {
        Self::new((-360.0, 360.0), Vec3::Z)
    }
}

impl Joint {
    /// Create a joint resting at its minimum angle, step 0, in the dinosaur preset
    pub fn new(angle_limit: (f32, f32), axis: Vec3) -> Self {
        let (min_angle, max_angle) = angle_limit;
        Self {
            min_angle,
            max_angle,
            axis,
            angle: min_angle,
            state: Preset::Dinosaur,
            step: 0,
            set_stamp: 0,
        }
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn axis(&self) -> Vec3 {
        self.axis
    }

    pub fn min_angle(&self) -> f32 {
        self.min_angle
    }

    pub fn max_angle(&self) -> f32 {
        self.max_angle
    }

    pub fn state(&self) -> Preset {
        self.state
    }

    pub fn step(&self) -> i32 {
        self.step
    }

    /// Whether the joint has started driving its children's rotation
    pub fn is_driving(&self) -> bool {
        self.set_stamp != 0
    }

    /// Write order of the last `set_angle`, 0 if never set
    pub(crate) fn set_stamp(&self) -> u64 {
        self.set_stamp
    }

    /// The rotation this joint applies to itself and, once driving, to its children
    pub fn rotation(&self) -> Rotation {
        Rotation::new(self.angle, self.axis)
    }

    /// Clamp `angle` into the joint's limits and store it
    pub fn set_angle(&mut self, angle: f32) {
        self.angle = angle.min(self.max_angle).max(self.min_angle);
        self.set_stamp = next_rotation_stamp();
    }

    pub fn set_axis(&mut self, x: f32, y: f32, z: f32) {
        self.axis = Vec3::new(x, y, z);
    }

    /// Replace the limits. The current angle is left as is until it is next set.
    pub fn set_angle_limit(&mut self, angle_limit: (f32, f32)) {
        (self.min_angle, self.max_angle) = angle_limit;
    }

    /// Switch the sweep direction. `step` is kept, so the next step continues from it.
    pub fn set_state(&mut self, state: Preset) {
        self.state = state;
    }

    /// Direct user control: nudge by one step in the current preset's direction
    pub fn rotate(&mut self) {
        self.add_step();
    }

    /// Advance one step and recompute the angle from the new step.
    ///
    /// The step moves first, so the angle is taken at the new step: five steps
    /// from rest over (0, 60) land on 15. Saturates silently once `step` has
    /// moved one past either end of the range.
    pub fn add_step(&mut self) {
        match self.state {
            Preset::Dinosaur => {
                if self.step > STEP_COUNT {
                    return;
                }
                self.step += 1;
            }
            Preset::Car => {
                if self.step < 0 {
                    return;
                }
                self.step -= 1;
            }
        }
        self.set_angle(self.interpolate(self.step));
    }

    /// Angle at `step` along the linear sweep from min to max (unclamped)
    pub fn interpolate(&self, step: i32) -> f32 {
        self.min_angle + (self.max_angle - self.min_angle) * step as f32 / STEP_COUNT as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shoulder() -> Joint {
        Joint::new((0.0, 60.0), Vec3::new(-1.0, 0.0, 0.0))
    }

    #[test]
    fn test_initial_state() {
        let joint = shoulder();
        assert_eq!(joint.angle(), 0.0);
        assert_eq!(joint.step(), 0);
        assert_eq!(joint.state(), Preset::Dinosaur);
        assert!(!joint.is_driving());
    }

    #[test]
    fn test_set_angle_clamps() {
        let mut joint = Joint::new((-15.0, 45.0), Vec3::Y);
        for (input, expected) in [(-100.0, -15.0), (0.0, 0.0), (45.0, 45.0), (720.0, 45.0)] {
            joint.set_angle(input);
            assert_eq!(joint.angle(), expected, "set_angle({})", input);
        }
        assert!(joint.is_driving());
    }

    #[test]
    fn test_rotate_five_times() {
        let mut joint = shoulder();
        for _ in 0..5 {
            joint.rotate();
        }
        assert_eq!(joint.step(), 5);
        assert!((joint.angle() - 15.0).abs() < 1e-5);
    }

    #[test]
    fn test_state_switch_keeps_step() {
        let mut joint = shoulder();
        for _ in 0..5 {
            joint.rotate();
        }
        joint.set_state(Preset::Car);
        joint.add_step();
        assert_eq!(joint.step(), 4);
        assert!((joint.angle() - 12.0).abs() < 1e-5);
    }

    #[test]
    fn test_dinosaur_saturates() {
        let mut joint = shoulder();
        for _ in 0..21 {
            joint.add_step();
        }
        assert_eq!(joint.step(), 21);
        assert_eq!(joint.angle(), 60.0);

        joint.add_step();
        assert_eq!(joint.step(), 21);
        assert_eq!(joint.angle(), 60.0);
    }

    #[test]
    fn test_car_saturates() {
        let mut joint = shoulder();
        for _ in 0..STEP_COUNT {
            joint.add_step();
        }
        assert_eq!(joint.step(), STEP_COUNT);

        joint.set_state(Preset::Car);
        for _ in 0..21 {
            joint.add_step();
        }
        assert_eq!(joint.step(), -1);
        assert_eq!(joint.angle(), 0.0);

        joint.add_step();
        assert_eq!(joint.step(), -1);
    }

    #[test]
    fn test_manual_angle_diverges_from_step() {
        let mut joint = shoulder();
        joint.set_angle(50.0);
        assert_eq!(joint.step(), 0);

        // The next step snaps back onto the interpolated sweep
        joint.add_step();
        assert_eq!(joint.step(), 1);
        assert!((joint.angle() - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_degenerate_range() {
        let mut joint = Joint::new((90.0, 90.0), Vec3::Z);
        joint.add_step();
        assert_eq!(joint.angle(), 90.0);
    }

    #[test]
    fn test_preset_cycle() {
        assert_eq!(Preset::Dinosaur.next(), Preset::Car);
        assert_eq!(Preset::Car.next(), Preset::Dinosaur);
        assert_eq!(Preset::Car.to_string(), "car");
    }
}
