//! Maps per-frame input onto the robot and the camera

use crate::config::ViewerConfig;
use morphbot_render::ViewCamera;
use morphbot_robot::{JointControl, Robot};
use morphbot_runtime::input::actions;
use morphbot_runtime::{InputState, StepGate};

/// Held-key bindings for direct joint control
const JOINT_ACTIONS: [(&str, JointControl); 6] = [
    (actions::ROTATE_ROOT, JointControl::Root),
    (actions::ROTATE_RIGHT_SHOULDER, JointControl::RightShoulder),
    (actions::ROTATE_LEFT_SHOULDER, JointControl::LeftShoulder),
    (actions::ROTATE_LEFT_LEG, JointControl::LeftLeg),
    (actions::ROTATE_RIGHT_LEG, JointControl::RightLeg),
    (actions::ROTATE_TAIL, JointControl::Tail),
];

/// What the frame loop should do after controls ran
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlOutcome {
    pub exit: bool,
}

/// Viewer control state: auto-stepping and camera tuning
pub struct Controls {
    auto_step: bool,
    gate: StepGate,
    pan_speed: f32,
    drag_sensitivity: f32,
}

impl Controls {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            auto_step: config.animation.auto_step,
            gate: StepGate::new(config.animation.morph_every),
            pan_speed: config.camera.pan_speed,
            drag_sensitivity: config.camera.drag_sensitivity,
        }
    }

    pub fn auto_step(&self) -> bool {
        self.auto_step
    }

    /// Apply one frame of input
    pub fn update(
        &mut self,
        input: &InputState,
        robot: &mut Robot,
        camera: &mut ViewCamera,
    ) -> ControlOutcome {
        if input.is_action_just_pressed(actions::EXIT) {
            return ControlOutcome { exit: true };
        }

        if input.is_action_just_pressed(actions::TOGGLE_AUTO_STEP) {
            self.auto_step = !self.auto_step;
            self.gate.reset();
            tracing::info!(
                auto_step = self.auto_step,
                every = self.gate.every(),
                "toggled auto-stepping"
            );
        }
        if input.is_action_just_pressed(actions::CHANGE_STATE) {
            robot.change_state();
        }
        if input.is_action_just_pressed(actions::CHANGE_FILL) {
            robot.change_fill();
        }
        if input.is_action_just_pressed(actions::TOGGLE_JOINT_MARKERS) {
            let shown = !robot.joint_markers();
            robot.set_joint_markers(shown);
        }

        if self.auto_step && self.gate.tick() {
            robot.all_add_step();
        }

        for (action, control) in JOINT_ACTIONS {
            if input.is_action_pressed(action) {
                robot.rotate_joint(control);
            }
        }

        self.apply_camera(input, camera);
        ControlOutcome::default()
    }

    fn apply_camera(&self, input: &InputState, camera: &mut ViewCamera) {
        let speed = self.pan_speed;
        if input.is_action_pressed(actions::PAN_LEFT) {
            camera.pan(speed, 0.0);
        }
        if input.is_action_pressed(actions::PAN_RIGHT) {
            camera.pan(-speed, 0.0);
        }
        if input.is_action_pressed(actions::PAN_FORWARD) {
            camera.pan(0.0, speed);
        }
        if input.is_action_pressed(actions::PAN_BACKWARD) {
            camera.pan(0.0, -speed);
        }

        if input.is_dragging() {
            let (dx, dy) = input.drag_delta();
            camera.drag(dx as f32, dy as f32, self.drag_sensitivity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use morphbot_robot::Preset;
    use morphbot_runtime::input::DRAG_BUTTON;
    use winit::keyboard::KeyCode;

    fn setup() -> (Controls, InputState, Robot, ViewCamera) {
        (
            Controls::new(&ViewerConfig::default()),
            InputState::new(),
            Robot::new(),
            ViewCamera::new(),
        )
    }

    fn frame(
        controls: &mut Controls,
        input: &mut InputState,
        robot: &mut Robot,
        camera: &mut ViewCamera,
    ) -> ControlOutcome {
        let outcome = controls.update(input, robot, camera);
        input.end_frame();
        outcome
    }

    #[test]
    fn test_held_key_rotates_every_frame() {
        let (mut controls, mut input, mut robot, mut camera) = setup();
        input.process_key_down(KeyCode::KeyX);
        for _ in 0..3 {
            frame(&mut controls, &mut input, &mut robot, &mut camera);
        }
        assert_eq!(robot.joint(JointControl::RightShoulder).step(), 3);
        assert_eq!(robot.joint(JointControl::LeftShoulder).step(), 0);
    }

    #[test]
    fn test_auto_step_every_tenth_frame() {
        let (mut controls, mut input, mut robot, mut camera) = setup();
        input.process_key_down(KeyCode::KeyA);
        for _ in 0..30 {
            frame(&mut controls, &mut input, &mut robot, &mut camera);
        }
        assert!(controls.auto_step());
        assert_eq!(robot.step(), 3);

        // Toggling off stops the driver
        input.process_key_up(KeyCode::KeyA);
        input.process_key_down(KeyCode::KeyA);
        for _ in 0..30 {
            frame(&mut controls, &mut input, &mut robot, &mut camera);
        }
        assert!(!controls.auto_step());
        assert_eq!(robot.step(), 3);
    }

    #[test]
    fn test_auto_step_restarts_gate_on_toggle() {
        let (mut controls, mut input, mut robot, mut camera) = setup();
        input.process_key_down(KeyCode::KeyA);
        for _ in 0..5 {
            frame(&mut controls, &mut input, &mut robot, &mut camera);
        }
        // Off and straight back on: the half-counted period is discarded
        for _ in 0..2 {
            input.process_key_up(KeyCode::KeyA);
            input.process_key_down(KeyCode::KeyA);
            frame(&mut controls, &mut input, &mut robot, &mut camera);
        }
        for _ in 0..8 {
            frame(&mut controls, &mut input, &mut robot, &mut camera);
        }
        assert_eq!(robot.step(), 0);
        frame(&mut controls, &mut input, &mut robot, &mut camera);
        assert_eq!(robot.step(), 1);
    }

    #[test]
    fn test_toggles_fire_once_per_press() {
        let (mut controls, mut input, mut robot, mut camera) = setup();
        input.process_key_down(KeyCode::KeyR);
        input.process_key_down(KeyCode::KeyF);
        input.process_key_down(KeyCode::KeyJ);
        for _ in 0..5 {
            frame(&mut controls, &mut input, &mut robot, &mut camera);
        }
        assert_eq!(robot.preset(), Preset::Car);
        assert!(!robot.fill());
        assert!(robot.joint_markers());
    }

    #[test]
    fn test_escape_requests_exit() {
        let (mut controls, mut input, mut robot, mut camera) = setup();
        assert!(!frame(&mut controls, &mut input, &mut robot, &mut camera).exit);
        input.process_key_down(KeyCode::Escape);
        assert!(frame(&mut controls, &mut input, &mut robot, &mut camera).exit);
    }

    #[test]
    fn test_arrow_keys_pan() {
        let (mut controls, mut input, mut robot, mut camera) = setup();
        input.process_key_down(KeyCode::ArrowLeft);
        input.process_key_down(KeyCode::ArrowDown);
        frame(&mut controls, &mut input, &mut robot, &mut camera);
        assert!((camera.view_x - 0.1).abs() < 1e-6);
        assert!((camera.view_z + 15.1).abs() < 1e-5);
    }

    #[test]
    fn test_drag_rotates_camera() {
        let (mut controls, mut input, mut robot, mut camera) = setup();
        input.process_mouse_move(100.0, 100.0);
        input.process_mouse_button_down(DRAG_BUTTON);
        input.process_mouse_move(120.0, 90.0);
        frame(&mut controls, &mut input, &mut robot, &mut camera);
        assert_eq!(camera.yaw, 10.0);
        assert_eq!(camera.pitch, -5.0);

        // Hover without the button does nothing
        input.process_mouse_button_up(DRAG_BUTTON);
        input.process_mouse_move(300.0, 300.0);
        frame(&mut controls, &mut input, &mut robot, &mut camera);
        assert_eq!(camera.yaw, 10.0);
    }
}
