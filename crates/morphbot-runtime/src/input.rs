//! Input state management

use std::collections::{HashMap, HashSet};
use winit::keyboard::KeyCode;

/// Names of the viewer's bindable actions
pub mod actions {
    pub const ROTATE_ROOT: &str = "rotate_root";
    pub const ROTATE_RIGHT_SHOULDER: &str = "rotate_right_shoulder";
    pub const ROTATE_LEFT_SHOULDER: &str = "rotate_left_shoulder";
    pub const ROTATE_LEFT_LEG: &str = "rotate_left_leg";
    pub const ROTATE_RIGHT_LEG: &str = "rotate_right_leg";
    pub const ROTATE_TAIL: &str = "rotate_tail";
    pub const TOGGLE_AUTO_STEP: &str = "toggle_auto_step";
    pub const CHANGE_STATE: &str = "change_state";
    pub const CHANGE_FILL: &str = "change_fill";
    pub const TOGGLE_JOINT_MARKERS: &str = "toggle_joint_markers";
    pub const PAN_LEFT: &str = "pan_left";
    pub const PAN_RIGHT: &str = "pan_right";
    pub const PAN_FORWARD: &str = "pan_forward";
    pub const PAN_BACKWARD: &str = "pan_backward";
    pub const EXIT: &str = "exit";
}

/// Mouse button index that starts a camera drag
pub const DRAG_BUTTON: u32 = 0;

/// Tracks keyboard and mouse input state per frame
pub struct InputState {
    /// Keys currently held down
    keys_down: HashSet<KeyCode>,
    /// Keys pressed this frame
    keys_just_pressed: HashSet<KeyCode>,

    /// Current mouse position in window pixels
    pub mouse_position: (f64, f64),

    /// Cursor position at the last drag sample, while the drag button is held
    drag_anchor: Option<(f64, f64)>,
    /// Drag movement accumulated this frame
    drag_delta: (f64, f64),

    /// Action map: action name -> list of key bindings
    action_map: HashMap<String, Vec<KeyCode>>,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys_down: HashSet::new(),
            keys_just_pressed: HashSet::new(),
            mouse_position: (0.0, 0.0),
            drag_anchor: None,
            drag_delta: (0.0, 0.0),
            action_map: Self::default_action_map(),
        }
    }

    fn default_action_map() -> HashMap<String, Vec<KeyCode>> {
        let mut map = HashMap::new();
        // Held joint controls
        map.insert(actions::ROTATE_ROOT.into(), vec![KeyCode::KeyZ]);
        map.insert(actions::ROTATE_RIGHT_SHOULDER.into(), vec![KeyCode::KeyX]);
        map.insert(actions::ROTATE_LEFT_SHOULDER.into(), vec![KeyCode::KeyC]);
        map.insert(actions::ROTATE_LEFT_LEG.into(), vec![KeyCode::KeyV]);
        map.insert(actions::ROTATE_RIGHT_LEG.into(), vec![KeyCode::KeyB]);
        map.insert(actions::ROTATE_TAIL.into(), vec![KeyCode::KeyN]);
        // Toggles
        map.insert(actions::TOGGLE_AUTO_STEP.into(), vec![KeyCode::KeyA]);
        map.insert(actions::CHANGE_STATE.into(), vec![KeyCode::KeyR]);
        map.insert(actions::CHANGE_FILL.into(), vec![KeyCode::KeyF]);
        map.insert(actions::TOGGLE_JOINT_MARKERS.into(), vec![KeyCode::KeyJ]);
        map.insert(actions::EXIT.into(), vec![KeyCode::Escape]);
        // Camera pan
        map.insert(actions::PAN_LEFT.into(), vec![KeyCode::ArrowLeft]);
        map.insert(actions::PAN_RIGHT.into(), vec![KeyCode::ArrowRight]);
        map.insert(actions::PAN_FORWARD.into(), vec![KeyCode::ArrowUp]);
        map.insert(actions::PAN_BACKWARD.into(), vec![KeyCode::ArrowDown]);
        map
    }

    /// Process a key press event. Auto-repeat presses are not counted as new.
    pub fn process_key_down(&mut self, key: KeyCode) {
        if !self.keys_down.contains(&key) {
            self.keys_just_pressed.insert(key);
        }
        self.keys_down.insert(key);
    }

    /// Process a key release event
    pub fn process_key_up(&mut self, key: KeyCode) {
        self.keys_down.remove(&key);
    }

    /// Process mouse button press. Only [`DRAG_BUTTON`] is tracked.
    pub fn process_mouse_button_down(&mut self, button: u32) {
        if button == DRAG_BUTTON {
            self.drag_anchor = Some(self.mouse_position);
        }
    }

    /// Process mouse button release
    pub fn process_mouse_button_up(&mut self, button: u32) {
        if button == DRAG_BUTTON {
            self.drag_anchor = None;
        }
    }

    /// Process cursor movement
    pub fn process_mouse_move(&mut self, x: f64, y: f64) {
        self.mouse_position = (x, y);

        if let Some(anchor) = self.drag_anchor {
            self.drag_delta.0 += x - anchor.0;
            self.drag_delta.1 += y - anchor.1;
            self.drag_anchor = Some((x, y));
        }
    }

    /// Drop all held state, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        self.keys_down.clear();
        self.drag_anchor = None;
    }

    /// Call at end of frame to clear per-frame state
    pub fn end_frame(&mut self) {
        self.keys_just_pressed.clear();
        self.drag_delta = (0.0, 0.0);
    }

    // --- Query methods ---

    /// Is an action currently held? (any bound key is down)
    pub fn is_action_pressed(&self, action: &str) -> bool {
        self.action_map
            .get(action)
            .map(|keys| keys.iter().any(|k| self.keys_down.contains(k)))
            .unwrap_or(false)
    }

    /// Was an action just pressed this frame?
    pub fn is_action_just_pressed(&self, action: &str) -> bool {
        self.action_map
            .get(action)
            .map(|keys| keys.iter().any(|k| self.keys_just_pressed.contains(k)))
            .unwrap_or(false)
    }

    /// Is a camera drag in progress?
    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    /// Cursor movement this frame while the drag button was held
    pub fn drag_delta(&self) -> (f64, f64) {
        self.drag_delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_transitions() {
        let mut input = InputState::new();

        input.process_key_down(KeyCode::KeyZ);
        assert!(input.is_action_pressed(actions::ROTATE_ROOT));
        assert!(input.is_action_just_pressed(actions::ROTATE_ROOT));

        // End frame clears just_pressed
        input.end_frame();
        assert!(input.is_action_pressed(actions::ROTATE_ROOT));
        assert!(!input.is_action_just_pressed(actions::ROTATE_ROOT));

        // Repeat events while held are not new presses
        input.process_key_down(KeyCode::KeyZ);
        assert!(!input.is_action_just_pressed(actions::ROTATE_ROOT));

        input.process_key_up(KeyCode::KeyZ);
        assert!(!input.is_action_pressed(actions::ROTATE_ROOT));
    }

    #[test]
    fn test_held_action() {
        let mut input = InputState::new();
        assert!(!input.is_action_pressed(actions::ROTATE_TAIL));

        input.process_key_down(KeyCode::KeyN);
        for _ in 0..3 {
            assert!(input.is_action_pressed(actions::ROTATE_TAIL));
            input.end_frame();
        }
    }

    #[test]
    fn test_toggle_fires_once() {
        let mut input = InputState::new();
        input.process_key_down(KeyCode::KeyF);
        assert!(input.is_action_just_pressed(actions::CHANGE_FILL));

        input.end_frame();
        assert!(input.is_action_pressed(actions::CHANGE_FILL));
        assert!(!input.is_action_just_pressed(actions::CHANGE_FILL));
    }

    #[test]
    fn test_unknown_action() {
        let mut input = InputState::new();
        input.process_key_down(KeyCode::KeyQ);
        assert!(!input.is_action_pressed("no_such_action"));
        assert!(!input.is_action_just_pressed("no_such_action"));
    }

    #[test]
    fn test_drag_only_while_button_held() {
        let mut input = InputState::new();

        input.process_mouse_move(100.0, 100.0);
        assert_eq!(input.drag_delta(), (0.0, 0.0));

        input.process_mouse_button_down(DRAG_BUTTON);
        assert!(input.is_dragging());
        input.process_mouse_move(110.0, 95.0);
        input.process_mouse_move(120.0, 90.0);
        assert_eq!(input.drag_delta(), (20.0, -10.0));

        input.end_frame();
        assert_eq!(input.drag_delta(), (0.0, 0.0));

        input.process_mouse_button_up(DRAG_BUTTON);
        assert!(!input.is_dragging());
        input.process_mouse_move(200.0, 200.0);
        assert_eq!(input.drag_delta(), (0.0, 0.0));
    }

    #[test]
    fn test_other_buttons_do_not_drag() {
        let mut input = InputState::new();
        input.process_mouse_button_down(1);
        input.process_mouse_move(50.0, 50.0);
        assert!(!input.is_dragging());
        assert_eq!(input.drag_delta(), (0.0, 0.0));
    }

    #[test]
    fn test_release_all() {
        let mut input = InputState::new();
        input.process_key_down(KeyCode::KeyV);
        input.process_mouse_button_down(DRAG_BUTTON);
        input.release_all();
        assert!(!input.is_action_pressed(actions::ROTATE_LEFT_LEG));
        assert!(!input.is_dragging());
    }
}
