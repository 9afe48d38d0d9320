//! # Pad Event Mapper Module
//!
//! Parses raw evdev events into a [`PadState`] snapshot.
//!
//! ## Axis Codes (EV_ABS)
//!
//! | Axis | evdev Code | Range | Drone function |
//! |------|------------|-------|----------------|
//! | Left Stick X | ABS_X | 0-255 | Yaw |
//! | Left Stick Y | ABS_Y | 0-255 | Throttle |
//! | Right Stick X | ABS_Z | 0-255 | Roll |
//! | Right Stick Y | ABS_RZ | 0-255 | Pitch |
//!
//! ## Button Codes (EV_KEY)
//!
//! | Button | evdev Code | Drone function |
//! |--------|------------|----------------|
//! | North (△/Y) | BTN_NORTH | Takeoff |
//! | South (×/A) | BTN_SOUTH | Land |
//!
//! Raw values are kept in evdev units here; normalization, deadband and
//! gain live in [`super::sticks`].

use evdev::{AbsoluteAxisType, InputEvent, Key};

/// Raw axis minimum reported by evdev gamepads.
pub const RAW_AXIS_MIN: i32 = 0;
/// Raw axis maximum reported by evdev gamepads.
pub const RAW_AXIS_MAX: i32 = 255;
/// Raw axis center value.
pub const RAW_AXIS_CENTER: i32 = 128;

/// Raw snapshot of the gamepad controls the bridge cares about.
///
/// Exactly one task mutates this (the input task feeding events in);
/// everything downstream sees mapped copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PadState {
    /// Left stick X (yaw). 0 = full left, 255 = full right.
    pub left_x: i32,
    /// Left stick Y (throttle). 0 = full up, 255 = full down.
    pub left_y: i32,
    /// Right stick X (roll). 0 = full left, 255 = full right.
    pub right_x: i32,
    /// Right stick Y (pitch). 0 = full up, 255 = full down.
    pub right_y: i32,
    /// North face button: takeoff.
    pub btn_takeoff: bool,
    /// South face button: land.
    pub btn_land: bool,
}

impl Default for PadState {
    fn default() -> Self {
        Self {
            left_x: RAW_AXIS_CENTER,
            left_y: RAW_AXIS_CENTER,
            right_x: RAW_AXIS_CENTER,
            right_y: RAW_AXIS_CENTER,
            btn_takeoff: false,
            btn_land: false,
        }
    }
}

impl PadState {
    /// Creates a state with sticks centered and buttons released.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds a single evdev event into the state.
    ///
    /// Sync events and axes/buttons the bridge does not use are ignored.
    pub fn process_event(&mut self, event: &InputEvent) {
        match event.kind() {
            evdev::InputEventKind::AbsAxis(axis) => {
                self.process_axis_event(axis, event.value());
            }
            evdev::InputEventKind::Key(key) => {
                self.process_key_event(key, event.value() != 0);
            }
            _ => {}
        }
    }

    fn process_axis_event(&mut self, axis: AbsoluteAxisType, value: i32) {
        match axis {
            AbsoluteAxisType::ABS_X => self.left_x = value,
            AbsoluteAxisType::ABS_Y => self.left_y = value,
            // Right stick is ABS_Z/ABS_RZ on DualSense-class pads.
            AbsoluteAxisType::ABS_Z => self.right_x = value,
            AbsoluteAxisType::ABS_RZ => self.right_y = value,
            _ => {}
        }
    }

    fn process_key_event(&mut self, key: Key, pressed: bool) {
        match key {
            Key::BTN_NORTH => self.btn_takeoff = pressed,
            Key::BTN_SOUTH => self.btn_land = pressed,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evdev::EventType;

    fn axis_event(axis: AbsoluteAxisType, value: i32) -> InputEvent {
        InputEvent::new(EventType::ABSOLUTE, axis.0, value)
    }

    fn key_event(key: Key, pressed: bool) -> InputEvent {
        InputEvent::new(EventType::KEY, key.code(), if pressed { 1 } else { 0 })
    }

    #[test]
    fn test_default_state_centered() {
        let state = PadState::default();
        assert_eq!(state.left_x, RAW_AXIS_CENTER);
        assert_eq!(state.left_y, RAW_AXIS_CENTER);
        assert_eq!(state.right_x, RAW_AXIS_CENTER);
        assert_eq!(state.right_y, RAW_AXIS_CENTER);
        assert!(!state.btn_takeoff);
        assert!(!state.btn_land);
    }

    #[test]
    fn test_stick_events_update_state() {
        let mut state = PadState::new();
        state.process_event(&axis_event(AbsoluteAxisType::ABS_X, 200));
        state.process_event(&axis_event(AbsoluteAxisType::ABS_Y, 10));
        state.process_event(&axis_event(AbsoluteAxisType::ABS_Z, 0));
        state.process_event(&axis_event(AbsoluteAxisType::ABS_RZ, 255));

        assert_eq!(state.left_x, 200);
        assert_eq!(state.left_y, 10);
        assert_eq!(state.right_x, 0);
        assert_eq!(state.right_y, 255);
    }

    #[test]
    fn test_button_press_and_release() {
        let mut state = PadState::new();

        state.process_event(&key_event(Key::BTN_NORTH, true));
        assert!(state.btn_takeoff);
        state.process_event(&key_event(Key::BTN_NORTH, false));
        assert!(!state.btn_takeoff);

        state.process_event(&key_event(Key::BTN_SOUTH, true));
        assert!(state.btn_land);
    }

    #[test]
    fn test_unused_inputs_ignored() {
        let mut state = PadState::new();
        state.process_event(&axis_event(AbsoluteAxisType::ABS_MISC, 77));
        state.process_event(&key_event(Key::BTN_WEST, true));
        state.process_event(&InputEvent::new(EventType::SYNCHRONIZATION, 0, 0));

        assert_eq!(state, PadState::default());
    }
}
