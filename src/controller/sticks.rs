//! # Stick Mapping Module
//!
//! Turns a raw [`PadState`] into the protocol's normalized axis domain.
//!
//! Three steps per axis, in order:
//!
//! 1. Normalize the raw evdev value to `[-1.0, 1.0]` (Y axes inverted so
//!    stick-up is positive).
//! 2. Deadband: any axis whose magnitude is below the threshold snaps to
//!    exactly 0.0. The threshold itself is *not* deadbanded.
//! 3. Gain: attitude axes (roll, pitch, yaw) are tamed to half rate;
//!    throttle stays at full rate.

use super::mapper::{PadState, RAW_AXIS_CENTER};
use crate::protocol::frames::AxisSnapshot;

/// Default deadband threshold, matching the official app's tuning.
pub const DEFAULT_DEADBAND: f32 = 0.15;

/// Default gain for roll, pitch and yaw.
pub const DEFAULT_ATTITUDE_GAIN: f32 = 0.5;

/// Default gain for throttle.
pub const DEFAULT_THROTTLE_GAIN: f32 = 1.0;

/// One mapped pilot input sample: the axis snapshot the codec consumes
/// plus the current state of the two discrete command buttons.
///
/// The control loop owns re-arm timing for the buttons; this type only
/// reports their level.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PilotInput {
    pub axes: AxisSnapshot,
    pub takeoff: bool,
    pub land: bool,
}

/// Applies normalization, deadband and per-axis gain.
#[derive(Debug, Clone, Copy)]
pub struct StickMapper {
    deadband: f32,
    attitude_gain: f32,
    throttle_gain: f32,
}

impl Default for StickMapper {
    fn default() -> Self {
        Self {
            deadband: DEFAULT_DEADBAND,
            attitude_gain: DEFAULT_ATTITUDE_GAIN,
            throttle_gain: DEFAULT_THROTTLE_GAIN,
        }
    }
}

impl StickMapper {
    /// Creates a mapper with explicit tuning.
    ///
    /// # Examples
    ///
    /// ```
    /// use tello_bridge::controller::sticks::StickMapper;
    ///
    /// let mapper = StickMapper::new(0.15, 0.5, 1.0);
    /// ```
    #[must_use]
    pub fn new(deadband: f32, attitude_gain: f32, throttle_gain: f32) -> Self {
        Self {
            deadband,
            attitude_gain,
            throttle_gain,
        }
    }

    /// Maps a raw pad snapshot into a pilot input sample.
    #[must_use]
    pub fn map(&self, pad: &PadState) -> PilotInput {
        let axes = AxisSnapshot {
            roll: self.shape(normalize(pad.right_x), self.attitude_gain),
            pitch: self.shape(-normalize(pad.right_y), self.attitude_gain),
            throttle: self.shape(-normalize(pad.left_y), self.throttle_gain),
            yaw: self.shape(normalize(pad.left_x), self.attitude_gain),
            aux: 0.0,
        };

        PilotInput {
            axes,
            takeoff: pad.btn_takeoff,
            land: pad.btn_land,
        }
    }

    /// Deadband before gain. The comparison is strict, so an input at
    /// exactly the threshold passes through.
    fn shape(&self, value: f32, gain: f32) -> f32 {
        if value.abs() < self.deadband {
            0.0
        } else {
            value * gain
        }
    }
}

/// Normalize a raw evdev axis value to `[-1.0, 1.0]` around the center.
#[inline]
fn normalize(raw: i32) -> f32 {
    (raw - RAW_AXIS_CENTER) as f32 / RAW_AXIS_CENTER as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_rate() -> StickMapper {
        StickMapper::new(DEFAULT_DEADBAND, 1.0, 1.0)
    }

    #[test]
    fn test_normalize_reference_points() {
        assert_eq!(normalize(0), -1.0);
        assert_eq!(normalize(128), 0.0);
        assert_eq!(normalize(64), -0.5);
        assert_eq!(normalize(192), 0.5);
        assert!((normalize(255) - 0.9921875).abs() < f32::EPSILON);
    }

    #[test]
    fn test_centered_pad_maps_to_centered_axes() {
        let input = StickMapper::default().map(&PadState::default());
        assert_eq!(input.axes, AxisSnapshot::centered());
        assert!(!input.takeoff);
        assert!(!input.land);
    }

    #[test]
    fn test_deadband_snaps_small_deflection_to_zero() {
        let mut pad = PadState::default();
        // 0.109 normalized, inside the 0.15 deadband.
        pad.right_x = 142;
        let input = full_rate().map(&pad);
        assert_eq!(input.axes.roll, 0.0);
    }

    #[test]
    fn test_deadband_threshold_is_exclusive() {
        let mapper = StickMapper::new(0.5, 1.0, 1.0);
        let mut pad = PadState::default();
        // 192 normalizes to exactly 0.5: at the threshold, not below it.
        pad.right_x = 192;
        assert_eq!(mapper.map(&pad).axes.roll, 0.5);

        pad.right_x = 191;
        assert_eq!(mapper.map(&pad).axes.roll, 0.0);
    }

    #[test]
    fn test_attitude_gain_applied_after_deadband() {
        let mut pad = PadState::default();
        pad.right_x = 255; // full roll right
        pad.left_x = 0; // full yaw left

        let input = StickMapper::default().map(&pad);
        assert!((input.axes.roll - 0.9921875 * 0.5).abs() < f32::EPSILON);
        assert_eq!(input.axes.yaw, -0.5);
    }

    #[test]
    fn test_throttle_unscaled() {
        let mut pad = PadState::default();
        pad.left_y = 0; // stick up

        let input = StickMapper::default().map(&pad);
        assert_eq!(input.axes.throttle, 1.0);
    }

    #[test]
    fn test_vertical_axes_inverted() {
        let mut pad = PadState::default();
        pad.right_y = 0; // stick up = pitch forward
        pad.left_y = 255; // stick down = descend

        let input = full_rate().map(&pad);
        assert_eq!(input.axes.pitch, 1.0);
        assert!(input.axes.throttle < -0.99);
    }

    #[test]
    fn test_buttons_pass_through() {
        let mut pad = PadState::default();
        pad.btn_takeoff = true;
        pad.btn_land = true;

        let input = StickMapper::default().map(&pad);
        assert!(input.takeoff);
        assert!(input.land);
    }

    #[test]
    fn test_aux_always_centered() {
        let mut pad = PadState::default();
        pad.right_x = 255;
        assert_eq!(StickMapper::default().map(&pad).axes.aux, 0.0);
    }
}
