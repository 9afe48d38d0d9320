//! # Wire Format Constants and Types
//!
//! Frame layouts for the Tello binary command protocol.
//!
//! Every binary frame starts with the 0xCC marker and ends with the 16-bit
//! checksum described in [`crate::protocol::crc`]. The joystick control
//! frame additionally carries a 48-bit packed-axis field and a wall-clock
//! timestamp:
//!
//! ```text
//! Offset  0        4       5..7     9..15        15..20       20..22
//!         marker   hdr-crc cmd id   packed axes  timestamp    fcs16
//! ```

/// Frame marker byte (always 0xCC).
pub const FRAME_MARKER: u8 = 0xCC;

/// Total length of a joystick control frame.
pub const CONTROL_FRAME_LEN: usize = 22;

/// Byte offset of the 48-bit packed-axis field inside a control frame.
pub const AXIS_FIELD_OFFSET: usize = 9;

/// Width of the packed-axis field in bytes.
pub const AXIS_FIELD_LEN: usize = 6;

/// Byte offset of the 5-byte timestamp inside a control frame.
pub const TIMESTAMP_OFFSET: usize = 15;

/// Scale factor mapping a normalized axis onto the 11-bit wire value.
pub const AXIS_SCALE: f32 = 660.0;

/// Wire value of a centered axis. Full deflection spans 364..=1684.
pub const AXIS_CENTER: u16 = 1024;

/// Control frame template. Axes, timestamp and both checksums are
/// overwritten before each send; the remaining bytes are constant.
pub const CONTROL_FRAME_TEMPLATE: [u8; CONTROL_FRAME_LEN] = [
    0xcc, 0xb0, 0x00, 0x7f, 0x60, 0x50, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x12, 0x16, 0x01, 0x0e, 0x00, 0x25, 0x54,
];

/// Takeoff command frame, as captured from official-app traffic.
pub const TAKEOFF_FRAME: [u8; 11] = [
    0xcc, 0x58, 0x00, 0x7c, 0x68, 0x54, 0x00, 0xe4, 0x01, 0xc2, 0x16,
];

/// Land command frame, as captured from official-app traffic.
pub const LAND_FRAME: [u8; 12] = [
    0xcc, 0x60, 0x00, 0x27, 0x68, 0x55, 0x00, 0xe5, 0x01, 0x00, 0xba, 0xc7,
];

/// ASCII prefix of the connection handshake datagram. The two bytes that
/// follow it hold the local video port, little-endian.
pub const CONN_REQ_PREFIX: &[u8] = b"conn_req:";

/// One joystick sample in the protocol's normalized float domain.
///
/// All five axes are nominally in `[-1.0, 1.0]` with 0.0 centered.
/// Values outside that range are not clamped anywhere in the codec; they
/// simply quantize to out-of-nominal wire values, matching what the
/// firmware receives from a miscalibrated official app.
///
/// `aux` is the fifth packed axis. Its function is unknown (possibly
/// camera control); the official app always sends it centered.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisSnapshot {
    /// Roll: right stick X. Positive is right.
    pub roll: f32,
    /// Pitch: right stick Y. Positive is forward.
    pub pitch: f32,
    /// Throttle: left stick Y. Positive is up.
    pub throttle: f32,
    /// Yaw: left stick X. Positive is clockwise.
    pub yaw: f32,
    /// Reserved fifth axis, sent centered.
    pub aux: f32,
}

impl AxisSnapshot {
    /// A centered snapshot (hover).
    #[must_use]
    pub fn centered() -> Self {
        Self::default()
    }
}

/// Wall-clock components embedded in every control frame.
///
/// The firmware's use of these fields is unconfirmed, but the truncation
/// is preserved exactly as the official app encodes it: hour, minute and
/// second as single bytes, millisecond split into a low and a high byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTime {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub millis: u16,
}

impl FrameTime {
    /// Capture the current local wall clock.
    #[must_use]
    pub fn now() -> Self {
        use chrono::Timelike;

        let now = chrono::Local::now();
        Self {
            hour: now.hour() as u8,
            minute: now.minute() as u8,
            second: now.second() as u8,
            millis: (now.timestamp_subsec_millis() % 1000) as u16,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_layout() {
        assert_eq!(CONTROL_FRAME_TEMPLATE.len(), CONTROL_FRAME_LEN);
        assert_eq!(CONTROL_FRAME_TEMPLATE[0], FRAME_MARKER);
        assert_eq!(AXIS_FIELD_OFFSET + AXIS_FIELD_LEN, TIMESTAMP_OFFSET);
        // Timestamp plus the two trailer bytes fill the rest of the frame.
        assert_eq!(TIMESTAMP_OFFSET + 5 + 2, CONTROL_FRAME_LEN);
    }

    #[test]
    fn test_command_frames_start_with_marker() {
        assert_eq!(TAKEOFF_FRAME[0], FRAME_MARKER);
        assert_eq!(LAND_FRAME[0], FRAME_MARKER);
    }

    #[test]
    fn test_axis_snapshot_default_is_centered() {
        let axes = AxisSnapshot::centered();
        assert_eq!(axes.roll, 0.0);
        assert_eq!(axes.pitch, 0.0);
        assert_eq!(axes.throttle, 0.0);
        assert_eq!(axes.yaw, 0.0);
        assert_eq!(axes.aux, 0.0);
    }

    #[test]
    fn test_frame_time_now_in_range() {
        let time = FrameTime::now();
        assert!(time.hour < 24);
        assert!(time.minute < 60);
        assert!(time.second < 60);
        assert!(time.millis < 1000);
    }
}
