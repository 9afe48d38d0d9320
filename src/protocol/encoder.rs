//! # Frame Encoder
//!
//! Builds the outbound command frames of the Tello binary protocol.
//!
//! Every builder returns a freshly owned buffer with both checksums
//! freshly stamped. Nothing here hands out a shared mutable frame, so a
//! trailer can never go stale between building and sending.

use super::crc::{stamp_fcs16, stamp_ucrc};
use super::frames::*;

/// Build a 22-byte joystick control frame from an axis snapshot and a
/// wall-clock sample.
///
/// Axes are quantized as `round(660.0 * axis + 1024.0)` and packed into
/// the 48-bit field at byte offset 9, 11 bits per axis, little-endian
/// across the whole field. Inputs outside `[-1.0, 1.0]` are accepted
/// unclamped.
///
/// # Examples
///
/// ```
/// use tello_bridge::protocol::encoder::control_frame;
/// use tello_bridge::protocol::frames::{AxisSnapshot, FrameTime, CONTROL_FRAME_LEN};
///
/// let time = FrameTime { hour: 12, minute: 0, second: 0, millis: 0 };
/// let frame = control_frame(&AxisSnapshot::centered(), time);
/// assert_eq!(frame.len(), CONTROL_FRAME_LEN);
/// assert_eq!(frame[0], 0xCC);
/// ```
#[must_use]
pub fn control_frame(axes: &AxisSnapshot, time: FrameTime) -> Vec<u8> {
    let mut frame = CONTROL_FRAME_TEMPLATE;

    let packed = pack_axes(axes);
    frame[AXIS_FIELD_OFFSET..AXIS_FIELD_OFFSET + AXIS_FIELD_LEN]
        .copy_from_slice(&packed.to_le_bytes()[..AXIS_FIELD_LEN]);

    frame[TIMESTAMP_OFFSET] = time.hour;
    frame[TIMESTAMP_OFFSET + 1] = time.minute;
    frame[TIMESTAMP_OFFSET + 2] = time.second;
    frame[TIMESTAMP_OFFSET + 3] = (time.millis & 0xFF) as u8;
    frame[TIMESTAMP_OFFSET + 4] = (time.millis >> 8) as u8;

    // Header checksum over the first 3 bytes into byte 3. The firmware
    // does not verify it, but the official app always sends it.
    stamp_ucrc(&mut frame[..4]);
    stamp_fcs16(&mut frame);

    frame.to_vec()
}

/// Pack the five axes into the 48-bit wire field.
///
/// Bit layout: axis 1 (roll) occupies bits 0-10, axis 2 (pitch) 11-21,
/// axis 3 (throttle) 22-32, axis 4 (yaw) 33-43, axis 5 bits 44 and up.
/// Only the low 48 bits reach the wire.
#[must_use]
pub fn pack_axes(axes: &AxisSnapshot) -> u64 {
    let roll = quantize_axis(axes.roll);
    let pitch = quantize_axis(axes.pitch);
    let throttle = quantize_axis(axes.throttle);
    let yaw = quantize_axis(axes.yaw);
    let aux = quantize_axis(axes.aux);

    ((roll & 0x7FF)
        | ((pitch & 0x7FF) << 11)
        | ((throttle & 0x7FF) << 22)
        | ((yaw & 0x7FF) << 33)
        | (aux << 44)) as u64
}

/// Quantize one normalized axis onto the wire scale: -1.0 maps to 364,
/// 0.0 to 1024, 1.0 to 1684.
#[must_use]
pub fn quantize_axis(axis: f32) -> i64 {
    (AXIS_SCALE * axis + AXIS_CENTER as f32).round() as i64
}

/// Build the connection handshake datagram: the ASCII `conn_req:` prefix
/// followed by `return_port` little-endian. The firmware replies with
/// `conn_ack` and starts streaming video metadata to that port.
///
/// # Examples
///
/// ```
/// use tello_bridge::protocol::encoder::handshake_frame;
///
/// assert_eq!(handshake_frame(6038), b"conn_req:\x96\x17");
/// ```
#[must_use]
pub fn handshake_frame(return_port: u16) -> Vec<u8> {
    let mut frame = Vec::with_capacity(CONN_REQ_PREFIX.len() + 2);
    frame.extend_from_slice(CONN_REQ_PREFIX);
    frame.extend_from_slice(&return_port.to_le_bytes());
    frame
}

/// Build a takeoff command frame as an owned buffer with the trailer
/// restamped.
#[must_use]
pub fn takeoff_frame() -> Vec<u8> {
    let mut frame = TAKEOFF_FRAME.to_vec();
    stamp_fcs16(&mut frame);
    frame
}

/// Build a land command frame as an owned buffer with the trailer
/// restamped.
#[must_use]
pub fn land_frame() -> Vec<u8> {
    let mut frame = LAND_FRAME.to_vec();
    stamp_fcs16(&mut frame);
    frame
}
