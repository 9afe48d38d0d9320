//! # Command Id Extraction and Naming
//!
//! Inbound control-ack and telemetry datagrams carry a 16-bit command id
//! at bytes 5..7 (little-endian). Only the classification is handled
//! here; payload decoding past the id is out of scope and payloads are
//! surfaced as hex for diagnostics.

use crate::error::{Result, TelloBridgeError};

/// Minimum datagram length that can carry a command id.
pub const MIN_COMMAND_DATAGRAM_LEN: usize = 7;

/// Byte offset of the little-endian command id field.
pub const COMMAND_ID_OFFSET: usize = 5;

/// Command id of the takeoff acknowledgement.
pub const CMD_TAKEOFF: u16 = 0x0054;

/// Command id of the land acknowledgement.
pub const CMD_LAND: u16 = 0x0055;

/// Command ids the firmware emits many times per second; reported at
/// trace level only so the log stays readable.
pub const HIGH_RATE_IDS: &[u16] = &[26, 53, 86, 4177, 4178];

/// Extract the command id from an inbound datagram.
///
/// # Errors
///
/// Returns [`TelloBridgeError::MalformedDatagram`] for datagrams shorter
/// than seven bytes. The firmware does emit such runts, and indexing the
/// id field without this guard would panic.
///
/// # Examples
///
/// ```
/// use tello_bridge::protocol::commands::command_id;
///
/// let datagram = [0x00, 0x00, 0x00, 0x00, 0x00, 0x1a, 0x00, 0x99];
/// assert_eq!(command_id(&datagram).unwrap(), 26);
/// assert!(command_id(&[0x00, 0x01, 0x02]).is_err());
/// ```
pub fn command_id(payload: &[u8]) -> Result<u16> {
    if payload.len() < MIN_COMMAND_DATAGRAM_LEN {
        return Err(TelloBridgeError::MalformedDatagram(payload.len()));
    }

    Ok(u16::from_le_bytes([
        payload[COMMAND_ID_OFFSET],
        payload[COMMAND_ID_OFFSET + 1],
    ]))
}

/// Display label for a command id, for diagnostics only.
///
/// The mapping covers the ids identified so far; everything else reports
/// as "unknown".
#[must_use]
pub fn command_label(id: u16) -> &'static str {
    match id {
        // 2-byte payload: signal strength, disturb flag.
        26 => "Wifi",
        53 => "Light",
        86 => "FlyData",
        4176 => "Data",
        _ => "unknown",
    }
}

/// Whether this id belongs to the high-rate telemetry set.
#[must_use]
pub fn is_high_rate(id: u16) -> bool {
    HIGH_RATE_IDS.contains(&id)
}
