//! # Inbound Channel Diagnostics
//!
//! Receive loops and logging for everything the drone sends back.
//!
//! Only command-id classification is implemented; payloads past the id
//! are rendered as hex for the log and otherwise ignored. Video metadata
//! payloads are received and logged by size only.
//!
//! Each loop contains its own failures: a receive error is logged and the
//! loop keeps going, so one channel can never take down another.

use tracing::{debug, info, trace, warn};

use crate::protocol::commands::{command_id, command_label, is_high_rate};
use crate::transport::{RawDatagram, UdpChannel, UdpLink};

/// What a listener channel carries, which decides how its datagrams are
/// reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    /// Command acknowledgements; payloads are ASCII-ish and logged as text.
    ControlAck,
    /// Video metadata; payloads are opaque and logged by size only.
    Video,
    /// Telemetry; classified by command id.
    Telemetry,
}

impl ChannelKind {
    /// Short channel name used in log lines.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            ChannelKind::ControlAck => "control-ack",
            ChannelKind::Video => "video",
            ChannelKind::Telemetry => "telemetry",
        }
    }
}

/// Run the receive loop for one listener channel. Never returns; receive
/// failures are logged and the loop continues.
pub async fn run_channel_monitor(channel: UdpChannel, kind: ChannelKind) {
    loop {
        match channel.recv().await {
            Ok(dgram) => report_datagram(kind, &dgram),
            Err(e) => warn!(channel = kind.name(), "receive failed: {e}"),
        }
    }
}

/// Run the receive loop for the command link itself. The drone mirrors
/// telemetry onto this flow, so datagrams are classified by command id.
pub async fn run_link_monitor(link: UdpLink) {
    loop {
        match link.recv().await {
            Ok(dgram) => report_datagram(ChannelKind::Telemetry, &dgram),
            Err(e) => warn!(channel = "command-link", "receive failed: {e}"),
        }
    }
}

fn report_datagram(kind: ChannelKind, dgram: &RawDatagram) {
    match kind {
        ChannelKind::ControlAck => {
            info!(channel = kind.name(), "{}", dgram.text);
        }
        ChannelKind::Video => {
            debug!(channel = kind.name(), "payload of {} bytes", dgram.bytes.len());
        }
        ChannelKind::Telemetry => classify(kind, dgram),
    }
}

fn classify(kind: ChannelKind, dgram: &RawDatagram) {
    match command_id(&dgram.bytes) {
        Ok(id) if is_high_rate(id) => {
            trace!(channel = kind.name(), id, label = command_label(id), "update");
        }
        Ok(id) => {
            info!(
                channel = kind.name(),
                id,
                label = command_label(id),
                "cmd 0x{id:04x} {}",
                payload_preview(dgram)
            );
        }
        Err(e) => {
            // Runt datagram; rejected before the id field was touched.
            debug!(channel = kind.name(), "{e}");
        }
    }
}

/// Hex rendering of payload bytes 9..39, the window where every known
/// command keeps its interesting fields.
fn payload_preview(dgram: &RawDatagram) -> String {
    dgram
        .bytes
        .iter()
        .skip(9)
        .take(30)
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}
