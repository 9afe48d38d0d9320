//! # Error Types
//!
//! Custom error types for Tello Bridge using `thiserror`.

use thiserror::Error;

/// Main error type for Tello Bridge
#[derive(Debug, Error)]
pub enum TelloBridgeError {
    /// Socket I/O failure on send or receive.
    ///
    /// Receive loops treat this as recoverable: log and keep going.
    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),

    /// No usable gamepad was found at startup. Fatal.
    #[error("no gamepad found under /dev/input")]
    ControllerNotFound,

    /// Input device errors after startup (disconnect, permission change)
    #[error("controller error: {0}")]
    Controller(String),

    /// Inbound datagram too short to carry a command id.
    ///
    /// The firmware occasionally emits runt datagrams; they must be
    /// rejected before the id field at bytes 5..7 is touched.
    #[error("malformed datagram: {0} bytes is too short for a command id")]
    MalformedDatagram(usize),
}

/// Result type alias for Tello Bridge
pub type Result<T> = std::result::Result<T, TelloBridgeError>;
