//! # Tello Bridge Library
//!
//! Fly a Ryze Tello quadcopter with a gamepad over its binary UDP
//! protocol.
//!
//! This library provides the core functionality for encoding the Tello's
//! undocumented command frames (including both firmware checksums),
//! mapping gamepad input into the protocol's axis domain, and running the
//! concurrent UDP channels a flight session needs.

pub mod config;
pub mod control;
pub mod controller;
pub mod error;
pub mod protocol;
pub mod telemetry;
pub mod timing;
pub mod transport;
