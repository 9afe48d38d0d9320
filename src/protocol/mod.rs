//! # Tello Binary Protocol
//!
//! Implementation of the Tello's undocumented UDP command protocol.
//!
//! This module handles:
//! - Joystick control frame encoding (five axes, 11-bit resolution)
//! - Discrete command frames (takeoff, land) and the connection handshake
//! - The two firmware checksum algorithms (16-bit trailer, 8-bit header)
//! - Command id extraction and naming for inbound datagrams

pub mod commands;
pub mod crc;
pub mod encoder;
pub mod frames;
