//! # Configuration Module
//!
//! Runtime parameters for the bridge, grouped by concern.
//!
//! There is deliberately no configuration file and no flag parsing: the
//! drone's address, ports and protocol constants are fixed properties of
//! the firmware, and the tuning values match the official app. Everything
//! is still threaded through this struct so tests (and a future file
//! loader, if one ever becomes worthwhile) have a single seam.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone)]
pub struct Config {
    pub link: LinkConfig,
    pub control: ControlConfig,
    pub sticks: StickConfig,
}

/// Addresses and ports of the UDP channels
#[derive(Debug, Clone)]
pub struct LinkConfig {
    /// The drone's fixed address on its own access point.
    pub drone_ip: IpAddr,
    /// The drone's command port.
    pub command_port: u16,
    /// Local listener for command acknowledgements.
    pub ack_port: u16,
    /// Local listener for video metadata; announced in the handshake.
    pub video_port: u16,
    /// Local listener for the telemetry channel.
    pub telemetry_port: u16,
}

/// Task cadences and command timing
#[derive(Debug, Clone)]
pub struct ControlConfig {
    /// How often the gamepad snapshot is published.
    pub poll_period: Duration,
    /// How often a control frame is sent (~50 Hz).
    pub send_period: Duration,
    /// Re-arm interval for held takeoff/land buttons.
    pub command_guard: Duration,
}

/// Stick tuning
#[derive(Debug, Clone)]
pub struct StickConfig {
    pub deadband: f32,
    pub attitude_gain: f32,
    pub throttle_gain: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            link: LinkConfig {
                drone_ip: IpAddr::V4(Ipv4Addr::new(192, 168, 10, 1)),
                command_port: 8889,
                ack_port: 9000,
                video_port: 6138,
                telemetry_port: 6525,
            },
            control: ControlConfig {
                poll_period: Duration::from_millis(10),
                send_period: Duration::from_millis(20),
                command_guard: Duration::from_millis(250),
            },
            sticks: StickConfig {
                deadband: crate::controller::sticks::DEFAULT_DEADBAND,
                attitude_gain: crate::controller::sticks::DEFAULT_ATTITUDE_GAIN,
                throttle_gain: crate::controller::sticks::DEFAULT_THROTTLE_GAIN,
            },
        }
    }
}

impl Config {
    /// The drone's command endpoint.
    #[must_use]
    pub fn drone_addr(&self) -> SocketAddr {
        SocketAddr::new(self.link.drone_ip, self.link.command_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoints() {
        let config = Config::default();
        assert_eq!(config.drone_addr().to_string(), "192.168.10.1:8889");
        assert_eq!(config.link.ack_port, 9000);
        assert_eq!(config.link.video_port, 6138);
        assert_eq!(config.link.telemetry_port, 6525);
    }

    #[test]
    fn test_default_cadences() {
        let config = Config::default();
        assert_eq!(config.control.poll_period, Duration::from_millis(10));
        assert_eq!(config.control.send_period, Duration::from_millis(20));
        assert_eq!(config.control.command_guard, Duration::from_millis(250));
    }

    #[test]
    fn test_default_stick_tuning() {
        let config = Config::default();
        assert_eq!(config.sticks.deadband, 0.15);
        assert_eq!(config.sticks.attitude_gain, 0.5);
        assert_eq!(config.sticks.throttle_gain, 1.0);
    }
}
