//! # Gamepad Device Module
//!
//! Gamepad detection and connection via the Linux evdev interface.
//!
//! Unlike a vendor-specific controller driver, detection is capability
//! based: any event device that reports a south face button (BTN_SOUTH)
//! and an absolute X axis is considered a usable gamepad. This covers
//! DualSense, DualShock, Xbox and most generic pads.

use evdev::{AbsoluteAxisType, Device, Key};
use std::path::Path;
use tracing::{debug, info};

use crate::error::{Result, TelloBridgeError};

/// Handle to an opened gamepad.
pub struct Gamepad {
    device: Device,
    device_path: String,
}

impl Gamepad {
    /// Detect and open the first available gamepad.
    ///
    /// Scans `/dev/input/event*` in path order so device selection is
    /// deterministic when several pads are connected.
    ///
    /// # Errors
    ///
    /// - `ControllerNotFound`: no event device looks like a gamepad
    /// - `Controller`: `/dev/input` missing or unreadable
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use tello_bridge::controller::gamepad::Gamepad;
    ///
    /// let pad = Gamepad::open()?;
    /// println!("using {}", pad.device_path());
    /// # Ok::<(), tello_bridge::error::TelloBridgeError>(())
    /// ```
    pub fn open() -> Result<Self> {
        let input_dir = Path::new("/dev/input");

        if !input_dir.exists() {
            return Err(TelloBridgeError::Controller(
                "/dev/input directory not found".to_string(),
            ));
        }

        let mut entries: Vec<_> = std::fs::read_dir(input_dir)
            .map_err(|e| {
                TelloBridgeError::Controller(format!("failed to read /dev/input: {e}"))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| {
                TelloBridgeError::Controller(format!("failed to read directory entry: {e}"))
            })?;

        entries.sort_by_key(|entry| entry.path());

        for entry in entries {
            let path = entry.path();

            match path.file_name() {
                Some(name) if name.to_string_lossy().starts_with("event") => {}
                _ => continue,
            }

            match Device::open(&path) {
                Ok(device) => {
                    let id = device.input_id();
                    debug!(
                        "found input device: {} (vendor: 0x{:04x}, product: 0x{:04x})",
                        path.display(),
                        id.vendor(),
                        id.product()
                    );

                    if Self::looks_like_gamepad(&device) {
                        let device_path = path.to_string_lossy().to_string();
                        info!(
                            "found gamepad {:?} at {}",
                            device.name().unwrap_or("unnamed"),
                            device_path
                        );

                        return Ok(Gamepad {
                            device,
                            device_path,
                        });
                    }
                }
                Err(e) => {
                    // Permission denied or similar; skip the device.
                    debug!("could not open {}: {}", path.display(), e);
                }
            }
        }

        Err(TelloBridgeError::ControllerNotFound)
    }

    /// A gamepad must expose at least one face button and an analog X
    /// axis. Keyboards, mice and sensor devices fail one or both.
    fn looks_like_gamepad(device: &Device) -> bool {
        let has_face_button = device
            .supported_keys()
            .map_or(false, |keys| keys.contains(Key::BTN_SOUTH));
        let has_stick = device
            .supported_absolute_axes()
            .map_or(false, |axes| axes.contains(AbsoluteAxisType::ABS_X));

        has_face_button && has_stick
    }

    /// Get the `/dev/input/eventX` path this gamepad was opened from.
    pub fn device_path(&self) -> &str {
        &self.device_path
    }

    /// Get the human-readable device name from evdev.
    pub fn name(&self) -> Option<&str> {
        self.device.name()
    }

    /// Convert into an async event stream for use with the input task.
    ///
    /// # Errors
    ///
    /// Returns `Controller` error if the device cannot be registered with
    /// the reactor.
    pub fn into_event_stream(self) -> Result<evdev::EventStream> {
        self.device.into_event_stream().map_err(|e| {
            TelloBridgeError::Controller(format!("failed to start event stream: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Integration test - only runs with a real gamepad connected
    #[test]
    #[ignore]
    fn test_open_with_real_hardware() {
        let result = Gamepad::open();
        assert!(result.is_ok(), "should detect a connected gamepad");

        let pad = result.unwrap();
        assert!(pad.device_path().starts_with("/dev/input/event"));
        assert!(pad.name().is_some());
    }
}
