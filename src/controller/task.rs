//! # Input Polling Task
//!
//! Pumps gamepad events and publishes mapped pilot input at a fixed
//! cadence through a single-slot `watch` channel.
//!
//! The channel is the seam between input hardware and the control loop:
//! the publisher never blocks on the reader, the reader always sees the
//! latest sample (or the previous one, at most one period stale), and
//! unread samples are simply superseded.

use tokio::sync::watch;
use tracing::{info, warn};

use super::gamepad::Gamepad;
use super::mapper::PadState;
use super::sticks::{PilotInput, StickMapper};
use crate::error::Result;
use crate::timing::Ticker;

/// Run the gamepad polling loop until the ticker is shut down.
///
/// Events are folded into a [`PadState`] as they arrive; on every tick
/// the mapped [`PilotInput`] is published, whether or not anything
/// changed. Read errors after startup are logged and the last known
/// state stays in effect.
pub async fn run_input_task(
    gamepad: Gamepad,
    mapper: StickMapper,
    input_tx: watch::Sender<PilotInput>,
    mut ticker: Ticker,
) -> Result<()> {
    let mut stream = gamepad.into_event_stream()?;
    let mut pad = PadState::default();

    loop {
        tokio::select! {
            event = stream.next_event() => match event {
                Ok(event) => pad.process_event(&event),
                Err(e) => warn!("gamepad read failed: {e}"),
            },
            running = ticker.tick() => {
                if !running {
                    break;
                }
                let _ = input_tx.send(mapper.map(&pad));
            }
        }
    }

    info!("input task stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // The task itself needs gamepad hardware; the publish contract is
    // exercised here through the same watch channel the task uses.
    #[tokio::test]
    async fn test_watch_reader_sees_latest_sample_only() {
        let (tx, rx) = watch::channel(PilotInput::default());

        let mapper = StickMapper::default();
        let mut pad = PadState::default();

        for value in [0, 64, 255] {
            pad.right_x = value;
            tx.send(mapper.map(&pad)).unwrap();
        }

        // Intermediate samples were dropped; only the newest remains.
        let latest = *rx.borrow();
        assert!(latest.axes.roll > 0.0);
    }

    #[tokio::test]
    async fn test_watch_publish_never_blocks_without_reader() {
        let (tx, rx) = watch::channel(PilotInput::default());
        drop(rx);

        // With the reader gone, send returns an error instead of
        // blocking; the task intentionally discards it.
        assert!(tx.send(PilotInput::default()).is_err());
    }
}
