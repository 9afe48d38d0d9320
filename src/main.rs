//! # Tello Bridge
//!
//! Fly a Ryze Tello quadcopter with a gamepad over its binary UDP
//! protocol.
//!
//! Startup wires together the fixed set of tasks a flight session needs:
//! three listener receive loops (control-ack, video metadata, telemetry),
//! the receive loop on the command link itself, the gamepad polling task,
//! and the control-frame sender. The entry task then reads stdin lines
//! and forwards each verbatim to the drone, which is handy for poking at
//! the firmware's text commands; the literal line `quit` (or Ctrl+C)
//! exits.

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing::{error, info, warn};

mod config;
mod control;
mod controller;
mod error;
mod protocol;
mod telemetry;
mod timing;
mod transport;

use config::Config;
use control::ControlLoop;
use controller::gamepad::Gamepad;
use controller::sticks::{PilotInput, StickMapper};
use controller::task::run_input_task;
use telemetry::{run_channel_monitor, run_link_monitor, ChannelKind};
use timing::Ticker;
use transport::{UdpChannel, UdpLink};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Tello Bridge v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::default();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // A gamepad is the one thing we cannot fly without.
    let gamepad = Gamepad::open().map_err(|e| {
        error!("no usable input device: {e}");
        e
    })?;

    // Inbound listener channels, one receive loop each.
    for (port, kind) in [
        (config.link.ack_port, ChannelKind::ControlAck),
        (config.link.video_port, ChannelKind::Video),
        (config.link.telemetry_port, ChannelKind::Telemetry),
    ] {
        let channel = UdpChannel::bind(port).await?;
        tokio::spawn(run_channel_monitor(channel, kind));
    }

    // Command link to the drone, shared by sender, monitor and console.
    let link = UdpLink::connect(config.drone_addr()).await?;
    tokio::spawn(run_link_monitor(link.clone()));

    // Gamepad polling task publishing the latest input snapshot.
    let (input_tx, input_rx) = watch::channel(PilotInput::default());
    let mapper = StickMapper::new(
        config.sticks.deadband,
        config.sticks.attitude_gain,
        config.sticks.throttle_gain,
    );
    tokio::spawn(run_input_task(
        gamepad,
        mapper,
        input_tx,
        Ticker::new(config.control.poll_period, shutdown_rx.clone()),
    ));

    // Control loop: handshake once, then stream frames.
    let control = ControlLoop::new(link.clone(), input_rx, config.link.video_port)
        .with_command_guard(config.control.command_guard);
    tokio::spawn(control.run(Ticker::new(
        config.control.send_period,
        shutdown_rx.clone(),
    )));

    info!("type text commands for the drone; 'quit' or Ctrl+C exits");

    // Interactive loop on the entry task.
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    if line == "quit" {
                        break;
                    }
                    if let Err(e) = link.send(line.as_bytes()).await {
                        warn!("console send failed: {e}");
                    }
                }
                Ok(None) => break, // stdin closed
                Err(e) => {
                    warn!("stdin read failed: {e}");
                    break;
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!("received Ctrl+C, shutting down...");
                break;
            }
        }
    }

    // Stop the periodic tasks; the receive loops die with the process.
    let _ = shutdown_tx.send(true);

    Ok(())
}
