//! # Control Loop
//!
//! The outbound side of the bridge: a small state machine that performs
//! the connection handshake once and then streams joystick control
//! frames at a fixed cadence, interleaving discrete takeoff/land frames
//! when the pilot asks for them.
//!
//! The protocol is fire-and-forget throughout. The handshake is not
//! acknowledged before streaming starts, sends are never retried, and a
//! failed send only produces a log line; the next tick sends a fresh
//! frame anyway.

use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::controller::sticks::PilotInput;
use crate::error::Result;
use crate::protocol::encoder::{control_frame, handshake_frame, land_frame, takeoff_frame};
use crate::protocol::frames::FrameTime;
use crate::timing::Ticker;
use crate::transport::UdpLink;

/// Minimum spacing between two discrete command sends while the button
/// is held.
pub const DEFAULT_COMMAND_GUARD: Duration = Duration::from_millis(250);

/// Connection state of the control loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    /// Nothing sent yet.
    Idle,
    /// Handshake sent.
    Connected,
    /// Streaming control frames. There is no terminal state other than
    /// process exit.
    Streaming,
}

/// Periodic control-frame sender.
pub struct ControlLoop {
    link: UdpLink,
    input: watch::Receiver<PilotInput>,
    state: LinkState,
    video_port: u16,
    command_guard: Duration,
    last_takeoff: Option<Instant>,
    last_land: Option<Instant>,
}

impl ControlLoop {
    /// Create a control loop over an established link.
    ///
    /// `video_port` is announced in the handshake so the firmware knows
    /// where to stream video metadata.
    #[must_use]
    pub fn new(link: UdpLink, input: watch::Receiver<PilotInput>, video_port: u16) -> Self {
        Self {
            link,
            input,
            state: LinkState::Idle,
            video_port,
            command_guard: DEFAULT_COMMAND_GUARD,
            last_takeoff: None,
            last_land: None,
        }
    }

    /// Override the discrete-command guard interval (tests use a short
    /// one).
    #[must_use]
    pub fn with_command_guard(mut self, guard: Duration) -> Self {
        self.command_guard = guard;
        self
    }

    /// Current connection state.
    #[must_use]
    pub fn state(&self) -> LinkState {
        self.state
    }

    /// Run until the ticker is shut down.
    pub async fn run(mut self, mut ticker: Ticker) -> Result<()> {
        self.establish().await;

        while ticker.tick().await {
            self.on_tick().await;
        }

        info!("control loop stopped");
        Ok(())
    }

    /// Send the handshake and move straight to streaming; the firmware's
    /// conn_ack is observed by the receive loops, not waited for here.
    async fn establish(&mut self) {
        let frame = handshake_frame(self.video_port);
        match self.link.send(&frame).await {
            Ok(()) => info!(
                "handshake sent to {} (video port {})",
                self.link.peer(),
                self.video_port
            ),
            Err(e) => warn!("handshake send failed: {e}"),
        }
        self.state = LinkState::Connected;
        // No acknowledgment wait before streaming starts.
        self.state = LinkState::Streaming;
    }

    async fn on_tick(&mut self) {
        let input = *self.input.borrow();

        let frame = control_frame(&input.axes, FrameTime::now());
        if let Err(e) = self.link.send(&frame).await {
            warn!("control frame send failed: {e}");
        }

        if input.takeoff && guard_elapsed(self.last_takeoff, self.command_guard) {
            debug!("takeoff requested");
            if let Err(e) = self.link.send(&takeoff_frame()).await {
                warn!("takeoff send failed: {e}");
            }
            self.last_takeoff = Some(Instant::now());
        }

        if input.land && guard_elapsed(self.last_land, self.command_guard) {
            debug!("land requested");
            if let Err(e) = self.link.send(&land_frame()).await {
                warn!("land send failed: {e}");
            }
            self.last_land = Some(Instant::now());
        }
    }
}

fn guard_elapsed(last: Option<Instant>, guard: Duration) -> bool {
    last.map_or(true, |sent| sent.elapsed() >= guard)
}
