//! # UDP Transport Module
//!
//! Socket plumbing for the drone link: one connected client socket for
//! the command channel plus independent listener sockets for the inbound
//! channels (control-ack, video metadata, telemetry).
//!
//! This module handles:
//! - Binding listeners and connecting the client socket
//! - Suspending receive loops on socket readiness (no busy polling)
//! - Discarding zero-length datagrams without surfacing an error
//! - Fire-and-forget sends: no acknowledgment tracking, no retransmission
//!
//! Datagrams on different channels are processed independently and in no
//! global order; within one channel, arrival order is preserved.

use bytes::Bytes;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tracing::{debug, info};

use crate::error::Result;

/// Largest datagram the firmware is known to emit, with headroom.
const MAX_DATAGRAM_LEN: usize = 2048;

/// Immutable snapshot of one received UDP payload.
#[derive(Debug, Clone)]
pub struct RawDatagram {
    /// Remote endpoint the datagram arrived from.
    pub sender: SocketAddr,
    /// Raw payload bytes.
    pub bytes: Bytes,
    /// Best-effort text rendering of the payload, for the channels that
    /// speak ASCII (conn_ack, command replies).
    pub text: String,
}

impl RawDatagram {
    fn new(sender: SocketAddr, payload: &[u8]) -> Self {
        Self {
            sender,
            bytes: Bytes::copy_from_slice(payload),
            text: String::from_utf8_lossy(payload).into_owned(),
        }
    }
}

/// One inbound UDP channel, bound to a local port.
#[derive(Debug)]
pub struct UdpChannel {
    socket: UdpSocket,
}

impl UdpChannel {
    /// Bind a listener on the given local port (0 picks an ephemeral
    /// port, which the tests use).
    pub async fn bind(port: u16) -> Result<Self> {
        let socket = UdpSocket::bind(("0.0.0.0", port)).await?;
        info!("listening on udp/{}", socket.local_addr()?.port());
        Ok(Self { socket })
    }

    /// Local address the channel is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    /// Receive the next datagram, suspending until one arrives.
    ///
    /// Never resolves with an empty payload: zero-length datagrams are
    /// dropped and the wait continues.
    pub async fn recv(&self) -> Result<RawDatagram> {
        let mut buf = vec![0u8; MAX_DATAGRAM_LEN];
        loop {
            let (len, sender) = self.socket.recv_from(&mut buf).await?;
            if len == 0 {
                debug!("discarding zero-length datagram from {sender}");
                continue;
            }
            return Ok(RawDatagram::new(sender, &buf[..len]));
        }
    }
}

/// The connected client socket for the drone's command port.
///
/// Cheap to clone; clones share one socket, so the control loop, the
/// receive loop and the interactive console can all hold a handle.
#[derive(Debug, Clone)]
pub struct UdpLink {
    socket: Arc<UdpSocket>,
    peer: SocketAddr,
}

impl UdpLink {
    /// Bind an ephemeral local port and connect it to the drone.
    pub async fn connect(peer: SocketAddr) -> Result<Self> {
        let socket = UdpSocket::bind("0.0.0.0:0").await?;
        socket.connect(peer).await?;
        info!("command link connected to {peer}");
        Ok(Self {
            socket: Arc::new(socket),
            peer,
        })
    }

    /// Remote endpoint this link is connected to.
    pub fn peer(&self) -> SocketAddr {
        self.peer
    }

    /// Send one frame, fire-and-forget.
    pub async fn send(&self, frame: &[u8]) -> Result<()> {
        self.socket.send(frame).await?;
        Ok(())
    }

    /// Receive the next datagram from the drone, discarding zero-length
    /// payloads like [`UdpChannel::recv`].
    pub async fn recv(&self) -> Result<RawDatagram> {
        let mut buf = vec![0u8; MAX_DATAGRAM_LEN];
        loop {
            let (len, sender) = self.socket.recv_from(&mut buf).await?;
            if len == 0 {
                debug!("discarding zero-length datagram from {sender}");
                continue;
            }
            return Ok(RawDatagram::new(sender, &buf[..len]));
        }
    }
}
