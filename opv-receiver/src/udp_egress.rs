//! UDP egress: forwards a decoded packet onward over the network.
//!
//! Grounded on the reference `UDPNetwork` helper: bind a local socket, send
//! every packet to one fixed destination address, log failures instead of
//! propagating them per-packet (a single lost UDP datagram on a lossy radio
//! path is not worth aborting the receive loop over).

use std::net::{SocketAddr, UdpSocket};

use opv_cobs::PacketSink;

use crate::error::ReceiverError;

pub struct UdpEgress {
    socket: UdpSocket,
    destination: SocketAddr,
}

impl UdpEgress {
    /// Bind an ephemeral local socket and configure `destination` as the
    /// fixed address every subsequent packet is sent to.
    pub fn new(destination: SocketAddr) -> Result<Self, ReceiverError> {
        let socket = UdpSocket::bind("0.0.0.0:0").map_err(ReceiverError::UdpSetup)?;
        log::debug!("opv-receiver: UDP egress bound, forwarding to {destination}");
        Ok(Self { socket, destination })
    }

    /// Send one decoded packet to the configured destination. Failures are
    /// logged, not propagated: losing one outbound packet should not stop
    /// the receive loop.
    pub fn send(&self, packet: &[u8]) {
        match self.socket.send_to(packet, self.destination) {
            Ok(sent) => log::trace!("opv-receiver: forwarded {sent} bytes to {}", self.destination),
            Err(err) => log::warn!("opv-receiver: UDP send to {} failed: {err}", self.destination),
        }
    }
}

/// A [`PacketSink`] that forwards every decoded packet to a [`UdpEgress`]
/// destination before handing it on to `inner`. This is how `--udp-dest`
/// is wired into the deframer's sink chain: the COBS decoder never talks to
/// `UdpEgress` directly, it only ever sees one registered `PacketSink`.
pub struct UdpEgressSink<S: PacketSink> {
    egress: UdpEgress,
    inner: S,
}

impl<S: PacketSink> UdpEgressSink<S> {
    pub fn new(egress: UdpEgress, inner: S) -> Self {
        Self { egress, inner }
    }
}

impl<S: PacketSink> PacketSink for UdpEgressSink<S> {
    fn accept(&mut self, bytes: &[u8], length: usize) {
        self.egress.send(&bytes[..length]);
        self.inner.accept(bytes, length);
    }
}
