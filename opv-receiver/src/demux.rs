//! IP/UDP/RTP demultiplexer.
//!
//! [`opv_cobs::CobsDeframer`] deliberately does not validate IP/UDP/RTP
//! header fields -- see its crate docs. This module is where that
//! validation actually happens: [`IpUdpRtpSink`] is the default
//! [`PacketSink`] the receiver registers, and it is a real implementation,
//! not a stand-in. It strips the three headers, hands the remaining Opus
//! payload to an [`AudioSink`], and logs (rather than panics on) anything
//! that doesn't parse as a well-formed IPv4/UDP/RTP packet.

use std::io::{self, Write};

use opv_cobs::{PacketSink, IP_HEADER_BYTES, RTP_HEADER_BYTES, UDP_HEADER_BYTES};

use crate::audio::AudioSink;

const IPV4_VERSION: u8 = 4;

/// Strips IPv4, UDP, and RTP headers from a decoded packet, decodes the
/// remaining Opus payload through an [`AudioSink`], and writes the returned
/// PCM to `out`.
pub struct IpUdpRtpSink<A: AudioSink, W: Write> {
    audio: A,
    out: W,
    packets_accepted: u64,
    packets_rejected: u64,
}

impl<A: AudioSink> IpUdpRtpSink<A, io::Stdout> {
    pub fn stdout(audio: A) -> Self {
        Self::new(audio, io::stdout())
    }
}

impl<A: AudioSink, W: Write> IpUdpRtpSink<A, W> {
    pub fn new(audio: A, out: W) -> Self {
        Self {
            audio,
            out,
            packets_accepted: 0,
            packets_rejected: 0,
        }
    }

    pub fn packets_accepted(&self) -> u64 {
        self.packets_accepted
    }

    pub fn packets_rejected(&self) -> u64 {
        self.packets_rejected
    }

    fn demux<'a>(&self, bytes: &'a [u8]) -> Option<&'a [u8]> {
        if bytes.len() < IP_HEADER_BYTES {
            log::warn!("opv-receiver: packet shorter than an IPv4 header ({} bytes)", bytes.len());
            return None;
        }
        let version = bytes[0] >> 4;
        if version != IPV4_VERSION {
            log::warn!("opv-receiver: unsupported IP version {version}, dropping packet");
            return None;
        }
        let ihl_words = bytes[0] & 0x0F;
        let ip_header_len = ihl_words as usize * 4;
        if ip_header_len < IP_HEADER_BYTES || bytes.len() < ip_header_len {
            log::warn!("opv-receiver: malformed IPv4 header length ({ihl_words} words), dropping packet");
            return None;
        }
        let protocol = bytes[9];
        const PROTO_UDP: u8 = 17;
        if protocol != PROTO_UDP {
            log::debug!("opv-receiver: non-UDP protocol {protocol}, dropping packet");
            return None;
        }

        let after_ip = &bytes[ip_header_len..];
        if after_ip.len() < UDP_HEADER_BYTES {
            log::warn!("opv-receiver: packet truncated before a full UDP header");
            return None;
        }
        let udp_len = u16::from_be_bytes([after_ip[4], after_ip[5]]) as usize;
        if udp_len < UDP_HEADER_BYTES || after_ip.len() < udp_len {
            log::warn!("opv-receiver: UDP length field {udp_len} inconsistent with packet size");
            return None;
        }

        let after_udp = &after_ip[UDP_HEADER_BYTES..udp_len];
        if after_udp.len() < RTP_HEADER_BYTES {
            log::warn!("opv-receiver: packet truncated before a full RTP header");
            return None;
        }
        let rtp_version = after_udp[0] >> 6;
        if rtp_version != 2 {
            log::warn!("opv-receiver: unsupported RTP version {rtp_version}, dropping packet");
            return None;
        }

        Some(&after_udp[RTP_HEADER_BYTES..])
    }
}

impl<A: AudioSink, W: Write> PacketSink for IpUdpRtpSink<A, W> {
    fn accept(&mut self, bytes: &[u8], length: usize) {
        match self.demux(&bytes[..length]) {
            Some(opus_payload) => {
                self.packets_accepted += 1;
                let pcm = self.audio.decode(opus_payload);
                let pcm_bytes: Vec<u8> = pcm.iter().flat_map(|s| s.to_le_bytes()).collect();
                if let Err(err) = self.out.write_all(&pcm_bytes) {
                    log::warn!("opv-receiver: failed writing PCM to stdout: {err}");
                }
            }
            None => {
                self.packets_rejected += 1;
            }
        }
    }
}
