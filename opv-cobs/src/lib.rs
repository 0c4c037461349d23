//! Stateful COBS frame-to-packet decoder for Opulent Voice (OPV).
//!
//! Sits between the physical-layer frame decoder and the IP-packet consumer
//! in an OPV receiver. The hard part is that packet boundaries are
//! independent of the fixed-size radio frame boundaries the demodulator
//! delivers payload in: [`CobsDeframer`] maintains decode state *across*
//! calls to [`CobsDeframer::push`], implements the OPV variant of
//! Consistent Overhead Byte Stuffing (with its 0x01/0xFF edge cases), and
//! recovers from corrupted input without losing subsequent well-formed
//! packets.
//!
//! This crate does not validate IP/UDP/RTP header fields, reassemble IP
//! fragments, buffer more than one packet in flight, or request
//! retransmission -- it is a pure byte-stream decoder with a push interface.

mod deframer;
mod numerology;
mod sink;

pub use deframer::CobsDeframer;
pub use numerology::{
    AUDIO_SAMPLES_PER_OPV_FRAME, AUDIO_SAMPLE_RATE, COBS_OVERHEAD_BYTES, COBS_RUN_MAX,
    COBS_RUN_SENTINEL, FRAME_PAYLOAD_BYTES, IP_HEADER_BYTES, IP_MTU, MIN_PACKET_LEN,
    OPUS_FRAME_SIZE_BYTES, OPUS_PACKET_SIZE_BYTES, PACKET_BUF_LEN, RTP_HEADER_BYTES,
    UDP_HEADER_BYTES,
};
pub use sink::PacketSink;
