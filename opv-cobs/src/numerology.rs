//! OPV wire-format constants.
//!
//! These mirror the reference `Numerology.h`: a handful of interdependent
//! sizes that describe how an Opulent Voice frame is built up from an IP
//! datagram wrapped in UDP, RTP, and COBS framing around an Opus voice
//! packet. [`CobsDeframer`](crate::CobsDeframer) only actually depends on
//! [`IP_MTU`], [`MIN_PACKET_LEN`], [`COBS_RUN_MAX`] and
//! [`COBS_RUN_SENTINEL`]; the rest exist so callers (demultiplexers, frame
//! assemblers) don't have to invent their own copies of the same numbers.

/// Maximum decoded packet length the deframer will hand to a sink.
pub const IP_MTU: usize = 1500;

/// Smallest decoded packet the deframer will hand to a sink (a bare IPv4 header).
pub const MIN_PACKET_LEN: usize = 20;

/// Longest run of literal bytes between two COBS code bytes.
pub const COBS_RUN_MAX: u8 = 254;

/// Code byte value meaning "a full 254-byte run, no implicit trailing zero".
pub const COBS_RUN_SENTINEL: u8 = 0xFF;

/// IPv4 header size in bytes.
pub const IP_HEADER_BYTES: usize = 20;
/// UDP header size in bytes.
pub const UDP_HEADER_BYTES: usize = 8;
/// RTP header size in bytes.
pub const RTP_HEADER_BYTES: usize = 12;
/// COBS overhead: one code byte per voice frame.
pub const COBS_OVERHEAD_BYTES: usize = 1;

/// Bytes in one encoded 20ms Opus frame.
pub const OPUS_FRAME_SIZE_BYTES: usize = 40;
/// One OPV voice packet: two Opus frames plus one byte of framing overhead.
pub const OPUS_PACKET_SIZE_BYTES: usize = 1 + 2 * OPUS_FRAME_SIZE_BYTES;

/// PCM samples per second on the audio pipeline.
pub const AUDIO_SAMPLE_RATE: usize = 48_000;
/// PCM samples decoded per OPV voice frame (40ms of audio).
pub const AUDIO_SAMPLES_PER_OPV_FRAME: usize = AUDIO_SAMPLE_RATE * 4 / 100;

/// Radio frame payload size carrying one COBS-framed voice packet.
///
/// This is the normative value the physical-layer demodulator's frames are
/// sized to; it also happens to equal `IP_HEADER_BYTES + UDP_HEADER_BYTES +
/// RTP_HEADER_BYTES + COBS_OVERHEAD_BYTES + OPUS_PACKET_SIZE_BYTES` rounded
/// up to account for the frame header the physical layer adds on top, which
/// this crate does not otherwise model.
pub const FRAME_PAYLOAD_BYTES: usize = 213;

/// Worst-case buffer size for one decoded packet: MTU plus the small
/// headroom the deframer needs to append an implicit zero and a trailing
/// data byte in the same step before the overshoot check fires.
pub const PACKET_BUF_LEN: usize = IP_MTU + 3;
