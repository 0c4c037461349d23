use crate::numerology::{COBS_RUN_MAX, COBS_RUN_SENTINEL, IP_MTU, MIN_PACKET_LEN, PACKET_BUF_LEN};
use crate::sink::PacketSink;

/// Where the COBS parser currently is within one packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Next byte is a code byte, or inter-packet filler zero.
    AwaitingCode,
    /// Inside a run of literal data bytes; exhausting it emits an implicit zero.
    InRun,
    /// Like `InRun`, but exhausting it does *not* emit an implicit zero (the 0xFF case).
    InLongRun,
    /// A packet in progress exceeded the MTU; dropping bytes until the next delimiter.
    Discarding,
}

/// Stateful COBS frame-to-packet decoder.
///
/// Feed it raw radio-frame bytes with [`push`](Self::push) in stream order,
/// from as many calls as the input arrives in. Packet boundaries are
/// independent of frame boundaries: a packet may start and end mid-frame, or
/// straddle any number of `push` calls. Completed, length-valid packets are
/// delivered synchronously to the registered [`PacketSink`] before `push`
/// returns; corrupt or out-of-bounds packets are silently discarded.
///
/// ```
/// use opv_cobs::CobsDeframer;
///
/// let mut received = Vec::new();
/// let mut deframer = CobsDeframer::new();
/// deframer.set_sink(move |bytes: &[u8], _len: usize| received.push(bytes.to_vec()));
/// ```
pub struct CobsDeframer {
    phase: Phase,
    buffer: [u8; PACKET_BUF_LEN],
    filled: usize,
    remaining_in_run: usize,
    sink: Option<Box<dyn PacketSink>>,
}

impl CobsDeframer {
    /// Construct a deframer in its freshly-reset state, with no sink registered.
    pub fn new() -> Self {
        Self {
            phase: Phase::AwaitingCode,
            buffer: [0; PACKET_BUF_LEN],
            filled: 0,
            remaining_in_run: 0,
            sink: None,
        }
    }

    /// Return all decode state to initial values. Does not touch the sink
    /// registration. Idempotent.
    pub fn reset(&mut self) {
        self.phase = Phase::AwaitingCode;
        self.filled = 0;
        self.remaining_in_run = 0;
    }

    /// Register (or replace) the packet destination.
    ///
    /// If no sink is registered when a valid packet completes, the packet is
    /// dropped and a diagnostic is logged.
    pub fn set_sink(&mut self, sink: impl PacketSink + 'static) {
        self.sink = Some(Box::new(sink));
    }

    /// Consume `bytes` in order. Synchronous: any sink invocations for
    /// packets completed within this call happen before `push` returns.
    /// Never fails -- malformed input produces discards, not errors.
    pub fn push(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.push_byte(b);
        }
    }

    fn push_byte(&mut self, b: u8) {
        match self.phase {
            Phase::AwaitingCode => match b {
                0 => {
                    if self.filled > 0 {
                        self.finalize();
                    }
                }
                1 => {
                    self.append(0);
                    self.check_overshoot();
                }
                COBS_RUN_SENTINEL => {
                    self.remaining_in_run = COBS_RUN_MAX as usize;
                    self.phase = Phase::InLongRun;
                }
                code => {
                    self.remaining_in_run = (code - 1) as usize;
                    self.phase = Phase::InRun;
                }
            },
            Phase::InRun | Phase::InLongRun => {
                if b == 0 {
                    log::warn!("opv-cobs: unexpected zero mid-run, discarding partial packet");
                    self.reset();
                    return;
                }
                let was_long_run = self.phase == Phase::InLongRun;
                self.append(b);
                self.remaining_in_run -= 1;
                if self.remaining_in_run == 0 {
                    self.phase = Phase::AwaitingCode;
                    if !was_long_run {
                        self.append(0);
                    }
                }
                self.check_overshoot();
            }
            Phase::Discarding => {
                if b == 0 {
                    self.reset();
                }
            }
        }
    }

    fn append(&mut self, b: u8) {
        self.buffer[self.filled] = b;
        self.filled += 1;
    }

    fn check_overshoot(&mut self) {
        if self.filled > IP_MTU + 1 {
            log::warn!("opv-cobs: packet exceeded MTU, discarding until next delimiter");
            self.phase = Phase::Discarding;
        }
    }

    /// A delimiter arrived in `AwaitingCode` with `filled > 0`: strip the
    /// virtual trailing zero, deliver if in bounds, then reset.
    fn finalize(&mut self) {
        if self.filled > 0 && self.buffer[self.filled - 1] == 0 {
            self.filled -= 1;
        }
        if (MIN_PACKET_LEN..=IP_MTU).contains(&self.filled) {
            match &mut self.sink {
                Some(sink) => sink.accept(&self.buffer[..self.filled], self.filled),
                None => log::warn!("opv-cobs: decoded packet with no registered sink, dropping"),
            }
        } else {
            log::debug!(
                "opv-cobs: decoded packet length {} out of bounds, dropping",
                self.filled
            );
        }
        self.reset();
    }
}

impl Default for CobsDeframer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CobsDeframer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CobsDeframer")
            .field("phase", &self.phase)
            .field("filled", &self.filled)
            .field("remaining_in_run", &self.remaining_in_run)
            .field("has_sink", &self.sink.is_some())
            .finish()
    }
}
