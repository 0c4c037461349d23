//! Audio pipeline boundary.
//!
//! Opus decode and PCM playback are out of scope for this workspace.
//! [`AudioSink`] is the call boundary the IP/UDP/RTP demultiplexer hands
//! voice payloads to; the decoder hands PCM back to its caller rather than
//! writing it anywhere itself. [`SilentAudioSink`] is a placeholder that
//! returns a frame of silence for every voice packet, the same fallback the
//! reference implementation's noise blanker produces.

use opv_cobs::AUDIO_SAMPLES_PER_OPV_FRAME;

/// PCM samples for one decoded OPV voice frame.
pub type PcmFrame = [i16; AUDIO_SAMPLES_PER_OPV_FRAME];

/// Decodes one Opus-encoded OPV voice packet into PCM.
pub trait AudioSink {
    /// Decode `opus_payload` and hand the resulting PCM back to the caller.
    fn decode(&mut self, opus_payload: &[u8]) -> PcmFrame;
}

/// Placeholder audio sink with no Opus decoder wired in: it returns a frame
/// of silence for every voice packet it's handed.
#[derive(Debug, Default)]
pub struct SilentAudioSink {
    verbose: bool,
}

impl SilentAudioSink {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl AudioSink for SilentAudioSink {
    fn decode(&mut self, opus_payload: &[u8]) -> PcmFrame {
        if self.verbose {
            log::debug!(
                "opv-receiver: Opus [{} bytes] -> {} silent PCM samples (no decoder wired in)",
                opus_payload.len(),
                AUDIO_SAMPLES_PER_OPV_FRAME
            );
        }
        [0; AUDIO_SAMPLES_PER_OPV_FRAME]
    }
}
