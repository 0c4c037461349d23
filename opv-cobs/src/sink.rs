/// Destination for decoded packets.
///
/// Called synchronously from within [`CobsDeframer::push`](crate::CobsDeframer::push),
/// once per completed packet, in stream order. `bytes` is only valid for the
/// duration of the call: the deframer reuses its internal buffer immediately
/// afterwards, so an implementation that needs the data beyond `accept`
/// returning must copy it.
pub trait PacketSink {
    /// Handle one decoded packet. `bytes.len() == length` and
    /// `20 <= length <= 1500`.
    fn accept(&mut self, bytes: &[u8], length: usize);
}

impl<F> PacketSink for F
where
    F: FnMut(&[u8], usize),
{
    fn accept(&mut self, bytes: &[u8], length: usize) {
        self(bytes, length)
    }
}
