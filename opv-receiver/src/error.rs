/// Errors from the ambient glue around the core decoder: CLI argument
/// conflicts and UDP egress setup. The decoder itself never returns a
/// `Result` -- see [`opv_cobs::CobsDeframer`] for why.
#[derive(Debug, thiserror::Error)]
pub enum ReceiverError {
    /// More than one of `--verbose`, `--debug`, `--quiet` was given.
    #[error("only one of --quiet, --verbose or --debug may be chosen")]
    ConflictingVerbosity,
    /// Failed to bind or configure the UDP egress socket.
    #[error("UDP egress setup failed: {0}")]
    UdpSetup(#[from] std::io::Error),
}
