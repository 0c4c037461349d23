//! Bit-error-rate test boundary.
//!
//! PRBS sequence generation and bit-error counting are out of scope for this
//! workspace. [`BertValidator`] is the call boundary a receiver would wire a
//! real PRBS checker into when run in test mode; [`NullBertValidator`] is a
//! placeholder that accepts every frame unconditionally.

/// Validates a decoded packet against an expected PRBS sequence.
pub trait BertValidator {
    /// Inspect one decoded packet. Returns `true` if it matches the expected
    /// bit pattern, `false` on a detected bit error.
    fn validate(&mut self, packet: &[u8]) -> bool;
}

/// Placeholder validator with no PRBS sequence loaded: accepts everything.
#[derive(Debug, Default)]
pub struct NullBertValidator;

impl NullBertValidator {
    pub fn new() -> Self {
        Self
    }
}

impl BertValidator for NullBertValidator {
    fn validate(&mut self, _packet: &[u8]) -> bool {
        true
    }
}
