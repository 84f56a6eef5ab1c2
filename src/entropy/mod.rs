//! Entropy sources and user-supplied entropy encoders.
//!
//! Two concerns live here: the [`EntropySource`] capability the sharing and
//! generation code receives by parameter (never a process global, so tests
//! can inject deterministic sources), and the encoders that fold
//! user-provided randomness (hex, dice rolls, playing cards, word indices)
//! into secret bytes of an allowed size.

pub mod fixed;
pub mod formats;
pub mod system;

use core::fmt;

/// Error types for entropy collection and encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntropyError {
    /// Failed to collect entropy bytes from the source.
    CollectionFailed,
    /// Source is exhausted (fixed buffer ran dry).
    Exhausted,
    /// User input carries fewer than 128 bits of entropy.
    InsufficientEntropy,
    /// Malformed hex, dice, cards or indices token.
    InvalidInput,
}

impl fmt::Display for EntropyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntropyError::CollectionFailed => write!(f, "entropy collection failed"),
            EntropyError::Exhausted => write!(f, "entropy source exhausted"),
            EntropyError::InsufficientEntropy => {
                write!(f, "input provides fewer than 128 bits of entropy")
            }
            EntropyError::InvalidInput => write!(f, "malformed entropy input"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EntropyError {}

/// A byte-level randomness capability.
///
/// Passed by parameter wherever randomness is needed; the crate never
/// reaches for a process-global generator, so tests and air-gapped callers
/// can substitute their own source.
pub trait EntropySource {
    /// A short label for the source, for host applications to display.
    fn name(&self) -> &'static str;

    /// Fills all of `dest` with bytes from the source, or fails without
    /// handing out partial output.
    fn fill(&mut self, dest: &mut [u8]) -> Result<(), EntropyError>;
}
