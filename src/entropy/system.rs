//! Operating system entropy source.

use rand_core::{OsRng, RngCore};

use super::{EntropyError, EntropySource};

/// Source backed by the operating system CSPRNG.
pub struct SystemSource;

impl SystemSource {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EntropySource for SystemSource {
    fn name(&self) -> &'static str {
        "System"
    }

    fn fill(&mut self, dest: &mut [u8]) -> Result<(), EntropyError> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|_| EntropyError::CollectionFailed)
    }
}
