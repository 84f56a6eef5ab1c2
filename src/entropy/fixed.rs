//! Caller-provided entropy source.
//!
//! Replays a pre-loaded byte buffer through a read cursor and fails once it
//! runs dry. This is the deterministic injection point for tests, and the
//! way an air-gapped operator feeds in randomness collected elsewhere. The
//! buffer may hold future key material, so it is wiped on drop.

extern crate alloc;
use alloc::vec::Vec;

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{EntropyError, EntropySource};

/// Source that replays a fixed byte buffer, front to back.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct FixedSource {
    buffer: Vec<u8>,
    #[zeroize(skip)]
    cursor: usize,
}

impl FixedSource {
    /// Creates a source serving exactly the given bytes.
    pub fn new(bytes: &[u8]) -> Self {
        Self {
            buffer: bytes.to_vec(),
            cursor: 0,
        }
    }

    /// Appends more bytes behind whatever is still unread.
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.cursor
    }
}

impl EntropySource for FixedSource {
    fn name(&self) -> &'static str {
        "Fixed"
    }

    fn fill(&mut self, dest: &mut [u8]) -> Result<(), EntropyError> {
        // All or nothing: a partial read would silently weaken whatever the
        // caller builds from it.
        if self.remaining() < dest.len() {
            return Err(EntropyError::Exhausted);
        }
        let start = self.cursor;
        self.cursor += dest.len();
        dest.copy_from_slice(&self.buffer[start..self.cursor]);
        Ok(())
    }
}
