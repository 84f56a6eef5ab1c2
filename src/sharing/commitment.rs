//! Share commitments.
//!
//! A commitment is the SHA-256 digest of a share's display form
//! `{index}: {words}`. Holders compare the 64-hex-character rendering
//! out-of-band; the exact input format means an unmodified `sha256sum`
//! invocation reproduces the value:
//!
//! ```text
//! printf '%s' '3: account blade ...' | sha256sum
//! ```

extern crate alloc;
use alloc::string::String;
use core::fmt;

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use super::SharingError;

/// A 32-byte SHA-256 fingerprint of a share or a bare phrase.
///
/// Equality comparison is constant-time; the digest itself is not secret,
/// but comparing it against attacker-supplied values must not leak how many
/// leading bytes matched.
#[derive(Clone, Copy)]
pub struct Commitment([u8; 32]);

impl Commitment {
    /// Commits to a share given its index and its phrase (space-separated
    /// words). The hashed string is `{decimal index}: {phrase}`, no trailing
    /// newline.
    pub fn for_share(index: u8, phrase: &str) -> Self {
        let display = alloc::format!("{}: {}", index, phrase);
        Self(Sha256::digest(display.as_bytes()).into())
    }

    /// Digest of a bare phrase, printed next to every generated or recovered
    /// phrase so two displays can be compared at a glance.
    pub fn of_phrase(phrase: &str) -> Self {
        Self(Sha256::digest(phrase.as_bytes()).into())
    }

    /// Raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex rendering, 64 characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parses the 64-character lowercase or uppercase hex rendering.
    pub fn from_hex(s: &str) -> Result<Self, SharingError> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s, &mut bytes).map_err(|_| SharingError::InvalidCommitment)?;
        Ok(Self(bytes))
    }
}

impl PartialEq for Commitment {
    fn eq(&self, other: &Self) -> bool {
        self.0.ct_eq(&other.0).into()
    }
}

impl Eq for Commitment {}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Commitment({})", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_commitment_exactness() {
        let c = Commitment::for_share(
            3,
            "account blade course knee monitor win chalk twice race cook tray report",
        );
        assert_eq!(
            c.to_hex(),
            "3252fb9ca80f46c928d64ce5f690d76fa848b410049b17cfb637a32f43660def"
        );
    }

    #[test]
    fn phrase_digest() {
        let c = Commitment::of_phrase(
            "raven maid copper question suit raise huge diary vast excess obtain fantasy",
        );
        assert_eq!(
            c.to_hex(),
            "666c6c6fd40c06936ed63593d6675bdc29db638851edcbc634a687fdf2c8e38c"
        );
    }

    #[test]
    fn hex_round_trip() {
        let c = Commitment::of_phrase("zoo");
        let parsed = Commitment::from_hex(&c.to_hex()).unwrap();
        assert_eq!(c, parsed);
        assert_eq!(Commitment::from_hex("abc"), Err(SharingError::InvalidCommitment));
        assert_eq!(
            Commitment::from_hex(&"zz".repeat(32)),
            Err(SharingError::InvalidCommitment)
        );
    }

    #[test]
    fn equality_distinguishes() {
        assert_ne!(Commitment::of_phrase("a"), Commitment::of_phrase("b"));
        assert_eq!(Commitment::of_phrase("a"), Commitment::of_phrase("a"));
    }
}
