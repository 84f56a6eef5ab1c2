//! Threshold secret sharing over GF(2^8).
//!
//! Shamir's scheme applied byte-wise to a mnemonic secret: splitting,
//! recovery via Lagrange interpolation, deterministic coefficient
//! derivation for reproducible sessions, and share commitments for
//! out-of-band verification.
//!
//! # Components
//! - `share`: the share value type and its display form.
//! - `coefficients`: HMAC-based coefficient rows.
//! - `split`: threshold splitting and the post-sharing self-test.
//! - `reconstruct`: Lagrange interpolation at x = 0.
//! - `commitment`: SHA-256 share fingerprints.
//!
//! # Security
//! - All field arithmetic is constant-time (see `core::gf256`).
//! - Share values, coefficient rows and reconstructed secrets are zeroized.
//! - Commitment comparison is constant-time.

pub mod coefficients;
pub mod commitment;
pub mod reconstruct;
pub mod share;
pub mod split;

use core::fmt;

/// Errors for sharing and recovery operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharingError {
    /// Share index outside 1..=255.
    InvalidShareIndex,
    /// Share value is empty.
    EmptyShare,
    /// Threshold configuration error (t = 0, n = 0 or t > n).
    InvalidThreshold,
    /// Secret or share value length is not 16, 20, 24, 28 or 32 bytes.
    InvalidSecretLength,
    /// Fewer shares than the stated threshold.
    InsufficientShares,
    /// Two shares carry the same index.
    DuplicateShareIndex,
    /// Share value lengths differ within one recovery set.
    ShareLengthMismatch,
    /// A supplied commitment does not match the recomputed one.
    CommitmentMismatch,
    /// A commitment string is not 64 hex characters.
    InvalidCommitment,
    /// The randomness source failed.
    RngFailure,
    /// The post-sharing self-test could not recover the secret. This is an
    /// internal error and indicates a bug, never bad user input.
    SelftestFailed,
}

impl fmt::Display for SharingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SharingError::InvalidShareIndex => write!(f, "share index out of the range 1..=255"),
            SharingError::EmptyShare => write!(f, "share value is empty"),
            SharingError::InvalidThreshold => write!(f, "invalid threshold configuration"),
            SharingError::InvalidSecretLength => {
                write!(f, "secret length must be 16, 20, 24, 28 or 32 bytes")
            }
            SharingError::InsufficientShares => write!(f, "not enough shares for the threshold"),
            SharingError::DuplicateShareIndex => write!(f, "duplicate share indices"),
            SharingError::ShareLengthMismatch => write!(f, "inconsistent share lengths"),
            SharingError::CommitmentMismatch => write!(f, "share commitment mismatch"),
            SharingError::InvalidCommitment => write!(f, "malformed commitment"),
            SharingError::RngFailure => write!(f, "random number generator failure"),
            SharingError::SelftestFailed => write!(f, "sharing self-test failed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SharingError {}
