//! Secret reconstruction from shares.
//!
//! Lagrange interpolation at x = 0 over GF(2^8) recovers the polynomial
//! intercepts, i.e. the secret bytes. All preconditions are checked, in a
//! fixed order, before any field arithmetic runs.
//!
//! # Security
//! - Constant-time `GF256` arithmetic; the basis values depend only on the
//!   public share indices.
//! - Commitment verification uses constant-time comparison.
//! - The Lagrange basis and the recovered secret are zeroized.

extern crate alloc;
use alloc::vec;
use alloc::vec::Vec;

use zeroize::Zeroizing;

use super::commitment::Commitment;
use super::share::Share;
use super::SharingError;
use crate::core::gf256::GF256;
use crate::mnemonic::codec::encode_bytes;
use crate::mnemonic::BYTE_LENGTHS;

/// Reconstructs the secret from the given shares.
///
/// When `threshold` is supplied, fewer shares than the threshold are
/// rejected. When it is not, interpolation runs over whatever was provided:
/// an undersized set then yields a deterministic but meaningless value, by
/// design; the caller opted out of the check and no attempt is made to
/// guess the threshold.
///
/// Precondition checks run in this order, each with its own error: index
/// range, index uniqueness, value length consistency and validity, share
/// count against the threshold.
pub fn reconstruct_secret(
    shares: &[Share],
    threshold: Option<u8>,
) -> Result<Zeroizing<Vec<u8>>, SharingError> {
    check_preconditions(shares, threshold)?;
    Ok(interpolate_at_zero(shares))
}

/// Like [`reconstruct_secret`], additionally verifying each share against a
/// commitment list before reconstruction.
///
/// Every share must have a matching `(index, commitment)` entry; a missing
/// entry counts as a mismatch. Comparison is constant-time.
pub fn reconstruct_verified(
    shares: &[Share],
    threshold: Option<u8>,
    commitments: &[(u8, Commitment)],
) -> Result<Zeroizing<Vec<u8>>, SharingError> {
    check_preconditions(shares, threshold)?;

    for share in shares {
        let expected = commitments
            .iter()
            .find(|(index, _)| *index == share.index())
            .map(|(_, commitment)| commitment)
            .ok_or(SharingError::CommitmentMismatch)?;
        // Lengths were validated above, so encoding cannot fail.
        let phrase =
            encode_bytes(share.value()).map_err(|_| SharingError::InvalidSecretLength)?;
        if Commitment::for_share(share.index(), &phrase) != *expected {
            return Err(SharingError::CommitmentMismatch);
        }
    }

    Ok(interpolate_at_zero(shares))
}

fn check_preconditions(shares: &[Share], threshold: Option<u8>) -> Result<(), SharingError> {
    if shares.is_empty() {
        return Err(SharingError::InsufficientShares);
    }

    // 1. Index range. `Share::new` already enforces this; re-checking keeps
    //    the engine safe against hand-built values.
    for share in shares {
        if share.index() == 0 {
            return Err(SharingError::InvalidShareIndex);
        }
    }

    // 2. Index uniqueness, O(n) via a seen table.
    let mut seen = [false; 256];
    for share in shares {
        let idx = share.index() as usize;
        if seen[idx] {
            return Err(SharingError::DuplicateShareIndex);
        }
        seen[idx] = true;
    }

    // 3. Length consistency and validity.
    let share_len = shares[0].value().len();
    for share in shares {
        if share.value().len() != share_len {
            return Err(SharingError::ShareLengthMismatch);
        }
    }
    if !BYTE_LENGTHS.contains(&share_len) {
        return Err(SharingError::InvalidSecretLength);
    }

    // 4. Share count against the caller-supplied threshold.
    if let Some(t) = threshold {
        if shares.len() < t as usize {
            return Err(SharingError::InsufficientShares);
        }
    }

    Ok(())
}

/// The Lagrange basis evaluated at x = 0 for the given evaluation points.
///
/// The weight of point j is the product over every other point of
/// other / (other - here); in characteristic 2 that subtraction is the same
/// XOR as addition. Distinct nonzero points keep every term's denominator
/// nonzero, so the inverse is never requested for zero.
fn basis_at_zero(points: &[GF256]) -> Zeroizing<Vec<GF256>> {
    let mut weights = Zeroizing::new(Vec::with_capacity(points.len()));
    for (j, &here) in points.iter().enumerate() {
        let mut weight = GF256(1);
        for (m, &other) in points.iter().enumerate() {
            if m != j {
                weight *= other * (other + here).inv();
            }
        }
        weights.push(weight);
    }
    weights
}

/// Lagrange interpolation at x = 0 over all provided shares.
///
/// The basis depends only on the public indices, so it is computed once and
/// reused across every byte position of the secret.
fn interpolate_at_zero(shares: &[Share]) -> Zeroizing<Vec<u8>> {
    let points: Vec<GF256> = shares.iter().map(|s| GF256(s.index())).collect();
    let weights = basis_at_zero(&points);

    let mut secret = Zeroizing::new(vec![0u8; shares[0].value().len()]);
    for (position, byte) in secret.iter_mut().enumerate() {
        let mut acc = GF256(0);
        for (share, &weight) in shares.iter().zip(weights.iter()) {
            acc += GF256(share.value()[position]) * weight;
        }
        *byte = acc.0;
    }

    secret
}
