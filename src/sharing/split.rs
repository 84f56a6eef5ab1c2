//! Threshold splitting.
//!
//! One polynomial of degree t-1 per secret byte: the constant term is the
//! secret byte, the remaining coefficients come from the coefficient rows.
//! Share i is the vector of evaluations at x = i.
//!
//! # Security
//! - Polynomial evaluation uses the constant-time `GF256` arithmetic.
//! - Coefficient rows are wiped after the shares are produced.
//! - Every sharing run is followed by a recovery self-test.

extern crate alloc;
use alloc::vec;
use alloc::vec::Vec;

use zeroize::Zeroizing;

use super::coefficients::derive_coefficient;
use super::reconstruct::reconstruct_secret;
use super::share::Share;
use super::SharingError;
use crate::core::gf256::{poly_eval, GF256};
use crate::entropy::EntropySource;
use crate::mnemonic::BYTE_LENGTHS;

/// How the non-constant coefficients are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharingMode<'a> {
    /// Coefficients are derived from the secret and masked with fresh
    /// randomness. Resharing the same secret yields an unrelated share set.
    Random,
    /// Coefficients are derived from the secret (and the session string)
    /// alone. Resharing with the same parameters reproduces the share set
    /// bit for bit; an absent session is equivalent to an empty one. Shares
    /// from different sessions are incompatible.
    Deterministic { session: Option<&'a str> },
}

/// Splits `secret` into `num_shares` shares with recovery threshold
/// `threshold`.
///
/// The secret must be 16, 20, 24, 28 or 32 bytes; `threshold` must lie in
/// 1..=`num_shares`. With a threshold of 1 every share equals the secret
/// byte-for-byte, and with `threshold == num_shares` only the full set
/// recovers; both degenerate choices are honored without complaint, the
/// caller decides whether to forbid them.
///
/// Share indices are 1..=`num_shares` in order.
pub fn split_secret<R: EntropySource + ?Sized>(
    secret: &[u8],
    num_shares: u8,
    threshold: u8,
    mode: SharingMode<'_>,
    rng: &mut R,
) -> Result<Vec<Share>, SharingError> {
    // Parameter validation happens before any cryptographic work.
    if !BYTE_LENGTHS.contains(&secret.len()) {
        return Err(SharingError::InvalidSecretLength);
    }
    if num_shares == 0 || threshold == 0 || threshold > num_shares {
        return Err(SharingError::InvalidThreshold);
    }

    // Coefficient rows c_1..c_{t-1}; the secret itself is row zero. In
    // random mode the derived row is XOR-masked with fresh randomness: the
    // result is uniform when the generator is sound, and still opaque to
    // outsiders when it is not.
    let mut rows: Vec<Zeroizing<Vec<u8>>> = Vec::with_capacity((threshold - 1) as usize);
    for j in 1..threshold {
        let row = match mode {
            SharingMode::Deterministic { session } => {
                derive_coefficient(secret, threshold, j, session.unwrap_or(""))
            }
            SharingMode::Random => {
                let mut row = derive_coefficient(secret, threshold, j, "");
                let mut mask = Zeroizing::new(vec![0u8; secret.len()]);
                rng.fill(&mut mask).map_err(|_| SharingError::RngFailure)?;
                for (r, m) in row.iter_mut().zip(mask.iter()) {
                    *r ^= m;
                }
                row
            }
        };
        rows.push(row);
    }

    let mut shares = Vec::with_capacity(num_shares as usize);
    for i in 1..=num_shares {
        shares.push(Share::new(i, vec![0u8; secret.len()])?);
    }

    // Evaluate the per-byte polynomial at every share index.
    let mut coeffs: Zeroizing<Vec<GF256>> =
        Zeroizing::new(Vec::with_capacity(threshold as usize));
    for byte_index in 0..secret.len() {
        coeffs.clear();
        coeffs.push(GF256(secret[byte_index]));
        for row in rows.iter() {
            coeffs.push(GF256(row[byte_index]));
        }
        for share in shares.iter_mut() {
            share.value[byte_index] = poly_eval(&coeffs, GF256(share.index)).0;
        }
    }

    selftest(secret, &shares, threshold)?;
    Ok(shares)
}

/// Verifies that the freshly produced shares actually recover the secret.
///
/// Checks consecutive windows of `threshold` shares, strided so that every
/// share participates in at least one reconstruction, plus the final
/// window. A failure here is an implementation bug, not bad input.
fn selftest(secret: &[u8], shares: &[Share], threshold: u8) -> Result<(), SharingError> {
    let t = threshold as usize;
    let last_start = shares.len() - t;

    let mut start = 0;
    loop {
        let subset = &shares[start..start + t];
        let recovered = reconstruct_secret(subset, Some(threshold))
            .map_err(|_| SharingError::SelftestFailed)?;
        if recovered.as_slice() != secret {
            return Err(SharingError::SelftestFailed);
        }
        if start == last_start {
            break;
        }
        // Stride by t so consecutive windows tile the share list; the final
        // window is clamped instead of skipped.
        start = (start + t).min(last_start);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::fixed::FixedSource;
    use crate::entropy::system::SystemSource;

    const SECRET: [u8; 16] = [
        0x0a, 0xf7, 0x39, 0x4e, 0xe5, 0xf3, 0xce, 0x97, 0xc6, 0x44, 0xed, 0x7d, 0x18, 0x5e,
        0x4e, 0xee,
    ];

    #[test]
    fn split_produces_ordered_indices() {
        let mut rng = SystemSource::new();
        let shares = split_secret(&SECRET, 5, 3, SharingMode::Random, &mut rng).unwrap();
        assert_eq!(shares.len(), 5);
        for (i, share) in shares.iter().enumerate() {
            assert_eq!(share.index(), (i + 1) as u8);
            assert_eq!(share.value().len(), SECRET.len());
        }
    }

    #[test]
    fn rejects_invalid_parameters() {
        let mut rng = SystemSource::new();
        assert_eq!(
            split_secret(&[1, 2, 3], 3, 2, SharingMode::Random, &mut rng),
            Err(SharingError::InvalidSecretLength)
        );
        assert_eq!(
            split_secret(&SECRET, 0, 0, SharingMode::Random, &mut rng),
            Err(SharingError::InvalidThreshold)
        );
        assert_eq!(
            split_secret(&SECRET, 3, 0, SharingMode::Random, &mut rng),
            Err(SharingError::InvalidThreshold)
        );
        assert_eq!(
            split_secret(&SECRET, 3, 4, SharingMode::Random, &mut rng),
            Err(SharingError::InvalidThreshold)
        );
    }

    #[test]
    fn threshold_one_duplicates_the_secret() {
        let mut rng = SystemSource::new();
        let shares = split_secret(&SECRET, 5, 1, SharingMode::Random, &mut rng).unwrap();
        assert_eq!(shares.len(), 5);
        for share in &shares {
            assert_eq!(share.value(), &SECRET);
        }
    }

    #[test]
    fn deterministic_mode_reproduces_bit_for_bit() {
        let mut rng = SystemSource::new();
        let mode = SharingMode::Deterministic { session: Some("alpha") };
        let first = split_secret(&SECRET, 4, 2, mode, &mut rng).unwrap();
        let second = split_secret(&SECRET, 4, 2, mode, &mut rng).unwrap();
        assert_eq!(first, second);

        // An absent session equals an empty one.
        let absent = split_secret(
            &SECRET,
            4,
            2,
            SharingMode::Deterministic { session: None },
            &mut rng,
        )
        .unwrap();
        let empty = split_secret(
            &SECRET,
            4,
            2,
            SharingMode::Deterministic { session: Some("") },
            &mut rng,
        )
        .unwrap();
        assert_eq!(absent, empty);
    }

    #[test]
    fn sessions_are_independent() {
        let mut rng = SystemSource::new();
        let a = split_secret(
            &SECRET,
            3,
            2,
            SharingMode::Deterministic { session: Some("A") },
            &mut rng,
        )
        .unwrap();
        let b = split_secret(
            &SECRET,
            3,
            2,
            SharingMode::Deterministic { session: Some("B") },
            &mut rng,
        )
        .unwrap();
        for (sa, sb) in a.iter().zip(b.iter()) {
            assert_ne!(sa.value(), sb.value());
        }
    }

    #[test]
    fn random_mode_consumes_the_injected_source() {
        // With an all-zero mask the "random" rows collapse to the derived
        // rows, so the output must match deterministic sharing with an
        // empty session.
        let mut zeros = FixedSource::new(&[0u8; 64]);
        let masked = split_secret(&SECRET, 3, 2, SharingMode::Random, &mut zeros).unwrap();
        let mut rng = SystemSource::new();
        let derived = split_secret(
            &SECRET,
            3,
            2,
            SharingMode::Deterministic { session: None },
            &mut rng,
        )
        .unwrap();
        assert_eq!(masked, derived);

        // An exhausted source surfaces as an RNG failure.
        let mut empty = FixedSource::new(&[]);
        assert_eq!(
            split_secret(&SECRET, 3, 2, SharingMode::Random, &mut empty),
            Err(SharingError::RngFailure)
        );
    }

    #[test]
    fn random_mode_differs_between_runs() {
        let mut rng = SystemSource::new();
        let first = split_secret(&SECRET, 3, 2, SharingMode::Random, &mut rng).unwrap();
        let second = split_secret(&SECRET, 3, 2, SharingMode::Random, &mut rng).unwrap();
        assert_ne!(first, second);
    }
}
