//! Deterministic coefficient derivation.
//!
//! Every non-constant polynomial coefficient row is derived from the secret
//! itself with a keyed hash. Keying with the secret hides the rows from
//! anyone who does not already know it, and the fixed label separates this
//! use of HMAC from every other one in the toolkit.

extern crate alloc;
use alloc::vec::Vec;

use hmac::{Hmac, Mac};
use sha2::Sha256;
use zeroize::Zeroizing;

/// Domain-separation label, 26 ASCII bytes. Changing it invalidates every
/// deterministically generated share in existence, so it never changes.
pub const COEFFICIENT_LABEL: &[u8] = b"secret-sharing-coefficient";

/// Derives coefficient row `index` for the given secret and threshold.
///
/// Returns the first `secret.len()` bytes of
/// HMAC-SHA256(key = secret, msg = label || [threshold] || [index] || session).
/// An empty session string and an absent one are equivalent by construction.
/// Callers supply `index` in 1..threshold; nothing is validated here.
pub fn derive_coefficient(
    secret: &[u8],
    threshold: u8,
    index: u8,
    session: &str,
) -> Zeroizing<Vec<u8>> {
    let mut mac =
        <Hmac<Sha256> as Mac>::new_from_slice(secret).expect("HMAC accepts any key length");
    mac.update(COEFFICIENT_LABEL);
    mac.update(&[threshold, index]);
    mac.update(session.as_bytes());
    let digest = mac.finalize().into_bytes();
    Zeroizing::new(digest[..secret.len()].to_vec())
}
