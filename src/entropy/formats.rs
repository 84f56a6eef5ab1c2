//! User-supplied entropy encoders.
//!
//! Each encoder folds an input string into one large nonnegative integer
//! and notes how many bits of entropy the input carries. The emitted secret
//! is the largest allowed size (128, 160, 192, 224 or 256 bits) not
//! exceeding that carry, taken from the least-significant end of the
//! integer; anything below 128 bits is refused outright.
//!
//! Alphabet sizes of 6 (dice) and 52 falling to 52-k (cards drawn without
//! replacement) are not powers of two, so the folding runs through a small
//! byte-wise accumulator instead of bit concatenation.

extern crate alloc;
use alloc::vec;
use alloc::vec::Vec;

use zeroize::Zeroizing;

use super::EntropyError;

/// Secret sizes the mnemonic codec accepts, in bits, ascending.
const TARGET_BITS: [usize; 5] = [128, 160, 192, 224, 256];

/// Card ranks in canonical order.
const RANKS: &[u8; 13] = b"A23456789TJQK";
/// Card suits in canonical order; the deck is AC..KC, AD..KD, AH..KH,
/// AS..KS.
const SUITS: &[u8; 4] = b"CDHS";

/// Little-endian base-256 accumulator: just enough unsigned big-integer
/// arithmetic for mixed-radix folding.
struct Accumulator {
    limbs: Zeroizing<Vec<u8>>,
}

impl Accumulator {
    fn zero() -> Self {
        Self {
            limbs: Zeroizing::new(Vec::new()),
        }
    }

    fn one() -> Self {
        Self {
            limbs: Zeroizing::new(vec![1]),
        }
    }

    /// self = self * base + digit. Requires digit < base <= 256.
    fn mul_add(&mut self, base: u16, digit: u16) {
        let mut carry = digit as u32;
        for limb in self.limbs.iter_mut() {
            let v = (*limb as u32) * (base as u32) + carry;
            *limb = v as u8;
            carry = v >> 8;
        }
        while carry > 0 {
            self.limbs.push(carry as u8);
            carry >>= 8;
        }
    }

    /// Number of bits in the value; zero has length zero.
    fn bit_len(&self) -> usize {
        for (i, limb) in self.limbs.iter().enumerate().rev() {
            if *limb != 0 {
                return i * 8 + (8 - limb.leading_zeros() as usize);
            }
        }
        0
    }

    /// The low `num_bytes` bytes of the value, big-endian, zero-padded.
    fn low_bytes_be(&self, num_bytes: usize) -> Zeroizing<Vec<u8>> {
        let mut out = Zeroizing::new(vec![0u8; num_bytes]);
        for i in 0..num_bytes {
            out[num_bytes - 1 - i] = self.limbs.get(i).copied().unwrap_or(0);
        }
        out
    }
}

/// Strips whitespace and the separators `,`, `-`, `:`.
fn significant_chars(input: &str) -> impl Iterator<Item = char> + '_ {
    input
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, ',' | '-' | ':'))
}

/// Picks the largest allowed secret size not exceeding `derived_bits`.
fn select_target_bits(derived_bits: usize) -> Result<usize, EntropyError> {
    let mut selected = None;
    for &bits in TARGET_BITS.iter() {
        if bits <= derived_bits {
            selected = Some(bits);
        }
    }
    selected.ok_or(EntropyError::InsufficientEntropy)
}

/// Folds a hex string; each digit carries 4 bits.
pub fn fold_hex(input: &str) -> Result<Zeroizing<Vec<u8>>, EntropyError> {
    let mut acc = Accumulator::zero();
    let mut digits = 0usize;
    for c in significant_chars(input) {
        let d = c.to_digit(16).ok_or(EntropyError::InvalidInput)?;
        acc.mul_add(16, d as u16);
        digits += 1;
    }
    let target = select_target_bits(digits * 4)?;
    Ok(acc.low_bytes_be(target / 8))
}

/// Folds a sequence of dice rolls in `1..=6`.
///
/// A roll of 6 counts as digit 0 (the usual dice-to-base-6 reading), so k
/// rolls span the range [0, 6^k) and carry floor(k * log2(6)) bits; 50
/// rolls are the minimum for a 12-word phrase.
pub fn fold_dice(input: &str) -> Result<Zeroizing<Vec<u8>>, EntropyError> {
    let mut acc = Accumulator::zero();
    let mut range = Accumulator::one();
    for c in significant_chars(input) {
        if !('1'..='6').contains(&c) {
            return Err(EntropyError::InvalidInput);
        }
        let digit = (c as u16 - '0' as u16) % 6;
        acc.mul_add(6, digit);
        range.mul_add(6, 0);
    }
    // The range 6^k is never a power of two (for k >= 1), so the floor of
    // its base-2 logarithm is one below its bit length.
    let target = select_target_bits(range.bit_len().saturating_sub(1))?;
    Ok(acc.low_bytes_be(target / 8))
}

/// Folds a sequence of playing cards drawn without replacement.
///
/// Tokens are rank (`A 2-9 T J Q K`) followed by suit (`C D H S`), case
/// insensitive. The i-th card contributes its position among the cards
/// still in the deck, a value in [0, 52-i), so k distinct cards span
/// 52!/(52-k)! outcomes and carry the floor of its base-2 logarithm in
/// bits; 25 cards are the minimum for a 12-word phrase. Duplicates are
/// rejected.
pub fn fold_cards(input: &str) -> Result<Zeroizing<Vec<u8>>, EntropyError> {
    let chars: Vec<char> = significant_chars(input)
        .map(|c| c.to_ascii_uppercase())
        .collect();
    if chars.len() % 2 != 0 {
        return Err(EntropyError::InvalidInput);
    }

    let mut drawn = [false; 52];
    let mut positions: Vec<u16> = Vec::with_capacity(chars.len() / 2);
    for token in chars.chunks(2) {
        let rank = RANKS
            .iter()
            .position(|&r| r as char == token[0])
            .ok_or(EntropyError::InvalidInput)?;
        let suit = SUITS
            .iter()
            .position(|&s| s as char == token[1])
            .ok_or(EntropyError::InvalidInput)?;
        let card = suit * 13 + rank;
        if drawn[card] {
            return Err(EntropyError::InvalidInput);
        }
        let position = drawn[..card].iter().filter(|d| !**d).count();
        drawn[card] = true;
        positions.push(position as u16);
    }

    // N = sum v_i * prod_{j<i}(52-j): the mixed radix folds from the last
    // card inward, radix 52-i at depth i.
    let num_cards = positions.len();
    let mut acc = Accumulator::zero();
    for (i, &position) in positions.iter().enumerate().rev() {
        acc.mul_add((52 - i) as u16, position);
    }
    let mut range = Accumulator::one();
    for i in 0..num_cards {
        range.mul_add((52 - i) as u16, 0);
    }

    let target = select_target_bits(range.bit_len().saturating_sub(1))?;
    Ok(acc.low_bytes_be(target / 8))
}

/// Parses a separated list of word indices, each in 0..=2047.
///
/// Only the tokens are validated here; whether the count makes a
/// well-formed phrase is for the caller to decide.
pub fn parse_word_indices(input: &str) -> Result<Vec<u16>, EntropyError> {
    let mut indices = Vec::new();
    for token in input.split(|c: char| c.is_whitespace() || matches!(c, ',' | '-' | ':')) {
        if token.is_empty() {
            continue;
        }
        let value: u16 = token.parse().map_err(|_| EntropyError::InvalidInput)?;
        if value > 2047 {
            return Err(EntropyError::InvalidInput);
        }
        indices.push(value);
    }
    Ok(indices)
}
