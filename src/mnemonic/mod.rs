//! BIP39 mnemonic encoding and decoding.
//!
//! Bidirectional conversion between raw byte sequences and English mnemonic
//! phrases, including the SHA-256 checksum bits that BIP39 folds into the
//! final word.
//!
//! Correspondence between byte length, word count and checksum bits:
//!
//! | bytes | words | checksum bits |
//! |-------|-------|---------------|
//! |  16   |  12   |  4            |
//! |  20   |  15   |  5            |
//! |  24   |  18   |  6            |
//! |  28   |  21   |  7            |
//! |  32   |  24   |  8            |
//!
//! Only the official English wordlist is supported; other lists are poorly
//! handled by the surrounding ecosystem.

pub mod codec;
pub mod wordlist;

use core::fmt;

/// Byte lengths for which a mnemonic encoding exists.
pub const BYTE_LENGTHS: [usize; 5] = [16, 20, 24, 28, 32];

/// Word counts of well-formed phrases.
pub const WORD_COUNTS: [usize; 5] = [12, 15, 18, 21, 24];

/// Returns the entropy bit length of a phrase with `num_words` words, or
/// None for a count outside the allowed set.
pub fn bit_length(num_words: usize) -> Option<usize> {
    match num_words {
        12 => Some(128),
        15 => Some(160),
        18 => Some(192),
        21 => Some(224),
        24 => Some(256),
        _ => None,
    }
}

/// Errors for mnemonic encoding, decoding and share-string handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MnemonicError {
    /// A submitted word is not part of the English wordlist.
    WordNotInList,
    /// The embedded checksum bits disagree with the recomputed hash.
    ChecksumMismatch,
    /// Word count is not 12, 15, 18, 21 or 24.
    InvalidWordCount,
    /// Byte count is not 16, 20, 24, 28 or 32.
    InvalidByteCount,
    /// A share string is not of the form `{index}: {words}`.
    InvalidShareFormat,
    /// A share index is not a decimal integer in 1..=255.
    InvalidShareIndex,
}

impl fmt::Display for MnemonicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MnemonicError::WordNotInList => write!(f, "word is not part of the wordlist"),
            MnemonicError::ChecksumMismatch => write!(f, "checksum verification failed"),
            MnemonicError::InvalidWordCount => {
                write!(f, "phrases must contain 12, 15, 18, 21 or 24 words")
            }
            MnemonicError::InvalidByteCount => {
                write!(f, "phrases are only specified for 128, 160, 192, 224 or 256 bits")
            }
            MnemonicError::InvalidShareFormat => write!(f, "invalid share format"),
            MnemonicError::InvalidShareIndex => write!(f, "share index out of range"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MnemonicError {}
