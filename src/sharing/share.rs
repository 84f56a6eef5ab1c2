//! Secret share type.
//!
//! A share pairs a public index (the x-coordinate, printed as the decimal
//! prefix of the display form `{index}: {words}`) with one field evaluation
//! per secret byte. Whoever collects a threshold of shares can read the
//! phrase, so the value bytes are treated exactly like the secret: wiped on
//! drop and never printed.

extern crate alloc;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::SharingError;
use crate::mnemonic::codec::{decode_share_string, encode_share_string};
use crate::mnemonic::MnemonicError;

/// One share of a split secret.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Share {
    /// x-coordinate, 1..=255. Public information (it names the holder).
    #[zeroize(skip)]
    pub(crate) index: u8,
    /// One polynomial evaluation per secret byte.
    pub(crate) value: Vec<u8>,
}

impl fmt::Debug for Share {
    // The words of a share phrase follow directly from the value bytes, so
    // neither may reach logs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Share(#{}, {} bytes, <redacted>)",
            self.index,
            self.value.len()
        )
    }
}

impl Share {
    /// Builds a share from its coordinates.
    ///
    /// Index zero is the evaluation point of the secret itself and never a
    /// share; a share without value bytes would encode no phrase at all.
    /// Both are rejected.
    pub fn new(index: u8, value: Vec<u8>) -> Result<Self, SharingError> {
        if index == 0 {
            return Err(SharingError::InvalidShareIndex);
        }
        if value.is_empty() {
            return Err(SharingError::EmptyShare);
        }
        Ok(Self { index, value })
    }

    /// The public x-coordinate.
    pub fn index(&self) -> u8 {
        self.index
    }

    /// The evaluation bytes.
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Renders the share in its display form `{index}: {words}`.
    pub fn to_display_string(&self) -> Result<String, MnemonicError> {
        encode_share_string(self.index, &self.value)
    }

    /// Parses a share from its display form `{index}: {words}`.
    pub fn parse(share: &str) -> Result<Self, MnemonicError> {
        let (index, value) = decode_share_string(share)?;
        // Index range and word count were enforced by the parser; its
        // buffer is wiped when `value` drops.
        Ok(Self {
            index,
            value: value.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHARE_STRING: &str = "7: zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo wrong";

    #[test]
    fn display_form_round_trips() {
        let share = Share::parse(SHARE_STRING).unwrap();
        assert_eq!(share.index(), 7);
        assert_eq!(share.value(), &[0xFF; 16]);
        assert_eq!(share.to_display_string().unwrap(), SHARE_STRING);
    }

    #[test]
    fn coordinates_are_validated() {
        // Index zero would hand out the secret's own evaluation point.
        assert_eq!(
            Share::new(0, alloc::vec![0u8; 16]),
            Err(SharingError::InvalidShareIndex)
        );
        // No value bytes, no phrase.
        assert_eq!(Share::new(9, Vec::new()), Err(SharingError::EmptyShare));
        assert!(Share::parse("0: zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo wrong").is_err());
        assert!(Share::parse("seven: zoo zoo").is_err());
    }

    #[test]
    fn debug_output_redacts_the_words_and_bytes() {
        let share = Share::parse(SHARE_STRING).unwrap();
        let printed = alloc::format!("{:?}", share);
        assert_eq!(printed, "Share(#7, 16 bytes, <redacted>)");
        // Neither the phrase words nor the raw bytes leak.
        assert!(!printed.contains("zoo"));
        assert!(!printed.contains("255"));
        assert!(!printed.contains("ff"));
    }
}
