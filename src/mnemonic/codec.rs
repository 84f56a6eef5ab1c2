//! Phrase and share-string codec.
//!
//! Converts byte sequences to phrases and back, and handles the
//! `{index}: {words}` display form of shares. The bit layout is the BIP39
//! one: the 8b entropy bits followed by the leading b/4 bits of
//! SHA-256(entropy), cut into big-endian 11-bit word indices.

extern crate alloc;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use super::wordlist::{word_index, WORDLIST};
use super::{MnemonicError, BYTE_LENGTHS, WORD_COUNTS};

/// Reads the 11-bit word index number `word` out of a big-endian bit stream.
fn read_index(stream: &[u8], word: usize) -> usize {
    let mut idx = 0usize;
    for bit in word * 11..(word + 1) * 11 {
        idx = (idx << 1) | ((stream[bit / 8] >> (7 - bit % 8)) & 1) as usize;
    }
    idx
}

/// Writes the 11-bit word index number `word` into a zeroed bit stream.
fn write_index(stream: &mut [u8], word: usize, idx: u16) {
    for (k, bit) in (word * 11..(word + 1) * 11).enumerate() {
        if (idx >> (10 - k)) & 1 == 1 {
            stream[bit / 8] |= 1 << (7 - bit % 8);
        }
    }
}

/// Encodes a byte sequence as a phrase of lowercase words joined by single
/// spaces.
///
/// Accepts 16, 20, 24, 28 or 32 bytes; everything else is rejected before
/// hashing.
pub fn encode_bytes(bytes: &[u8]) -> Result<String, MnemonicError> {
    let num_bytes = bytes.len();
    if !BYTE_LENGTHS.contains(&num_bytes) {
        return Err(MnemonicError::InvalidByteCount);
    }
    let checksum_bits = num_bytes / 4;
    let num_words = (num_bytes * 8 + checksum_bits) / 11;

    // The checksum has at most 8 bits, so the first digest byte carries all
    // of it; appending that byte to the stream makes the bit cutting uniform.
    let digest = Sha256::digest(bytes);
    let mut stream = Zeroizing::new(Vec::with_capacity(num_bytes + 1));
    stream.extend_from_slice(bytes);
    stream.push(digest[0]);

    let mut phrase = String::new();
    for word in 0..num_words {
        if word > 0 {
            phrase.push(' ');
        }
        phrase.push_str(WORDLIST[read_index(&stream, word)]);
    }
    Ok(phrase)
}

/// Decodes a phrase into the byte sequence it encodes.
///
/// Words may be separated by any run of whitespace and the phrase may carry
/// surrounding whitespace; only exact lowercase wordlist entries are
/// recognized. The embedded checksum is verified.
pub fn decode_phrase(phrase: &str) -> Result<Zeroizing<Vec<u8>>, MnemonicError> {
    let words: Vec<&str> = phrase.split_whitespace().collect();
    let num_words = words.len();
    if !WORD_COUNTS.contains(&num_words) {
        return Err(MnemonicError::InvalidWordCount);
    }
    let num_bytes = num_words * 4 / 3;
    let checksum_bits = num_bytes / 4;

    let mut stream = Zeroizing::new(vec![0u8; (num_words * 11 + 7) / 8]);
    for (i, word) in words.iter().enumerate() {
        let idx = word_index(word).ok_or(MnemonicError::WordNotInList)?;
        write_index(&mut stream, i, idx);
    }

    let bytes = &stream[..num_bytes];
    let claimed = stream[num_bytes] >> (8 - checksum_bits);
    let expected = Sha256::digest(bytes)[0] >> (8 - checksum_bits);
    if claimed != expected {
        return Err(MnemonicError::ChecksumMismatch);
    }

    Ok(Zeroizing::new(bytes.to_vec()))
}

/// Encodes a share, i.e. an (index, value) pair, as an index-prefixed
/// phrase: `{index}: {words}`.
pub fn encode_share_string(index: u8, value: &[u8]) -> Result<String, MnemonicError> {
    if index == 0 {
        return Err(MnemonicError::InvalidShareIndex);
    }
    let phrase = encode_bytes(value)?;
    // Decimal index, one colon, one space; commitments hash this exact form.
    Ok(alloc::format!("{}: {}", index, phrase))
}

/// Decodes an index-prefixed share string into its index and value bytes.
pub fn decode_share_string(share: &str) -> Result<(u8, Zeroizing<Vec<u8>>), MnemonicError> {
    let mut parts = share.split(':');
    let index_part = parts.next().ok_or(MnemonicError::InvalidShareFormat)?;
    let phrase_part = parts.next().ok_or(MnemonicError::InvalidShareFormat)?;
    if parts.next().is_some() {
        return Err(MnemonicError::InvalidShareFormat);
    }

    let index: u16 = index_part
        .trim()
        .parse()
        .map_err(|_| MnemonicError::InvalidShareIndex)?;
    if !(1..=255).contains(&index) {
        return Err(MnemonicError::InvalidShareIndex);
    }

    let value = decode_phrase(phrase_part)?;
    Ok((index as u8, value))
}

/// Checks whether a phrase decodes successfully. With `strict` set, a single
/// space between words (the normalized form) is enforced as well.
pub fn verify_phrase(phrase: &str, strict: bool) -> bool {
    match decode_phrase(phrase) {
        Ok(bytes) => {
            !strict || encode_bytes(&bytes).map(|p| p == phrase).unwrap_or(false)
        }
        Err(_) => false,
    }
}

/// Checks whether a share string decodes successfully, optionally enforcing
/// the normalized form.
pub fn verify_share(share: &str, strict: bool) -> bool {
    match decode_share_string(share) {
        Ok((index, value)) => {
            !strict
                || encode_share_string(index, &value)
                    .map(|s| s == share)
                    .unwrap_or(false)
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_known_vectors() {
        assert_eq!(
            encode_bytes(&[0u8; 16]).unwrap(),
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about"
        );
        assert_eq!(
            encode_bytes(&[0xFFu8; 16]).unwrap(),
            "zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo wrong"
        );
        assert_eq!(
            encode_bytes(&[0u8; 32]).unwrap(),
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon art"
        );

        let ascending: Vec<u8> = (0..20).collect();
        assert_eq!(
            encode_bytes(&ascending).unwrap(),
            "abandon amount liar amount expire adjust cage candy arch gather drum bullet absurd math exhibit"
        );
        let ascending: Vec<u8> = (0..28).collect();
        assert_eq!(
            encode_bytes(&ascending).unwrap(),
            "abandon amount liar amount expire adjust cage candy arch gather drum bullet absurd math era live bid rhythm alien crouch saddle"
        );
    }

    #[test]
    fn round_trip_all_lengths() {
        for &len in BYTE_LENGTHS.iter() {
            let bytes: Vec<u8> = (0..len).map(|i| (i as u8).wrapping_mul(37).wrapping_add(5)).collect();
            let phrase = encode_bytes(&bytes).unwrap();
            assert_eq!(decode_phrase(&phrase).unwrap().as_slice(), bytes.as_slice());
            assert_eq!(encode_bytes(&decode_phrase(&phrase).unwrap()).unwrap(), phrase);
        }
    }

    #[test]
    fn rejects_bad_byte_counts() {
        assert_eq!(encode_bytes(&[]), Err(MnemonicError::InvalidByteCount));
        assert_eq!(encode_bytes(&[0u8; 15]), Err(MnemonicError::InvalidByteCount));
        assert_eq!(encode_bytes(&[0u8; 33]), Err(MnemonicError::InvalidByteCount));
    }

    #[test]
    fn rejects_bad_word_counts() {
        assert!(matches!(decode_phrase(""), Err(MnemonicError::InvalidWordCount)));
        assert!(matches!(
            decode_phrase("abandon abandon abandon"),
            Err(MnemonicError::InvalidWordCount)
        ));
    }

    #[test]
    fn rejects_unknown_words() {
        let phrase = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon nonsense";
        assert!(matches!(decode_phrase(phrase), Err(MnemonicError::WordNotInList)));
        // Uppercase words are not in the (lowercase) list.
        let phrase = "ABANDON abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
        assert!(matches!(decode_phrase(phrase), Err(MnemonicError::WordNotInList)));
    }

    #[test]
    fn rejects_corrupted_checksum() {
        // "about" -> "zoo" flips payload bits without leaving the wordlist.
        let phrase = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon zoo";
        assert!(matches!(decode_phrase(phrase), Err(MnemonicError::ChecksumMismatch)));
    }

    #[test]
    fn corrupting_any_word_is_detected() {
        let bytes: Vec<u8> = (0..16).map(|i| i * 3 + 1).collect();
        let phrase = encode_bytes(&bytes).unwrap();
        let words: Vec<&str> = phrase.split(' ').collect();
        for i in 0..words.len() {
            let mut corrupted = words.clone();
            corrupted[i] = if corrupted[i] == "abandon" { "zoo" } else { "abandon" };
            let corrupted = corrupted.join(" ");
            assert!(decode_phrase(&corrupted).is_err(), "word {i} survived corruption");
        }
    }

    #[test]
    fn whitespace_is_normalized_on_decode() {
        let phrase = "  zoo zoo\tzoo zoo zoo\n zoo zoo zoo zoo zoo  zoo   wrong ";
        let bytes = decode_phrase(phrase).unwrap();
        assert_eq!(bytes.as_slice(), &[0xFFu8; 16]);
    }

    #[test]
    fn share_string_round_trip() {
        let value = [0xFFu8; 16];
        let share = encode_share_string(7, &value).unwrap();
        assert_eq!(share, "7: zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo wrong");
        let (index, decoded) = decode_share_string(&share).unwrap();
        assert_eq!(index, 7);
        assert_eq!(decoded.as_slice(), &value);
    }

    #[test]
    fn share_string_errors() {
        assert_eq!(
            encode_share_string(0, &[0u8; 16]),
            Err(MnemonicError::InvalidShareIndex)
        );
        assert!(matches!(
            decode_share_string("zoo zoo zoo"),
            Err(MnemonicError::InvalidShareFormat)
        ));
        assert!(matches!(
            decode_share_string("1: zoo: zoo"),
            Err(MnemonicError::InvalidShareFormat)
        ));
        assert!(matches!(
            decode_share_string("0: zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo wrong"),
            Err(MnemonicError::InvalidShareIndex)
        ));
        assert!(matches!(
            decode_share_string("256: zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo wrong"),
            Err(MnemonicError::InvalidShareIndex)
        ));
        assert!(matches!(
            decode_share_string("x: zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo wrong"),
            Err(MnemonicError::InvalidShareIndex)
        ));
    }

    #[test]
    fn verification_helpers() {
        let loose = "zoo  zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo wrong";
        assert!(verify_phrase(loose, false));
        assert!(!verify_phrase(loose, true));
        let normalized = "zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo wrong";
        assert!(verify_phrase(normalized, true));
        assert!(!verify_phrase("zoo zoo", false));

        assert!(verify_share("3: zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo wrong", true));
        assert!(verify_share("3:  zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo wrong", false));
        assert!(!verify_share("3:  zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo wrong", true));
        assert!(!verify_share("zoo zoo zoo", false));
    }
}
