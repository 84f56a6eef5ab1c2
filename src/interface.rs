//! The toolkit operations.
//!
//! Five entry points compose the codec, the sharing engines and the entropy
//! encoders: `generate`, `share`, `recover`, `encode` and `decode`. A
//! command-line driver (or any other host) supplies strings and renders the
//! results; no printing or I/O happens here.

extern crate alloc;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use hmac::{Hmac, Mac};
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::entropy::formats::{fold_cards, fold_dice, fold_hex, parse_word_indices};
use crate::entropy::{EntropyError, EntropySource};
use crate::mnemonic::codec::{decode_phrase, encode_bytes};
use crate::mnemonic::wordlist::{word_index, WORDLIST};
use crate::mnemonic::{bit_length, MnemonicError, WORD_COUNTS};
use crate::sharing::commitment::Commitment;
use crate::sharing::reconstruct::reconstruct_secret;
use crate::sharing::share::Share;
use crate::sharing::split::{split_secret, SharingMode};
use crate::sharing::SharingError;

/// Label under which extra entropy is stretched to 32 bytes.
///
/// The derivation (HMAC-SHA256 keyed by the user string) is versioned with
/// the crate: a future release may change it, and no compatibility with
/// other tools is claimed for deterministically generated phrases.
const GENERATION_LABEL: &[u8] = b"BIP39 phrase";

/// Where the secret bytes of a generated phrase come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateMode<'a> {
    /// The injected entropy source alone.
    System,
    /// The injected source, XOR-mixed with stretched extra entropy; sound
    /// as long as either input is.
    Mixed { extra_entropy: &'a str },
    /// Stretched extra entropy alone. The phrase is only as strong as the
    /// supplied string; reproducible on every run.
    Deterministic { extra_entropy: &'a str },
}

/// Input formats accepted by [`encode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntropyFormat {
    Hex,
    Dice,
    Cards,
    Indices,
}

/// Output formats produced by [`decode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeFormat {
    Hex,
    Indices,
}

/// Result of [`decode`], matching the requested format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    /// Lowercase hex string of the phrase's bytes.
    Hex(String),
    /// Word indices, one per phrase word.
    Indices(Vec<u16>),
}

/// One produced share in display form, with its commitment.
#[derive(Debug, Clone)]
pub struct SharedPhrase {
    /// Share index, 1..=255.
    pub index: u8,
    /// The share's mnemonic words, space separated.
    pub phrase: String,
    /// SHA-256 over `{index}: {phrase}`, for out-of-band comparison.
    pub commitment: Commitment,
}

impl fmt::Display for SharedPhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.index, self.phrase)
    }
}

/// Combined error type of the toolkit operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolkitError {
    Mnemonic(MnemonicError),
    Sharing(SharingError),
    Entropy(EntropyError),
}

impl fmt::Display for ToolkitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolkitError::Mnemonic(e) => e.fmt(f),
            ToolkitError::Sharing(e) => e.fmt(f),
            ToolkitError::Entropy(e) => e.fmt(f),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ToolkitError {}

impl From<MnemonicError> for ToolkitError {
    fn from(e: MnemonicError) -> Self {
        ToolkitError::Mnemonic(e)
    }
}

impl From<SharingError> for ToolkitError {
    fn from(e: SharingError) -> Self {
        ToolkitError::Sharing(e)
    }
}

impl From<EntropyError> for ToolkitError {
    fn from(e: EntropyError) -> Self {
        ToolkitError::Entropy(e)
    }
}

/// Stretches a user-supplied entropy string to 32 bytes.
fn stretch_extra_entropy(extra_entropy: &str) -> Zeroizing<[u8; 32]> {
    let mut mac = <Hmac<Sha256> as Mac>::new_from_slice(extra_entropy.as_bytes())
        .expect("HMAC accepts any key length");
    mac.update(GENERATION_LABEL);
    Zeroizing::new(mac.finalize().into_bytes().into())
}

/// Generates a new phrase of `num_words` words.
pub fn generate<R: EntropySource + ?Sized>(
    num_words: usize,
    mode: GenerateMode<'_>,
    rng: &mut R,
) -> Result<String, ToolkitError> {
    let num_bytes = bit_length(num_words).ok_or(MnemonicError::InvalidWordCount)? / 8;

    let mut secret = Zeroizing::new([0u8; 32]);
    match mode {
        GenerateMode::System => {
            rng.fill(&mut secret[..])
                .map_err(|_| EntropyError::CollectionFailed)?;
        }
        GenerateMode::Mixed { extra_entropy } => {
            rng.fill(&mut secret[..])
                .map_err(|_| EntropyError::CollectionFailed)?;
            let stretched = stretch_extra_entropy(extra_entropy);
            for (s, e) in secret.iter_mut().zip(stretched.iter()) {
                *s ^= e;
            }
        }
        GenerateMode::Deterministic { extra_entropy } => {
            secret.copy_from_slice(&stretch_extra_entropy(extra_entropy)[..]);
        }
    }

    Ok(encode_bytes(&secret[..num_bytes])?)
}

/// Splits a phrase into `num_shares` shares with recovery threshold
/// `threshold`. Each share comes back in display form together with its
/// commitment.
pub fn share<R: EntropySource + ?Sized>(
    phrase: &str,
    num_shares: u8,
    threshold: u8,
    mode: SharingMode<'_>,
    rng: &mut R,
) -> Result<Vec<SharedPhrase>, ToolkitError> {
    let secret = decode_phrase(phrase)?;
    let shares = split_secret(&secret, num_shares, threshold, mode, rng)?;

    let mut out = Vec::with_capacity(shares.len());
    for share in &shares {
        let phrase = encode_bytes(share.value())?;
        let commitment = Commitment::for_share(share.index(), &phrase);
        out.push(SharedPhrase {
            index: share.index(),
            phrase,
            commitment,
        });
    }
    Ok(out)
}

/// Recovers a phrase from shares in display form `{index}: {words}`.
///
/// When `threshold` is given, too small a set is rejected; without it the
/// engine interpolates whatever it received (see
/// [`reconstruct_secret`](crate::sharing::reconstruct::reconstruct_secret)).
pub fn recover<S: AsRef<str>>(
    shares: &[S],
    threshold: Option<u8>,
) -> Result<String, ToolkitError> {
    let mut parsed = Vec::with_capacity(shares.len());
    for share in shares {
        parsed.push(Share::parse(share.as_ref())?);
    }
    let secret = reconstruct_secret(&parsed, threshold)?;
    Ok(encode_bytes(&secret)?)
}

/// Converts user-supplied entropy into a phrase.
///
/// Hex, dice and cards inputs are folded and trimmed to the largest
/// encodable size (see [`crate::entropy::formats`]). A word-index list maps
/// straight to its words; the caller asked for exactly those words, so no
/// checksum is injected and the result is only a valid phrase if the
/// indices were produced by a phrase in the first place.
pub fn encode(input: &str, format: EntropyFormat) -> Result<String, ToolkitError> {
    match format {
        EntropyFormat::Hex => Ok(encode_bytes(&fold_hex(input)?)?),
        EntropyFormat::Dice => Ok(encode_bytes(&fold_dice(input)?)?),
        EntropyFormat::Cards => Ok(encode_bytes(&fold_cards(input)?)?),
        EntropyFormat::Indices => {
            let indices = parse_word_indices(input)?;
            if !WORD_COUNTS.contains(&indices.len()) {
                return Err(MnemonicError::InvalidWordCount.into());
            }
            let words: Vec<&str> = indices.iter().map(|&i| WORDLIST[i as usize]).collect();
            Ok(words.join(" "))
        }
    }
}

/// Converts a phrase into hex or word indices. The phrase is fully
/// validated (including its checksum) first.
pub fn decode(phrase: &str, format: DecodeFormat) -> Result<Decoded, ToolkitError> {
    let bytes = decode_phrase(phrase)?;
    match format {
        DecodeFormat::Hex => Ok(Decoded::Hex(hex::encode(bytes.as_slice()))),
        DecodeFormat::Indices => {
            let indices = phrase
                .split_whitespace()
                .map(|w| word_index(w).ok_or(MnemonicError::WordNotInList))
                .collect::<Result<Vec<u16>, _>>()?;
            Ok(Decoded::Indices(indices))
        }
    }
}
