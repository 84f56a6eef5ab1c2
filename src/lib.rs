//! Shamir secret sharing and entropy encoding for BIP39 mnemonic phrases.
//!
//! The crate splits a 12 to 24 word English phrase into `n` shares such
//! that any `t` of them recover it, with all arithmetic in GF(2^8), and
//! converts between phrases and various entropy formats (hex, dice rolls,
//! playing cards, word indices). See [`interface`] for the operations a
//! host application drives.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod core;
pub mod entropy;
pub mod interface;
pub mod mnemonic;
pub mod sharing;
