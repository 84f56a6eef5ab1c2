//! Constant-time arithmetic primitives.
//!
//! Everything the sharing and recovery engines compute happens in the
//! 256-element field defined here; no other module performs arithmetic on
//! secret bytes directly.

pub mod gf256;
