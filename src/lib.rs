//! Brinebox - NaCl secretbox (XSalsa20-Poly1305) implemented in pure Rust
//!
//! This crate implements exactly one authenticated encryption construction,
//! end to end, with no calls into an external cryptographic library:
//!
//! - XSalsa20 generates a keystream from a 32-byte key and 24-byte nonce.
//!   The first 32 bytes of the stream become a one-time Poly1305 subkey;
//!   the rest masks the message.
//! - Poly1305 authenticates the masked message under the subkey, producing
//!   a 16-byte tag.
//! - [`seal`] returns `tag || masked_message`; [`open`] verifies the tag in
//!   constant time before unmasking anything.
//!
//! The nonce is not part of the output. Callers transmit or store it
//! alongside the ciphertext and are responsible for never reusing it under
//! the same key.
//!
//! All operations are stateless and safe to invoke concurrently.

#![forbid(unsafe_code)]

pub mod error;
pub(crate) mod poly1305;
pub(crate) mod salsa;
pub mod secretbox;
pub(crate) mod verify;

pub use error::{BrineboxError, Result};
pub use secretbox::{
    KEY_LEN, NONCE_LEN, TAG_LEN, generate_key, generate_nonce, open, open_detached, seal,
    seal_detached,
};
