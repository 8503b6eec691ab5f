use thiserror::Error;

/// Errors surfaced by the secretbox construction.
///
/// Every failure is terminal for the call that produced it; retries, if
/// any, belong to the caller. [`BrineboxError::AuthenticationFailed`]
/// deliberately carries no further detail: distinguishing *why*
/// verification failed would hand an oracle to an attacker.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum BrineboxError {
    /// The key was not exactly [`KEY_LEN`](crate::KEY_LEN) bytes.
    #[error("key must be exactly 32 bytes, got {len}")]
    InvalidKeyLength { len: usize },

    /// The nonce was not exactly [`NONCE_LEN`](crate::NONCE_LEN) bytes.
    #[error("nonce must be exactly 24 bytes, got {len}")]
    InvalidNonceLength { len: usize },

    /// The ciphertext was too short to contain an authentication tag.
    #[error("ciphertext too short to contain a tag: {len} bytes")]
    CiphertextTooShort { len: usize },

    /// The authentication tag did not verify. The ciphertext was
    /// tampered with, corrupted, or sealed under a different key or
    /// nonce; no plaintext is produced.
    #[error("authentication failed: corrupt or tampered-with ciphertext")]
    AuthenticationFailed,
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, BrineboxError>;
