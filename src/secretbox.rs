//! Secretbox construction: seal and open
//!
//! Orchestrates the XSalsa20 keystream and the Poly1305 authenticator into
//! the NaCl `crypto_secretbox` construction:
//!
//! 1. Generate `32 + message length` bytes of keystream for (key, nonce).
//! 2. The first 32 bytes become the one-time Poly1305 subkey.
//! 3. The remaining bytes mask the message by XOR.
//! 4. The tag is computed over the masked bytes; sealed output is
//!    `tag(16) || masked_message`.
//!
//! `open` reverses the process, verifying the tag in constant time before
//! any unmasking happens. On verification failure no plaintext is derived
//! or returned.
//!
//! The construction is fixed-parameter and stateless. Key and nonce are
//! explicit arguments on every call; nothing is retained between calls and
//! concurrent use with independent inputs is safe. Nonce uniqueness per
//! key is the caller's obligation: reusing a nonce under the same key
//! destroys confidentiality. Subkey and keystream buffers are zeroed on
//! every exit path, including authentication failure.

use rand::TryRng;
use rand::rngs::SysRng;
use zeroize::Zeroizing;

use crate::error::{BrineboxError, Result};
use crate::{poly1305, salsa, verify};

/// Length of a secret key in bytes.
pub const KEY_LEN: usize = 32;

/// Length of a nonce in bytes.
pub const NONCE_LEN: usize = 24;

/// Length of an authentication tag in bytes.
pub const TAG_LEN: usize = 16;

/// Length of the per-message Poly1305 subkey carved from the keystream.
const SUBKEY_LEN: usize = 32;

/// Generate a random 32-byte secret key.
///
/// # Panics
/// If the operating system's randomness source is unavailable; a key
/// derived from anything weaker would be unusable anyway.
pub fn generate_key() -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    SysRng
        .try_fill_bytes(&mut key)
        .expect("OS randomness source unavailable");
    key
}

/// Generate a random 24-byte nonce.
///
/// The 24-byte nonce space is large enough that random generation is safe;
/// callers managing nonces some other way (e.g. counters) may do so, as
/// long as a (key, nonce) pair is never reused.
///
/// # Panics
/// If the operating system's randomness source is unavailable.
pub fn generate_nonce() -> [u8; NONCE_LEN] {
    let mut nonce = [0u8; NONCE_LEN];
    SysRng
        .try_fill_bytes(&mut nonce)
        .expect("OS randomness source unavailable");
    nonce
}

fn check_key(key: &[u8]) -> Result<&[u8; KEY_LEN]> {
    key.try_into()
        .map_err(|_| BrineboxError::InvalidKeyLength { len: key.len() })
}

fn check_nonce(nonce: &[u8]) -> Result<&[u8; NONCE_LEN]> {
    nonce
        .try_into()
        .map_err(|_| BrineboxError::InvalidNonceLength { len: nonce.len() })
}

/// Derives the keystream for (key, nonce, body length) and splits out the
/// one-time subkey. Both returned buffers zero themselves on drop.
fn derive(
    key: &[u8; KEY_LEN],
    nonce: &[u8; NONCE_LEN],
    body_len: usize,
) -> (Zeroizing<[u8; SUBKEY_LEN]>, Zeroizing<Vec<u8>>) {
    let stream = salsa::keystream(key, nonce, SUBKEY_LEN + body_len);
    let mut subkey = Zeroizing::new([0u8; SUBKEY_LEN]);
    subkey.copy_from_slice(&stream[..SUBKEY_LEN]);
    (subkey, stream)
}

/// Encrypt and authenticate `message` under (key, nonce).
///
/// Returns `tag || masked_message`, which is `message.len() + 16` bytes.
/// The empty message is valid and seals to exactly the 16-byte tag. The
/// nonce is not embedded in the output; transmit or store it alongside.
///
/// Fails with [`BrineboxError::InvalidKeyLength`] or
/// [`BrineboxError::InvalidNonceLength`] if either input is not its exact
/// required size.
pub fn seal(message: &[u8], nonce: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    let key = check_key(key)?;
    let nonce = check_nonce(nonce)?;

    let (subkey, stream) = derive(key, nonce, message.len());

    let mut sealed = vec![0u8; TAG_LEN + message.len()];
    for (out, (m, k)) in sealed[TAG_LEN..]
        .iter_mut()
        .zip(message.iter().zip(&stream[SUBKEY_LEN..]))
    {
        *out = m ^ k;
    }

    let tag = poly1305::authenticate(&subkey, &sealed[TAG_LEN..]);
    sealed[..TAG_LEN].copy_from_slice(&tag);
    Ok(sealed)
}

/// Verify and decrypt a sealed message.
///
/// Expects the `tag || masked_message` layout produced by [`seal`] and the
/// same nonce and key. Fails with [`BrineboxError::CiphertextTooShort`] if
/// the input cannot contain a tag (this check touches no key material),
/// and with [`BrineboxError::AuthenticationFailed`] if the tag does not
/// verify - in which case no plaintext, partial or otherwise, is returned.
pub fn open(ciphertext: &[u8], nonce: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    let key = check_key(key)?;
    let nonce = check_nonce(nonce)?;
    if ciphertext.len() < TAG_LEN {
        return Err(BrineboxError::CiphertextTooShort {
            len: ciphertext.len(),
        });
    }

    let (tag, masked) = ciphertext.split_at(TAG_LEN);
    let mut received = [0u8; TAG_LEN];
    received.copy_from_slice(tag);

    open_body(&received, masked, nonce, key)
}

/// Encrypt and authenticate `message`, returning the tag and the masked
/// message separately.
///
/// Byte-compatible with [`seal`]: concatenating `tag || ciphertext` yields
/// exactly the combined form.
pub fn seal_detached(message: &[u8], nonce: &[u8], key: &[u8]) -> Result<([u8; TAG_LEN], Vec<u8>)> {
    let mut sealed = seal(message, nonce, key)?;
    let mut tag = [0u8; TAG_LEN];
    tag.copy_from_slice(&sealed[..TAG_LEN]);
    sealed.drain(..TAG_LEN);
    Ok((tag, sealed))
}

/// Verify and decrypt a detached (tag, masked message) pair.
pub fn open_detached(
    ciphertext: &[u8],
    tag: &[u8; TAG_LEN],
    nonce: &[u8],
    key: &[u8],
) -> Result<Vec<u8>> {
    let key = check_key(key)?;
    let nonce = check_nonce(nonce)?;
    open_body(tag, ciphertext, nonce, key)
}

fn open_body(
    received: &[u8; TAG_LEN],
    masked: &[u8],
    nonce: &[u8; NONCE_LEN],
    key: &[u8; KEY_LEN],
) -> Result<Vec<u8>> {
    let (subkey, stream) = derive(key, nonce, masked.len());

    let expected = poly1305::authenticate(&subkey, masked);
    if !verify::tags_match(&expected, received) {
        // subkey and stream zero themselves on drop here as well.
        return Err(BrineboxError::AuthenticationFailed);
    }

    let mut plaintext = vec![0u8; masked.len()];
    for (out, (c, k)) in plaintext
        .iter_mut()
        .zip(masked.iter().zip(&stream[SUBKEY_LEN..]))
    {
        *out = c ^ k;
    }
    Ok(plaintext)
}
