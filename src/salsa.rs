//! XSalsa20 keystream generation
//!
//! Implements the Salsa20 core function, the HSalsa20 key expansion, and
//! the XSalsa20 stream construction built from them:
//!
//! - HSalsa20 turns (key, first 16 nonce bytes) into a derived key,
//!   extending Salsa20's 8-byte nonce to XSalsa20's 24 bytes.
//! - The remaining 8 nonce bytes plus a little-endian 64-bit block counter
//!   (starting at zero) feed the Salsa20 core one 64-byte block at a time.
//!
//! The keystream is deterministic: identical (key, nonce, length) always
//! produces identical bytes. Keystream output is as sensitive as the key
//! itself while the key remains in use, so [`keystream`] returns a
//! [`Zeroizing`] buffer that is erased when dropped.

use zeroize::Zeroizing;

/// Salsa20 sigma constants, ASCII for "expand 32-byte k".
const SIGMA: [u32; 4] = [0x61707865, 0x3320646e, 0x79622d32, 0x6b206574];

/// Number of bytes produced by one Salsa20 core invocation.
pub const BLOCK_LEN: usize = 64;

/// Builds the initial 16-word Salsa20 state from a key and 16-byte input.
///
/// Layout per the Salsa20 specification: the four sigma words on the main
/// diagonal, the key split around them, the input in the middle row.
fn init_state(key: &[u8; 32], input: &[u8; 16]) -> [u32; 16] {
    let word = |bytes: &[u8], i: usize| {
        u32::from_le_bytes([bytes[4 * i], bytes[4 * i + 1], bytes[4 * i + 2], bytes[4 * i + 3]])
    };

    let mut state = [0u32; 16];
    state[0] = SIGMA[0];
    state[5] = SIGMA[1];
    state[10] = SIGMA[2];
    state[15] = SIGMA[3];
    for i in 0..4 {
        state[1 + i] = word(key, i);
        state[11 + i] = word(&key[16..], i);
    }
    for i in 0..4 {
        state[6 + i] = word(input, i);
    }
    state
}

/// Salsa20 quarter-round: four add-rotate-XOR steps on one column.
#[inline(always)]
fn quarter_round(state: &mut [u32; 16], a: usize, b: usize, c: usize, d: usize) {
    state[b] ^= state[a].wrapping_add(state[d]).rotate_left(7);
    state[c] ^= state[b].wrapping_add(state[a]).rotate_left(9);
    state[d] ^= state[c].wrapping_add(state[b]).rotate_left(13);
    state[a] ^= state[d].wrapping_add(state[c]).rotate_left(18);
}

/// Runs the 20 Salsa20 rounds (10 column/row double-rounds) in place.
fn permute(state: &mut [u32; 16]) {
    for _ in 0..10 {
        quarter_round(state, 0, 4, 8, 12);
        quarter_round(state, 5, 9, 13, 1);
        quarter_round(state, 10, 14, 2, 6);
        quarter_round(state, 15, 3, 7, 11);
        quarter_round(state, 0, 1, 2, 3);
        quarter_round(state, 5, 6, 7, 4);
        quarter_round(state, 10, 11, 8, 9);
        quarter_round(state, 15, 12, 13, 14);
    }
}

/// The Salsa20 core: expands (key, input) into one 64-byte keystream block.
///
/// The final feed-forward addition of the initial state makes the function
/// non-invertible.
fn core_block(key: &[u8; 32], input: &[u8; 16]) -> Zeroizing<[u8; BLOCK_LEN]> {
    let initial = init_state(key, input);
    let mut state = initial;
    permute(&mut state);

    let mut out = Zeroizing::new([0u8; BLOCK_LEN]);
    for i in 0..16 {
        let word = state[i].wrapping_add(initial[i]);
        out[4 * i..4 * i + 4].copy_from_slice(&word.to_le_bytes());
    }
    out
}

/// HSalsa20 key expansion: derives a 32-byte key from a key and a 16-byte
/// input.
///
/// Same rounds as the Salsa20 core but without the feed-forward addition;
/// the output is words 0, 5, 10, 15 (the diagonal) followed by words 6-9
/// (the input row). Used by XSalsa20 to fold the first 16 nonce bytes into
/// the key.
pub fn hsalsa20(key: &[u8; 32], input: &[u8; 16]) -> Zeroizing<[u8; 32]> {
    let mut state = init_state(key, input);
    permute(&mut state);

    let mut out = Zeroizing::new([0u8; 32]);
    for (i, &idx) in [0usize, 5, 10, 15, 6, 7, 8, 9].iter().enumerate() {
        out[4 * i..4 * i + 4].copy_from_slice(&state[idx].to_le_bytes());
    }
    out
}

/// Generates `len` bytes of XSalsa20 keystream for (key, nonce).
///
/// The block counter starts at zero, so repeated calls with the same
/// inputs reproduce the same stream; the secretbox construction relies on
/// this to carve the subkey out of the first 32 bytes and mask the message
/// with the bytes that follow.
pub fn keystream(key: &[u8; 32], nonce: &[u8; 24], len: usize) -> Zeroizing<Vec<u8>> {
    let mut prefix = [0u8; 16];
    prefix.copy_from_slice(&nonce[..16]);
    let subkey = hsalsa20(key, &prefix);

    let mut input = [0u8; 16];
    input[..8].copy_from_slice(&nonce[16..]);

    let mut out = Zeroizing::new(vec![0u8; len]);
    for (counter, chunk) in out.chunks_mut(BLOCK_LEN).enumerate() {
        input[8..].copy_from_slice(&(counter as u64).to_le_bytes());
        let block = core_block(&subkey, &input);
        chunk.copy_from_slice(&block[..chunk.len()]);
    }
    out
}
