//! Poly1305 one-time authenticator
//!
//! Computes a 16-byte tag over a message using a 32-byte single-use key.
//! The key splits into `r` (first half, clamped) and `s` (second half);
//! the tag is the message evaluated as a polynomial in `r` over the prime
//! field GF(2^130 - 5), plus `s` modulo 2^128.
//!
//! The subkey must never authenticate two different messages: the
//! secretbox construction derives a fresh one per (key, nonce) pair and
//! discards it after a single call.
//!
//! Field elements are held as five 26-bit limbs so that every product in
//! the per-block multiply fits a `u64` without overflow.

const LIMB_MASK: u32 = 0x3ff_ffff;

/// Computes the Poly1305 tag of `data` under a 32-byte one-time subkey.
///
/// Whole-message, one call; deterministic for identical inputs. The empty
/// message is valid and yields `s` itself (the accumulator never leaves
/// zero).
pub fn authenticate(subkey: &[u8; 32], data: &[u8]) -> [u8; 16] {
    // Clamp r per the Poly1305 spec: the top four bits of bytes 3, 7, 11,
    // 15 and the bottom two bits of bytes 4, 8, 12 must be zero.
    let raw_r = u128::from_le_bytes(first_half(subkey)) & 0x0fff_fffc_0fff_fffc_0fff_fffc_0fff_ffff;
    let r: [u32; 5] = [
        (raw_r & LIMB_MASK as u128) as u32,
        ((raw_r >> 26) & LIMB_MASK as u128) as u32,
        ((raw_r >> 52) & LIMB_MASK as u128) as u32,
        ((raw_r >> 78) & LIMB_MASK as u128) as u32,
        ((raw_r >> 104) & LIMB_MASK as u128) as u32,
    ];
    // 2^130 = 5 in the field, so limbs that overflow past 2^130 fold back
    // in multiplied by 5. Premultiply the upper limbs of r once.
    let r5: [u32; 4] = [r[1] * 5, r[2] * 5, r[3] * 5, r[4] * 5];

    let mut h = [0u32; 5];
    for block in data.chunks(16) {
        // Each block becomes a 17-byte little-endian integer with a one
        // bit appended at its true length (2^128 for full blocks).
        let mut padded = [0u8; 17];
        padded[..block.len()].copy_from_slice(block);
        padded[block.len()] = 1;
        let lo = u128::from_le_bytes(first_half(&padded));
        let hi = padded[16] as u32;

        h[0] += (lo & LIMB_MASK as u128) as u32;
        h[1] += ((lo >> 26) & LIMB_MASK as u128) as u32;
        h[2] += ((lo >> 52) & LIMB_MASK as u128) as u32;
        h[3] += ((lo >> 78) & LIMB_MASK as u128) as u32;
        h[4] += ((lo >> 104) & LIMB_MASK as u128) as u32 + (hi << 24);

        h = mul_mod_p(&h, &r, &r5);
    }

    // Fully reduce h into [0, p) and add s modulo 2^128.
    let tag = u128_from_limbs(&reduce(h)).wrapping_add(u128::from_le_bytes(second_half(subkey)));
    tag.to_le_bytes()
}

fn first_half(bytes: &[u8]) -> [u8; 16] {
    let mut out = [0u8; 16];
    out.copy_from_slice(&bytes[..16]);
    out
}

fn second_half(bytes: &[u8; 32]) -> [u8; 16] {
    let mut out = [0u8; 16];
    out.copy_from_slice(&bytes[16..]);
    out
}

/// One polynomial step: h * r mod 2^130 - 5, limbs renormalized to 26
/// bits (the top limb may carry a small excess absorbed by the next step).
fn mul_mod_p(h: &[u32; 5], r: &[u32; 5], r5: &[u32; 4]) -> [u32; 5] {
    let (h0, h1, h2, h3, h4) = (
        h[0] as u64,
        h[1] as u64,
        h[2] as u64,
        h[3] as u64,
        h[4] as u64,
    );
    let (r0, r1, r2, r3, r4) = (
        r[0] as u64,
        r[1] as u64,
        r[2] as u64,
        r[3] as u64,
        r[4] as u64,
    );
    let (s1, s2, s3, s4) = (r5[0] as u64, r5[1] as u64, r5[2] as u64, r5[3] as u64);

    // Schoolbook product with the 2^130 wraparound folded in: any term at
    // limb position >= 5 reappears at position - 5 scaled by 5.
    let mut d = [
        h0 * r0 + h1 * s4 + h2 * s3 + h3 * s2 + h4 * s1,
        h0 * r1 + h1 * r0 + h2 * s4 + h3 * s3 + h4 * s2,
        h0 * r2 + h1 * r1 + h2 * r0 + h3 * s4 + h4 * s3,
        h0 * r3 + h1 * r2 + h2 * r1 + h3 * r0 + h4 * s4,
        h0 * r4 + h1 * r3 + h2 * r2 + h3 * r1 + h4 * r0,
    ];

    let mut carry;
    for i in 0..4 {
        carry = d[i] >> 26;
        d[i] &= LIMB_MASK as u64;
        d[i + 1] += carry;
    }
    carry = d[4] >> 26;
    d[4] &= LIMB_MASK as u64;
    d[0] += carry * 5;
    carry = d[0] >> 26;
    d[0] &= LIMB_MASK as u64;
    d[1] += carry;

    [d[0] as u32, d[1] as u32, d[2] as u32, d[3] as u32, d[4] as u32]
}

/// Final reduction: canonicalize h into [0, 2^130 - 5) without branching
/// on its value.
fn reduce(mut h: [u32; 5]) -> [u32; 5] {
    let mut carry = 0u32;
    for limb in h.iter_mut() {
        *limb = limb.wrapping_add(carry);
        carry = *limb >> 26;
        *limb &= LIMB_MASK;
    }
    h[0] = h[0].wrapping_add(carry.wrapping_mul(5));
    carry = h[0] >> 26;
    h[0] &= LIMB_MASK;
    h[1] = h[1].wrapping_add(carry);

    // g = h + 5 - 2^130; if the subtraction borrows, h was already below
    // p and g is discarded. Selection is by mask, not branch. The top limb
    // is left unmasked: when h lands in [p, 2^130) its pre-subtraction
    // value is exactly 2^26, and masking it first would wrongly flip the
    // borrow.
    let mut g = [0u32; 5];
    carry = 5;
    for i in 0..4 {
        g[i] = h[i].wrapping_add(carry);
        carry = g[i] >> 26;
        g[i] &= LIMB_MASK;
    }
    g[4] = h[4].wrapping_add(carry).wrapping_sub(1 << 26);

    let take_g = ((g[4] >> 31) & 1).wrapping_sub(1);
    let mut out = [0u32; 5];
    for i in 0..5 {
        out[i] = (h[i] & !take_g) | (g[i] & take_g);
    }
    out
}

fn u128_from_limbs(limbs: &[u32; 5]) -> u128 {
    (limbs[0] as u128)
        | ((limbs[1] as u128) << 26)
        | ((limbs[2] as u128) << 52)
        | ((limbs[3] as u128) << 78)
        | ((limbs[4] as u128) << 104)
}
