//! Constant-time tag comparison
//!
//! Used exclusively to verify Poly1305 tags during [`open`](crate::open).
//! Execution time must not depend on where or how much the tags differ,
//! so the comparison accumulates a bitwise difference over the full length
//! and branches exactly once at the end.

use core::hint::black_box;

use crate::secretbox::TAG_LEN;

/// Compares two 16-byte tags without leaking the mismatch position.
///
/// `black_box` keeps the optimizer from collapsing the accumulation into
/// an early-exit comparison.
pub fn tags_match(a: &[u8; TAG_LEN], b: &[u8; TAG_LEN]) -> bool {
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    black_box(diff) == 0
}
