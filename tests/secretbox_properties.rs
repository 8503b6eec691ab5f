//! Property-based tests for the secretbox construction
//!
//! These verify the construction's fundamental invariants over random
//! inputs:
//!
//! 1. **Round-trip**: open(seal(m, n, k), n, k) == m for all m, n, k
//! 2. **Determinism**: identical inputs produce byte-identical output
//! 3. **Tamper detection**: any single bit flip in the sealed output is
//!    rejected with `AuthenticationFailed`
//! 4. **Detached consistency**: the detached and combined forms agree

use brinebox::{BrineboxError, KEY_LEN, NONCE_LEN, TAG_LEN};
use proptest::prelude::*;

fn key_strategy() -> impl Strategy<Value = [u8; KEY_LEN]> {
    any::<[u8; KEY_LEN]>()
}

fn nonce_strategy() -> impl Strategy<Value = [u8; NONCE_LEN]> {
    any::<[u8; NONCE_LEN]>()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_roundtrip(
        key in key_strategy(),
        nonce in nonce_strategy(),
        message in proptest::collection::vec(any::<u8>(), 0..10_000),
    ) {
        let sealed = brinebox::seal(&message, &nonce, &key).unwrap();
        prop_assert_eq!(sealed.len(), message.len() + TAG_LEN);

        let opened = brinebox::open(&sealed, &nonce, &key).unwrap();
        prop_assert_eq!(opened, message);
    }

    #[test]
    fn prop_deterministic(
        key in key_strategy(),
        nonce in nonce_strategy(),
        message in proptest::collection::vec(any::<u8>(), 0..1_000),
    ) {
        let first = brinebox::seal(&message, &nonce, &key).unwrap();
        let second = brinebox::seal(&message, &nonce, &key).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_single_bit_flip_rejected(
        key in key_strategy(),
        nonce in nonce_strategy(),
        message in proptest::collection::vec(any::<u8>(), 0..1_000),
        flip_seed in any::<(usize, u8)>(),
    ) {
        let mut sealed = brinebox::seal(&message, &nonce, &key).unwrap();
        let (pos_seed, bit_seed) = flip_seed;
        let pos = pos_seed % sealed.len();
        sealed[pos] ^= 1 << (bit_seed % 8);

        prop_assert_eq!(
            brinebox::open(&sealed, &nonce, &key),
            Err(BrineboxError::AuthenticationFailed)
        );
    }

    #[test]
    fn prop_truncation_rejected(
        key in key_strategy(),
        nonce in nonce_strategy(),
        message in proptest::collection::vec(any::<u8>(), 1..1_000),
        cut in any::<usize>(),
    ) {
        let sealed = brinebox::seal(&message, &nonce, &key).unwrap();
        let keep = cut % sealed.len();
        let result = brinebox::open(&sealed[..keep], &nonce, &key);

        if keep < TAG_LEN {
            prop_assert_eq!(result, Err(BrineboxError::CiphertextTooShort { len: keep }));
        } else {
            prop_assert_eq!(result, Err(BrineboxError::AuthenticationFailed));
        }
    }

    #[test]
    fn prop_detached_agrees_with_combined(
        key in key_strategy(),
        nonce in nonce_strategy(),
        message in proptest::collection::vec(any::<u8>(), 0..1_000),
    ) {
        let combined = brinebox::seal(&message, &nonce, &key).unwrap();
        let (tag, body) = brinebox::seal_detached(&message, &nonce, &key).unwrap();

        prop_assert_eq!(&combined[..TAG_LEN], &tag[..]);
        prop_assert_eq!(&combined[TAG_LEN..], &body[..]);

        let opened = brinebox::open_detached(&body, &tag, &nonce, &key).unwrap();
        prop_assert_eq!(opened, message);
    }

    #[test]
    fn prop_different_nonces_differ(
        key in key_strategy(),
        nonce_a in nonce_strategy(),
        nonce_b in nonce_strategy(),
        message in proptest::collection::vec(any::<u8>(), 1..1_000),
    ) {
        prop_assume!(nonce_a != nonce_b);
        let sealed_a = brinebox::seal(&message, &nonce_a, &key).unwrap();
        let sealed_b = brinebox::seal(&message, &nonce_b, &key).unwrap();
        prop_assert_ne!(sealed_a, sealed_b);
    }
}
