//! The rolling shift/XOR-fold string hash used for bucket addressing.
//!
//! The hash is split into two steps so that entries can cache the expensive
//! part: [`fold`] walks the key bytes and never depends on the table's
//! capacity, while [`bucket_index`] reduces a folded hash to an index under
//! the *current* capacity. A rehash only ever recomputes the second step.

/// Folds a key into a 32-bit accumulator.
///
/// For each byte, the 5 bits that a left shift by 5 would push out are saved
/// and XORed back into the low end, keeping every byte's contribution alive
/// in the fixed-width accumulator, then the byte itself is XORed in. The
/// result is deterministic and order-sensitive: permuting a key's bytes
/// produces a different value.
///
/// This is not a cryptographic hash and it is unseeded. Do not use it where
/// attacker-engineered collisions matter.
///
/// # Examples
///
/// ```rust
/// use chain_hash::hash::fold;
///
/// assert_eq!(fold(b"test key"), fold(b"test key"));
/// assert_ne!(fold(b"abc"), fold(b"cba"));
/// ```
#[inline]
pub fn fold(key: &[u8]) -> u32 {
    let mut h: u32 = 0;
    for &byte in key {
        let high = h & 0xF800_0000;
        h <<= 5;
        h ^= high >> 27;
        h ^= u32::from(byte);
    }
    h
}

/// Reduces a folded hash to a bucket index in `[0, capacity)`.
///
/// The mapping changes whenever `capacity` changes, so indices computed
/// before a rehash are meaningless afterwards.
#[inline]
pub fn bucket_index(hash: u32, capacity: usize) -> usize {
    debug_assert!(capacity > 0);
    hash as usize % capacity
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        assert_eq!(fold(b"test key"), fold(b"test key"));
        assert_eq!(fold(b""), 0);
    }

    #[test]
    fn order_sensitive() {
        // Same bytes, different order.
        assert_ne!(fold(b"abc"), fold(b"cba"));
        assert_ne!(fold(b"kiki"), fold(b"ikik"));
    }

    #[test]
    fn index_in_range() {
        for key in [&b"a"[..], b"test key", b"kiki key", b"\x00\xffbinary"] {
            let h = fold(key);
            for capacity in [1, 7, 100, 200, 1021] {
                assert!(bucket_index(h, capacity) < capacity);
            }
        }
    }

    #[test]
    fn single_byte_matches_fold_step() {
        // One iteration from h = 0 leaves just the byte itself.
        assert_eq!(fold(b"a"), u32::from(b'a'));
    }
}
