//! Order-sensitive hash combining.
//!
//! [`HashCombiner`] folds a sequence of values into a single `u64`. Every value is first hashed
//! on its own with a fixed-seed hasher, and the result is then mixed into the running state, so
//! the final value depends on both the values and the order in which they were combined. The
//! output is deterministic: the same sequence gives the same hash in every process, which is
//! what allows it to be used for keys that are compared across runs.
//!
//! `HashCombiner` also implements [`Hasher`], so any [`Hash`] implementation can be fed into it.
//! Each primitive write is one combining step. The value types of this crate write their fields
//! one by one, which makes the hasher behave like the classic `hc << a << b << c` combiner.

use foldhash::fast::FixedState;
use std::hash::{BuildHasher, Hash, Hasher};

const GOLDEN_RATIO: u64 = 0x9e37_79b9_7f4a_7c15;

// Per-value hashing must not depend on a random seed.
const VALUE_STATE: FixedState = FixedState::with_seed(0x243f_6a88_85a3_08d3);

/// Accumulates the hashes of a sequence of values into one.
///
/// # Examples
///
/// ```
/// use vk_keys::hash::HashCombiner;
///
/// let forward = HashCombiner::new().combine(&1u32).combine(&2u32).value();
/// let backward = HashCombiner::new().combine(&2u32).combine(&1u32).value();
///
/// assert_ne!(forward, backward);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HashCombiner {
    combined: u64,
}

impl HashCombiner {
    /// Creates a new `HashCombiner` with a state of 0.
    #[inline]
    pub const fn new() -> Self {
        Self { combined: 0 }
    }

    /// Creates a new `HashCombiner` that starts from `seed`.
    #[inline]
    pub const fn with_seed(seed: u64) -> Self {
        Self { combined: seed }
    }

    /// Combines the hash of `value` into the state.
    #[inline]
    pub fn combine<T>(&mut self, value: &T) -> &mut Self
    where
        T: Hash + ?Sized,
    {
        self.fold(VALUE_STATE.hash_one(value));
        self
    }

    /// Combines the hash of every item of `iter`, in iteration order.
    pub fn combine_iter<I>(&mut self, iter: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Hash,
    {
        for item in iter {
            self.combine(&item);
        }

        self
    }

    /// Returns the combined hash of everything combined so far.
    #[inline]
    pub const fn value(&self) -> u64 {
        self.combined
    }

    #[inline]
    fn fold(&mut self, hash: u64) {
        self.combined ^= hash
            .wrapping_add(GOLDEN_RATIO)
            .wrapping_add(self.combined << 6)
            .wrapping_add(self.combined >> 2);
    }
}

impl Hasher for HashCombiner {
    #[inline]
    fn finish(&self) -> u64 {
        self.combined
    }

    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.combine(byte);
        }
    }

    #[inline]
    fn write_u8(&mut self, i: u8) {
        self.combine(&i);
    }

    #[inline]
    fn write_u16(&mut self, i: u16) {
        self.combine(&i);
    }

    #[inline]
    fn write_u32(&mut self, i: u32) {
        self.combine(&i);
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.combine(&i);
    }

    #[inline]
    fn write_u128(&mut self, i: u128) {
        self.combine(&i);
    }

    #[inline]
    fn write_usize(&mut self, i: usize) {
        // Widened so that the result doesn't depend on the pointer width.
        self.combine(&(i as u64));
    }
}

/// A [`BuildHasher`] that creates [`HashCombiner`]s, for maps and sets that should iterate and
/// hash the same way in every process.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildHashCombiner {
    seed: u64,
}

impl BuildHashCombiner {
    /// Returns a `BuildHashCombiner` whose combiners start from `seed`.
    #[inline]
    pub const fn with_seed(seed: u64) -> Self {
        Self { seed }
    }
}

impl BuildHasher for BuildHashCombiner {
    type Hasher = HashCombiner;

    #[inline]
    fn build_hasher(&self) -> Self::Hasher {
        HashCombiner::with_seed(self.seed)
    }
}

/// Returns the combined hash of `value`, computed with a fresh [`HashCombiner`].
#[inline]
pub fn hash_value<T>(value: &T) -> u64
where
    T: Hash + ?Sized,
{
    let mut combiner = HashCombiner::new();
    value.hash(&mut combiner);
    combiner.value()
}

/// Returns whether `lhs` and `rhs` are either both present or both absent.
#[inline]
pub fn similar_for_nullity<T, U>(lhs: Option<T>, rhs: Option<U>) -> bool {
    lhs.is_some() == rhs.is_some()
}

/// Hashes an ordered container, by combining the hash of each element in order.
///
/// Two containers with the same elements in a different order will generally not hash the same.
/// This is the hashing counterpart of [`eq_ordered`].
pub fn hash_ordered<I>(iter: I) -> u64
where
    I: IntoIterator,
    I::Item: Hash,
{
    HashCombiner::new().combine_iter(iter).value()
}

/// Compares two ordered containers. They are equal if they have the same length, and the elements
/// at each position are equal.
#[inline]
pub fn eq_ordered<I, J>(lhs: I, rhs: J) -> bool
where
    I: IntoIterator,
    J: IntoIterator,
    I::Item: PartialEq<J::Item>,
{
    lhs.into_iter().eq(rhs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn combine_is_deterministic() {
        let a = HashCombiner::new().combine(&7u32).combine("abc").value();
        let b = HashCombiner::new().combine(&7u32).combine("abc").value();
        assert_eq!(a, b);
    }

    #[test]
    fn combine_is_order_sensitive() {
        let a = HashCombiner::new().combine(&1u32).combine(&2u32).value();
        let b = HashCombiner::new().combine(&2u32).combine(&1u32).value();
        assert_ne!(a, b);
    }

    #[test]
    fn combine_changes_state() {
        let mut combiner = HashCombiner::new();
        assert_eq!(combiner.value(), 0);
        combiner.combine(&0u32);
        assert_ne!(combiner.value(), 0);
    }

    #[test]
    fn seed_changes_result() {
        let a = HashCombiner::new().combine(&3u64).value();
        let b = HashCombiner::with_seed(1).combine(&3u64).value();
        assert_ne!(a, b);
    }

    #[test]
    fn hasher_writes_match_combine() {
        let mut via_hasher = HashCombiner::new();
        via_hasher.write_u32(5);
        via_hasher.write_u64(6);

        let via_combine = HashCombiner::new().combine(&5u32).combine(&6u64).value();
        assert_eq!(via_hasher.finish(), via_combine);
    }

    #[test]
    fn byte_writes_are_per_byte() {
        let mut via_hasher = HashCombiner::new();
        via_hasher.write(&[1, 2, 3]);

        let via_combine = HashCombiner::new().combine_iter([1u8, 2, 3]).value();
        assert_eq!(via_hasher.finish(), via_combine);
    }

    #[test]
    fn nullity() {
        assert!(similar_for_nullity::<u32, u32>(None, None));
        assert!(similar_for_nullity(Some(1), Some("a")));
        assert!(!similar_for_nullity(Some(1), None::<u32>));
        assert!(!similar_for_nullity(None::<u32>, Some(1)));
    }

    #[test]
    fn ordered_containers() {
        assert!(eq_ordered([1, 2, 3], vec![1, 2, 3]));
        assert!(!eq_ordered([1, 2, 3], [1, 2]));
        assert!(!eq_ordered([1, 2], [2, 1]));
        assert!(eq_ordered(Vec::<u32>::new(), [0u32; 0]));

        assert_eq!(hash_ordered([1u32, 2]), hash_ordered(vec![1u32, 2]));
        assert_ne!(hash_ordered([1u32, 2]), hash_ordered([2u32, 1]));
        assert_ne!(hash_ordered([1u32]), hash_ordered([1u32, 1]));
    }

    #[test]
    fn build_hasher_backs_a_map() {
        let mut map: HashMap<u32, &str, BuildHashCombiner> = HashMap::default();
        map.insert(1, "one");
        map.insert(2, "two");

        assert_eq!(map.get(&1), Some(&"one"));
        assert_eq!(map.get(&2), Some(&"two"));
        assert_eq!(
            BuildHashCombiner::default().hash_one(9u32),
            hash_value(&9u32),
        );
    }
}
