//! The chained hash table engine.
//!
//! [`HashTable<V>`] stores values of type `V` keyed by raw byte slices. Keys
//! hash to a bucket via the [`hash`](crate::hash) module; colliding keys
//! share a bucket as a chain of entries. When any chain grows past
//! [`MAX_CHAIN`] entries the table rehashes into a larger bucket array.
//!
//! Most callers want the `&str`-keyed [`StringMap`](crate::StringMap)
//! wrapper instead of using this module directly.

use core::fmt::Debug;
use core::mem;
use std::collections::TryReserveError;

use thiserror::Error;

use crate::hash::bucket_index;
use crate::hash::fold;

/// Minimum number of buckets. Capacity hints below this are coerced up.
pub const MIN_CAPACITY: usize = 100;

/// Maximum chain length a bucket may hold after an insert before the table
/// rehashes.
pub const MAX_CHAIN: usize = 10;

/// Fixed number of buckets added per rehash. Growth is additive and
/// monotonic; capacity never shrinks.
const GROWTH_STEP: usize = 100;

/// Error type for table operations.
///
/// The only failure mode in this crate is allocation failure; lookups and
/// removals report absence through `Option`, never through an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TableError {
    /// An allocation could not be satisfied while creating the table,
    /// copying a key, appending an entry, or reserving a rehash target.
    ///
    /// The table remains valid and unchanged by the failed operation, so the
    /// caller may retry later.
    #[error("out of memory while growing the table")]
    OutOfMemory,
}

impl From<TryReserveError> for TableError {
    fn from(_: TryReserveError) -> Self {
        TableError::OutOfMemory
    }
}

/// One stored key/value pairing inside a bucket.
struct Entry<V> {
    key: Box<[u8]>,
    /// Fold hash of `key`, cached so a rehash does not re-walk key bytes.
    hash: u32,
    value: V,
}

impl<V> Entry<V> {
    #[inline]
    fn matches(&self, key: &[u8], hash: u32) -> bool {
        // Full-length equality: slice comparison checks length and content,
        // so prefix-sharing keys never alias each other.
        self.hash == hash && &*self.key == key
    }
}

type Bucket<V> = Vec<Entry<V>>;

/// A separate-chaining hash table keyed by byte slices.
///
/// The bucket array starts at `max(hint, MIN_CAPACITY)` buckets and grows by
/// a fixed increment whenever any chain exceeds [`MAX_CHAIN`] entries, so
/// lookups stay bounded by the chain limit plus the one chain that triggered
/// the rehash. Dropping the table releases the buckets, the owned key
/// copies, and the stored values.
///
/// ## Example
///
/// ```rust
/// use chain_hash::HashTable;
///
/// let mut table: HashTable<u64> = HashTable::with_capacity(100);
/// table.insert(b"test key", 1019823)?;
///
/// assert_eq!(table.get(b"test key"), Some(&1019823));
/// assert_eq!(table.get(b"missing"), None);
/// # Ok::<(), chain_hash::TableError>(())
/// ```
pub struct HashTable<V> {
    buckets: Vec<Bucket<V>>,
    populated: usize,
}

impl<V> HashTable<V> {
    /// Creates a table with the minimum capacity.
    pub fn new() -> Self {
        Self::with_capacity(MIN_CAPACITY)
    }

    /// Creates a table with at least `initial_capacity` buckets.
    ///
    /// Hints below [`MIN_CAPACITY`] are coerced up to it. Aborts on
    /// allocation failure like other infallible std constructors; use
    /// [`try_with_capacity`](Self::try_with_capacity) to recover instead.
    pub fn with_capacity(initial_capacity: usize) -> Self {
        let capacity = initial_capacity.max(MIN_CAPACITY);
        let mut buckets = Vec::with_capacity(capacity);
        buckets.resize_with(capacity, Vec::new);
        HashTable {
            buckets,
            populated: 0,
        }
    }

    /// Fallible variant of [`with_capacity`](Self::with_capacity).
    pub fn try_with_capacity(initial_capacity: usize) -> Result<Self, TableError> {
        let capacity = initial_capacity.max(MIN_CAPACITY);
        let mut buckets = Vec::new();
        buckets.try_reserve_exact(capacity)?;
        buckets.resize_with(capacity, Vec::new);
        Ok(HashTable {
            buckets,
            populated: 0,
        })
    }

    /// Returns the number of entries in the table.
    pub fn len(&self) -> usize {
        self.populated
    }

    /// Returns `true` if the table contains no entries.
    pub fn is_empty(&self) -> bool {
        self.populated == 0
    }

    /// Returns the current number of buckets.
    ///
    /// Starts at `max(hint, MIN_CAPACITY)` and strictly increases with every
    /// rehash.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// The nominal size in bytes of one stored value.
    ///
    /// Informational only: values are stored as `V` by value, so this is
    /// never used to size any allocation.
    pub fn element_size(&self) -> usize {
        mem::size_of::<V>()
    }

    /// Inserts a key/value pair, replacing and returning the previous value
    /// if the key was already present.
    ///
    /// The key bytes are copied into the table; the caller keeps its slice.
    /// If the destination chain exceeds [`MAX_CHAIN`] entries after the
    /// insert, the table rehashes before returning.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::OutOfMemory`] if the key copy, the chain slot,
    /// or a triggered rehash cannot be allocated. A failed rehash rolls the
    /// triggering insert back; every previously stored entry stays reachable
    /// under the old bucket array.
    pub fn insert(&mut self, key: &[u8], value: V) -> Result<Option<V>, TableError> {
        let hash = fold(key);
        let index = bucket_index(hash, self.buckets.len());
        let chain = &mut self.buckets[index];

        if let Some(entry) = chain.iter_mut().find(|e| e.matches(key, hash)) {
            return Ok(Some(mem::replace(&mut entry.value, value)));
        }

        let mut owned_key = Vec::new();
        owned_key.try_reserve_exact(key.len())?;
        owned_key.extend_from_slice(key);

        chain.try_reserve(1)?;
        chain.push(Entry {
            key: owned_key.into_boxed_slice(),
            hash,
            value,
        });
        self.populated += 1;

        if self.buckets[index].len() > MAX_CHAIN {
            if let Err(err) = self.grow() {
                // Roll the append back so a failed rehash leaves exactly the
                // pre-insert contents reachable.
                self.buckets[index].pop();
                self.populated -= 1;
                return Err(err);
            }
        }

        Ok(None)
    }

    /// Returns a reference to the value stored for `key`, or `None` if the
    /// key is absent.
    pub fn get(&self, key: &[u8]) -> Option<&V> {
        let hash = fold(key);
        let chain = &self.buckets[bucket_index(hash, self.buckets.len())];
        chain
            .iter()
            .find(|e| e.matches(key, hash))
            .map(|e| &e.value)
    }

    /// Returns a mutable reference to the value stored for `key`.
    pub fn get_mut(&mut self, key: &[u8]) -> Option<&mut V> {
        let hash = fold(key);
        let index = bucket_index(hash, self.buckets.len());
        self.buckets[index]
            .iter_mut()
            .find(|e| e.matches(key, hash))
            .map(|e| &mut e.value)
    }

    /// Returns `true` if the table holds an entry for `key`.
    ///
    /// Never allocates or mutates.
    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.get(key).is_some()
    }

    /// Removes the entry for `key`, returning its value.
    ///
    /// Removing an absent key is a no-op returning `None`; other entries are
    /// unaffected either way.
    pub fn remove(&mut self, key: &[u8]) -> Option<V> {
        let hash = fold(key);
        let index = bucket_index(hash, self.buckets.len());
        let chain = &mut self.buckets[index];
        let pos = chain.iter().position(|e| e.matches(key, hash))?;
        // Chain order carries no meaning, so the O(1) removal is fine.
        let entry = chain.swap_remove(pos);
        self.populated -= 1;
        Some(entry.value)
    }

    /// Removes all entries, keeping the current bucket array.
    pub fn clear(&mut self) {
        for chain in &mut self.buckets {
            chain.clear();
        }
        self.populated = 0;
    }

    /// Iterates over all `(key, value)` pairs in unspecified order.
    ///
    /// The order depends on the bucket layout and is not stable across
    /// rehashes.
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &V)> {
        self.buckets
            .iter()
            .flat_map(|chain| chain.iter().map(|e| (&*e.key, &e.value)))
    }

    fn grow(&mut self) -> Result<(), TableError> {
        self.rehash(self.buckets.len() + GROWTH_STEP)
    }

    /// Rebuilds the bucket array at `new_capacity`, remapping every entry.
    ///
    /// Two-phase so no partial state is observable: phase one performs every
    /// allocation fallibly while the old array is untouched; phase two only
    /// moves entries into reserved space and cannot fail.
    fn rehash(&mut self, new_capacity: usize) -> Result<(), TableError> {
        debug_assert!(new_capacity > self.buckets.len());

        let mut new_buckets: Vec<Bucket<V>> = Vec::new();
        new_buckets.try_reserve_exact(new_capacity)?;
        new_buckets.resize_with(new_capacity, Vec::new);

        // Count the target chain lengths under the new capacity, then
        // reserve each chain up front.
        let mut chain_lens: Vec<usize> = Vec::new();
        chain_lens.try_reserve_exact(new_capacity)?;
        chain_lens.resize(new_capacity, 0);
        for chain in &self.buckets {
            for entry in chain {
                chain_lens[bucket_index(entry.hash, new_capacity)] += 1;
            }
        }
        for (chain, &len) in new_buckets.iter_mut().zip(&chain_lens) {
            chain.try_reserve_exact(len)?;
        }

        // Move phase: every push lands in reserved space.
        for chain in &mut self.buckets {
            for entry in chain.drain(..) {
                let index = bucket_index(entry.hash, new_capacity);
                new_buckets[index].push(entry);
            }
        }
        self.buckets = new_buckets;
        Ok(())
    }
}

impl<V> Default for HashTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Debug> Debug for HashTable<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut map = f.debug_map();
        for (key, value) in self.iter() {
            map.entry(&key, value);
        }
        map.finish()
    }
}
