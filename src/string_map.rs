use core::fmt::Debug;
use core::str;

use crate::hash_table::HashTable;
use crate::hash_table::TableError;

/// A string-keyed map backed by the separate-chaining [`HashTable`].
///
/// This is the surface most callers want: keys are `&str`, values are any
/// `V`, and every operation delegates to the engine, which owns the bucket
/// array, the key copies, and the values. See the [`hash_table`] module for
/// capacity and rehash behavior.
///
/// [`hash_table`]: crate::hash_table
///
/// ## Example
///
/// ```rust
/// use chain_hash::StringMap;
///
/// let mut map = StringMap::new();
/// map.insert("one", 1)?;
/// map.insert("two", 2)?;
///
/// assert_eq!(map.get("one"), Some(&1));
/// assert!(map.contains_key("two"));
/// assert_eq!(map.remove("one"), Some(1));
/// assert_eq!(map.get("one"), None);
/// # Ok::<(), chain_hash::TableError>(())
/// ```
pub struct StringMap<V> {
    table: HashTable<V>,
}

impl<V> StringMap<V> {
    /// Creates a map with the minimum bucket capacity.
    pub fn new() -> Self {
        StringMap {
            table: HashTable::new(),
        }
    }

    /// Creates a map with at least `initial_capacity` buckets.
    pub fn with_capacity(initial_capacity: usize) -> Self {
        StringMap {
            table: HashTable::with_capacity(initial_capacity),
        }
    }

    /// Fallible variant of [`with_capacity`](Self::with_capacity).
    ///
    /// # Errors
    ///
    /// Returns [`TableError::OutOfMemory`] if the bucket array cannot be
    /// allocated.
    pub fn try_with_capacity(initial_capacity: usize) -> Result<Self, TableError> {
        Ok(StringMap {
            table: HashTable::try_with_capacity(initial_capacity)?,
        })
    }

    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the map contains no entries.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the current number of buckets.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Inserts a key/value pair, replacing and returning the previous value
    /// if the key was already present.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::OutOfMemory`] if the key copy, the chain slot,
    /// or a triggered rehash cannot be allocated; the map is unchanged in
    /// that case.
    pub fn insert(&mut self, key: &str, value: V) -> Result<Option<V>, TableError> {
        self.table.insert(key.as_bytes(), value)
    }

    /// Returns a reference to the value stored for `key`.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.table.get(key.as_bytes())
    }

    /// Returns a mutable reference to the value stored for `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.table.get_mut(key.as_bytes())
    }

    /// Returns `true` if the map holds an entry for `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.table.contains_key(key.as_bytes())
    }

    /// Removes the entry for `key`, returning its value. Removing an absent
    /// key is a no-op returning `None`.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        self.table.remove(key.as_bytes())
    }

    /// Removes all entries, keeping the current bucket array.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Iterates over all `(key, value)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.table.iter().map(|(key, value)| {
            // SAFETY: every key in the table was inserted through
            // `StringMap::insert` from a `&str`, so the bytes are valid
            // UTF-8.
            (unsafe { str::from_utf8_unchecked(key) }, value)
        })
    }
}

impl<V> Default for StringMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Debug> Debug for StringMap<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut map = f.debug_map();
        for (key, value) in self.iter() {
            map.entry(&key, value);
        }
        map.finish()
    }
}
