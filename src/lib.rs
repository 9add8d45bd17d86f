#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

pub mod hash;
pub mod hash_table;

/// A string-keyed map built on the chained hash table engine.
///
/// This module provides a `StringMap` that wraps the `HashTable` and
/// exposes a `&str`-keyed map interface.
pub mod string_map;

pub use hash_table::HashTable;
pub use hash_table::TableError;
pub use string_map::StringMap;
