//! A skipmap is a way of storing key-value pairs in such a way that entries
//! can be efficiently accessed, inserted and removed, all in `O(log(n))` on
//! average, without any of the rebalancing a search tree needs.
//!
//! Conceptually, a skipmap resembles something like:
//!
//! ```text
//! <head> ----------> [2] --------------------------------------------------> [9] ---------->
//! <head> ----------> [2] ------------------------------------[7] ----------> [9] ---------->
//! <head> ----------> [2] ----------> [4] ------------------> [7] ----------> [9] --> [10] ->
//! <head> --> [1] --> [2] --> [3] --> [4] --> [5] --> [6] --> [7] --> [8] --> [9] --> [10] ->
//! ```
//!
//! where each node `[x]` has references to nodes further down the list,
//! allowing the algorithm to effectively skip ahead. The height of every node
//! is drawn at random by a [`LevelGenerator`] when it is first inserted.
//!
//! Nodes are owned by an arena and link to each other by index, so the whole
//! structure is safe Rust with a single owner.
//!
//! Keys are ordered by a [`Comparator`] supplied when the map is built, which
//! also provides the sentinel key of the head node. [`IntCmp`] and
//! [`StringCmp`] cover the common cases, [`Natural`] uses a type's own
//! [`Ord`], and [`CompareBy`] wraps any closure.
//!
//! ```
//! use skipmap_arena::{Pair, SkipMap, StringCmp};
//!
//! let mut map = SkipMap::new(16, StringCmp)?;
//! for key in ["a", "c", "b"] {
//!     map.put(key.to_owned(), key.len());
//! }
//! assert_eq!(map.len(), 3);
//! assert_eq!(map.first(), Some(Pair::new("a".to_owned(), 1)));
//! assert!(map.remove(&"b".to_owned()).is_some());
//! assert!(!map.has(&"b".to_owned()));
//! # Ok::<(), skipmap_arena::GeometricError>(())
//! ```
//!
//! A map is not synchronised; wrap it in a lock to share it between threads.

pub mod comparator;
pub mod level_generator;
mod skipmap;
mod skipnode;

pub use crate::{
    comparator::{CompareBy, Comparator, IntCmp, Natural, StringCmp},
    level_generator::{Geometric, GeometricError, LevelGenerator},
    skipmap::{DEFAULT_MAX_LEVEL, Iter, Pair, SkipMap},
};
