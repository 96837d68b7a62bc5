//! # Chainmap
//!
//! Two small, single-threaded collections:
//!
//! - `ChainedHashMap`: a hash map using separate chaining. Entries live in
//!   per-slot buckets, and the table doubles before an insertion would push
//!   the load factor past its configured maximum.
//! - `LinkedDeque`: a double-ended queue over a doubly linked list with O(1)
//!   insertion and removal at both ends.
//!
//! ## Map Usage
//!
//! ```rust
//! use chainmap::{ChainedHashMap, MapError};
//!
//! // Create a new hash map
//! let mut map = ChainedHashMap::new();
//!
//! // Insert values
//! map.put("apple".to_string(), 1);
//! map.put("banana".to_string(), 2);
//!
//! // Retrieve values
//! assert_eq!(map.get("apple"), Some(&1));
//!
//! // Update values
//! map.put("apple".to_string(), 10);
//! assert_eq!(map.get("apple"), Some(&10));
//! assert_eq!(map.size(), 2);
//!
//! // Removal is not part of the map's contract
//! assert!(matches!(map.remove("apple"), Err(MapError::UnsupportedOperation { .. })));
//! assert_eq!(map.get("apple"), Some(&10));
//! ```
//!
//! ## Deque Usage
//!
//! ```rust
//! use chainmap::LinkedDeque;
//!
//! let mut deque = LinkedDeque::new();
//! deque.add_last(2);
//! deque.add_first(1);
//! deque.add_last(3);
//!
//! assert_eq!(deque.get(1), Some(&2));
//! assert_eq!(deque.get_recursive(1), Some(&2));
//! assert_eq!(deque.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
//!
//! assert_eq!(deque.remove_first(), Some(1));
//! assert_eq!(deque.remove_last(), Some(3));
//! assert_eq!(deque.remove_last(), Some(2));
//! assert_eq!(deque.remove_last(), None);
//! ```

/// Bucket containers the map chains entries into
pub mod bucket;
/// Module implementing the separate-chaining hash map
mod chained_map;
/// Module defining the deque interface
mod deque;
/// Error types for the map
mod error;
/// Module implementing the linked-list deque and its iterators
pub mod linked_deque;
/// Utility functions and traits for the hash map
mod utils;

pub use chained_map::{
    ChainedHashMap, DEFAULT_INITIAL_CAPACITY, DEFAULT_MAX_LOAD_FACTOR, Iter, Keys, Values,
};
pub use deque::Deque;
pub use error::{MapError, Result};
pub use linked_deque::LinkedDeque;
pub use utils::MapExtensions;
