//! plain-collections: foundational single-threaded containers built on one
//! owned growable array and arena-linked nodes.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small set of containers whose growth, collision and removal
//!   behaviour is exact and observable, not left to the allocator or to
//!   std's internals.
//! - Layers:
//!   - GrowableArray<T>: contiguous storage with an explicit logical
//!     capacity that doubles on overflow.
//!   - SinglyLinkedList<T> / DoublyLinkedList<T>: nodes in a `slotmap`
//!     arena, linked by generational keys. Stack and Queue wrap the
//!     singly linked list.
//!   - ChainingHashTable<K, V, S>: a GrowableArray of optional owned
//!     chains; a chain reaching `max_depth` doubles the bucket count.
//!   - ProbingHashTable<K, V, S>: a GrowableArray of `SlotRecord`s with
//!     tombstones, a load threshold, and compaction on lookup.
//!   - BinaryTree / BinaryHeap: level-order storage in a GrowableArray.
//!   - BinarySearchTree: arena nodes with parent links.
//!   - FenwickTree: 1-based prefix sums.
//!
//! Constraints
//! - Single-threaded. Hash tables are `!Send`/`!Sync` through their
//!   reentrancy check marker.
//! - Each container exclusively owns its storage; removal hands values
//!   back by move, so nothing stale stays reachable.
//! - Keys are unique in both hash tables; `add` on an existing key fails
//!   and never overwrites.
//!
//! Hasher and rehashing invariants
//! - The hash source is a `BuildHasher` type parameter defaulting to
//!   hashbrown's `DefaultHashBuilder`.
//! - Each stored pair carries its `u64` hash and every resize places pairs
//!   by that stored hash; `K: Hash` is never invoked after insertion.
//!
//! Reentrancy policy
//! - Every public hash-table method takes a debug-only guard for its
//!   duration. Only `K: Hash`/`K: Eq` run user code while it is held; a
//!   call back into the same table from there panics in debug builds.
//! - Removed pairs are dropped after the guard is released.
//!
//! Errors and logging
//! - Fallible calls return `Result<_, Error>`; misses are `bool`/`Option`.
//! - Growth and resizes emit `log::debug!`, lookup compaction emits
//!   `log::trace!`. The crate never installs a logger.
//!
//! Notes and non-goals
//! - No iteration-order guarantees for either hash table.
//! - No shrinking: tables only return to their starting size on `clear`.
//! - No thread safety, persistence or serialization.

pub mod binary_heap;
pub mod binary_search_tree;
pub mod binary_tree;
pub mod chaining_hash_table;
pub mod doubly_linked_list;
pub mod error;
pub mod fenwick_tree;
pub mod growable_array;
mod hash_table_proptest;
pub mod probing_hash_table;
pub mod queue;
mod reentrancy;
pub mod singly_linked_list;
pub mod slot;
pub mod stack;
#[cfg(test)]
mod test_util;

// Public surface
pub use binary_heap::BinaryHeap;
pub use binary_search_tree::{BinarySearchTree, TreeHandle};
pub use binary_tree::BinaryTree;
pub use chaining_hash_table::{ChainingHashTable, DEFAULT_MAX_DEPTH};
pub use doubly_linked_list::DoublyLinkedList;
pub use error::{Error, Result};
pub use fenwick_tree::{FenwickTree, DEFAULT_FENWICK_CAPACITY};
pub use growable_array::{GrowableArray, DEFAULT_CAPACITY};
pub use probing_hash_table::{
    linear_probe, quadratic_probe, ProbeFn, ProbingHashTable, DEFAULT_LOAD_THRESHOLD,
};
pub use queue::Queue;
pub use singly_linked_list::{NodeHandle, SinglyLinkedList};
pub use slot::SlotRecord;
pub use stack::Stack;
