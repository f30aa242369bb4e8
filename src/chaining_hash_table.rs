//! ChainingHashTable: separate chaining over a GrowableArray of owned lists.
//!
//! Bucket index is `hash % bucket_count`. Each bucket is either absent or an
//! owned `SinglyLinkedList` of entries; a chain whose depth reaches
//! `max_depth` doubles the bucket count and rehashes every entry. Doubling
//! repeats on later inserts until the chain splits, unless its hashes agree
//! so closely that no bounded number of doublings could ever split it.
//!
//! Entries cache their `u64` hash, so rehashing never calls `K: Hash`, and
//! reinsertion during a resize skips the duplicate scan: keys are already
//! pairwise distinct before the resize starts.

use crate::error::{Error, Result};
use crate::growable_array::GrowableArray;
use crate::reentrancy::ReentrancyCheck;
use crate::singly_linked_list::SinglyLinkedList;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use hashbrown::hash_map::DefaultHashBuilder;

pub const DEFAULT_MAX_DEPTH: usize = 5;

// Doublings an overflowing chain may need before it splits. Chains that stay
// whole past this (identical or near-identical hashes) do not grow the table.
const SPLIT_LOOKAHEAD: u32 = 8;

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
    hash: u64,
}

type Chain<K, V> = SinglyLinkedList<Entry<K, V>>;

// Bucket storage, kept apart from the hasher and the reentrancy check so the
// table can mutate it while an entry guard is held.
#[derive(Debug)]
struct Buckets<K, V> {
    slots: GrowableArray<Option<Chain<K, V>>>,
    count: usize,
}

impl<K, V> Buckets<K, V> {
    fn with_capacity(capacity: usize) -> Result<Self> {
        Ok(Self {
            slots: GrowableArray::filled(capacity, || None)?,
            count: 0,
        })
    }

    #[inline]
    fn len(&self) -> usize {
        self.slots.length()
    }

    #[inline]
    fn index_of(&self, hash: u64) -> usize {
        (hash % self.len() as u64) as usize
    }

    fn chain(&self, hash: u64) -> Option<&Chain<K, V>> {
        self.slots.as_slice()[self.index_of(hash)].as_ref()
    }

    fn existing_chain_mut(&mut self, hash: u64) -> Option<&mut Chain<K, V>> {
        let idx = self.index_of(hash);
        self.slots.as_mut_slice()[idx].as_mut()
    }

    fn chain_mut(&mut self, hash: u64) -> &mut Chain<K, V> {
        let idx = self.index_of(hash);
        self.slots.as_mut_slice()[idx].get_or_insert_with(SinglyLinkedList::new)
    }

    fn entries(&self) -> impl Iterator<Item = &Entry<K, V>> + '_ {
        self.slots.as_slice().iter().flatten().flat_map(|c| c.iter())
    }

    // Whether some doubling, up to `SPLIT_LOOKAHEAD` of them, would spread the
    // chain under `hash` over more than one bucket. Entries agreeing modulo
    // `len << k` agree modulo every smaller power-of-two multiple of `len`.
    fn splittable(&self, hash: u64) -> bool {
        let span = (self.len() as u64).saturating_mul(1 << SPLIT_LOOKAHEAD);
        let home = hash % span;
        self.chain(hash)
            .is_some_and(|chain| chain.iter().any(|e| e.hash % span != home))
    }

    fn grow(&mut self) {
        let mut drained = Vec::with_capacity(self.count);
        for bucket in self.slots.as_mut_slice() {
            if let Some(chain) = bucket.as_mut() {
                drained.extend(chain.drain());
            }
            *bucket = None;
        }

        self.slots.double_capacity();
        self.slots.fill_to_capacity(|| None);
        for entry in drained {
            self.chain_mut(entry.hash).push(entry);
        }
        log::debug!(
            "chaining hash table resized to {} buckets ({} entries)",
            self.len(),
            self.count
        );
    }
}

#[derive(Debug)]
pub struct ChainingHashTable<K, V, S = DefaultHashBuilder> {
    hasher: S,
    buckets: Buckets<K, V>,
    initial_capacity: usize,
    max_depth: usize,
    reentrancy: ReentrancyCheck,
}

impl<K, V> ChainingHashTable<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_hasher(DefaultHashBuilder::default())
    }

    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::with_capacity_and_hasher(capacity, DefaultHashBuilder::default())
    }
}

impl<K, V> Default for ChainingHashTable<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> ChainingHashTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        let mut slots = GrowableArray::default();
        slots.fill_to_capacity(|| None);
        Self::from_parts(hasher, Buckets { slots, count: 0 })
    }

    /// Start with `capacity` buckets. Zero buckets is rejected.
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Result<Self> {
        Ok(Self::from_parts(hasher, Buckets::with_capacity(capacity)?))
    }

    fn from_parts(hasher: S, buckets: Buckets<K, V>) -> Self {
        Self {
            hasher,
            initial_capacity: buckets.len(),
            buckets,
            max_depth: DEFAULT_MAX_DEPTH,
            reentrancy: ReentrancyCheck::new(),
        }
    }

    /// Number of live pairs.
    #[inline]
    pub fn count(&self) -> usize {
        self.buckets.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buckets.count == 0
    }

    /// Number of buckets.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    #[inline]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Chain depth at which an insertion triggers a resize. Must be at least 1.
    pub fn set_max_depth(&mut self, depth: usize) -> Result<()> {
        if depth == 0 {
            return Err(Error::InvalidArgument("max chain depth must be at least 1"));
        }
        self.max_depth = depth;
        Ok(())
    }

    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q)
    }

    /// Insert a new pair. Returns `false` and leaves the table untouched when
    /// `key` is already present; existing values are never overwritten.
    pub fn add(&mut self, key: K, value: V) -> bool {
        let _g = self.reentrancy.enter();
        let hash = self.make_hash(&key);
        let chain = self.buckets.chain_mut(hash);
        if chain.iter().any(|e| e.hash == hash && e.key == key) {
            return false;
        }
        chain.push(Entry { key, value, hash });
        let depth = chain.length();
        self.buckets.count += 1;

        if depth >= self.max_depth && self.buckets.splittable(hash) {
            self.buckets.grow();
        }
        true
    }

    /// Remove the pair stored under `key`. Returns whether one was removed.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        // The entry is dropped after the guard is released so K/V drop glue
        // may use the table again.
        let removed = {
            let _g = self.reentrancy.enter();
            let hash = self.make_hash(key);
            let removed = self
                .buckets
                .existing_chain_mut(hash)
                .and_then(|chain| chain.remove_first(|e| e.hash == hash && e.key.borrow() == key));
            if removed.is_some() {
                self.buckets.count -= 1;
            }
            removed
        };
        removed.is_some()
    }

    pub fn lookup<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter();
        let hash = self.make_hash(key);
        self.buckets
            .chain(hash)?
            .iter()
            .find(|e| e.hash == hash && e.key.borrow() == key)
            .map(|e| &e.value)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.lookup(key).is_some()
    }

    /// Double the bucket count and rehash every pair.
    pub fn resize(&mut self) {
        let _g = self.reentrancy.enter();
        self.buckets.grow();
    }

    /// Drop every chain and return to the starting bucket count.
    pub fn clear(&mut self) {
        let _g = self.reentrancy.enter();
        self.buckets.slots.reset(self.initial_capacity, || None);
        self.buckets.count = 0;
    }

    pub fn keys(&self) -> Vec<&K> {
        self.buckets.entries().map(|e| &e.key).collect()
    }

    pub fn values(&self) -> Vec<&V> {
        self.buckets.entries().map(|e| &e.value).collect()
    }
}
