//! ProbingHashTable: open addressing over one GrowableArray of SlotRecords.
//!
//! Probe sequence for a key with home slot `h` in a table of `n` slots:
//! `h, h + offset(1), h + offset(2), ...` (mod `n`), `n` steps in total. The
//! default offset is `offset(i) = i`, which already visits every slot. A
//! custom offset function may not, so its `n` steps are followed by a linear
//! sweep from `h`; every slot stays reachable and every walk is bounded.
//!
//! All three of `add`, `remove` and `lookup` walk the same sequence starting
//! at the home slot itself.
//!
//! Deletion leaves a tombstone. `lookup` compacts: when the key is found past
//! a tombstone on its own probe sequence, the pair moves into the first such
//! tombstone and its old slot is buried. Only the looked-up pair moves, so no
//! other key's reachability changes.

use crate::error::{Error, Result};
use crate::growable_array::GrowableArray;
use crate::reentrancy::ReentrancyCheck;
use crate::slot::SlotRecord;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use hashbrown::hash_map::DefaultHashBuilder;

pub const DEFAULT_LOAD_THRESHOLD: f64 = 0.7;

/// Maps a probe iteration (1, 2, 3, ...) to an offset from the home slot.
pub type ProbeFn = fn(usize) -> usize;

pub fn linear_probe(iter: usize) -> usize {
    iter
}

pub fn quadratic_probe(iter: usize) -> usize {
    iter.wrapping_mul(iter)
}

enum Probe {
    /// Key present at `idx`; `tombstone` is the first tombstone passed on the way.
    Found { idx: usize, tombstone: Option<usize> },
    /// Key absent; `slot` is where an insert would go, if any.
    Vacant { slot: Option<usize> },
}

#[derive(Debug)]
struct Slots<K, V> {
    records: GrowableArray<SlotRecord<K, V>>,
    count: usize,
    // None means linear probing without the trailing sweep.
    probe: Option<ProbeFn>,
}

impl<K, V> Slots<K, V> {
    fn with_capacity(capacity: usize) -> Result<Self> {
        Ok(Self {
            records: GrowableArray::filled(capacity, SlotRecord::default)?,
            count: 0,
            probe: None,
        })
    }

    #[inline]
    fn len(&self) -> usize {
        self.records.length()
    }

    fn sequence(&self, hash: u64) -> impl Iterator<Item = usize> {
        let n = self.len();
        let home = (hash % n as u64) as usize;
        let probe = self.probe;
        let sweep = if probe.is_some() { n } else { 0 };
        (0..n)
            .map(move |i| match (i, probe) {
                (0, _) => home,
                (_, Some(offset)) => (home + offset(i) % n) % n,
                (_, None) => (home + i) % n,
            })
            .chain((0..sweep).map(move |i| (home + i) % n))
    }

    fn search<Q>(&self, hash: u64, key: &Q) -> Probe
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let records = self.records.as_slice();
        let mut tombstone = None;
        for idx in self.sequence(hash) {
            match &records[idx] {
                SlotRecord::Empty => {
                    return Probe::Vacant {
                        slot: Some(tombstone.unwrap_or(idx)),
                    }
                }
                SlotRecord::Tombstone => {
                    tombstone.get_or_insert(idx);
                }
                SlotRecord::Occupied { key: k, hash: h, .. } => {
                    if *h == hash && k.borrow() == key {
                        return Probe::Found { idx, tombstone };
                    }
                }
            }
        }
        Probe::Vacant { slot: tombstone }
    }

    fn crowded_after_insert(&self, threshold: f64) -> bool {
        (self.count + 1) as f64 / self.len() as f64 > threshold
    }

    fn first_free(&self, hash: u64) -> Option<usize> {
        let records = self.records.as_slice();
        self.sequence(hash).find(|&idx| !records[idx].is_occupied())
    }

    fn write(&mut self, idx: usize, key: K, value: V, hash: u64) {
        self.records.as_mut_slice()[idx] = SlotRecord::Occupied { key, value, hash };
        self.count += 1;
    }

    // Store a pair known to be absent, growing until a free slot is reachable.
    fn place(&mut self, key: K, value: V, hash: u64) {
        loop {
            if let Some(idx) = self.first_free(hash) {
                self.write(idx, key, value, hash);
                return;
            }
            self.grow();
        }
    }

    fn value_at(&self, idx: usize) -> Option<&V> {
        self.records.as_slice()[idx].value()
    }

    fn bury(&mut self, idx: usize) -> Option<(K, V)> {
        let pair = self.records.as_mut_slice()[idx].bury();
        if pair.is_some() {
            self.count -= 1;
        }
        pair
    }

    // Move the occupied slot `from` into the tombstone `to`; `from` becomes
    // the tombstone.
    fn relocate(&mut self, from: usize, to: usize) {
        let records = self.records.as_mut_slice();
        let moved = core::mem::replace(&mut records[from], SlotRecord::Tombstone);
        records[to] = moved;
        log::trace!("probing hash table moved slot {from} into tombstone {to}");
    }

    fn grow(&mut self) {
        let pending: Vec<(K, V, u64)> = self
            .records
            .as_mut_slice()
            .iter_mut()
            .filter_map(|slot| match core::mem::take(slot) {
                SlotRecord::Occupied { key, value, hash } => Some((key, value, hash)),
                _ => None,
            })
            .collect();

        self.records.double_capacity();
        self.records.fill_to_capacity(SlotRecord::default);
        self.count = 0;
        for (key, value, hash) in pending {
            self.place(key, value, hash);
        }
        log::debug!(
            "probing hash table resized to {} slots ({} entries)",
            self.len(),
            self.count
        );
    }
}

#[derive(Debug)]
pub struct ProbingHashTable<K, V, S = DefaultHashBuilder> {
    hasher: S,
    slots: Slots<K, V>,
    initial_capacity: usize,
    load_threshold: f64,
    reentrancy: ReentrancyCheck,
}

impl<K, V> ProbingHashTable<K, V>
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

impl<K, V> Default for ProbingHashTable<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> ProbingHashTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        let mut records = GrowableArray::default();
        records.fill_to_capacity(SlotRecord::default);
        Self::from_parts(
            hasher,
            Slots {
                records,
                count: 0,
                probe: None,
            },
        )
    }

    /// Start with `capacity` slots. Zero slots is rejected.
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Result<Self> {
        Ok(Self::from_parts(hasher, Slots::with_capacity(capacity)?))
    }

    fn from_parts(hasher: S, slots: Slots<K, V>) -> Self {
        Self {
            hasher,
            initial_capacity: slots.len(),
            slots,
            load_threshold: DEFAULT_LOAD_THRESHOLD,
            reentrancy: ReentrancyCheck::new(),
        }
    }

    /// Replace the probe offset function. Only allowed while the table is
    /// empty, since existing pairs were placed along the old sequence.
    pub fn with_probe(mut self, probe: ProbeFn) -> Result<Self> {
        if self.slots.count != 0 {
            return Err(Error::InvalidArgument(
                "probe function can only change on an empty table",
            ));
        }
        self.slots.records.as_mut_slice().fill_with(SlotRecord::default);
        self.slots.probe = Some(probe);
        Ok(self)
    }

    /// Number of live pairs.
    #[inline]
    pub fn count(&self) -> usize {
        self.slots.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.count == 0
    }

    /// Number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.slots.count as f64 / self.slots.len() as f64
    }

    #[inline]
    pub fn load_threshold(&self) -> f64 {
        self.load_threshold
    }

    /// Set the maximum load factor. Must lie in (0, 1].
    pub fn set_load_threshold(&mut self, threshold: f64) -> Result<()> {
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(Error::InvalidArgument("load threshold must be in (0, 1]"));
        }
        self.load_threshold = threshold;
        Ok(())
    }

    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q)
    }

    /// Insert a new pair. Returns `false` and leaves the table untouched when
    /// `key` is already present anywhere on its probe sequence.
    pub fn add(&mut self, key: K, value: V) -> bool {
        let _g = self.reentrancy.enter();
        let hash = self.make_hash(&key);
        let slot = match self.slots.search(hash, &key) {
            Probe::Found { .. } => return false,
            Probe::Vacant { slot } => slot,
        };

        if self.slots.crowded_after_insert(self.load_threshold) {
            // The threshold may sit well below the current load.
            while self.slots.crowded_after_insert(self.load_threshold) {
                self.slots.grow();
            }
            self.slots.place(key, value, hash);
            return true;
        }
        match slot {
            Some(idx) => self.slots.write(idx, key, value, hash),
            None => self.slots.place(key, value, hash),
        }
        true
    }

    /// Bury the pair stored under `key`. Returns whether one was removed.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        // Drop the pair only after the guard is released.
        let removed = {
            let _g = self.reentrancy.enter();
            let hash = self.make_hash(key);
            match self.slots.search(hash, key) {
                Probe::Found { idx, .. } => self.slots.bury(idx),
                Probe::Vacant { .. } => None,
            }
        };
        removed.is_some()
    }

    /// Find the value stored under `key`, compacting its probe path.
    pub fn lookup<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter();
        let hash = self.make_hash(key);
        match self.slots.search(hash, key) {
            Probe::Found {
                idx,
                tombstone: Some(tomb),
            } => {
                self.slots.relocate(idx, tomb);
                self.slots.value_at(tomb)
            }
            Probe::Found {
                idx,
                tombstone: None,
            } => self.slots.value_at(idx),
            Probe::Vacant { .. } => None,
        }
    }

    /// Membership test without compaction.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter();
        let hash = self.make_hash(key);
        matches!(self.slots.search(hash, key), Probe::Found { .. })
    }

    /// Double the slot count and re-add every occupied pair. Tombstones do
    /// not survive.
    pub fn resize(&mut self) {
        let _g = self.reentrancy.enter();
        self.slots.grow();
    }

    /// Drop every pair and return to the starting slot count.
    pub fn clear(&mut self) {
        let _g = self.reentrancy.enter();
        self.slots
            .records
            .reset(self.initial_capacity, SlotRecord::default);
        self.slots.count = 0;
    }

    pub fn keys(&self) -> Vec<&K> {
        self.slots
            .records
            .as_slice()
            .iter()
            .filter_map(SlotRecord::key)
            .collect()
    }

    pub fn values(&self) -> Vec<&V> {
        self.slots
            .records
            .as_slice()
            .iter()
            .filter_map(SlotRecord::value)
            .collect()
    }
}
