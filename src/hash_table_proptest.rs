#![cfg(test)]

// Property tests for both hash tables, kept inside the crate so they can
// reach the deterministic hashers in `test_util`.

use crate::chaining_hash_table::ChainingHashTable;
use crate::probing_hash_table::{quadratic_probe, ProbingHashTable};
use crate::test_util::ConstBuildHasher;
use core::hash::BuildHasher;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::{BTreeSet, HashMap};
use std::fmt;

// Key newtype with Borrow<str> to exercise borrowed lookup.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
struct Key(String);
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
impl std::borrow::Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// Pool-indexed operations so shrinking converges on earlier keys.
#[derive(Clone, Debug)]
enum OpI {
    Add(usize, i32),
    Remove(usize),
    Lookup(usize),
    Contains(String),
    Resize,
    Clear,
    Keys,
}

fn key_from(pool: &[String], i: usize) -> Key {
    Key(pool[i].clone())
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=12).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            6 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Add(i, v)),
            4 => idx.clone().prop_map(OpI::Remove),
            4 => idx.clone().prop_map(OpI::Lookup),
            2 => prop_oneof![
                contains_pool.prop_map(|s: String| s),
                "[a-z]{0,5}".prop_map(|s| s)
            ]
            .prop_map(OpI::Contains),
            1 => Just(OpI::Resize),
            1 => Just(OpI::Keys),
            1 => Just(OpI::Clear),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Both tables seen through the operations the model can check.
trait TableUnderTest {
    fn add(&mut self, k: Key, v: i32) -> bool;
    fn remove(&mut self, k: &str) -> bool;
    fn lookup(&mut self, k: &str) -> Option<i32>;
    fn contains(&self, k: &str) -> bool;
    fn resize(&mut self);
    fn clear(&mut self);
    fn count(&self) -> usize;
    fn keys(&self) -> Vec<Key>;
    fn check_structure(&self) -> Result<(), TestCaseError>;
}

impl<S: BuildHasher> TableUnderTest for ChainingHashTable<Key, i32, S> {
    fn add(&mut self, k: Key, v: i32) -> bool {
        ChainingHashTable::add(self, k, v)
    }
    fn remove(&mut self, k: &str) -> bool {
        ChainingHashTable::remove(self, k)
    }
    fn lookup(&mut self, k: &str) -> Option<i32> {
        ChainingHashTable::lookup(self, k).copied()
    }
    fn contains(&self, k: &str) -> bool {
        self.contains_key(k)
    }
    fn resize(&mut self) {
        ChainingHashTable::resize(self)
    }
    fn clear(&mut self) {
        ChainingHashTable::clear(self)
    }
    fn count(&self) -> usize {
        ChainingHashTable::count(self)
    }
    fn keys(&self) -> Vec<Key> {
        ChainingHashTable::keys(self).into_iter().cloned().collect()
    }
    fn check_structure(&self) -> Result<(), TestCaseError> {
        prop_assert!(self.capacity() >= 1);
        Ok(())
    }
}

impl<S: BuildHasher> TableUnderTest for ProbingHashTable<Key, i32, S> {
    fn add(&mut self, k: Key, v: i32) -> bool {
        ProbingHashTable::add(self, k, v)
    }
    fn remove(&mut self, k: &str) -> bool {
        ProbingHashTable::remove(self, k)
    }
    fn lookup(&mut self, k: &str) -> Option<i32> {
        ProbingHashTable::lookup(self, k).copied()
    }
    fn contains(&self, k: &str) -> bool {
        self.contains_key(k)
    }
    fn resize(&mut self) {
        ProbingHashTable::resize(self)
    }
    fn clear(&mut self) {
        ProbingHashTable::clear(self)
    }
    fn count(&self) -> usize {
        ProbingHashTable::count(self)
    }
    fn keys(&self) -> Vec<Key> {
        ProbingHashTable::keys(self).into_iter().cloned().collect()
    }
    fn check_structure(&self) -> Result<(), TestCaseError> {
        prop_assert!(self.load_factor() <= self.load_threshold());
        prop_assert_eq!(self.keys().len(), self.count());
        Ok(())
    }
}

// Property: state-machine equivalence against std::collections::HashMap.
// - `add` succeeds exactly when the key is absent, and never overwrites.
// - `remove` succeeds exactly when the key is present.
// - `lookup`/`contains_key` parity with the model, including borrowed keys
//   outside the pool.
// - `keys` yields each live key exactly once.
// - `count` parity after every op; per-table structural checks hold.
fn run_scenario<T: TableUnderTest>(
    sut: &mut T,
    pool: &[String],
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<Key, i32> = HashMap::new();
    for op in ops {
        match op {
            OpI::Add(i, v) => {
                let k = key_from(pool, i);
                let already = model.contains_key(&k);
                prop_assert_eq!(sut.add(k.clone(), v), !already);
                model.entry(k).or_insert(v);
            }
            OpI::Remove(i) => {
                let k = key_from(pool, i);
                prop_assert_eq!(sut.remove(&k.0), model.remove(&k).is_some());
            }
            OpI::Lookup(i) => {
                let k = key_from(pool, i);
                prop_assert_eq!(sut.lookup(&k.0), model.get(&k).copied());
            }
            OpI::Contains(s) => {
                let has_model = model.keys().any(|k| k.0 == s);
                prop_assert_eq!(sut.contains(&s), has_model);
            }
            OpI::Resize => sut.resize(),
            OpI::Clear => {
                sut.clear();
                model.clear();
            }
            OpI::Keys => {
                let s_keys = sut.keys();
                let unique: BTreeSet<_> = s_keys.iter().cloned().collect();
                prop_assert_eq!(unique.len(), s_keys.len(), "keys must be distinct");
                let m_keys: BTreeSet<_> = model.keys().cloned().collect();
                prop_assert_eq!(unique, m_keys);
            }
        }
        prop_assert_eq!(sut.count(), model.len());
        sut.check_structure()?;
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_chaining_state_machine((pool, ops) in arb_scenario(), depth in 1usize..6) {
        let mut sut: ChainingHashTable<Key, i32> = ChainingHashTable::with_capacity(2).unwrap();
        sut.set_max_depth(depth).unwrap();
        run_scenario(&mut sut, &pool, ops)?;
    }

    #[test]
    fn prop_probing_state_machine(
        (pool, ops) in arb_scenario(),
        threshold in prop_oneof![Just(0.5), Just(0.7), Just(1.0)],
    ) {
        let mut sut: ProbingHashTable<Key, i32> = ProbingHashTable::with_capacity(2).unwrap();
        sut.set_load_threshold(threshold).unwrap();
        run_scenario(&mut sut, &pool, ops)?;
    }
}

// Same invariants under worst-case collisions: every key shares one home.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_chaining_with_collisions((pool, ops) in arb_scenario()) {
        let mut sut: ChainingHashTable<Key, i32, ConstBuildHasher> =
            ChainingHashTable::with_hasher(ConstBuildHasher);
        run_scenario(&mut sut, &pool, ops)?;
    }

    #[test]
    fn prop_probing_with_collisions((pool, ops) in arb_scenario(), quadratic in any::<bool>()) {
        let mut sut: ProbingHashTable<Key, i32, ConstBuildHasher> =
            ProbingHashTable::with_capacity_and_hasher(3, ConstBuildHasher).unwrap();
        if quadratic {
            sut = sut.with_probe(quadratic_probe).unwrap();
        }
        sut.set_load_threshold(1.0).unwrap();
        run_scenario(&mut sut, &pool, ops)?;
    }
}
