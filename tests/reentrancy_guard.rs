// Reentrancy: a key's Eq impl that calls back into the table it is being
// compared inside must trip the debug guard, and the table must stay usable
// once the panic unwinds.
use plain_collections::{ChainingHashTable, ProbingHashTable};
use std::cell::RefCell;
use std::hash::{Hash, Hasher};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;

type Table = ChainingHashTable<ReKey, i32>;

thread_local! {
    static TABLE: RefCell<Option<Rc<Table>>> = const { RefCell::new(None) };
}

#[derive(Debug)]
struct ReKey(u32);

impl Hash for ReKey {
    fn hash<H: Hasher>(&self, h: &mut H) {
        self.0.hash(h);
    }
}

impl PartialEq for ReKey {
    fn eq(&self, other: &Self) -> bool {
        // Take the table so the nested call cannot recurse again.
        if let Some(table) = TABLE.with(|t| t.borrow_mut().take()) {
            let _ = table.contains_key(&ReKey(other.0));
        }
        self.0 == other.0
    }
}

impl Eq for ReKey {}

#[test]
fn sequential_calls_are_fine() {
    let mut t = Table::new();
    assert!(t.add(ReKey(1), 1));
    assert_eq!(t.lookup(&ReKey(1)), Some(&1));
    assert!(t.contains_key(&ReKey(1)));
    assert!(t.remove(&ReKey(1)));

    let mut p: ProbingHashTable<ReKey, i32> = ProbingHashTable::new();
    assert!(p.add(ReKey(2), 2));
    assert_eq!(p.lookup(&ReKey(2)), Some(&2));
}

#[cfg(debug_assertions)]
#[test]
fn reentrant_lookup_panics_in_debug() {
    let mut t = Table::new();
    assert!(t.add(ReKey(1), 10));
    let t = Rc::new(t);

    TABLE.with(|c| *c.borrow_mut() = Some(Rc::clone(&t)));
    let res = catch_unwind(AssertUnwindSafe(|| t.lookup(&ReKey(1)).copied()));
    TABLE.with(|c| c.borrow_mut().take());
    assert!(res.is_err(), "expected reentrancy to panic in debug builds");

    // The guard was released during unwinding.
    assert_eq!(t.lookup(&ReKey(1)), Some(&10));
}
