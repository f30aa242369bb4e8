//! Per-slot state of the linear-probing table.

/// Exactly one of empty, tombstone or occupied.
///
/// `Empty` halts a probe on a miss; `Tombstone` marks a deleted pair and lets
/// the probe continue. `Occupied` caches the key's hash so the table can
/// rehash without calling back into `K: Hash`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotRecord<K, V> {
    Empty,
    Tombstone,
    Occupied { key: K, value: V, hash: u64 },
}

impl<K, V> Default for SlotRecord<K, V> {
    fn default() -> Self {
        SlotRecord::Empty
    }
}

impl<K, V> SlotRecord<K, V> {
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, SlotRecord::Empty)
    }

    #[inline]
    pub fn is_tombstone(&self) -> bool {
        matches!(self, SlotRecord::Tombstone)
    }

    #[inline]
    pub fn is_occupied(&self) -> bool {
        matches!(self, SlotRecord::Occupied { .. })
    }

    pub fn key(&self) -> Option<&K> {
        match self {
            SlotRecord::Occupied { key, .. } => Some(key),
            _ => None,
        }
    }

    pub fn value(&self) -> Option<&V> {
        match self {
            SlotRecord::Occupied { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Replace an occupied slot with a tombstone and hand back its pair.
    /// Empty and tombstone slots are left untouched.
    pub fn bury(&mut self) -> Option<(K, V)> {
        if !self.is_occupied() {
            return None;
        }
        match core::mem::replace(self, SlotRecord::Tombstone) {
            SlotRecord::Occupied { key, value, .. } => Some((key, value)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SlotRecord;

    #[test]
    fn states_are_exclusive() {
        let e: SlotRecord<u8, u8> = SlotRecord::default();
        assert!(e.is_empty() && !e.is_tombstone() && !e.is_occupied());
        let t: SlotRecord<u8, u8> = SlotRecord::Tombstone;
        assert!(t.is_tombstone() && !t.is_empty());
        let o = SlotRecord::Occupied { key: 1u8, value: 'a', hash: 1 };
        assert!(o.is_occupied());
        assert_eq!(o.key(), Some(&1));
        assert_eq!(o.value(), Some(&'a'));
    }

    /// Invariant: burying clears the payload and never produces `Empty`.
    #[test]
    fn bury_turns_occupied_into_tombstone() {
        let mut s = SlotRecord::Occupied { key: "k", value: 3, hash: 0 };
        assert_eq!(s.bury(), Some(("k", 3)));
        assert!(s.is_tombstone());
        assert_eq!(s.bury(), None);
        assert!(s.is_tombstone());

        let mut e: SlotRecord<&str, i32> = SlotRecord::Empty;
        assert_eq!(e.bury(), None);
        assert!(e.is_empty());
    }
}
