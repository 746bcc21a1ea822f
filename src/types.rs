//! Core types for langstore: the loaded store, its entries, and the set of
//! keys awaiting write-back.

use std::collections::{HashMap, HashSet, hash_map};

use serde::{Deserialize, Serialize};

/// A single loaded translation value, tagged at load time.
///
/// `is_pattern` marks values recognized as ICU-style message patterns; the
/// pattern itself stays opaque and is handed to an external formatting engine
/// by the caller. The tag is decided once, at load, and never re-evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Entry {
    /// The decoded translation value.
    pub value: String,

    /// Whether `value` is an ICU-style pattern rather than a verbatim string.
    pub is_pattern: bool,
}

impl Entry {
    pub fn plain(value: impl Into<String>) -> Self {
        Entry {
            value: value.into(),
            is_pattern: false,
        }
    }

    pub fn pattern(value: impl Into<String>) -> Self {
        Entry {
            value: value.into(),
            is_pattern: true,
        }
    }
}

/// An in-memory translation store: key → [`Entry`].
///
/// Produced by a load at the start of a unit of work and read-only
/// thereafter. Keys are unique; the loader rejects duplicates rather than
/// overwriting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Store {
    entries: HashMap<String, Entry>,
}

impl Store {
    pub fn new() -> Self {
        Store::default()
    }

    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, Entry> {
        self.entries.iter()
    }

    /// Looks up `key`; on a miss, records it into `pending` so the writer
    /// can append it at the end of the unit of work.
    pub fn get_or_record(&self, key: &str, pending: &mut PendingKeys) -> Option<&Entry> {
        let entry = self.entries.get(key);
        if entry.is_none() {
            pending.record(key);
        }
        entry
    }

    pub(crate) fn insert(&mut self, key: String, entry: Entry) {
        self.entries.insert(key, entry);
    }
}

impl<'a> IntoIterator for &'a Store {
    type Item = (&'a String, &'a Entry);
    type IntoIter = hash_map::Iter<'a, String, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Keys requested during the current unit of work that had no translation.
///
/// De-duplicated, but iteration preserves the order in which keys were first
/// recorded; the writer appends in that order to keep store-file diffs
/// minimal. Cleared by a successful flush.
#[derive(Debug, Clone, Default)]
pub struct PendingKeys {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl PendingKeys {
    pub fn new() -> Self {
        PendingKeys::default()
    }

    /// Records a missing key. Returns `false` if it was already recorded.
    pub fn record(&mut self, key: impl Into<String>) -> bool {
        let key = key.into();
        if self.seen.insert(key.clone()) {
            self.order.push(key);
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Keys in first-recorded order.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.order.iter()
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.seen.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_keys_keep_insertion_order() {
        let mut pending = PendingKeys::new();
        pending.record("b");
        pending.record("a");
        pending.record("c");
        let keys: Vec<&str> = pending.iter().map(String::as_str).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_pending_keys_deduplicate() {
        let mut pending = PendingKeys::new();
        assert!(pending.record("x"));
        assert!(!pending.record("x"));
        assert_eq!(pending.len(), 1);
    }

    #[test]
    fn test_pending_keys_clear() {
        let mut pending = PendingKeys::new();
        pending.record("x");
        pending.clear();
        assert!(pending.is_empty());
        assert!(pending.record("x"));
    }

    #[test]
    fn test_get_or_record_hit_and_miss() {
        let mut store = Store::new();
        store.insert("greeting".to_string(), Entry::plain("Hello"));
        let mut pending = PendingKeys::new();

        assert!(store.get_or_record("greeting", &mut pending).is_some());
        assert!(pending.is_empty());

        assert!(store.get_or_record("missing", &mut pending).is_none());
        let keys: Vec<&str> = pending.iter().map(String::as_str).collect();
        assert_eq!(keys, vec!["missing"]);
    }
}
