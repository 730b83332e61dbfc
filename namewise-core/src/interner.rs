use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::hash::Hash;
use std::sync::Arc;

/// Deduplicates identifier text so equal names share one allocation.
///
/// The cache only grows. Callers bound the variety of strings they feed it
/// (identifiers seen during an analysis), so no eviction is performed.
#[derive(Debug, Default)]
pub struct StringCache {
    entries: DashMap<Arc<str>, ()>,
}

impl StringCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the canonical instance for `text`, or `None` for `None`.
    pub fn intern(&self, text: Option<&str>) -> Option<Arc<str>> {
        text.map(|t| self.intern_str(t))
    }

    /// Return the canonical instance for `text`, inserting it on first use.
    pub fn intern_str(&self, text: &str) -> Arc<str> {
        if let Some(existing) = self.entries.get(text) {
            return Arc::clone(existing.key());
        }

        // Two threads may both miss above; the entry API makes the loser
        // adopt the winner's allocation.
        match self.entries.entry(Arc::from(text)) {
            Entry::Occupied(entry) => Arc::clone(entry.key()),
            Entry::Vacant(entry) => {
                let key = Arc::clone(entry.key());
                entry.insert(());
                key
            },
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Memoizes a pure function's results.
///
/// Values are computed outside the map's shard locks so a computation may
/// itself consult other memo tables. When two threads race on the same key the
/// first stored value wins and both callers observe it.
#[derive(Debug)]
pub struct Memo<K, V>
where
    K: Eq + Hash,
{
    values: DashMap<K, V>,
}

impl<K, V> Default for Memo<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self {
            values: DashMap::new(),
        }
    }
}

impl<K, V> Memo<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_compute(&self, key: K, compute: impl FnOnce() -> V) -> V {
        if let Some(hit) = self.values.get(&key) {
            return hit.value().clone();
        }

        let value = compute();
        self.values.entry(key).or_insert(value).value().clone()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn test_intern_none_returns_none() {
        let cache = StringCache::new();
        assert!(cache.intern(None).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_intern_returns_shared_instance() {
        let cache = StringCache::new();
        let a = cache.intern(Some("CustomerList")).unwrap();
        let b = cache.intern(Some(&String::from("CustomerList"))).unwrap();

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_intern_distinguishes_case() {
        let cache = StringCache::new();
        let upper = cache.intern_str("Items");
        let lower = cache.intern_str("items");

        assert!(!Arc::ptr_eq(&upper, &lower));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_concurrent_intern_observes_one_instance() {
        let cache = Arc::new(StringCache::new());
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || cache.intern_str("foo"))
            })
            .collect();

        let results: Vec<Arc<str>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let first = &results[0];
        for other in &results[1..] {
            assert!(Arc::ptr_eq(first, other));
            assert_eq!(&**other, "foo");
        }
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_memo_computes_once_per_key() {
        let memo: Memo<String, usize> = Memo::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let value = memo.get_or_compute("abc".to_string(), || {
                calls.fetch_add(1, Ordering::SeqCst);
                3
            });
            assert_eq!(value, 3);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(memo.len(), 1);
    }
}
