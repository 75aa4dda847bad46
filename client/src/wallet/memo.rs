//! Equality-gated memo.
//!
//! Holds the last `(key, value)` pair and recomputes only when the key
//! changes. Equal keys hand back the same `Arc`, so consumers that compare
//! identity to decide whether to re-run a subscription see no change.

use std::sync::Arc;

use parking_lot::Mutex;

pub struct Memo<K, V> {
    slot: Mutex<Option<(K, Arc<V>)>>,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }
}

impl<K: PartialEq, V> Memo<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value for `key`, computing it if the key changed.
    pub fn get_or_compute(&self, key: K, compute: impl FnOnce(&K) -> V) -> Arc<V> {
        let mut slot = self.slot.lock();
        if let Some((cached_key, value)) = slot.as_ref() {
            if *cached_key == key {
                return Arc::clone(value);
            }
        }

        let value = Arc::new(compute(&key));
        *slot = Some((key, Arc::clone(&value)));
        value
    }
}
