use std::sync::Arc;

/// Compares an `Arc` by allocation rather than by content.
#[derive(Debug)]
pub struct ByAddress<T: ?Sized>(pub Arc<T>);

impl<T: ?Sized> Clone for ByAddress<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T: ?Sized> PartialEq for ByAddress<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// A single-entry cache keyed on the inputs the value was derived from.
#[derive(Debug)]
pub struct Memo<K, V> {
    key: K,
    value: V,
}

impl<K: PartialEq, V> Memo<K, V> {
    pub fn new(key: K, compute: impl FnOnce(&K) -> V) -> Self {
        let value = compute(&key);
        Self { key, value }
    }

    /// Recomputes only when `key` differs from the stored one.
    /// Returns whether the value was recomputed.
    pub fn update(&mut self, key: K, compute: impl FnOnce(&K) -> V) -> bool {
        if self.key == key {
            return false;
        }
        self.value = compute(&key);
        self.key = key;
        true
    }

    pub fn value(&self) -> &V {
        &self.value
    }
}
