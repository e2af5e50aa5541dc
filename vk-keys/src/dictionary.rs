use foldhash::HashSet;
use log::trace;
use parking_lot::RwLock;
use std::{any::type_name, hash::Hash, sync::Arc};

/// A set that hands out one canonical, shared instance per distinct value.
///
/// Looking up a value returns an `Arc` to the instance that was first inserted among all the
/// values equal to it. Holders of these `Arc`s can then test for equality with [`Arc::ptr_eq`]
/// instead of comparing the values.
///
/// Readers never block each other. Entries are immutable after insertion and stay alive until
/// [`clear`](Self::clear) is called, even if every `Arc` handed out for them was dropped.
#[derive(Debug)]
pub struct Dictionary<T> {
    inner: RwLock<HashSet<Arc<T>>>,
}

impl<T> Default for Dictionary<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Dictionary<T> {
    /// Creates a new empty `Dictionary`.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashSet::default()),
        }
    }

    /// Returns the number of distinct values in the dictionary.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns whether the dictionary is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Removes every entry. `Arc`s that were handed out remain valid, but are no longer canonical:
    /// looking up an equal value afterwards returns a new instance.
    pub fn clear(&self) {
        let mut inner = self.inner.write();
        trace!(
            "clearing dictionary of {} with {} entries",
            type_name::<T>(),
            inner.len(),
        );
        inner.clear();
    }
}

impl<T> Dictionary<T>
where
    T: Eq + Hash,
{
    /// Returns the canonical instance equal to `value`, if there is one.
    pub fn get(&self, value: &T) -> Option<Arc<T>> {
        self.inner.read().get(value).cloned()
    }

    /// Returns the canonical instance equal to `value`. If there is none yet, `value` becomes
    /// the canonical instance.
    pub fn look_up(&self, value: T) -> Arc<T> {
        if let Some(id) = self.get(&value) {
            return id;
        }

        let mut inner = self.inner.write();

        // Someone else might have inserted an equal value between when we released the read lock
        // and acquired the write lock.
        if let Some(id) = inner.get(&value) {
            return id.clone();
        }

        let id = Arc::new(value);
        inner.insert(id.clone());
        trace!(
            "new canonical {}, dictionary now has {} entries",
            type_name::<T>(),
            inner.len(),
        );

        id
    }
}
