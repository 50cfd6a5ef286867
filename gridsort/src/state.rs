use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

/// Shared publish target for values computed by a collaborating component.
///
/// A `Slot<T>` is created by the owner of the data; helpers receive a cloned
/// handle to the same cell. Publishing with [`set`](Slot::set) replaces the
/// stored value wholesale, so the previous value is never mutated in place,
/// and every handle observes the new value as soon as `set` returns.
///
/// # Example
///
/// ```
/// use gridsort::state::Slot;
///
/// let rows = Slot::new(vec![3, 1, 2]);
/// let handle = rows.clone();
///
/// handle.set(vec![1, 2, 3]);
/// assert_eq!(rows.get(), vec![1, 2, 3]);
/// ```
#[derive(Debug)]
pub struct Slot<T> {
    inner: Arc<RwLock<T>>,
    generation: Arc<AtomicU64>,
}

impl<T> Slot<T> {
    /// Create a new slot holding the given value
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(value)),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Get a clone of the current value
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.inner
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Publish a new value, replacing the previous one wholesale
    pub fn set(&self, value: T) {
        if let Ok(mut guard) = self.inner.write() {
            *guard = value;
            self.generation.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// Update the value through a closure
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        if let Ok(mut guard) = self.inner.write() {
            f(&mut guard);
            self.generation.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// Number of publishes since the slot was created.
    ///
    /// Monotonic; a consumer can compare generations to detect that an
    /// update became visible.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            generation: Arc::clone(&self.generation),
        }
    }
}

impl<T: Default> Default for Slot<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
