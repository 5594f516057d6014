//! Subscriber registry for motion-vector fan-out.

use std::sync::Arc;

/// A consumer callback receiving the published `(x, y)` vector.
pub type MotionCallback = Arc<dyn Fn(f64, f64) + Send + Sync + 'static>;

/// Set of active consumer callbacks, keyed by callback identity.
///
/// Set semantics matter for lifecycle correctness: subscribing the
/// same callback twice must not be counted twice, otherwise the
/// camera would outlive its last real consumer.
#[derive(Default)]
pub struct SubscriberSet {
    entries: Vec<(usize, MotionCallback)>,
}

/// Identity key of a callback: the address of its allocation.
fn key(callback: &MotionCallback) -> usize {
    Arc::as_ptr(callback) as *const () as usize
}

impl SubscriberSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a callback. Returns false if it was already registered.
    pub fn insert(&mut self, callback: MotionCallback) -> bool {
        let k = key(&callback);
        if self.entries.iter().any(|(ek, _)| *ek == k) {
            return false;
        }
        self.entries.push((k, callback));
        true
    }

    /// Removes a callback by identity. Returns true if it was present.
    pub fn remove(&mut self, callback: &MotionCallback) -> bool {
        let k = key(callback);
        let before = self.entries.len();
        self.entries.retain(|(ek, _)| *ek != k);
        self.entries.len() != before
    }

    /// Number of registered callbacks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no callbacks are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clones out the callbacks so fan-out can run outside the lock.
    pub fn snapshot(&self) -> Vec<MotionCallback> {
        self.entries.iter().map(|(_, cb)| Arc::clone(cb)).collect()
    }
}
