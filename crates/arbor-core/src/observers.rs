//! Observer registries.
//!
//! The only extension point for external code to react to core state
//! changes. Registration returns an [`ObserverId`]; deregistration is
//! explicit and mandatory when the observed component is removed.

use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// Handle for a registered observer.
    pub struct ObserverId;
}

/// A registry of callbacks for one event type.
pub struct Observers<E> {
    /// Registered callbacks keyed by observer handle.
    slots: SlotMap<ObserverId, Box<dyn FnMut(&E) + Send>>,
}

impl<E> Default for Observers<E> {
    fn default() -> Self {
        Self {
            slots: SlotMap::with_key(),
        }
    }
}

impl<E> Observers<E> {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback.
    pub fn add(&mut self, callback: impl FnMut(&E) + Send + 'static) -> ObserverId {
        self.slots.insert(Box::new(callback))
    }

    /// Deregister a callback. Returns false if the handle was unknown.
    pub fn remove(&mut self, id: ObserverId) -> bool {
        self.slots.remove(id).is_some()
    }

    /// Notify every registered observer, in registration order.
    pub fn notify(&mut self, event: &E) {
        for (_, callback) in &mut self.slots {
            callback(event);
        }
    }

    /// Number of registered observers.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True if no observers are registered.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;

    #[test]
    fn add_notify_remove() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut obs: Observers<u32> = Observers::new();

        let inner = count.clone();
        let id = obs.add(move |n| {
            inner.fetch_add(*n as usize, Ordering::SeqCst);
        });
        obs.notify(&2);
        assert_eq!(count.load(Ordering::SeqCst), 2);

        assert!(obs.remove(id));
        assert!(!obs.remove(id));
        obs.notify(&2);
        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert!(obs.is_empty());
    }
}
