//! Latest-wins publication slot.
//!
//! A slot couples a generation counter with a watch channel. Work for the
//! slot begins by taking a fresh generation; the eventual result may only
//! be published while that generation is still current. Results carrying
//! a superseded generation are dropped, so a slow early response can
//! never overwrite a fast later one.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;

/// A generation-guarded watch channel.
pub(crate) struct Slot<T> {
    generation: Mutex<u64>,
    tx: watch::Sender<T>,
}

impl<T> Slot<T> {
    /// Create a slot holding an initial value at generation zero.
    pub fn new(initial: T) -> Self {
        let (tx, _) = watch::channel(initial);
        Self {
            generation: Mutex::new(0),
            tx,
        }
    }

    fn lock(&self) -> MutexGuard<'_, u64> {
        // The critical section never panics, but recover from poisoning
        // anyway rather than propagating it.
        self.generation.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Subscribe to published values.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    /// Start a new unit of work for this slot.
    ///
    /// Returns the new current generation and invalidates all previous
    /// ones: any publish tagged with an older generation will be dropped.
    pub fn begin(&self) -> u64 {
        let mut generation = self.lock();
        *generation += 1;
        *generation
    }

    /// Publish a value immediately under a fresh generation.
    ///
    /// Returns the new generation, which stays valid for one or more
    /// follow-up [`publish`](Self::publish) calls until superseded.
    pub fn publish_now(&self, value: T) -> u64 {
        let mut generation = self.lock();
        *generation += 1;
        self.tx.send_replace(value);
        *generation
    }

    /// Publish a value if `generation` is still current.
    ///
    /// Returns `false` (and drops the value) when the slot has moved on.
    pub fn publish(&self, generation: u64, value: T) -> bool {
        let current = self.lock();
        if *current == generation {
            self.tx.send_replace(value);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn current<T: Clone>(slot: &Slot<T>) -> T {
        slot.subscribe().borrow().clone()
    }

    #[test]
    fn publish_at_current_generation_succeeds() {
        let slot = Slot::new(0);
        let generation = slot.begin();
        assert!(slot.publish(generation, 42));
        assert_eq!(current(&slot), 42);
    }

    #[test]
    fn publish_at_stale_generation_is_dropped() {
        let slot = Slot::new(0);
        let first = slot.begin();
        let second = slot.begin();

        assert!(!slot.publish(first, 1));
        assert_eq!(current(&slot), 0);

        assert!(slot.publish(second, 2));
        assert_eq!(current(&slot), 2);
    }

    #[test]
    fn slow_early_result_cannot_overwrite_fast_later_one() {
        let slot = Slot::new(0);
        let early = slot.begin();
        let late = slot.begin();

        // The later request resolves first.
        assert!(slot.publish(late, 2));
        // The earlier one arrives afterwards and is discarded.
        assert!(!slot.publish(early, 1));
        assert_eq!(current(&slot), 2);
    }

    #[test]
    fn publish_now_invalidates_outstanding_work() {
        let slot = Slot::new(0);
        let outstanding = slot.begin();

        let generation = slot.publish_now(7);
        assert_eq!(current(&slot), 7);

        // The pre-existing unit of work is now stale.
        assert!(!slot.publish(outstanding, 1));
        // The fresh generation can publish a follow-up value.
        assert!(slot.publish(generation, 8));
        assert_eq!(current(&slot), 8);
    }

    #[test]
    fn same_generation_may_publish_repeatedly() {
        let slot = Slot::new(0);
        let generation = slot.publish_now(1);
        assert!(slot.publish(generation, 2));
        assert!(slot.publish(generation, 3));
        assert_eq!(current(&slot), 3);
    }

    #[tokio::test]
    async fn subscribers_observe_published_values() {
        let slot = Slot::new(0);
        let mut rx = slot.subscribe();

        let generation = slot.begin();
        slot.publish(generation, 5);

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), 5);
    }
}
