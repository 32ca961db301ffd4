//! Refresh bus: a zero-payload broadcast used to tell views to reload.
//!
//! Delivery is synchronous and live. `publish()` runs every callback that is
//! registered at that moment, in subscription order, and forgets the event.
//! Nothing is buffered for later subscribers.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

type Callback = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct Subscribers {
    next_id: u64,
    entries: Vec<(u64, Callback)>,
}

/// Shared handle to a refresh bus. Clones publish to the same subscribers.
#[derive(Clone, Default)]
pub struct RefreshBus {
    inner: Arc<Mutex<Subscribers>>,
}

impl RefreshBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback. It stays registered until the returned
    /// [`Subscription`] is unsubscribed or dropped.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        let mut subs = lock(&self.inner);
        let id = subs.next_id;
        subs.next_id += 1;
        subs.entries.push((id, Arc::new(callback)));
        debug!(subscription = id, total = subs.entries.len(), "Refresh subscriber added");

        Subscription {
            id,
            bus: Arc::downgrade(&self.inner),
        }
    }

    /// Notify every current subscriber, in registration order.
    /// Returns how many callbacks ran.
    pub fn publish(&self) -> usize {
        // Snapshot so callbacks may (un)subscribe without deadlocking.
        let callbacks: Vec<Callback> = lock(&self.inner)
            .entries
            .iter()
            .map(|(_, cb)| Arc::clone(cb))
            .collect();

        debug!(subscribers = callbacks.len(), "Refresh published");
        for callback in &callbacks {
            callback();
        }
        callbacks.len()
    }

    /// Publish once after `delay` on a background task. Not cancellable.
    pub fn publish_after(&self, delay: Duration) -> JoinHandle<()> {
        let bus = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            bus.publish();
        })
    }

    pub fn subscriber_count(&self) -> usize {
        lock(&self.inner).entries.len()
    }
}

impl std::fmt::Debug for RefreshBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Registration on a [`RefreshBus`]. Dropping it unsubscribes.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    bus: Weak<Mutex<Subscribers>>,
}

impl Subscription {
    /// Release the registration now.
    pub fn unsubscribe(self) {
        // Drop does the work.
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.bus.upgrade() {
            let mut subs = lock(&inner);
            subs.entries.retain(|(id, _)| *id != self.id);
            debug!(subscription = self.id, "Refresh subscriber removed");
        }
    }
}

fn lock(inner: &Mutex<Subscribers>) -> MutexGuard<'_, Subscribers> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}
