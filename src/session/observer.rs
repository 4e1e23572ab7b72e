//! State-change subscribers.
//!
//! Listeners are called synchronously after every successful command with
//! the live state. A panicking listener is logged and skipped; the others
//! still run and the command still succeeds.

use std::panic::{catch_unwind, AssertUnwindSafe};

use super::state::SessionState;

const LOG_TARGET: &str = "chhota_pandit::observer";

type Listener = Box<dyn FnMut(&SessionState)>;

/// Token returned by `subscribe`. Consumed by `unsubscribe`.
#[derive(Debug, PartialEq, Eq, Hash)]
#[must_use = "dropping a subscription keeps the listener registered with no way to remove it"]
pub struct Subscription(u64);

/// Ordered listener registry.
#[derive(Default)]
pub struct Listeners {
    entries: Vec<(u64, Listener)>,
    next_id: u64,
}

impl Listeners {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&SessionState) + 'static) -> Subscription {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push((id, Box::new(listener)));
        Subscription(id)
    }

    /// Remove a listener. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(id, _)| *id != subscription.0);
        self.entries.len() != before
    }

    /// Call every listener in subscription order.
    pub fn notify(&mut self, state: &SessionState) {
        for (id, listener) in &mut self.entries {
            let result = catch_unwind(AssertUnwindSafe(|| listener(state)));
            if let Err(payload) = result {
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|s| (*s).to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "non-string panic payload".to_string());
                tracing::error!(target: LOG_TARGET, listener = *id, %message, "state listener panicked");
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}
