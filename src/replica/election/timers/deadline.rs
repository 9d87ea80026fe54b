use std::sync::{Mutex, PoisonError};
use tokio::time::Instant;

/// SharedDeadline is owned by a timer handle. Its timer task only keeps a `Weak` to it, so the
/// task notices the handle dropping the next time it wakes up.
#[derive(Default)]
pub(super) struct SharedDeadline {
    next: Mutex<Option<Instant>>,
}

impl SharedDeadline {
    pub(super) fn push_back(&self, deadline: Instant) {
        self.next
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(deadline);
    }

    pub(super) fn take(&self) -> Option<Instant> {
        self.next.lock().unwrap_or_else(PoisonError::into_inner).take()
    }
}
