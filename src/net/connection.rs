//! In-flight request tracking.
//!
//! Every request holds a [`ConnectionGuard`] for as long as its handler runs.
//! The guard is released on drop, so the slot is returned on every exit path:
//! normal response, error response, or a panic unwinding through the handler.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

/// Monotonic source of request slot IDs. Only uniqueness matters.
static SLOT_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a tracked request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(u64);

impl SlotId {
    fn next() -> Self {
        Self(SLOT_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "slot-{}", self.0)
    }
}

#[derive(Debug, Default)]
struct Inner {
    active: AtomicU64,
    idle: Notify,
}

/// Counts requests currently being handled.
#[derive(Debug, Clone, Default)]
pub struct ConnectionTracker {
    inner: Arc<Inner>,
}

impl ConnectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a slot for a request from `peer`. Released when the guard drops.
    pub fn track(&self, peer: SocketAddr) -> ConnectionGuard {
        self.inner.active.fetch_add(1, Ordering::SeqCst);
        let id = SlotId::next();
        tracing::trace!(slot = %id, peer = %peer, "Request slot acquired");
        ConnectionGuard {
            inner: Arc::clone(&self.inner),
            id,
            peer,
        }
    }

    /// Number of requests currently holding a slot.
    pub fn active_count(&self) -> u64 {
        self.inner.active.load(Ordering::SeqCst)
    }

    /// Wait until no request holds a slot.
    pub async fn wait_idle(&self) {
        loop {
            let notified = self.inner.idle.notified();
            if self.active_count() == 0 {
                return;
            }
            notified.await;
        }
    }
}

/// A claimed request slot.
#[derive(Debug)]
pub struct ConnectionGuard {
    inner: Arc<Inner>,
    id: SlotId,
    peer: SocketAddr,
}

impl ConnectionGuard {
    pub fn id(&self) -> SlotId {
        self.id
    }

    pub fn peer(&self) -> SocketAddr {
        self.peer
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        if self.inner.active.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.inner.idle.notify_waiters();
        }
        tracing::trace!(slot = %self.id, peer = %self.peer, "Request slot released");
    }
}
