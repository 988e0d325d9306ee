//! # Single-shot broadcast latch with replay to late subscribers.
//!
//! [`Latch`] is the signaling primitive behind the orchestrator's "inited"
//! and "ready" marks. It fires at most once; callbacks registered before the
//! emission run when it fires, callbacks registered after it has fired run
//! immediately (synchronously, in the caller's context).
//!
//! ## Contract
//! - [`Latch::emit`] fires the signal exactly once; a second call is a no-op
//!   and never re-notifies existing subscribers.
//! - [`Latch::subscribe`] registers a callback invoked on emission; if the
//!   latch has already fired, the callback is invoked immediately.
//! - [`Latch::has_emitted`] reports whether emission already occurred; once
//!   emitted the latch never reverts.
//! - [`Latch::wait`] is the async view of the same state: it suspends until
//!   the latch fires and returns immediately for late waiters.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use servisor::Latch;
//!
//! let latch = Latch::new();
//! assert!(!latch.has_emitted());
//!
//! latch.emit();
//! assert!(latch.has_emitted());
//!
//! // Late subscriber: invoked right here, exactly once.
//! let seen = Arc::new(AtomicBool::new(false));
//! let flag = seen.clone();
//! latch.subscribe(move || flag.store(true, Ordering::SeqCst));
//! assert!(seen.load(Ordering::SeqCst));
//! ```

use std::sync::Mutex;

use tokio_util::sync::CancellationToken;

/// Callback invoked when the latch fires. Consumed on invocation.
type LatchCallback = Box<dyn FnOnce() + Send + 'static>;

/// Single-shot broadcast signal.
///
/// Owned by the orchestrator for the "inited" and "ready" marks; usable on
/// its own wherever fire-once/replay semantics are needed.
pub struct Latch {
    /// Queued callbacks while armed; `None` once emitted.
    pending: Mutex<Option<Vec<LatchCallback>>>,
    /// Async completion flag; cancelled exactly when the latch fires.
    fired: CancellationToken,
}

impl Latch {
    /// Creates a new, armed latch.
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(Some(Vec::new())),
            fired: CancellationToken::new(),
        }
    }

    /// Fires the latch, invoking every queued callback.
    ///
    /// Returns `true` if this call performed the emission, `false` if the
    /// latch had already fired (in which case nothing is re-notified).
    pub fn emit(&self) -> bool {
        let drained = {
            let mut pending = self.pending.lock().expect("latch lock poisoned");
            match pending.take() {
                Some(callbacks) => {
                    self.fired.cancel();
                    callbacks
                }
                None => return false,
            }
        };
        for callback in drained {
            callback();
        }
        true
    }

    /// Registers a callback to run when the latch fires.
    ///
    /// If the latch has already fired, the callback runs immediately in the
    /// caller's context; it is invoked exactly once either way.
    pub fn subscribe(&self, callback: impl FnOnce() + Send + 'static) {
        {
            let mut pending = self.pending.lock().expect("latch lock poisoned");
            if let Some(callbacks) = pending.as_mut() {
                callbacks.push(Box::new(callback));
                return;
            }
        }
        callback();
    }

    /// Returns whether the latch has fired.
    pub fn has_emitted(&self) -> bool {
        self.fired.is_cancelled()
    }

    /// Suspends until the latch fires; returns immediately if it already has.
    pub async fn wait(&self) {
        self.fired.cancelled().await;
    }
}

impl Default for Latch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_subscribers_fire_once_on_emit() {
        let latch = Latch::new();
        let hits = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let hits = hits.clone();
            latch.subscribe(move || {
                hits.fetch_add(1, Ordering::SeqCst);
            });
        }
        assert_eq!(hits.load(Ordering::SeqCst), 0, "nothing before emit");

        assert!(latch.emit());
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_double_emit_does_not_renotify() {
        let latch = Latch::new();
        let hits = Arc::new(AtomicUsize::new(0));
        {
            let hits = hits.clone();
            latch.subscribe(move || {
                hits.fetch_add(1, Ordering::SeqCst);
            });
        }

        assert!(latch.emit());
        assert!(!latch.emit(), "second emit must be a no-op");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_late_subscriber_invoked_immediately() {
        let latch = Latch::new();
        latch.emit();

        let hits = Arc::new(AtomicUsize::new(0));
        {
            let hits = hits.clone();
            latch.subscribe(move || {
                hits.fetch_add(1, Ordering::SeqCst);
            });
        }
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_has_emitted_tracks_state() {
        let latch = Latch::new();
        assert!(!latch.has_emitted());
        latch.emit();
        assert!(latch.has_emitted());
        latch.emit();
        assert!(latch.has_emitted(), "never reverts");
    }

    #[tokio::test]
    async fn test_wait_resolves_for_late_waiters() {
        let latch = Arc::new(Latch::new());
        latch.emit();
        // Must not hang.
        latch.wait().await;
    }

    #[tokio::test]
    async fn test_wait_resolves_on_emit() {
        let latch = Arc::new(Latch::new());
        let waiter = {
            let latch = latch.clone();
            tokio::spawn(async move {
                latch.wait().await;
            })
        };
        latch.emit();
        waiter.await.expect("waiter should complete");
    }
}
