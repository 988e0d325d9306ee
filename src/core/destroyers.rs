//! # Destroyer set - ad-hoc teardown callbacks run at shutdown.
//!
//! A destroyer is a teardown operation a service registers **outside** its
//! own `destroy()` - cleanup that must happen at process shutdown even
//! though it isn't tied to the service object's teardown path.
//!
//! ## Rules
//! - Entries are (owner label, one-shot callback) pairs; duplicate owners
//!   are permitted and each fires independently.
//! - [`DestroyerSet::drain_and_run_all`] is invoked exactly once by the
//!   orchestrator during shutdown; entries are consumed by the drain.
//! - Destroyers run **concurrently** and must not depend on one another;
//!   each failure (or panic) is isolated, reported with its owner label,
//!   and never prevents the siblings from running.
//! - Registration after the drain is inert: the callback is dropped and a
//!   warning is printed.

use std::sync::Mutex;

use futures::future::{join_all, BoxFuture};
use futures::FutureExt;

use crate::error::{DestroyerFailure, ServiceError};
use crate::events::{Bus, Event, EventKind};

/// One-shot teardown operation.
type Teardown = Box<dyn FnOnce() -> BoxFuture<'static, Result<(), ServiceError>> + Send>;

struct DestroyerEntry {
    owner: String,
    teardown: Teardown,
}

/// Set of registered teardown callbacks, owned by the orchestrator.
pub(crate) struct DestroyerSet {
    /// `None` once drained.
    entries: Mutex<Option<Vec<DestroyerEntry>>>,
    bus: Bus,
}

impl DestroyerSet {
    pub(crate) fn new(bus: Bus) -> Self {
        Self {
            entries: Mutex::new(Some(Vec::new())),
            bus,
        }
    }

    /// Adds a teardown entry under the given owner label.
    ///
    /// No collision checking: the same owner may register several entries.
    pub(crate) fn register<F, Fut>(&self, owner: impl Into<String>, teardown: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: std::future::Future<Output = Result<(), ServiceError>> + Send + 'static,
    {
        let owner = owner.into();
        let mut entries = self.entries.lock().expect("destroyer lock poisoned");
        match entries.as_mut() {
            Some(list) => list.push(DestroyerEntry {
                owner,
                teardown: Box::new(move || Box::pin(teardown())),
            }),
            None => {
                eprintln!("[servisor] destroyer of \"{owner}\" registered after shutdown; dropped");
            }
        }
    }

    /// Number of pending entries (0 after the drain).
    pub(crate) fn len(&self) -> usize {
        self.entries
            .lock()
            .expect("destroyer lock poisoned")
            .as_ref()
            .map_or(0, Vec::len)
    }

    /// Runs every registered destroyer concurrently, consuming the set.
    ///
    /// Failures and panics are caught per entry, published as
    /// [`EventKind::DestroyerFailed`] and collected; the siblings always run
    /// to completion. A second drain finds nothing and returns empty.
    pub(crate) async fn drain_and_run_all(&self) -> Vec<DestroyerFailure> {
        let drained = self
            .entries
            .lock()
            .expect("destroyer lock poisoned")
            .take()
            .unwrap_or_default();

        let jobs = drained.into_iter().map(|entry| {
            let bus = self.bus.clone();
            async move {
                let DestroyerEntry { owner, teardown } = entry;
                let outcome = std::panic::AssertUnwindSafe(teardown()).catch_unwind().await;
                let failure = match outcome {
                    Ok(Ok(())) => None,
                    Ok(Err(err)) => Some(DestroyerFailure {
                        owner,
                        error: err.to_string(),
                    }),
                    Err(panic) => Some(DestroyerFailure {
                        owner,
                        error: panic_message(panic),
                    }),
                };
                if let Some(failure) = &failure {
                    bus.publish(
                        Event::now(EventKind::DestroyerFailed)
                            .with_owner(failure.owner.clone())
                            .with_error(failure.error.clone()),
                    );
                }
                failure
            }
        });

        join_all(jobs).await.into_iter().flatten().collect()
    }
}

fn panic_message(panic: Box<dyn std::any::Any + Send>) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "destroyer panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn test_set() -> DestroyerSet {
        DestroyerSet::new(Bus::new(16))
    }

    #[tokio::test]
    async fn test_all_destroyers_run() {
        let set = test_set();
        let hits = Arc::new(AtomicUsize::new(0));
        for _ in 0..3 {
            let hits = hits.clone();
            set.register("session", move || {
                let hits = hits.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }
            });
        }
        assert_eq!(set.len(), 3);

        let failures = set.drain_and_run_all().await;
        assert!(failures.is_empty());
        assert_eq!(hits.load(Ordering::SeqCst), 3);
        assert_eq!(set.len(), 0, "entries are consumed");
    }

    #[tokio::test]
    async fn test_one_failure_does_not_stop_siblings() {
        let set = test_set();
        let hits = Arc::new(AtomicUsize::new(0));

        {
            let hits = hits.clone();
            set.register("storage", move || {
                let hits = hits.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }
            });
        }
        set.register("session", || async { Err(ServiceError::new("tmp dir busy")) });
        {
            let hits = hits.clone();
            set.register("jobs", move || {
                let hits = hits.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }
            });
        }

        let failures = set.drain_and_run_all().await;
        assert_eq!(hits.load(Ordering::SeqCst), 2, "siblings still ran");
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].owner, "session");
        assert!(failures[0].error.contains("tmp dir busy"));
    }

    #[tokio::test]
    async fn test_panicking_destroyer_is_isolated() {
        let set = test_set();
        let hits = Arc::new(AtomicUsize::new(0));

        set.register("broken", || async { panic!("teardown exploded") });
        {
            let hits = hits.clone();
            set.register("healthy", move || {
                let hits = hits.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }
            });
        }

        let failures = set.drain_and_run_all().await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].owner, "broken");
        assert!(failures[0].error.contains("teardown exploded"));
    }

    #[tokio::test]
    async fn test_second_drain_is_empty_and_late_registration_inert() {
        let set = test_set();
        set.register("session", || async { Ok(()) });
        assert!(set.drain_and_run_all().await.is_empty());

        // Late registration must not resurrect the set.
        set.register("late", || async { Ok(()) });
        assert_eq!(set.len(), 0);
        assert!(set.drain_and_run_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_failures_are_published() {
        let bus = Bus::new(16);
        let set = DestroyerSet::new(bus.clone());
        let mut rx = bus.subscribe();
        set.register("session", || async { Err(ServiceError::new("boom")) });

        let failures = set.drain_and_run_all().await;
        assert_eq!(failures.len(), 1);

        let ev = rx.recv().await.expect("event");
        assert_eq!(ev.kind, EventKind::DestroyerFailed);
        assert_eq!(ev.owner.as_deref(), Some("session"));
    }
}
