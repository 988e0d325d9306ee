//! # SubscriberSet: non-blocking fan-out over multiple subscribers
//!
//! [`SubscriberSet`] distributes each [`Event`](crate::events::Event) to
//! multiple subscribers **without awaiting** their processing.
//!
//! ## What it guarantees
//! - `emit(&Event)` returns immediately.
//! - Per-subscriber FIFO (queue order).
//! - Panics inside subscribers are caught and logged (isolation).
//!
//! ## What it does **not** guarantee
//! - No global ordering across different subscribers.
//! - No retries on per-subscriber queue overflow (events are dropped for
//!   that subscriber, with a warning).

use std::sync::Arc;

use futures::FutureExt;
use tokio::{sync::mpsc, task::JoinHandle};

use crate::events::Event;

use super::Subscribe;

/// Per-subscriber channel with metadata
struct SubscriberChannel {
    name: &'static str,
    sender: mpsc::Sender<Arc<Event>>,
}

/// Composite fan-out with per-subscriber bounded queues and worker tasks.
pub struct SubscriberSet {
    channels: Vec<SubscriberChannel>,
    workers: Vec<JoinHandle<()>>,
}

impl SubscriberSet {
    /// Creates a new set and spawns one worker per subscriber.
    #[must_use]
    pub fn new(subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        let mut channels = Vec::with_capacity(subscribers.len());
        let mut workers = Vec::with_capacity(subscribers.len());

        for subscriber in subscribers {
            let capacity = subscriber.queue_capacity().max(1);
            let name = subscriber.name();
            let (tx, mut rx) = mpsc::channel::<Arc<Event>>(capacity);
            let sub = Arc::clone(&subscriber);

            let handle = tokio::spawn(async move {
                while let Some(ev) = rx.recv().await {
                    let fut = sub.on_event(ev.as_ref());
                    if let Err(panic) = std::panic::AssertUnwindSafe(fut).catch_unwind().await {
                        eprintln!("[servisor] subscriber '{}' panicked: {panic:?}", sub.name());
                    }
                }
            });

            channels.push(SubscriberChannel { name, sender: tx });
            workers.push(handle);
        }

        Self { channels, workers }
    }

    /// Fan-out one event to all subscribers (non-blocking).
    ///
    /// If a subscriber's queue is **full** or **closed**, the event is
    /// dropped for it and a warning is logged with the subscriber's name.
    pub fn emit(&self, event: &Event) {
        let ev = Arc::new(event.clone());
        for channel in &self.channels {
            match channel.sender.try_send(Arc::clone(&ev)) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    eprintln!(
                        "[servisor] subscriber '{}' dropped event: queue full",
                        channel.name
                    );
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    eprintln!(
                        "[servisor] subscriber '{}' dropped event: worker closed",
                        channel.name
                    );
                }
            }
        }
    }

    /// Graceful shutdown: close all queues and await worker completion.
    pub async fn shutdown(self) {
        drop(self.channels);
        for handle in self.workers {
            let _ = handle.await;
        }
    }

    /// True if there are no subscribers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Number of subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.channels.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use crate::events::EventKind;

    struct Counter {
        hits: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Subscribe for Counter {
        async fn on_event(&self, _event: &Event) {
            self.hits.fetch_add(1, Ordering::SeqCst);
        }

        fn name(&self) -> &'static str {
            "counter"
        }
    }

    #[tokio::test]
    async fn test_events_reach_every_subscriber() {
        let hits_a = Arc::new(AtomicUsize::new(0));
        let hits_b = Arc::new(AtomicUsize::new(0));
        let set = SubscriberSet::new(vec![
            Arc::new(Counter {
                hits: hits_a.clone(),
            }),
            Arc::new(Counter {
                hits: hits_b.clone(),
            }),
        ]);
        assert_eq!(set.len(), 2);
        assert!(!set.is_empty());

        set.emit(&Event::now(EventKind::AllInited));
        set.emit(&Event::now(EventKind::AllReady));

        // Draining the queues: shutdown joins the workers.
        set.shutdown().await;
        assert_eq!(hits_a.load(Ordering::SeqCst), 2);
        assert_eq!(hits_b.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_panicking_subscriber_does_not_poison_the_set() {
        struct Bomb;

        #[async_trait]
        impl Subscribe for Bomb {
            async fn on_event(&self, _event: &Event) {
                panic!("subscriber exploded");
            }

            fn name(&self) -> &'static str {
                "bomb"
            }
        }

        let hits = Arc::new(AtomicUsize::new(0));
        let set = SubscriberSet::new(vec![Arc::new(Bomb), Arc::new(Counter { hits: hits.clone() })]);

        set.emit(&Event::now(EventKind::AllInited));
        set.shutdown().await;
        assert_eq!(hits.load(Ordering::SeqCst), 1, "sibling still delivered");
    }
}
