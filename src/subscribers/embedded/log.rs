//! # LogWriter — simple event printer
//!
//! A minimal subscriber that prints incoming
//! [`Event`](crate::events::Event)s to stdout. Use it for test or demo.
//!
//! ## Example output
//! ```text
//! [registered] service="db"
//! [inited] service="db"
//! [all-inited]
//! [ready] service="db"
//! [all-ready]
//! [shutdown-requested]
//! [destroyed] service="db"
//! [destroyer-failed] owner="session" err="tmp dir busy"
//! [shutdown-complete]
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        match e.kind {
            EventKind::ServiceRegistered => {
                println!("[registered] service={:?}", e.service);
            }
            EventKind::ServiceInited => {
                println!("[inited] service={:?}", e.service);
            }
            EventKind::InitFailed => {
                println!("[init-failed] service={:?} err={:?}", e.service, e.error);
            }
            EventKind::AllInited => {
                println!("[all-inited]");
            }
            EventKind::ServiceReady => {
                println!("[ready] service={:?}", e.service);
            }
            EventKind::ReadyFailed => {
                println!("[ready-failed] service={:?} err={:?}", e.service, e.error);
            }
            EventKind::AllReady => {
                println!("[all-ready]");
            }
            EventKind::ShutdownRequested => {
                println!("[shutdown-requested]");
            }
            EventKind::ServiceDestroyed => {
                println!("[destroyed] service={:?}", e.service);
            }
            EventKind::DestroyFailed => {
                println!("[destroy-failed] service={:?} err={:?}", e.service, e.error);
            }
            EventKind::DestroyerFailed => {
                println!("[destroyer-failed] owner={:?} err={:?}", e.owner, e.error);
            }
            EventKind::ShutdownComplete => {
                println!("[shutdown-complete]");
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
