//! # OS termination signals.
//!
//! [`wait_for_signal`] completes when the process receives a termination
//! signal: `SIGINT` or `SIGTERM` on Unix, Ctrl-C elsewhere. Used by
//! [`Orchestrator::run_until_shutdown`](crate::Orchestrator::run_until_shutdown)
//! to bind teardown to process exit.

/// Waits for a termination signal.
///
/// Each call creates independent signal listeners. Returns `Err` only if
/// signal registration itself fails.
#[cfg(unix)]
pub(crate) async fn wait_for_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        _ = sigint.recv() => {}
        _ = sigterm.recv() => {}
    }
    Ok(())
}

/// Waits for a termination signal (Ctrl-C).
#[cfg(not(unix))]
pub(crate) async fn wait_for_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}
