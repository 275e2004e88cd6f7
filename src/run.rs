//! Application execution logic.
//!
//! This module wires the notification socket, the platform decoder, and the
//! interface monitor together, and runs the monitor until it fails or a
//! shutdown signal arrives.

use std::future::Future;

use thiserror::Error;
use tokio::signal;
use tokio_stream::Stream;

use ipnotd::config::ValidatedConfig;
use ipnotd::monitor::{InterfaceMonitor, ListenerError, MonitorError};
use ipnotd::network::InterfaceAddress;
use ipnotd::notify::{CommandNotifier, Notifier};

#[cfg(any(
    target_os = "linux",
    target_os = "freebsd",
    target_os = "dragonfly",
    target_os = "macos"
))]
use ipnotd::{
    monitor::{
        EventStream, NotificationListener,
        platform::{PlatformListener, platform_decoder},
    },
    network::platform::SystemFetcher,
};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to open the notification socket.
    #[error("Failed to create notification listener: {0}")]
    ListenerCreation(#[source] ListenerError),

    /// Failed to enumerate addresses for the startup check.
    #[error("Startup check failed: {0}")]
    InitialFetch(#[source] MonitorError),

    /// The monitor loop stopped on a fatal error.
    #[error("Monitor stopped: {0}")]
    Monitor(#[source] MonitorError),

    /// This platform has no notification socket implementation.
    #[error("Interface address notifications are not supported on this platform")]
    UnsupportedPlatform,

    /// Failed to build the async runtime.
    #[error("Failed to create Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Executes the main application loop.
///
/// This function:
/// 1. Opens the notification socket (before the startup check, so no
///    change between the two is missed)
/// 2. Reports the interface's current addresses (if `check_on_start`)
/// 3. Handles decoded notifications until a fatal error or a shutdown signal
///
/// # Errors
///
/// Returns an error if:
/// - The notification socket cannot be opened
/// - Startup enumeration fails
/// - The notification stream fails, cannot be decoded, or ends
///
/// # Coverage Note
///
/// This function is excluded from coverage because it requires:
/// - Platform-specific network APIs
/// - Real async runtime with signal handling
#[cfg(not(tarpaulin_include))]
#[cfg(any(
    target_os = "linux",
    target_os = "freebsd",
    target_os = "dragonfly",
    target_os = "macos"
))]
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    let listener = PlatformListener::open().map_err(RunError::ListenerCreation)?;
    let mut monitor = build_monitor(&config);

    if config.check_on_start {
        let reported = monitor
            .check_on_start(&SystemFetcher::new())
            .await
            .map_err(RunError::InitialFetch)?;
        if reported == 0 {
            tracing::debug!("No {} address on {} at startup", config.family_filter, config.interface);
        }
    } else {
        tracing::debug!("Startup check disabled");
    }

    let events = EventStream::new(listener.into_stream(), platform_decoder());
    watch(&mut monitor, events, shutdown_signal()).await
}

/// Stub for targets without a notification socket.
#[cfg(not(tarpaulin_include))]
#[cfg(not(any(
    target_os = "linux",
    target_os = "freebsd",
    target_os = "dragonfly",
    target_os = "macos"
)))]
#[allow(clippy::unused_async)]
pub async fn execute(_config: ValidatedConfig) -> Result<(), RunError> {
    Err(RunError::UnsupportedPlatform)
}

/// Creates the interface monitor described by the configuration.
///
/// A notifier is attached only when a script is configured.
fn build_monitor(config: &ValidatedConfig) -> InterfaceMonitor<CommandNotifier> {
    let monitor = InterfaceMonitor::new(config.interface.clone(), config.family_filter);

    match config.script {
        Some(ref script) => monitor.with_notifier(CommandNotifier::new(script.clone())),
        None => monitor,
    }
}

/// Runs `monitor` over `events` until it fails or `shutdown` completes.
///
/// Shutdown is checked first, so a pending signal wins over a ready event.
async fn watch<N, S, F>(
    monitor: &mut InterfaceMonitor<N>,
    events: S,
    shutdown: F,
) -> Result<(), RunError>
where
    N: Notifier,
    S: Stream<Item = Result<InterfaceAddress, MonitorError>> + Unpin,
    F: Future<Output = ()>,
{
    tokio::select! {
        biased;

        () = shutdown => {
            tracing::info!("Shutdown signal received, stopping...");
            Ok(())
        }

        result = monitor.run(events) => match result {
            Ok(never) => match never {},
            Err(e) => Err(RunError::Monitor(e)),
        },
    }
}

/// Returns a future that completes when a shutdown signal is received.
///
/// If a handler cannot be installed, that signal is never reported and
/// the other one still is.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(not(tarpaulin_include))]
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
