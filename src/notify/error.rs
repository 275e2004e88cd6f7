//! Error types for notification commands.

use thiserror::Error;

/// Error type for running a notification command.
///
/// None of these stop the monitor. The variants say how far the command got:
/// it never started, its output could not be read, or it could not be reaped.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The shell could not be started.
    #[error("spawn of \"{command}\" failed: {source}")]
    Spawn {
        /// The full shell command line.
        command: String,
        /// The underlying spawn failure.
        #[source]
        source: std::io::Error,
    },

    /// Reading the command's output failed.
    #[error("reading subprocess output: {0}")]
    Read(#[source] std::io::Error),

    /// Waiting for the command to exit failed.
    #[error("waiting for subprocess: {0}")]
    Wait(#[source] std::io::Error),
}
