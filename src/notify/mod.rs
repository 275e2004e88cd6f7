//! Notification layer for running an external command on address changes.
//!
//! This module provides types and traits for:
//! - Reacting to classified address events ([`Notifier`])
//! - Running a shell command with the new address ([`CommandNotifier`])
//! - Capturing what the command printed ([`CommandOutput`])
//! - Error handling ([`NotifyError`])
//!
//! Notification failures are never fatal to the monitor; the caller logs
//! them and moves on to the next event.

mod command;
mod error;


pub use command::{CommandNotifier, CommandOutput, Notifier};
pub use error::NotifyError;
