//! Monitor layer for detecting address changes on one interface.
//!
//! This module provides types and functions for:
//! - Tracking known addresses and classifying observations ([`AddressState`], [`Classification`], [`ChangeEvent`])
//! - Decoding raw OS notification records ([`decode`])
//! - Receiving raw records from the OS ([`NotificationListener`], [`platform`])
//! - Turning raw records into a lazy event sequence ([`EventStream`])
//! - The startup and steady-state monitor loop ([`InterfaceMonitor`])
//! - Error handling ([`MonitorError`], [`ListenerError`])

mod change;
pub mod decode;
mod error;
mod interface_monitor;
mod listener;
pub mod platform;
mod stream;

pub use change::{AddressState, ChangeEvent, Classification};
pub use error::{ListenerError, MonitorError};
pub use interface_monitor::InterfaceMonitor;
pub use listener::NotificationListener;
pub use stream::EventStream;
