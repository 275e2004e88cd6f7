//! ipnotd: Interface Address Notifier
//!
//! A library for watching one network interface for address assignments,
//! classifying each observation against the last known address, and
//! running a notification command when the address is new or has changed.

pub mod config;
pub mod monitor;
pub mod network;
pub mod notify;
