//! Single-interface address monitor.
//!
//! This module provides [`InterfaceMonitor`], which owns the address state of
//! one interface and drives logging and notification for every relevant
//! observation.

use super::MonitorError;
use super::change::{AddressState, ChangeEvent};
use crate::network::{AddressFetcher, FamilyFilter, InterfaceAddress};
use crate::notify::{CommandNotifier, Notifier};
use std::convert::Infallible;
use tokio_stream::{Stream, StreamExt};

/// Monitors one interface for new or changed addresses.
///
/// The monitor runs in two phases:
///
/// 1. **Startup** (optional, [`check_on_start`](Self::check_on_start)):
///    every address currently on the interface is handled once.
/// 2. **Steady state** ([`run`](Self::run)): decoded notification events are
///    handled one at a time, forever.
///
/// Both phases go through [`handle`](Self::handle), which drops observations
/// for other interfaces or filtered families, classifies the rest against
/// the [`AddressState`], logs the result, and awaits the notifier for new or
/// changed addresses before returning.
///
/// # Type Parameters
///
/// - `N`: The notifier (defaults to [`CommandNotifier`])
///
/// # Example
///
/// ```no_run
/// use ipnotd::monitor::InterfaceMonitor;
/// use ipnotd::network::FamilyFilter;
/// use ipnotd::network::platform::SystemFetcher;
/// use ipnotd::notify::CommandNotifier;
///
/// # async fn example() -> Result<(), ipnotd::monitor::MonitorError> {
/// let mut monitor = InterfaceMonitor::new("em0", FamilyFilter::Both)
///     .with_notifier(CommandNotifier::new("/usr/local/bin/update-dns"));
///
/// let reported = monitor.check_on_start(&SystemFetcher::new()).await?;
/// println!("{reported} address(es) at startup");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct InterfaceMonitor<N = CommandNotifier> {
    interface: String,
    family_filter: FamilyFilter,
    state: AddressState,
    notifier: Option<N>,
}

impl<N: Notifier> InterfaceMonitor<N> {
    /// Creates a monitor for `interface` with empty state and no notifier.
    #[must_use]
    pub fn new(interface: impl Into<String>, family_filter: FamilyFilter) -> Self {
        Self {
            interface: interface.into(),
            family_filter,
            state: AddressState::new(),
            notifier: None,
        }
    }

    /// Sets the notifier run for new and changed addresses.
    #[must_use]
    pub fn with_notifier(mut self, notifier: N) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Returns the monitored interface name.
    #[must_use]
    pub fn interface(&self) -> &str {
        &self.interface
    }

    /// Returns the address family filter.
    #[must_use]
    pub const fn family_filter(&self) -> FamilyFilter {
        self.family_filter
    }

    /// Returns the notifier, if one is set.
    #[must_use]
    pub const fn notifier(&self) -> Option<&N> {
        self.notifier.as_ref()
    }

    /// Returns the current address state.
    #[must_use]
    pub const fn state(&self) -> &AddressState {
        &self.state
    }

    /// Handles every address currently assigned to the monitored interface.
    ///
    /// Addresses are handled in the order the fetcher returns them. Returns
    /// the number of observations that passed the interface and family
    /// filters.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::Fetch`] if enumeration fails.
    pub async fn check_on_start<F>(&mut self, fetcher: &F) -> Result<usize, MonitorError>
    where
        F: AddressFetcher,
    {
        let addresses = fetcher.fetch()?;
        tracing::debug!("Startup check: {} address(es) on all interfaces", addresses.len());

        let mut handled = 0;
        for observation in &addresses {
            if self.handle(observation).await.is_some() {
                handled += 1;
            }
        }
        Ok(handled)
    }

    /// Handles one `(interface, address)` observation.
    ///
    /// Returns the classified event, or `None` if the observation was for
    /// another interface, not an IP address, or filtered out by family.
    pub async fn handle(&mut self, observation: &InterfaceAddress) -> Option<ChangeEvent> {
        if observation.interface != self.interface {
            tracing::trace!("Ignoring address on {}", observation.interface);
            return None;
        }
        let address = observation.address.ip()?;
        let family = observation.address.family()?;
        if !self.family_filter.admits(family) {
            tracing::trace!("Ignoring {family} address {address}");
            return None;
        }

        let classification = self.state.classify_and_update(address);
        let event = ChangeEvent::new(&self.interface, address, classification);
        tracing::info!("{event}");

        let notifier = self.notifier.as_ref().filter(|_| event.should_notify());
        if let Some(notifier) = notifier {
            if let Err(e) = notifier.notify(&event).await {
                tracing::error!("{e}");
            }
        }

        Some(event)
    }

    /// Handles decoded events until the stream fails or ends.
    ///
    /// Each event is handled to completion, notifier included, before the
    /// next one is pulled.
    ///
    /// # Errors
    ///
    /// Never returns normally. Returns the first error yielded by `events`,
    /// or [`MonitorError::StreamTerminated`] if the stream ends.
    pub async fn run<S>(&mut self, mut events: S) -> Result<Infallible, MonitorError>
    where
        S: Stream<Item = Result<InterfaceAddress, MonitorError>> + Unpin,
    {
        tracing::debug!("Watching {} for {} addresses", self.interface, self.family_filter);
        while let Some(observation) = events.next().await {
            self.handle(&observation?).await;
        }
        Err(MonitorError::StreamTerminated)
    }
}

#[cfg(test)]
#[path = "interface_monitor_tests.rs"]
mod tests;
