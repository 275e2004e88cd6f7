//! Address enumeration and interface resolution traits.

use super::InterfaceAddress;
use thiserror::Error;

/// Error type for address enumeration.
///
/// Describes what went wrong without dictating recovery strategy.
/// Callers decide how to handle each error variant.
#[derive(Debug, Error)]
pub enum FetchError {
    /// An OS call failed.
    #[error("OS error: {0}")]
    Os(#[from] nix::Error),

    /// Platform-specific error with a generic message.
    #[error("Platform error: {message}")]
    Platform {
        /// Error message describing the platform-specific failure.
        message: String,
    },
}

/// Trait for enumerating the addresses currently assigned to interfaces.
///
/// Used only by the startup phase of the monitor. Implementations return
/// every address on every interface; filtering is done by the caller.
///
/// # Example
///
/// ```ignore
/// use ipnotd::network::{AddressFetcher, FetchError, InterfaceAddress};
///
/// struct FixedFetcher(Vec<InterfaceAddress>);
///
/// impl AddressFetcher for FixedFetcher {
///     fn fetch(&self) -> Result<Vec<InterfaceAddress>, FetchError> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
pub trait AddressFetcher: Send + Sync {
    /// Lists all interface addresses, in whatever order the OS returns them.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the OS enumeration call fails.
    fn fetch(&self) -> Result<Vec<InterfaceAddress>, FetchError>;
}

/// Trait for resolving an interface index to its current name.
///
/// Resolution is a query against the live system: an interface that has
/// disappeared since the notification was generated resolves to `None`.
pub trait InterfaceResolver: Send + Sync {
    /// Returns the name of the interface with `index`, if it still exists.
    fn resolve(&self, index: u32) -> Option<String>;
}
