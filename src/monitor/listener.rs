//! Notification listener trait for OS address-change sockets.
//!
//! This module provides the [`NotificationListener`] trait that abstracts the
//! platform-specific socket delivering raw address-change records.

use super::ListenerError;
use tokio_stream::Stream;

/// Trait for platform-specific address change notification sources.
///
/// Implementations wrap an OS channel such as a BSD routing socket or a
/// Linux rtnetlink socket and expose it as an async stream of raw record
/// buffers. Each item holds the bytes returned by one socket read, which
/// may contain several records; decoding is left to a
/// [`RecordDecoder`](super::decode::RecordDecoder).
///
/// # One-time Semantics
///
/// The `into_stream` method consumes `self`, enforcing one-time use. The
/// socket is opened once and never reopened.
///
/// # Stream Items
///
/// The stream yields `Result<Vec<u8>, ListenerError>`:
/// - `Ok(bytes)` - Raw records read from the socket
/// - `Err(ListenerError)` - The socket failed; the stream ends after this
///
/// # Example
///
/// ```ignore
/// use ipnotd::monitor::NotificationListener;
/// use tokio_stream::StreamExt;
///
/// async fn dump<L: NotificationListener>(listener: L) {
///     let mut stream = listener.into_stream();
///     while let Some(result) = stream.next().await {
///         match result {
///             Ok(bytes) => println!("{} bytes of records", bytes.len()),
///             Err(e) => {
///                 eprintln!("Listener failed: {e}");
///                 break;
///             }
///         }
///     }
/// }
/// ```
pub trait NotificationListener: Send {
    /// The stream type returned by `into_stream`.
    type Stream: Stream<Item = Result<Vec<u8>, ListenerError>> + Send + Unpin;

    /// Converts this listener into a stream of raw record buffers.
    fn into_stream(self) -> Self::Stream;
}
