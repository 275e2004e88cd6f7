//! Error types for the monitor layer.

use super::decode::DecodeError;
use crate::network::FetchError;
use thiserror::Error;

/// Error type for notification listeners.
///
/// Represents failures of the OS notification socket. None of these are
/// recoverable: a broken socket cannot be resumed mid-stream.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// The notification socket could not be created or bound.
    #[error("Failed to open notification socket: {0}")]
    Open(#[source] std::io::Error),

    /// Reading from the notification socket failed.
    #[error("Failed to read notification socket: {0}")]
    Read(#[source] std::io::Error),

    /// The reader stopped without reporting an error.
    ///
    /// This happens when the socket reports end-of-file or the reader
    /// thread exits while the stream is still being consumed.
    #[error("Listener stopped unexpectedly")]
    Stopped,
}

/// Error type for monitor operations.
///
/// Every variant is fatal for the monitor loop. Conditions the loop can
/// simply ignore (foreign interfaces, filtered families, vanished indices)
/// never surface as errors.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// Failed to enumerate interface addresses at startup.
    #[error("Failed to fetch addresses: {0}")]
    Fetch(#[from] FetchError),

    /// The notification listener failed.
    #[error("Notification listener failed: {0}")]
    Listener(#[source] ListenerError),

    /// A notification record could not be decoded.
    #[error("Failed to decode notification: {0}")]
    Decode(#[from] DecodeError),

    /// The notification stream ended.
    #[error("Notification stream terminated")]
    StreamTerminated,
}

impl From<ListenerError> for MonitorError {
    fn from(error: ListenerError) -> Self {
        Self::Listener(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use std::io;

    mod listener_error {
        use super::*;

        #[test]
        fn stopped_displays_message() {
            let error = ListenerError::Stopped;
            assert_eq!(error.to_string(), "Listener stopped unexpectedly");
        }

        #[test]
        fn open_preserves_io_source() {
            let error = ListenerError::Open(io::Error::from(io::ErrorKind::PermissionDenied));

            assert!(error.to_string().contains("open notification socket"));
            assert!(error.source().is_some());
        }

        #[test]
        fn read_displays_with_context() {
            let error = ListenerError::Read(io::Error::other("bad descriptor"));

            assert!(error.to_string().contains("read notification socket"));
            assert!(error.to_string().contains("bad descriptor"));
        }
    }

    mod monitor_error {
        use super::*;

        #[test]
        fn fetch_error_displays_with_context() {
            let fetch_error = FetchError::Platform {
                message: "test failure".to_string(),
            };
            let monitor_error = MonitorError::Fetch(fetch_error);

            assert!(monitor_error.to_string().contains("Failed to fetch"));
            assert!(monitor_error.to_string().contains("test failure"));
        }

        #[test]
        fn fetch_error_preserves_source_chain() {
            let fetch_error = FetchError::Platform {
                message: "inner error".to_string(),
            };
            let monitor_error: MonitorError = fetch_error.into();

            let source = monitor_error.source();
            assert!(source.is_some());
            assert!(source.unwrap().to_string().contains("inner error"));
        }

        #[test]
        fn listener_error_converts_and_preserves_source() {
            let monitor_error: MonitorError = ListenerError::Stopped.into();

            assert!(matches!(
                monitor_error,
                MonitorError::Listener(ListenerError::Stopped)
            ));
            assert!(
                monitor_error
                    .source()
                    .unwrap()
                    .to_string()
                    .contains("stopped unexpectedly")
            );
        }

        #[test]
        fn decode_error_converts() {
            let decode_error = DecodeError::Malformed {
                offset: 4,
                reason: "bad length",
            };
            let monitor_error: MonitorError = decode_error.into();

            assert!(matches!(monitor_error, MonitorError::Decode(_)));
            assert!(monitor_error.to_string().contains("bad length"));
        }

        #[test]
        fn stream_terminated_has_no_source() {
            let error = MonitorError::StreamTerminated;

            assert_eq!(error.to_string(), "Notification stream terminated");
            assert!(error.source().is_none());
        }
    }
}
