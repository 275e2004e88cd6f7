//! Blocking notification socket bridged into an async stream.

use super::open_socket;
use crate::monitor::{ListenerError, NotificationListener};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc as tokio_mpsc;
use tokio_stream::Stream;

/// Size of the per-read buffer.
///
/// Larger than any single address record; a read may return several records.
const READ_BUFFER_SIZE: usize = 16 * 1024;

/// Number of read buffers queued ahead of the monitor.
///
/// Once the queue is full the reader thread stops reading, and further
/// records wait in the kernel socket buffer.
pub(super) const READ_QUEUE_CAPACITY: usize = 8;

/// [`NotificationListener`] over the platform's notification socket.
///
/// The socket is read with plain blocking reads on a dedicated thread, and
/// each buffer is forwarded to the async side through a bounded channel.
/// While the monitor is busy (for example running a notification script)
/// the reader blocks on the full channel instead of buffering without limit.
///
/// # Example
///
/// ```no_run
/// use ipnotd::monitor::NotificationListener;
/// use ipnotd::monitor::platform::SocketListener;
/// use tokio_stream::StreamExt;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let listener = SocketListener::open()?;
/// let mut stream = listener.into_stream();
///
/// while let Some(result) = stream.next().await {
///     println!("read {} bytes", result?.len());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SocketListener<R = File> {
    reader: R,
}

impl SocketListener {
    /// Opens the platform notification socket.
    ///
    /// Opening happens here rather than in [`into_stream`](NotificationListener::into_stream)
    /// so that setup failures surface before the monitor starts.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError::Open`] if the socket cannot be created or bound.
    pub fn open() -> Result<Self, ListenerError> {
        let socket = open_socket().map_err(ListenerError::Open)?;
        tracing::debug!("Notification socket opened");
        Ok(Self {
            reader: File::from(socket),
        })
    }
}

impl<R> SocketListener<R>
where
    R: Read + Send + 'static,
{
    /// Creates a listener over an already-open blocking reader.
    #[must_use]
    pub const fn from_reader(reader: R) -> Self {
        Self { reader }
    }
}

impl<R> NotificationListener for SocketListener<R>
where
    R: Read + Send + 'static,
{
    type Stream = SocketStream;

    fn into_stream(self) -> Self::Stream {
        SocketStream::new(self.reader)
    }
}

/// Stream of raw record buffers read from a notification socket.
///
/// Yields at most one error; after that the stream is terminated.
pub struct SocketStream {
    receiver: tokio_mpsc::Receiver<Result<Vec<u8>, ListenerError>>,
    terminated: bool,
}

impl std::fmt::Debug for SocketStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SocketStream")
            .field("terminated", &self.terminated)
            .finish_non_exhaustive()
    }
}

impl SocketStream {
    fn new<R>(reader: R) -> Self
    where
        R: Read + Send + 'static,
    {
        let (tx, rx) = tokio_mpsc::channel(READ_QUEUE_CAPACITY);

        let reader_tx = tx.clone();
        let spawned = std::thread::Builder::new()
            .name("ipnotd-reader".to_string())
            .spawn(move || read_loop(reader, &reader_tx));

        if let Err(e) = spawned {
            let _ = tx.try_send(Err(ListenerError::Open(e)));
        }

        Self {
            receiver: rx,
            terminated: false,
        }
    }
}

/// Reads until the socket fails or the stream side goes away.
///
/// Each buffer is handed over with a blocking send, so no read happens while
/// the queue is full. The thread stays blocked in `read` after the receiver
/// is dropped and only notices on the next delivery; the process is exiting
/// by then anyway.
fn read_loop<R: Read>(
    mut reader: R,
    tx: &tokio_mpsc::Sender<Result<Vec<u8>, ListenerError>>,
) {
    let mut buf = vec![0u8; READ_BUFFER_SIZE];
    loop {
        let item = match reader.read(&mut buf) {
            Ok(0) => Err(ListenerError::Stopped),
            Ok(n) => Ok(buf[..n].to_vec()),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => Err(ListenerError::Read(e)),
        };

        let failed = item.is_err();
        if tx.blocking_send(item).is_err() || failed {
            break;
        }
    }
    tracing::trace!("Notification reader thread exiting");
}

impl Stream for SocketStream {
    type Item = Result<Vec<u8>, ListenerError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if self.terminated {
            return Poll::Ready(None);
        }

        match Pin::new(&mut self.receiver).poll_recv(cx) {
            Poll::Ready(Some(Ok(bytes))) => Poll::Ready(Some(Ok(bytes))),
            Poll::Ready(Some(Err(e))) => {
                self.terminated = true;
                Poll::Ready(Some(Err(e)))
            }
            Poll::Ready(None) => {
                // Reader thread went away without reporting why
                self.terminated = true;
                Poll::Ready(Some(Err(ListenerError::Stopped)))
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
