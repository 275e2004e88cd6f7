//! Decoded event stream.
//!
//! This module provides [`EventStream`], which lazily turns raw notification
//! buffers into one [`InterfaceAddress`] at a time.

use super::MonitorError;
use super::decode::RecordDecoder;
use super::error::ListenerError;
use crate::network::InterfaceAddress;
use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio_stream::Stream;

/// A stream of `(interface, address)` observations decoded from a raw
/// notification stream.
///
/// A single buffer may decode to several events; they are yielded in record
/// order before the next buffer is pulled. The stream ends after the first
/// error, or when the underlying stream ends.
#[derive(Debug)]
pub struct EventStream<S, D> {
    raw: S,
    decoder: D,
    pending: VecDeque<InterfaceAddress>,
    terminated: bool,
}

impl<S, D> EventStream<S, D>
where
    S: Stream<Item = Result<Vec<u8>, ListenerError>> + Unpin,
    D: RecordDecoder,
{
    /// Wraps a raw record stream with a decoder.
    pub fn new(raw: S, decoder: D) -> Self {
        Self {
            raw,
            decoder,
            pending: VecDeque::new(),
            terminated: false,
        }
    }
}

impl<S, D> Stream for EventStream<S, D>
where
    S: Stream<Item = Result<Vec<u8>, ListenerError>> + Unpin,
    D: RecordDecoder + Unpin,
{
    type Item = Result<InterfaceAddress, MonitorError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Poll::Ready(Some(Ok(event)));
            }
            if self.terminated {
                return Poll::Ready(None);
            }

            match Pin::new(&mut self.raw).poll_next(cx) {
                Poll::Ready(Some(Ok(bytes))) => match self.decoder.decode(&bytes) {
                    Ok(events) => {
                        tracing::trace!(
                            "Decoded {} event(s) from {} bytes",
                            events.len(),
                            bytes.len()
                        );
                        self.pending.extend(events);
                    }
                    Err(e) => {
                        self.terminated = true;
                        return Poll::Ready(Some(Err(e.into())));
                    }
                },
                Poll::Ready(Some(Err(e))) => {
                    self.terminated = true;
                    return Poll::Ready(Some(Err(e.into())));
                }
                Poll::Ready(None) => {
                    self.terminated = true;
                    return Poll::Ready(None);
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
