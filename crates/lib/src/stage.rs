//! Decoded inbound stream handed to the caller's transform stage.
//!
//! The stage itself is whatever the caller supplies: any
//! `FnOnce(Incoming<I>) -> impl Stream<Item = O>`. The bridge feeds the
//! `Incoming` end and treats the end of the returned stream as the stage
//! being out of data.

use std::marker::PhantomData;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::Stream;
use serde::de::DeserializeOwned;
use tokio::sync::mpsc;

/// Items arriving from the peer, decoded in receive order.
///
/// Each raw text payload is parsed as `I`; payloads that do not parse are
/// dropped, so the stream only ever yields well-formed items. Ends when the
/// connection does.
pub struct Incoming<I> {
    relay: mpsc::Receiver<String>,
    _item: PhantomData<fn() -> I>,
}

impl<I> Incoming<I> {
    pub(crate) fn new(relay: mpsc::Receiver<String>) -> Self {
        Self {
            relay,
            _item: PhantomData,
        }
    }
}

impl<I: DeserializeOwned> Stream for Incoming<I> {
    type Item = I;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<I>> {
        let this = self.get_mut();
        loop {
            match this.relay.poll_recv(cx) {
                Poll::Ready(Some(payload)) => {
                    if let Ok(item) = serde_json::from_str(&payload) {
                        return Poll::Ready(Some(item));
                    }
                    // malformed payload: skip it and try the next one
                }
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
