//! Duplex bridge: pumps frames between one WebSocket and one transform
//! stage, and coordinates their joint shutdown.
//!
//! The same code drives both sides of a streaming endpoint; the server
//! hands it an axum socket, the client a tungstenite one (see `message`).

use std::time::Duration;

use futures_util::{Sink, SinkExt, Stream, StreamExt};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::mpsc;

use crate::message::Frame;
use crate::stage::Incoming;

/// Reason carried by the close frame when the stage stops producing.
pub const CLOSE_REASON: &str = "Out of data";

/// Keep-alive ping interval.
const PING_INTERVAL: Duration = Duration::from_secs(10);

/// How the outbound pipeline ended.
enum PumpEnd {
    /// The stage's output stream finished on its own.
    Exhausted,
    /// The transport refused a write, or an item failed to encode.
    Lost,
}

/// Drive one connection until either side gives up.
///
/// Inbound text frames are decoded as `I` (payloads that do not parse are
/// dropped) and fed to the stage; every `O` it produces is sent back as one
/// text frame, with a keep-alive ping every [`PING_INTERVAL`]. When the
/// stage finishes on its own the peer gets a close frame with
/// [`CLOSE_REASON`] and the socket is drained until it reports closure.
/// A dropped connection is not an error: transport failures anywhere are
/// absorbed and simply end the run.
pub async fn run<S, M, E, I, O, F, T>(socket: S, stage: F)
where
    S: Stream<Item = Result<M, E>> + Sink<M> + Unpin + Send,
    M: Frame,
    I: DeserializeOwned + Send,
    O: Serialize,
    F: FnOnce(Incoming<I>) -> T,
    T: Stream<Item = O> + Send,
{
    let (mut sink, mut stream) = socket.split();

    // Single-slot relay: the receive loop blocks on `send` until the stage
    // has taken the previous payload, so at most one undelivered frame
    // exists at any instant and inbound order is preserved.
    let (relay_tx, relay_rx) = mpsc::channel::<String>(1);
    let produced = stage(Incoming::new(relay_rx));
    tokio::pin!(produced);

    let inbound = async {
        while let Some(Ok(frame)) = stream.next().await {
            let Some(payload) = frame.into_text() else {
                continue;
            };
            // A stage that dropped its input takes no more deliveries; such
            // payloads are discarded but the connection stays up.
            let _ = relay_tx.send(payload).await;
        }
    };

    let outbound = async {
        let mut ping = tokio::time::interval_at(
            tokio::time::Instant::now() + PING_INTERVAL,
            PING_INTERVAL,
        );
        loop {
            tokio::select! {
                _ = ping.tick() => {
                    if sink.send(M::ping()).await.is_err() {
                        return PumpEnd::Lost;
                    }
                }
                item = produced.next() => match item {
                    Some(item) => match serde_json::to_string(&item) {
                        Ok(payload) => {
                            if sink.send(M::text(payload)).await.is_err() {
                                return PumpEnd::Lost;
                            }
                        }
                        Err(e) => {
                            log::debug!("outbound item failed to encode: {}", e);
                            return PumpEnd::Lost;
                        }
                    },
                    None => return PumpEnd::Exhausted,
                },
            }
        }
    };

    // Race the pumps: whichever finishes first wins and the loser is
    // dropped mid-await. Transport errors surface as an early finish on
    // either side and end the run silently.
    let end = tokio::select! {
        _ = inbound => PumpEnd::Lost,
        end = outbound => end,
    };

    if let PumpEnd::Exhausted = end {
        log::debug!("stage out of data, closing connection");
        if sink.send(M::close(CLOSE_REASON)).await.is_ok() {
            // Keep receiving (and discarding) until the peer hangs up.
            while let Some(Ok(_)) = stream.next().await {}
        }
    }
}
