//! Server glue: the upgrade gate and axum route construction.

use axum::extract::ws::WebSocketUpgrade;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, MethodRouter};
use futures_util::Stream;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::bridge;
use crate::stage::Incoming;

/// Route for a typed streaming endpoint.
///
/// Each upgraded connection gets a fresh stage from `factory` and is driven
/// by [`bridge::run`] until either side finishes. Requests arriving without
/// the WebSocket upgrade headers get `426 Upgrade Required` with an empty
/// body.
pub fn stream_route<I, O, F, T>(factory: F) -> MethodRouter
where
    I: DeserializeOwned + Send + 'static,
    O: Serialize + Send + 'static,
    F: FnOnce(Incoming<I>) -> T + Clone + Send + Sync + 'static,
    T: Stream<Item = O> + Send + 'static,
{
    get(move |upgrade: Option<WebSocketUpgrade>| async move {
        let Some(upgrade) = upgrade else {
            return StatusCode::UPGRADE_REQUIRED.into_response();
        };
        upgrade
            .on_upgrade(move |socket| async move {
                let connection = uuid::Uuid::new_v4();
                log::debug!("streaming connection {} open", connection);
                bridge::run(socket, factory).await;
                log::debug!("streaming connection {} closed", connection);
            })
            .into_response()
    })
}
