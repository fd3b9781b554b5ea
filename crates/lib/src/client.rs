//! Client glue: dial a streaming endpoint and bridge it to a local stage.

use futures_util::Stream;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::bridge;
use crate::stage::Incoming;

/// Where a server's streaming endpoints live: host, port, and an optional
/// path prefix shared by every endpoint.
#[derive(Debug, Clone)]
pub struct Client {
    host: String,
    port: u16,
    base_path: String,
}

/// Failure to establish the connection. Everything after a successful dial
/// is absorbed by the bridge: a dropped connection ends the request
/// normally.
#[derive(Debug, thiserror::Error)]
pub enum DialError {
    #[error("websocket dial failed: {0}")]
    Dial(#[from] tokio_tungstenite::tungstenite::Error),
}

impl Client {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            base_path: String::new(),
        }
    }

    /// Prefix prepended to every request path (e.g. "/api/v1"). A missing
    /// leading slash is added, a trailing one removed.
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        let base_path = base_path.into();
        let base_path = base_path.trim_end_matches('/');
        self.base_path = if base_path.is_empty() || base_path.starts_with('/') {
            base_path.to_string()
        } else {
            format!("/{}", base_path)
        };
        self
    }

    fn url(&self, path: &str) -> String {
        format!("ws://{}:{}{}{}", self.host, self.port, self.base_path, path)
    }

    /// Dial `path` under the base path and run `stage` over the connection.
    ///
    /// The client plays the mirror role of the server: `stage` consumes the
    /// items the endpoint produces, and whatever it emits is sent up as the
    /// endpoint's input. Returns once the stage finishes or the server
    /// hangs up; only failure to establish the connection is an error.
    pub async fn websocket_request<I, O, F, T>(&self, path: &str, stage: F) -> Result<(), DialError>
    where
        I: DeserializeOwned + Send,
        O: Serialize,
        F: FnOnce(Incoming<I>) -> T,
        T: Stream<Item = O> + Send,
    {
        let url = self.url(path);
        log::debug!("dialing {}", url);
        let (socket, _response) = tokio_tungstenite::connect_async(url.as_str()).await?;
        bridge::run(socket, stage).await;
        Ok(())
    }
}
