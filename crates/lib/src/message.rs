//! Frame-level abstraction over the two WebSocket message enums.
//!
//! The server half speaks axum's `Message`, the client half tungstenite's.
//! The bridge is written once against this trait; both impls are thin.

/// The handful of frame operations the bridge needs from a WebSocket
/// message type.
pub trait Frame: Sized + Send + 'static {
    /// A text frame carrying `payload`.
    fn text(payload: String) -> Self;
    /// An empty keep-alive ping.
    fn ping() -> Self;
    /// A close frame with normal closure code 1000 and the given reason.
    fn close(reason: &str) -> Self;
    /// Payload of a text frame; `None` for binary and control frames.
    fn into_text(self) -> Option<String>;
}

impl Frame for axum::extract::ws::Message {
    fn text(payload: String) -> Self {
        Self::Text(payload)
    }

    fn ping() -> Self {
        Self::Ping(Vec::new())
    }

    fn close(reason: &str) -> Self {
        Self::Close(Some(axum::extract::ws::CloseFrame {
            code: axum::extract::ws::close_code::NORMAL,
            reason: reason.to_string().into(),
        }))
    }

    fn into_text(self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl Frame for tokio_tungstenite::tungstenite::Message {
    fn text(payload: String) -> Self {
        Self::Text(payload)
    }

    fn ping() -> Self {
        Self::Ping(Vec::new())
    }

    fn close(reason: &str) -> Self {
        use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
        use tokio_tungstenite::tungstenite::protocol::CloseFrame;
        Self::Close(Some(CloseFrame {
            code: CloseCode::Normal,
            reason: reason.to_string().into(),
        }))
    }

    fn into_text(self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}
