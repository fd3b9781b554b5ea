//! Typed duplex streaming over WebSockets: declare an endpoint as "takes a
//! stream of `I`, produces a stream of `O`" and let the bridge pump frames
//! between the socket and the caller's stream transform, on both the axum
//! (server) and tungstenite (client) side.

pub mod bridge;
pub mod client;
pub mod message;
pub mod server;
pub mod stage;

pub use bridge::{run, CLOSE_REASON};
pub use client::{Client, DialError};
pub use server::stream_route;
pub use stage::Incoming;
