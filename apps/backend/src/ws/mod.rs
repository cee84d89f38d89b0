//! Room-scoped realtime delivery over WebSocket.

pub mod hub;
pub mod protocol;
pub mod session;

pub use hub::{BroadcastHub, RoomEvent};
