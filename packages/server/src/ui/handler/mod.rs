//! HTTP / WebSocket handlers.

mod http;
mod websocket;

pub use http::{debug_game_state, health, health_check};
pub use websocket::websocket_handler;
