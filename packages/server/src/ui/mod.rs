//! UI 層（axum による HTTP / WebSocket の入り口）

mod handler;
mod router;
mod server;
mod signal;
pub mod state;

pub use router::{MessageRouter, RouteError};
pub use server::Server;
