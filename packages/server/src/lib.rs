//! Clicker Race game server library.
//!
//! A round-based multiplayer clicking game: participants connect over
//! WebSocket, someone starts a timed round, everyone clicks, and the highest
//! score wins. All state lives in memory in a single process.

use std::sync::Arc;

use clicker_race_shared::time::SystemClock;

// layers
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

use config::GameConfig;
use infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryGameRepository};
use ui::{MessageRouter, Server};

/// Wire the layers together into a ready-to-run [`Server`].
pub fn build_server(config: GameConfig) -> Server {
    // Initialize dependencies in order:
    // 1. Repository
    // 2. MessagePusher
    // 3. MessageRouter (UseCases, BroadcastService, RoundController)
    // 4. Server
    let repository = Arc::new(InMemoryGameRepository::default());
    let message_pusher = Arc::new(WebSocketMessagePusher::default());
    let router = Arc::new(MessageRouter::new(
        repository.clone(),
        message_pusher,
        Arc::new(SystemClock),
        config,
    ));
    Server::new(router, repository)
}
