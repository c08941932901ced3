//! Server execution logic.

use std::{future::Future, path::PathBuf, sync::Arc};

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::domain::GameRepository;

use super::{
    handler::{debug_game_state, health, health_check, websocket_handler},
    router::MessageRouter,
    signal::shutdown_signal,
    state::AppState,
};

/// Clicker Race game server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(router, repository).with_static_dir(Some("public".into()));
/// server.run("127.0.0.1".to_string(), 3000).await?;
/// ```
pub struct Server {
    /// MessageRouter（WebSocket イベントの振り分け）
    router: Arc<MessageRouter>,
    /// Repository（デバッグ用エンドポイントが参照する）
    repository: Arc<dyn GameRepository>,
    /// 静的ファイルを配信するディレクトリ
    static_dir: Option<PathBuf>,
}

impl Server {
    pub fn new(router: Arc<MessageRouter>, repository: Arc<dyn GameRepository>) -> Self {
        Self {
            router,
            repository,
            static_dir: None,
        }
    }

    /// Serve files from `dir` for every path no other route claims.
    pub fn with_static_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.static_dir = dir;
        self
    }

    /// Build the axum application.
    pub fn into_app(self) -> Router {
        let app_state = Arc::new(AppState {
            router: self.router,
            repository: self.repository,
        });

        let app = Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/health", get(health))
            .route("/api/health", get(health_check))
            .route("/debug/game", get(debug_game_state))
            .with_state(app_state);

        let app = match self.static_dir {
            Some(dir) => {
                tracing::info!("Serving static files from {}", dir.display());
                app.fallback_service(ServeDir::new(dir))
            }
            None => app,
        };

        app.layer(TraceLayer::new_for_http())
    }

    /// Run the game server until Ctrl+C
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Clicker Race server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    /// Serve on an already bound listener until `shutdown` completes.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(listener, self.into_app())
            .with_graceful_shutdown(shutdown)
            .await
    }
}
