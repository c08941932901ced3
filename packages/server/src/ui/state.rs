//! Shared application state.

use std::sync::Arc;

use crate::domain::GameRepository;

use super::router::MessageRouter;

pub struct AppState {
    /// WebSocket イベントの振り分け先
    pub router: Arc<MessageRouter>,
    /// デバッグ用エンドポイントが状態を読むための Repository
    pub repository: Arc<dyn GameRepository>,
}
