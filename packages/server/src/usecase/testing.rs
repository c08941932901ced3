//! UseCase テスト用の共通フィクスチャ

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::{
    config::GameConfig,
    domain::{
        ConnectionId, DisplayName, GameRepository, MessagePusher, Participant, Timestamp,
    },
    infrastructure::{
        dto::websocket::ServerMessage, message_pusher::WebSocketMessagePusher,
        repository::InMemoryGameRepository,
    },
};

use super::{BroadcastService, RoundController};

/// サーバーと同じ組み合わせの InMemory Repository と WebSocket Pusher
///
/// 各接続の受信チャンネルはテストに返す。
pub(crate) struct TestHarness {
    pub repository: Arc<InMemoryGameRepository>,
    pub pusher: Arc<WebSocketMessagePusher>,
    pub broadcaster: Arc<BroadcastService>,
}

impl TestHarness {
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryGameRepository::default());
        let pusher = Arc::new(WebSocketMessagePusher::default());
        let broadcaster = Arc::new(BroadcastService::new(repository.clone(), pusher.clone()));
        Self {
            repository,
            pusher,
            broadcaster,
        }
    }

    pub fn id(&self, value: &str) -> ConnectionId {
        ConnectionId::new(value.to_string()).unwrap()
    }

    /// 接続のユースケースを通さずに参加者を直接登録する
    pub async fn join(&self, conn: &str, name: &str) -> mpsc::UnboundedReceiver<String> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.repository
            .add_participant(Participant::new(
                self.id(conn),
                DisplayName::new(name.to_string()).unwrap(),
                Timestamp::new(0),
            ))
            .await
            .unwrap();
        self.pusher.register_client(self.id(conn), tx).await;
        rx
    }

    pub fn round_controller(&self, config: GameConfig) -> Arc<RoundController> {
        Arc::new(RoundController::new(
            self.repository.clone(),
            self.broadcaster.clone(),
            config,
        ))
    }
}

/// 接続に積まれているメッセージを全て取り出してデコードする
pub(crate) fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<ServerMessage> {
    let mut messages = Vec::new();
    while let Ok(json) = rx.try_recv() {
        messages.push(serde_json::from_str(&json).expect("server sends valid JSON"));
    }
    messages
}
