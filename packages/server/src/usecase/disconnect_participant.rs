//! UseCase: 参加者切断処理
//!
//! 切断は冪等です。同じ接続の切断通知が二度届いても二回目は何もしません。
//! ラウンド中の切断でもラウンドはそのまま続行します。

use std::sync::Arc;

use crate::domain::{ConnectionId, GameRepository, MessagePusher, Participant};

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    repository: Arc<dyn GameRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectParticipantUseCase {
    pub fn new(
        repository: Arc<dyn GameRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 参加者切断を実行
    ///
    /// # Returns
    ///
    /// 削除された参加者（既に存在しなければ `None`）
    pub async fn execute(&self, connection_id: &ConnectionId) -> Option<Participant> {
        let removed = self.repository.remove_participant(connection_id).await;
        self.message_pusher.unregister_client(connection_id).await;
        removed
    }

    /// 残りの参加者数を取得
    pub async fn count_remaining_participants(&self) -> usize {
        self.repository.count_participants().await
    }
}
