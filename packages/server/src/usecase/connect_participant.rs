//! UseCase: 参加者接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::execute() メソッド
//! - デフォルト名・スコア 0 での参加者作成と、MessagePusher への登録
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規接続
//! - 異常系：同じ接続 ID での二重登録

use std::sync::Arc;

use clicker_race_shared::time::Clock;

use crate::domain::{
    ConnectionId, DisplayNameFactory, GameRepository, MessagePusher, Participant, PusherChannel,
    Timestamp,
};

use super::error::ConnectError;

/// 参加者接続のユースケース
pub struct ConnectParticipantUseCase {
    repository: Arc<dyn GameRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl ConnectParticipantUseCase {
    pub fn new(
        repository: Arc<dyn GameRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            clock,
        }
    }

    /// 参加者接続を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - トランスポート層が割り当てた接続 ID
    /// * `sender` - この接続へのメッセージ送信用チャンネル
    ///
    /// # Returns
    ///
    /// * `Ok(Participant)` - 登録された参加者（デフォルト名、スコア 0）
    /// * `Err(ConnectError)` - 同じ接続 ID が既に登録されている
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        sender: PusherChannel,
    ) -> Result<Participant, ConnectError> {
        let participant = Participant::new(
            connection_id.clone(),
            DisplayNameFactory::generate_default(),
            Timestamp::new(self.clock.now_millis()),
        );

        self.repository
            .add_participant(participant.clone())
            .await
            .map_err(|_| ConnectError::DuplicateConnection(connection_id.to_string()))?;

        self.message_pusher
            .register_client(connection_id, sender)
            .await;

        Ok(participant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{MockMessagePusher, Score},
        infrastructure::repository::InMemoryGameRepository,
    };
    use clicker_race_shared::time::FixedClock;
    use tokio::sync::mpsc;

    fn id(value: &str) -> ConnectionId {
        ConnectionId::new(value.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_connect_participant_success() {
        // テスト項目: 新規接続はデフォルト名・スコア 0 で登録される
        // given (前提条件):
        let repository = Arc::new(InMemoryGameRepository::default());
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_register_client()
            .withf(|connection_id, _| connection_id.as_str() == "conn-1")
            .times(1)
            .return_const(());
        let usecase = ConnectParticipantUseCase::new(
            repository.clone(),
            Arc::new(pusher),
            Arc::new(FixedClock::new(42)),
        );
        let (tx, _rx) = mpsc::unbounded_channel();

        // when (操作):
        let participant = usecase.execute(id("conn-1"), tx).await.unwrap();

        // then (期待する結果):
        assert!(participant.name.as_str().starts_with("Player"));
        assert_eq!(participant.score, Score::ZERO);
        assert_eq!(participant.connected_at.value(), 42);
        assert_eq!(repository.get_participants().await, vec![participant]);
    }

    #[tokio::test]
    async fn test_connect_duplicate_is_rejected() {
        // テスト項目: 同じ接続 ID での二重登録はエラーになり、Pusher には登録されない
        // given (前提条件):
        let repository = Arc::new(InMemoryGameRepository::default());
        let mut pusher = MockMessagePusher::new();
        pusher.expect_register_client().times(1).return_const(());
        let usecase = ConnectParticipantUseCase::new(
            repository.clone(),
            Arc::new(pusher),
            Arc::new(FixedClock::new(0)),
        );
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();
        usecase.execute(id("conn-1"), tx1).await.unwrap();

        // when (操作):
        let result = usecase.execute(id("conn-1"), tx2).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ConnectError::DuplicateConnection("conn-1".to_string()))
        );
        assert_eq!(repository.count_participants().await, 1);
    }
}
