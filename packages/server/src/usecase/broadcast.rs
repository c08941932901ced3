//! UseCase: ブロードキャスト
//!
//! Registry とラウンドの状態から送信メッセージを組み立て、全接続
//! （またはエラーの場合は一つの接続）に届けます。
//!
//! 全ての送信は outbound ゲート（`Mutex<()>`）を通ります。スナップショットの
//! 取得と送信が一組で直列化されるため、全ての接続が同じ順序でメッセージを
//! 受け取ります。ラウンド終了時はスコアのリセットと `game_over` の送信を
//! 同じゲートの中で行うので、リセット後の `state` が `game_over` より先に
//! 届くことはありません。

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    domain::{ConnectionId, GameRepository, MessagePusher, Participant, RoundDuration, RoundOutcome},
    infrastructure::dto::websocket::ServerMessage,
};

use super::error::BroadcastError;

pub struct BroadcastService {
    repository: Arc<dyn GameRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    outbound: Mutex<()>,
}

impl BroadcastService {
    pub fn new(
        repository: Arc<dyn GameRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            outbound: Mutex::new(()),
        }
    }

    /// 最新の `state` を全ての接続に送る
    pub async fn broadcast_state(&self) -> Result<(), BroadcastError> {
        let _gate = self.outbound.lock().await;
        let snapshot = self.repository.snapshot().await;
        self.push_all(&ServerMessage::from(&snapshot)).await
    }

    pub async fn broadcast_round_started(
        &self,
        duration: RoundDuration,
    ) -> Result<(), BroadcastError> {
        let _gate = self.outbound.lock().await;
        self.push_all(&ServerMessage::RoundStarted {
            duration: duration.as_secs(),
        })
        .await
    }

    /// 実行中のラウンドを終了し、`game_over` を送る
    ///
    /// ラウンドが実行中でなければ `None`。送信に失敗してもログに残すだけで、
    /// ラウンドは終了したままになる。
    pub async fn conclude_round(&self) -> Option<RoundOutcome> {
        let _gate = self.outbound.lock().await;
        let outcome = self.repository.finish_round().await?;
        if let Err(e) = self.push_all(&ServerMessage::from(&outcome)).await {
            tracing::warn!("Failed to broadcast game_over: {}", e);
        }
        Some(outcome)
    }

    /// 拒否した要求の送信元にだけ `error` を送る
    pub async fn send_error(
        &self,
        connection_id: &ConnectionId,
        text: &str,
    ) -> Result<(), BroadcastError> {
        let _gate = self.outbound.lock().await;
        let json = ServerMessage::Error {
            text: text.to_string(),
        }
        .to_json()?;
        self.message_pusher.push_to(connection_id, &json).await?;
        Ok(())
    }

    /// 新しい接続に、割り当てた ID と名前を伝える
    pub async fn send_welcome(&self, participant: &Participant) -> Result<(), BroadcastError> {
        let _gate = self.outbound.lock().await;
        let json = ServerMessage::Connected {
            id: participant.id.as_str().to_string(),
            name: participant.name.as_str().to_string(),
        }
        .to_json()?;
        self.message_pusher.push_to(&participant.id, &json).await?;
        Ok(())
    }

    async fn push_all(&self, message: &ServerMessage) -> Result<(), BroadcastError> {
        let json = message.to_json()?;
        let targets = self.repository.get_all_connected_ids().await;
        self.message_pusher.broadcast(targets, &json).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{MessagePushError, MockMessagePusher, RoundState},
        infrastructure::repository::InMemoryGameRepository,
        usecase::testing::{TestHarness, drain},
    };
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_broadcast_state_reaches_every_connection() {
        // テスト項目: state が全ての接続に同じ内容で届く
        // given (前提条件):
        let harness = TestHarness::new();
        let mut alice = harness.join("a", "Alice").await;
        let mut bob = harness.join("b", "Bob").await;

        // when (操作):
        harness.broadcaster.broadcast_state().await.unwrap();

        // then (期待する結果):
        let alice_msgs = drain(&mut alice);
        let bob_msgs = drain(&mut bob);
        assert_eq!(alice_msgs.len(), 1);
        assert_eq!(alice_msgs, bob_msgs);
        match &alice_msgs[0] {
            ServerMessage::State { players, time_left } => {
                assert_eq!(players.len(), 2);
                assert_eq!(*time_left, 0);
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_broadcast_round_started() {
        // テスト項目: round_started がラウンドの長さ付きで届く
        // given (前提条件):
        let harness = TestHarness::new();
        let mut alice = harness.join("a", "Alice").await;

        // when (操作):
        harness
            .broadcaster
            .broadcast_round_started(RoundDuration::from_secs(45).unwrap())
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(
            drain(&mut alice),
            vec![ServerMessage::RoundStarted { duration: 45 }]
        );
    }

    #[tokio::test]
    async fn test_conclude_round_announces_before_any_later_state() {
        // テスト項目: game_over はリセット後の state より必ず先に届く
        // given (前提条件):
        let harness = TestHarness::new();
        let mut alice = harness.join("a", "Alice").await;
        harness
            .repository
            .start_round(RoundDuration::default())
            .await
            .unwrap();
        harness.repository.record_click(&harness.id("a")).await;

        // when (操作):
        let outcome = harness.broadcaster.conclude_round().await;
        harness.broadcaster.broadcast_state().await.unwrap();

        // then (期待する結果):
        assert!(outcome.is_some());
        let messages = drain(&mut alice);
        assert!(matches!(
            &messages[0],
            ServerMessage::GameOver { winner: Some(w), scores } if w == "Alice" && scores["Alice"] == 1
        ));
        assert!(matches!(
            &messages[1],
            ServerMessage::State { players, .. } if players[0].score == 0
        ));
        assert_eq!(harness.repository.snapshot().await.round_state, RoundState::Idle);
    }

    #[tokio::test]
    async fn test_conclude_round_when_idle_is_noop() {
        // テスト項目: ラウンドが実行中でなければ何も送らない
        // given (前提条件):
        let harness = TestHarness::new();
        let mut alice = harness.join("a", "Alice").await;

        // when (操作):
        let outcome = harness.broadcaster.conclude_round().await;

        // then (期待する結果):
        assert!(outcome.is_none());
        assert!(drain(&mut alice).is_empty());
    }

    #[tokio::test]
    async fn test_send_error_targets_one_connection() {
        // テスト項目: error は要求した接続にのみ届く
        // given (前提条件):
        let repository = Arc::new(InMemoryGameRepository::default());
        let mut pusher = MockMessagePusher::new();
        let target = ConnectionId::new("b".to_string()).unwrap();
        pusher
            .expect_push_to()
            .with(
                eq(target.clone()),
                eq(r#"{"type":"error","text":"Round already running"}"#),
            )
            .times(1)
            .returning(|_, _| Ok(()));
        pusher.expect_broadcast().never();
        let broadcaster = BroadcastService::new(repository, Arc::new(pusher));

        // when (操作):
        let result = broadcaster
            .send_error(&target, "Round already running")
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_send_error_to_vanished_connection_fails() {
        // テスト項目: 切断済みの接続への error は Push エラーになる
        // given (前提条件):
        let repository = Arc::new(InMemoryGameRepository::default());
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_push_to()
            .returning(|id, _| Err(MessagePushError::ClientNotFound(id.to_string())));
        let broadcaster = BroadcastService::new(repository, Arc::new(pusher));

        // when (操作):
        let result = broadcaster
            .send_error(&ConnectionId::new("gone".to_string()).unwrap(), "x")
            .await;

        // then (期待する結果):
        assert!(matches!(
            result,
            Err(BroadcastError::Push(MessagePushError::ClientNotFound(_)))
        ));
    }

    #[tokio::test]
    async fn test_send_welcome() {
        // テスト項目: 新しい接続に自分の ID と名前が届く
        // given (前提条件):
        let harness = TestHarness::new();
        let mut alice = harness.join("a", "Alice").await;
        let participant = harness.repository.get_participants().await.remove(0);

        // when (操作):
        harness.broadcaster.send_welcome(&participant).await.unwrap();

        // then (期待する結果):
        assert_eq!(
            drain(&mut alice),
            vec![ServerMessage::Connected {
                id: "a".to_string(),
                name: "Alice".to_string(),
            }]
        );
    }
}
