//! InMemory Game Repository 実装
//!
//! `Game` 集約を一つの `Mutex` で保護し、ドメイン層の `GameRepository` trait を
//! 実装します。各メソッドはロックを一度だけ取得するため、一つの操作が
//! 他の操作と交互に実行されることはありません。

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, DisplayName, DomainError, Game, GameRepository, GameSnapshot, Participant,
    RoundDuration, RoundOutcome, RoundTicket, Score, TickOutcome,
};

pub struct InMemoryGameRepository {
    game: Arc<Mutex<Game>>,
}

impl InMemoryGameRepository {
    pub fn new(game: Arc<Mutex<Game>>) -> Self {
        Self { game }
    }
}

impl Default for InMemoryGameRepository {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(Game::new())))
    }
}

#[async_trait]
impl GameRepository for InMemoryGameRepository {
    async fn add_participant(&self, participant: Participant) -> Result<(), DomainError> {
        let mut game = self.game.lock().await;
        game.add_participant(participant)
    }

    async fn remove_participant(&self, connection_id: &ConnectionId) -> Option<Participant> {
        let mut game = self.game.lock().await;
        game.remove_participant(connection_id)
    }

    async fn rename_participant(
        &self,
        connection_id: &ConnectionId,
        raw_name: &str,
    ) -> Option<DisplayName> {
        let mut game = self.game.lock().await;
        game.rename(connection_id, raw_name)
    }

    async fn record_click(&self, connection_id: &ConnectionId) -> Option<Score> {
        let mut game = self.game.lock().await;
        game.record_click(connection_id)
    }

    async fn get_participants(&self) -> Vec<Participant> {
        let game = self.game.lock().await;
        game.participants().to_vec()
    }

    async fn get_all_connected_ids(&self) -> Vec<ConnectionId> {
        let game = self.game.lock().await;
        game.participants().iter().map(|p| p.id.clone()).collect()
    }

    async fn count_participants(&self) -> usize {
        let game = self.game.lock().await;
        game.participants().len()
    }

    async fn start_round(&self, duration: RoundDuration) -> Result<RoundTicket, DomainError> {
        let mut game = self.game.lock().await;
        game.start_round(duration)
    }

    async fn tick_round(&self, epoch: u64, elapsed: Duration) -> TickOutcome {
        let mut game = self.game.lock().await;
        game.tick_round(epoch, elapsed)
    }

    async fn finish_round(&self) -> Option<RoundOutcome> {
        let mut game = self.game.lock().await;
        game.finish_round()
    }

    async fn snapshot(&self) -> GameSnapshot {
        let game = self.game.lock().await;
        game.snapshot()
    }
}
