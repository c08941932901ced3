//! UseCase: クリック

use std::sync::Arc;

use crate::domain::{ConnectionId, GameRepository, Score};

pub struct ClickUseCase {
    repository: Arc<dyn GameRepository>,
}

impl ClickUseCase {
    pub fn new(repository: Arc<dyn GameRepository>) -> Self {
        Self { repository }
    }

    /// クリックを 1 回数える
    ///
    /// 新しいスコアを返す。ラウンドが実行中でない、または送信元が既に
    /// いない場合は `None`（クリックは無視される）。
    pub async fn execute(&self, connection_id: &ConnectionId) -> Option<Score> {
        self.repository.record_click(connection_id).await
    }
}
