//! UseCase: 表示名の変更

use std::sync::Arc;

use crate::domain::{ConnectionId, DisplayName, GameRepository};

pub struct SetNameUseCase {
    repository: Arc<dyn GameRepository>,
}

impl SetNameUseCase {
    pub fn new(repository: Arc<dyn GameRepository>) -> Self {
        Self { repository }
    }

    /// `raw_name`（前後の空白を除き最大 20 文字）を適用し、適用後の名前を返す
    ///
    /// 空白のみの入力では現在の名前を維持する。接続が登録されていなければ `None`。
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        raw_name: &str,
    ) -> Option<DisplayName> {
        self.repository
            .rename_participant(connection_id, raw_name)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::testing::TestHarness;

    #[tokio::test]
    async fn test_set_name_truncates_long_input() {
        // テスト項目: 20 文字を超える名前はちょうど 20 文字になる
        // given (前提条件):
        let harness = TestHarness::new();
        let _rx = harness.join("a", "Player100").await;
        let usecase = SetNameUseCase::new(harness.repository.clone());

        // when (操作):
        let applied = usecase
            .execute(&harness.id("a"), "A very long name that keeps going")
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(applied.as_str(), "A very long name tha");
        assert_eq!(applied.as_str().chars().count(), 20);
    }

    #[tokio::test]
    async fn test_set_name_blank_keeps_previous() {
        // テスト項目: 空白のみの名前では以前の名前が維持される
        // given (前提条件):
        let harness = TestHarness::new();
        let _rx = harness.join("a", "Player100").await;
        let usecase = SetNameUseCase::new(harness.repository.clone());

        // when (操作):
        let applied = usecase.execute(&harness.id("a"), "    ").await.unwrap();

        // then (期待する結果):
        assert_eq!(applied.as_str(), "Player100");
        let participants = harness.repository.get_participants().await;
        assert_eq!(participants[0].name.as_str(), "Player100");
    }

    #[tokio::test]
    async fn test_set_name_unknown_connection() {
        // テスト項目: 未登録の接続の名前変更は None
        // given (前提条件):
        let harness = TestHarness::new();
        let usecase = SetNameUseCase::new(harness.repository.clone());

        // when (操作):
        let applied = usecase.execute(&harness.id("ghost"), "Alice").await;

        // then (期待する結果):
        assert!(applied.is_none());
    }
}
