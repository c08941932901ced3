use crate::domain::{ConnectionId, DisplayName, Score, Timestamp};

/// 参加者（接続一つにつき一人）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: ConnectionId,
    pub name: DisplayName,
    pub score: Score,
    pub connected_at: Timestamp,
}

impl Participant {
    /// 新しい参加者のスコアは常に 0 から始まる
    pub fn new(id: ConnectionId, name: DisplayName, connected_at: Timestamp) -> Self {
        Self {
            id,
            name,
            score: Score::ZERO,
            connected_at,
        }
    }

    /// ユーザー入力の名前を適用し、適用後の名前を返す
    ///
    /// 整形して何も残らない入力では現在の名前を維持する。
    pub fn rename(&mut self, raw_name: &str) -> &DisplayName {
        if let Some(name) = DisplayName::sanitize(raw_name) {
            self.name = name;
        }
        &self.name
    }

    pub fn increment_score(&mut self) -> Score {
        self.score = self.score.incremented();
        self.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participant(name: &str) -> Participant {
        Participant::new(
            ConnectionId::new("conn-1".to_string()).unwrap(),
            DisplayName::new(name.to_string()).unwrap(),
            Timestamp::new(1000),
        )
    }

    #[test]
    fn test_new_participant_starts_at_zero() {
        // テスト項目: 新しい参加者のスコアは 0
        // given (前提条件):

        // when (操作):
        let p = participant("Player123");

        // then (期待する結果):
        assert_eq!(p.score, Score::ZERO);
    }

    #[test]
    fn test_rename_with_blank_keeps_previous_name() {
        // テスト項目: 空白のみの名前では既存の名前が維持される
        // given (前提条件):
        let mut p = participant("Player123");

        // when (操作):
        let applied = p.rename("   ").clone();

        // then (期待する結果):
        assert_eq!(applied.as_str(), "Player123");
        assert_eq!(p.name.as_str(), "Player123");
    }

    #[test]
    fn test_rename_applies_sanitized_name() {
        // テスト項目: 整形済みの名前が適用される
        // given (前提条件):
        let mut p = participant("Player123");

        // when (操作):
        let applied = p.rename(" Alice ").clone();

        // then (期待する結果):
        assert_eq!(applied.as_str(), "Alice");
        assert_eq!(p.name.as_str(), "Alice");
    }
}
