//! GameRepository trait 定義
//!
//! プロセス全体で唯一のゲーム状態（参加者レジストリ + ラウンド）への
//! インターフェースです。各メソッドは一つの不可分な操作として実行される
//! ことを実装側が保証します。これにより受信メッセージ、接続・切断、
//! ラウンドの tick が単一の書き込み者として直列化されます。

use std::time::Duration;

use async_trait::async_trait;

use super::{
    ConnectionId, DisplayName, DomainError, GameSnapshot, Participant, RoundDuration,
    RoundOutcome, RoundTicket, Score, TickOutcome,
};

#[async_trait]
pub trait GameRepository: Send + Sync {
    /// 参加者を追加
    async fn add_participant(&self, participant: Participant) -> Result<(), DomainError>;

    /// 参加者を削除（存在しなければ `None`）
    async fn remove_participant(&self, connection_id: &ConnectionId) -> Option<Participant>;

    /// 表示名を変更し、変更後に有効な名前を返す（未知の接続なら `None`）
    async fn rename_participant(
        &self,
        connection_id: &ConnectionId,
        raw_name: &str,
    ) -> Option<DisplayName>;

    /// ラウンド中であればスコアを 1 加算し、新しいスコアを返す
    async fn record_click(&self, connection_id: &ConnectionId) -> Option<Score>;

    /// 参加者リストを取得（レジストリ順のコピー）
    async fn get_participants(&self) -> Vec<Participant>;

    /// 接続中の全ての接続 ID を取得
    async fn get_all_connected_ids(&self) -> Vec<ConnectionId>;

    /// 接続中の参加者数を取得
    async fn count_participants(&self) -> usize;

    /// ラウンドを開始
    async fn start_round(&self, duration: RoundDuration) -> Result<RoundTicket, DomainError>;

    /// 指定した epoch のラウンドの残り時間を進める
    async fn tick_round(&self, epoch: u64, elapsed: Duration) -> TickOutcome;

    /// 実行中のラウンドを終了し、結果を返す（実行中でなければ `None`）
    async fn finish_round(&self) -> Option<RoundOutcome>;

    /// ブロードキャスト用のスナップショットを取得
    async fn snapshot(&self) -> GameSnapshot;
}
