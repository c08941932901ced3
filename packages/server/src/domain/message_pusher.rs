//! MessagePusher trait 定義
//!
//! 参加者への通知手段の抽象化です。UseCase 層はこの trait にのみ依存し、
//! WebSocket などの具体的な送信手段は Infrastructure 層が実装します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, MessagePushError};

/// 一つの接続への送信チャンネル（トランスポート層が順に取り出して送る）
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続をプッシュ対象として登録
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// 接続をプッシュ対象から外す（存在しなければ何もしない）
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// 特定の接続にのみ送信
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError>;

    /// 複数の接続に送信
    ///
    /// 一部の接続への送信失敗は許容されます（ログに残してスキップ）。
    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        content: &str,
    ) -> Result<(), MessagePushError>;
}
