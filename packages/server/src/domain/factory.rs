//! サーバーが割り当てる識別子とデフォルト名のファクトリ

use rand::Rng;
use uuid::Uuid;

use super::{ConnectionId, DisplayName};

/// 接続 ID を生成する
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    /// UUID v4 は空にならないので常に有効な `ConnectionId` を返す
    pub fn generate() -> ConnectionId {
        ConnectionId::from_uuid(Uuid::new_v4())
    }
}

/// デフォルトの表示名を生成する
pub struct DisplayNameFactory;

impl DisplayNameFactory {
    /// `"Player"` に 3 桁の乱数を付けた名前
    ///
    /// 重複はあり得るが、そのままにする（参加者が自分で名前を変える）。
    pub fn generate_default() -> DisplayName {
        let suffix: u16 = rand::thread_rng().gen_range(100..=999);
        DisplayName::from_default_suffix(suffix)
    }
}
