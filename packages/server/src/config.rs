//! ラウンドのタイミング設定

use std::time::Duration;

use crate::domain::RoundDuration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// `start` に有効な秒数が無いときに使うラウンドの長さ
    pub default_duration: RoundDuration,
    /// タイマーの周期（tick ごとに残り時間を減らしてブロードキャストする）
    pub tick_interval: Duration,
    /// `game_over` の後に送る state までの遅延
    pub final_broadcast_delay: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            default_duration: RoundDuration::default(),
            tick_interval: Duration::from_millis(200),
            final_broadcast_delay: Duration::from_millis(200),
        }
    }
}
