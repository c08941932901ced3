//! UseCase: ラウンド制御
//!
//! ラウンドの開始、tick ごとのカウントダウン、終了処理を担当します。
//!
//! タイマーは開始時に `tokio::spawn` されるタスクで、開始時に発行された
//! epoch を毎 tick 提示します。ラウンドが終了する（または別のラウンドが
//! 始まる）と Repository が `TickOutcome::Disarmed` を返し、タスクは自ら
//! 終了します。このため解除は何度行っても安全で、終了後に tick が
//! 二重に減算したり勝者を二度計算したりすることはありません。

use std::sync::Arc;

use tokio::time::{Instant, MissedTickBehavior, interval_at};

use crate::{
    config::GameConfig,
    domain::{GameRepository, RoundDuration, RoundOutcome, RoundTicket, TickOutcome, Winner},
};

use super::{BroadcastService, error::StartRoundError};

pub struct RoundController {
    repository: Arc<dyn GameRepository>,
    broadcaster: Arc<BroadcastService>,
    config: GameConfig,
}

impl RoundController {
    pub fn new(
        repository: Arc<dyn GameRepository>,
        broadcaster: Arc<BroadcastService>,
        config: GameConfig,
    ) -> Self {
        Self {
            repository,
            broadcaster,
            config,
        }
    }

    /// ラウンドを開始し、タイマーを起動する
    ///
    /// # Arguments
    ///
    /// * `requested_secs` - 要求された秒数（未指定・0 以下ならデフォルト値）
    ///
    /// # Returns
    ///
    /// * `Ok(RoundDuration)` - 実際に適用されたラウンドの長さ
    /// * `Err(StartRoundError::AlreadyRunning)` - 既にラウンドが実行中（状態は変わらない）
    pub async fn start(
        self: &Arc<Self>,
        requested_secs: Option<i64>,
    ) -> Result<RoundDuration, StartRoundError> {
        let duration = RoundDuration::from_requested(requested_secs, self.config.default_duration);
        let ticket = self
            .repository
            .start_round(duration)
            .await
            .map_err(|_| StartRoundError::AlreadyRunning)?;

        tracing::info!(
            "Round {} started for {}s",
            ticket.epoch,
            duration.as_secs()
        );
        self.arm_timer(ticket);

        if let Err(e) = self.broadcaster.broadcast_state().await {
            tracing::warn!("Failed to broadcast state at round start: {}", e);
        }
        Ok(duration)
    }

    fn arm_timer(self: &Arc<Self>, ticket: RoundTicket) {
        let controller = Arc::clone(self);
        tokio::spawn(async move {
            let period = controller.config.tick_interval;
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                match controller.tick(ticket.epoch).await {
                    TickOutcome::Running { .. } => {}
                    TickOutcome::Expired | TickOutcome::Disarmed => break,
                }
            }
            tracing::debug!("Timer for round {} disarmed", ticket.epoch);
        });
    }

    /// タイマー 1 回分の処理
    ///
    /// 残り時間を減らして state をブロードキャストし、0 に達したら
    /// 最後の state を送ってからラウンドを終了する。
    pub async fn tick(&self, epoch: u64) -> TickOutcome {
        let outcome = self
            .repository
            .tick_round(epoch, self.config.tick_interval)
            .await;

        match outcome {
            TickOutcome::Disarmed => {}
            TickOutcome::Running { .. } => {
                if let Err(e) = self.broadcaster.broadcast_state().await {
                    tracing::warn!("Failed to broadcast state on tick: {}", e);
                }
            }
            TickOutcome::Expired => {
                if let Err(e) = self.broadcaster.broadcast_state().await {
                    tracing::warn!("Failed to broadcast final state: {}", e);
                }
                self.end().await;
            }
        }
        outcome
    }

    /// ラウンドを終了する
    ///
    /// 実行中でなければ何もしない（`None`）。勝者の決定、スコアのリセット、
    /// `game_over` の送信を行い、少し遅れてリセット後の state を送る。
    pub async fn end(&self) -> Option<RoundOutcome> {
        let outcome = self.broadcaster.conclude_round().await?;

        match &outcome.winner {
            Winner::Participant { id, name } => {
                tracing::info!("Round ended. Winner: {} ({})", name, id)
            }
            Winner::NoWinner => tracing::info!("Round ended with no participants"),
        }

        let broadcaster = Arc::clone(&self.broadcaster);
        let delay = self.config.final_broadcast_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = broadcaster.broadcast_state().await {
                tracing::warn!("Failed to broadcast state after round end: {}", e);
            }
        });

        Some(outcome)
    }
}
