//! ラウンドのライフサイクル: `Idle` → `Running` → `Idle`
//!
//! 残り時間はミリ秒の整数で保持するため、tick による減算はちょうど 0 に到達します。

use std::time::Duration;

use crate::domain::{DomainError, RoundDuration};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    Idle,
    Running,
}

/// 開始に成功すると発行される（タイマーは tick のたびにこの epoch を提示する）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundTicket {
    pub epoch: u64,
    pub duration: RoundDuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// タイマーが対象とするラウンドは終わっている（タイマーは停止する）
    Disarmed,
    Running { time_left_ms: u64 },
    /// 残り時間が 0 に到達（呼び出し側は最後の state を送りラウンドを終了する）
    Expired,
}

#[derive(Debug, Clone)]
pub struct Round {
    state: RoundState,
    duration: RoundDuration,
    time_left_ms: u64,
    epoch: u64,
}

impl Default for Round {
    fn default() -> Self {
        Self::new()
    }
}

impl Round {
    pub fn new() -> Self {
        Self {
            state: RoundState::Idle,
            duration: RoundDuration::default(),
            time_left_ms: 0,
            epoch: 0,
        }
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RoundState::Running
    }

    /// 実行中かつ残り時間があるときだけクリックを数える
    ///
    /// 時間切れで `end()` を待っているラウンドではもう得点にならない。
    pub fn accepts_clicks(&self) -> bool {
        self.is_running() && self.time_left_ms > 0
    }

    pub fn duration(&self) -> RoundDuration {
        self.duration
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn time_left_ms(&self) -> u64 {
        self.time_left_ms
    }

    /// 残り時間（秒、切り上げ）。Idle の間は常に 0
    pub fn time_left_secs(&self) -> u64 {
        if !self.is_running() {
            return 0;
        }
        self.time_left_ms.div_ceil(1000)
    }

    pub fn start(&mut self, duration: RoundDuration) -> Result<RoundTicket, DomainError> {
        if self.is_running() {
            return Err(DomainError::RoundAlreadyRunning);
        }
        self.epoch = self.epoch.wrapping_add(1);
        self.state = RoundState::Running;
        self.duration = duration;
        self.time_left_ms = duration.as_millis();
        Ok(RoundTicket {
            epoch: self.epoch,
            duration,
        })
    }

    pub fn tick(&mut self, epoch: u64, elapsed: Duration) -> TickOutcome {
        if !self.is_running() || epoch != self.epoch {
            return TickOutcome::Disarmed;
        }
        let elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        self.time_left_ms = self.time_left_ms.saturating_sub(elapsed_ms);
        if self.time_left_ms == 0 {
            TickOutcome::Expired
        } else {
            TickOutcome::Running {
                time_left_ms: self.time_left_ms,
            }
        }
    }

    /// 実行中でなければ `false`（繰り返し呼んでも何もしない）
    pub fn stop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.state = RoundState::Idle;
        true
    }
}
