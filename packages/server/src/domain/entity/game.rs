//! `Game` 集約（参加者レジストリと唯一のラウンド）
//!
//! スコアとラウンド状態の変更は全てこの型を通ります。この型を一つの
//! ロックで守れば、ゲーム全体の書き込み口は一つになります。

use std::{collections::BTreeMap, time::Duration};

use crate::domain::{ConnectionId, DisplayName, DomainError, RoundDuration, Score};

use super::{Participant, Round, RoundState, RoundTicket, TickOutcome};

/// 終了したラウンドの勝者
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Winner {
    Participant { id: ConnectionId, name: DisplayName },
    NoWinner,
}

impl Winner {
    pub fn name(&self) -> Option<&DisplayName> {
        match self {
            Winner::Participant { name, .. } => Some(name),
            Winner::NoWinner => None,
        }
    }
}

/// ラウンドの結果（スコアのリセット前に取得する）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundOutcome {
    pub winner: Winner,
    /// 表示名をキーにした最終スコア
    ///
    /// 同じ名前の参加者は一つにまとまり、レジストリ順で後の参加者の値が残る。
    pub scores: BTreeMap<DisplayName, Score>,
}

/// `state` ブロードキャストに載せる内容のスナップショット
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    /// レジストリ順（接続順）
    pub participants: Vec<Participant>,
    pub round_state: RoundState,
    pub time_left_secs: u64,
}

impl GameSnapshot {
    /// スコアの高い順に並べた参加者（同点はレジストリ順）
    pub fn ranked(&self) -> Vec<Participant> {
        let mut ranked = self.participants.clone();
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked
    }
}

/// 最高スコアの参加者を勝者に選ぶ
///
/// 同点の場合は `participants` で先に現れる参加者（= 最も早く接続した参加者）が勝つ。
pub fn decide_winner(participants: &[Participant]) -> Winner {
    let mut leader: Option<&Participant> = None;
    for participant in participants {
        if leader.is_none_or(|current| participant.score > current.score) {
            leader = Some(participant);
        }
    }
    match leader {
        Some(p) => Winner::Participant {
            id: p.id.clone(),
            name: p.name.clone(),
        },
        None => Winner::NoWinner,
    }
}

#[derive(Debug, Clone, Default)]
pub struct Game {
    participants: Vec<Participant>,
    round: Round,
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn find(&self, connection_id: &ConnectionId) -> Option<&Participant> {
        self.participants.iter().find(|p| &p.id == connection_id)
    }

    fn find_mut(&mut self, connection_id: &ConnectionId) -> Option<&mut Participant> {
        self.participants.iter_mut().find(|p| &p.id == connection_id)
    }

    pub fn add_participant(&mut self, participant: Participant) -> Result<(), DomainError> {
        if self.find(&participant.id).is_some() {
            return Err(DomainError::DuplicateConnection(
                participant.id.into_string(),
            ));
        }
        self.participants.push(participant);
        Ok(())
    }

    /// 冪等（存在しない接続の削除は `None`）
    pub fn remove_participant(&mut self, connection_id: &ConnectionId) -> Option<Participant> {
        let index = self
            .participants
            .iter()
            .position(|p| &p.id == connection_id)?;
        Some(self.participants.remove(index))
    }

    pub fn rename(&mut self, connection_id: &ConnectionId, raw_name: &str) -> Option<DisplayName> {
        self.find_mut(connection_id)
            .map(|p| p.rename(raw_name).clone())
    }

    /// 登録済みの接続のスコアを無条件に +1
    pub fn increment_score(&mut self, connection_id: &ConnectionId) -> Option<Score> {
        self.find_mut(connection_id).map(Participant::increment_score)
    }

    /// ラウンドがクリックを受け付けている間だけ +1
    pub fn record_click(&mut self, connection_id: &ConnectionId) -> Option<Score> {
        if !self.round.accepts_clicks() {
            return None;
        }
        self.increment_score(connection_id)
    }

    pub fn start_round(&mut self, duration: RoundDuration) -> Result<RoundTicket, DomainError> {
        self.round.start(duration)
    }

    pub fn tick_round(&mut self, epoch: u64, elapsed: Duration) -> TickOutcome {
        self.round.tick(epoch, elapsed)
    }

    /// 実行中のラウンドを止めて集計し、全員のスコアを 0 に戻す
    ///
    /// ラウンドが実行中でなければ `None`（二度目の呼び出しで勝者を再計算しない）
    pub fn finish_round(&mut self) -> Option<RoundOutcome> {
        if !self.round.stop() {
            return None;
        }
        let winner = decide_winner(&self.participants);
        let scores = self
            .participants
            .iter()
            .map(|p| (p.name.clone(), p.score))
            .collect();
        for participant in &mut self.participants {
            participant.score = Score::ZERO;
        }
        Some(RoundOutcome { winner, scores })
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            participants: self.participants.clone(),
            round_state: self.round.state(),
            time_left_secs: self.round.time_left_secs(),
        }
    }
}
