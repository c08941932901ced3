//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::MessagePushError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    #[error("connection '{0}' is already registered")]
    DuplicateConnection(String),
}

/// 拒否された開始要求（要求者にだけ通知する）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StartRoundError {
    #[error("Round already running")]
    AlreadyRunning,
}

#[derive(Debug, Error)]
pub enum BroadcastError {
    #[error("failed to serialize message: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Push(#[from] MessagePushError),
}
