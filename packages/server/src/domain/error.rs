//! ドメイン層のエラー型

use thiserror::Error;

/// 値オブジェクトと Game 集約のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("connection id must not be empty")]
    EmptyConnectionId,

    #[error("invalid display name: '{0}'")]
    InvalidDisplayName(String),

    #[error("round duration must be positive")]
    NonPositiveDuration,

    #[error("connection '{0}' is already registered")]
    DuplicateConnection(String),

    #[error("Round already running")]
    RoundAlreadyRunning,
}

/// 接続へのメッセージ送信時のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("client '{0}' not found")]
    ClientNotFound(String),

    #[error("failed to push message: {0}")]
    PushFailed(String),
}
