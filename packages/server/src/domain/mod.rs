//! ドメイン層
//!
//! ゲームのルール（参加者レジストリ、ラウンドの状態遷移、勝者判定）を
//! 副作用なしで表現します。データストアと通知手段へのインターフェース
//! （`GameRepository`, `MessagePusher`）もここで定義し、具体的な実装は
//! Infrastructure 層が提供します（依存性の逆転）。

pub mod entity;
pub mod error;
pub mod factory;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use entity::{
    Game, GameSnapshot, Participant, Round, RoundOutcome, RoundState, RoundTicket, TickOutcome,
    Winner,
};
pub use error::{DomainError, MessagePushError};
pub use factory::{ConnectionIdFactory, DisplayNameFactory};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::GameRepository;
pub use value_object::{ConnectionId, DisplayName, RoundDuration, Score, Timestamp};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
