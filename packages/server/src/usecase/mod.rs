//! UseCase 層
//!
//! ドメイン層の trait（`GameRepository`, `MessagePusher`）にのみ依存し、
//! 参加者の接続・切断、名前変更、クリック、ラウンド制御、ブロードキャストを
//! 組み立てます。

mod broadcast;
mod click;
mod connect_participant;
mod disconnect_participant;
mod error;
mod round;
mod set_name;

pub use broadcast::BroadcastService;
pub use click::ClickUseCase;
pub use connect_participant::ConnectParticipantUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{BroadcastError, ConnectError, StartRoundError};
pub use round::RoundController;
pub use set_name::SetNameUseCase;

#[cfg(test)]
pub(crate) mod testing;
