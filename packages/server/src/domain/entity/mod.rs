//! ドメインエンティティと `Game` 集約

mod game;
mod participant;
mod round;

pub use game::{Game, GameSnapshot, RoundOutcome, Winner, decide_winner};
pub use participant::Participant;
pub use round::{Round, RoundState, RoundTicket, TickOutcome};
