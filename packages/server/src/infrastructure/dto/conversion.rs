//! Conversion logic between DTOs and domain entities.

use clicker_race_shared::time::millis_to_rfc3339;

use crate::domain::{GameSnapshot, Participant, RoundOutcome, RoundState};
use crate::infrastructure::dto::{http, websocket as dto};

// ========================================
// Domain Entity → WebSocket DTO
// ========================================

impl From<&Participant> for dto::PlayerInfo {
    fn from(model: &Participant) -> Self {
        Self {
            id: model.id.as_str().to_string(),
            name: model.name.as_str().to_string(),
            score: model.score.value(),
        }
    }
}

/// `state` carries players ranked by score, equal scores in registry order.
impl From<&GameSnapshot> for dto::ServerMessage {
    fn from(snapshot: &GameSnapshot) -> Self {
        Self::State {
            players: snapshot.ranked().iter().map(dto::PlayerInfo::from).collect(),
            time_left: snapshot.time_left_secs,
        }
    }
}

impl From<&RoundOutcome> for dto::ServerMessage {
    fn from(outcome: &RoundOutcome) -> Self {
        Self::GameOver {
            winner: outcome.winner.name().map(|name| name.as_str().to_string()),
            scores: outcome
                .scores
                .iter()
                .map(|(name, score)| (name.as_str().to_string(), score.value()))
                .collect(),
        }
    }
}

// ========================================
// Domain Entity → HTTP DTO
// ========================================

impl From<&GameSnapshot> for http::GameStateDto {
    fn from(snapshot: &GameSnapshot) -> Self {
        let state = match snapshot.round_state {
            RoundState::Idle => "idle",
            RoundState::Running => "running",
        };
        Self {
            round: http::RoundStatusDto {
                state: state.to_string(),
                time_left: snapshot.time_left_secs,
            },
            participants: snapshot
                .participants
                .iter()
                .map(|p| http::ParticipantDetailDto {
                    id: p.id.as_str().to_string(),
                    name: p.name.as_str().to_string(),
                    score: p.score.value(),
                    connected_at: millis_to_rfc3339(p.connected_at.value()),
                })
                .collect(),
        }
    }
}
