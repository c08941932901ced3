//! HTTP API response DTOs.

use serde::Serialize;

/// Authoritative game state for the debug endpoint
#[derive(Debug, Clone, Serialize)]
pub struct GameStateDto {
    pub round: RoundStatusDto,
    pub participants: Vec<ParticipantDetailDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoundStatusDto {
    /// "idle" or "running"
    pub state: String,
    pub time_left: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParticipantDetailDto {
    pub id: String,
    pub name: String,
    pub score: u32,
    /// RFC 3339 (UTC)
    pub connected_at: String,
}
