//! Error types for the session layer.
//!
//! All of these are routine, user-recoverable conditions — the engine
//! surfaces them as chat notices, never as faults.

use wordseek_protocol::{PlayerId, RoomId};

/// Errors that can occur during session registry and join operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The room already has an active or joining group session.
    #[error("a game is already running in room {0}")]
    AlreadyRunning(RoomId),

    /// The participant already has a solo session in this room.
    #[error("player {1} already has a solo game in room {0}")]
    SoloAlreadyRunning(RoomId, PlayerId),

    /// There is no session in the join window for this room.
    #[error("no joinable game in room {0}")]
    NoJoinableSession(RoomId),

    /// The participant already joined the pending session.
    #[error("player {0} already joined the game in room {1}")]
    AlreadyJoined(PlayerId, RoomId),
}
