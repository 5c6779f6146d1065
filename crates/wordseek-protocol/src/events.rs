//! Inbound and outbound event enums.
//!
//! The engine consumes [`Inbound`] events (decoded from chat commands by
//! the transport layer) and emits [`Outbound`] notifications (rendered
//! back into chat messages by the transport layer). Both use internally
//! tagged JSON — `{ "type": "GuessSubmitted", ... }` — so a frontend can
//! dispatch on the `type` field without knowing every variant.

use serde::{Deserialize, Serialize};

use crate::{GuessRecord, PlayerId, RoomId, ScoreEntry};

// ---------------------------------------------------------------------------
// Inbound
// ---------------------------------------------------------------------------

/// An event arriving from the chat transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Inbound {
    /// A room asked for a new group game (join window opens).
    NewGameRequested { room: RoomId },

    /// A participant wants to join the pending group game in a room.
    JoinRequested {
        room: RoomId,
        player: PlayerId,
        display_name: String,
    },

    /// A participant wants a solo game in a room.
    SoloRequested {
        room: RoomId,
        player: PlayerId,
        display_name: String,
    },

    /// A participant typed a word.
    GuessSubmitted {
        room: RoomId,
        player: PlayerId,
        text: String,
    },

    /// A room asked for the leaderboard.
    LeaderboardRequested { room: RoomId },
}

// ---------------------------------------------------------------------------
// Outbound
// ---------------------------------------------------------------------------

/// Why a structurally delivered guess was rejected.
///
/// Rejections never consume the turn, never advance the round, and never
/// touch the timer — only timeouts cost anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RejectReason {
    /// Not exactly the configured number of alphabetic letters.
    Malformed { expected_len: usize },

    /// Well-formed but not in the word pool.
    NotInDictionary { word: String },
}

/// A notification the engine emits toward the chat transport.
///
/// Each variant names the recipient room; participant-bearing variants
/// carry the display name captured at join time so the transport can
/// render mentions without its own lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Outbound {
    /// A join window opened for a new group game.
    JoinWindowOpened { room: RoomId, window_secs: u64 },

    /// A participant joined the pending game.
    PlayerJoined {
        room: RoomId,
        player: PlayerId,
        display_name: String,
    },

    /// The join window closed with fewer than two participants.
    SessionCancelled { room: RoomId },

    /// The join window closed and the game began. Roster is in
    /// (shuffled) turn order.
    SessionStarted { room: RoomId, players: Vec<PlayerId> },

    /// A new turn began for `player` (also the per-round notice in solo
    /// mode, where `player` never changes).
    TurnStarted {
        room: RoomId,
        player: PlayerId,
        display_name: String,
        round: u32,
        seconds_allowed: u64,
    },

    /// Low-time warning for the current turn. Informational only.
    TimeWarning { room: RoomId, seconds_left: u64 },

    /// A guess was rejected without consuming the turn.
    GuessRejected {
        room: RoomId,
        player: PlayerId,
        reason: RejectReason,
    },

    /// The round's guess trail after a valid guess was scored.
    FeedbackRendered {
        room: RoomId,
        trail: Vec<GuessRecord>,
    },

    /// A participant ran out of time and left the roster.
    PlayerEliminated {
        room: RoomId,
        player: PlayerId,
        display_name: String,
    },

    /// The session ended with a winner (correct guess, sole survivor, or
    /// solo win).
    SessionWon {
        room: RoomId,
        player: PlayerId,
        display_name: String,
    },

    /// A solo session ended in a timeout loss.
    SoloLost {
        room: RoomId,
        player: PlayerId,
        display_name: String,
    },

    /// Leaderboard snapshot, best first, ties in first-scored order.
    Leaderboard {
        room: RoomId,
        entries: Vec<ScoreEntry>,
    },

    /// A routine user-visible notice (duplicate game, no joinable game,
    /// already joined, ...).
    Notice { room: RoomId, text: String },
}

impl Outbound {
    /// The room this notification is addressed to.
    pub fn room(&self) -> RoomId {
        match self {
            Self::JoinWindowOpened { room, .. }
            | Self::PlayerJoined { room, .. }
            | Self::SessionCancelled { room }
            | Self::SessionStarted { room, .. }
            | Self::TurnStarted { room, .. }
            | Self::TimeWarning { room, .. }
            | Self::GuessRejected { room, .. }
            | Self::FeedbackRendered { room, .. }
            | Self::PlayerEliminated { room, .. }
            | Self::SessionWon { room, .. }
            | Self::SoloLost { room, .. }
            | Self::Leaderboard { room, .. }
            | Self::Notice { room, .. } => *room,
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
