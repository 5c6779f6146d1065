//! Identity and feedback types shared across the engine.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique identifier for a chat room.
///
/// Signed because chat transports commonly use negative ids for group
/// rooms. `#[serde(transparent)]` keeps the JSON representation a plain
/// number, so `RoomId(-1001)` serializes as `-1001`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub i64);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}", self.0)
    }
}

/// A unique identifier for a participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Feedback
// ---------------------------------------------------------------------------

/// The classification of one guessed letter against the secret word.
///
/// Standard Wordle semantics: `Exact` means right letter, right position;
/// `Present` means the letter occurs elsewhere in the word (up to its
/// true count); `Absent` means no remaining occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Mark {
    Exact,
    Present,
    Absent,
}

/// One scored guess in the current round's trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessRecord {
    /// The guessed word, uppercased.
    pub word: String,
    /// One mark per letter of `word`.
    pub marks: Vec<Mark>,
}

// ---------------------------------------------------------------------------
// Leaderboard
// ---------------------------------------------------------------------------

/// One row of the leaderboard: a participant and their win count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    /// The participant.
    pub player: PlayerId,
    /// Total games won (group or solo).
    pub wins: u32,
}

// =========================================================================
// Tests
// =========================================================================
