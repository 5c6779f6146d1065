//! Session lifecycle phases.

/// The lifecycle phase of a session.
///
/// Transitions are strictly forward — no reopening a finished game:
///
/// ```text
/// Joining → Active → Finished
/// ```
///
/// - **Joining**: the join window is open; participants may register.
/// - **Active**: the game is running; turns rotate, the countdown is
///   live. Solo sessions start here (no join window).
/// - **Finished**: terminal. Someone won, the player lost (solo), or
///   the join window closed short of two participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Joining,
    Active,
    Finished,
}

impl SessionPhase {
    /// Returns `true` if participants may still register.
    pub fn is_joining(&self) -> bool {
        matches!(self, Self::Joining)
    }

    /// Returns `true` if the game is running.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Returns `true` if the session reached a terminal state.
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished)
    }
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Joining => write!(f, "Joining"),
            Self::Active => write!(f, "Active"),
            Self::Finished => write!(f, "Finished"),
        }
    }
}
