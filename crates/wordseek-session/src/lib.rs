//! Session state machines, registry, and scoreboard for WordSeek.
//!
//! A session is the authority for one game: it owns the roster, the
//! turn pointer, the secret word, and the live countdown's turn id.
//! Every mutation happens under the session's exclusive lock; the only
//! thing arriving from outside that lock is the scheduler's timeout or
//! warning event, which is re-validated against the current turn id
//! before it is applied.
//!
//! # Key types
//!
//! - [`GroupSession`] / [`SoloSession`] — the state machines
//! - [`SessionPhase`] — `Joining → Active → Finished`
//! - [`SessionStore`] — one session per room (or room + player for solo)
//! - [`ScoreBoard`] — process-wide win counters
//! - [`SessionContext`] — pool/timers/event-channel bundle for turns

mod error;
mod phase;
mod scores;
mod session;
mod solo;
mod store;

pub use error::SessionError;
pub use phase::SessionPhase;
pub use scores::ScoreBoard;
pub use session::{GroupSession, SessionContext, SessionEnd, SessionKey};
pub use solo::SoloSession;
pub use store::SessionStore;
