//! Event types and identities for the WordSeek game engine.
//!
//! Everything the core exchanges with the outside world — inbound chat
//! events, outbound notifications, and the identity/feedback types they
//! carry — lives here. The transport layer (whatever chat frontend is
//! bolted on) only ever sees these types.
//!
//! # Key types
//!
//! - [`RoomId`] / [`PlayerId`] — identity newtypes
//! - [`Mark`] / [`GuessRecord`] — per-letter feedback and the guess trail
//! - [`Inbound`] — tagged events the engine consumes
//! - [`Outbound`] — tagged notifications the engine emits
//! - [`RejectReason`] — why a guess was rejected without consuming a turn

mod events;
mod types;

pub use events::{Inbound, Outbound, RejectReason};
pub use types::{GuessRecord, Mark, PlayerId, RoomId, ScoreEntry};
