//! # WordSeek
//!
//! A turn-based, elimination-style word-guessing game engine for chat
//! rooms. Each room hosts at most one session: players join during a
//! window, then take turns guessing a secret word against a shrinking
//! per-turn time budget. Wrong words only cost feedback — running out
//! of time is the only thing that eliminates you.
//!
//! The engine is transport-agnostic: it consumes [`Inbound`] events and
//! emits [`Outbound`] notifications over a channel. Whatever chat
//! frontend sits on top decodes commands into events and renders the
//! notifications back out.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use wordseek::{Engine, EngineConfig, Inbound, RoomId};
//!
//! # async fn run(word_list: Vec<String>) -> Result<(), wordseek::EngineError> {
//! let (engine, mut outbound) =
//!     Engine::from_word_list(word_list, 5, EngineConfig::default())?;
//!
//! engine
//!     .handle_inbound(Inbound::NewGameRequested { room: RoomId(-1001) })
//!     .await;
//!
//! while let Some(event) = outbound.recv().await {
//!     // render `event` into the chat room
//! }
//! # Ok(())
//! # }
//! ```

mod config;
mod engine;
mod error;
mod telemetry;

pub use config::EngineConfig;
pub use engine::Engine;
pub use error::EngineError;
pub use telemetry::init_tracing;

pub use wordseek_protocol::{
    GuessRecord, Inbound, Mark, Outbound, PlayerId, RejectReason, RoomId, ScoreEntry,
};
pub use wordseek_session::{ScoreBoard, SessionStore};
pub use wordseek_timer::TimerConfig;
pub use wordseek_words::WordPool;
