//! Word pool and letter-feedback scoring for WordSeek.
//!
//! # Key types
//!
//! - [`WordPool`] — the candidate/dictionary pool, built once at startup
//! - [`feedback::score`] — Wordle-style per-letter scoring of a guess
//! - [`WordsError`] — pool construction failures (fatal at startup)

pub mod feedback;

mod error;
mod pool;

pub use error::WordsError;
pub use pool::WordPool;
