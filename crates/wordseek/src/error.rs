//! Top-level error type.

use wordseek_words::WordsError;

/// Errors the engine can surface to its embedder.
///
/// Only startup failures propagate: a process that cannot build a word
/// pool cannot serve any game and must not start. Everything that goes
/// wrong during play (duplicate sessions, invalid guesses, stale timer
/// events) is a routine condition handled in-band as a chat notice or
/// a silent discard, never an `Err`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Word pool construction failed.
    #[error(transparent)]
    Words(#[from] WordsError),
}
