//! Error types for the word layer.

/// Errors that can occur while building the word pool.
///
/// These are startup errors: a process that cannot produce a usable pool
/// cannot serve any game and must not start.
#[derive(Debug, thiserror::Error)]
pub enum WordsError {
    /// The source list contained no usable words of the configured length.
    #[error("word pool is empty after filtering for {0}-letter words")]
    EmptyPool(usize),

    /// A word length of zero makes every guess unrepresentable.
    #[error("configured word length must be at least 1")]
    ZeroLength,
}
