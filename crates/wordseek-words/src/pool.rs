//! The word pool: candidate words for secrets and the guess dictionary.

use std::collections::HashSet;

use rand::Rng;

use crate::WordsError;

/// A precomputed pool of guessable words, all of one fixed length.
///
/// Built once at process start from an external word list. The same pool
/// answers both roles the game needs: uniform random secret selection
/// ([`pick`](Self::pick)) and dictionary membership for guess validation
/// ([`contains`](Self::contains)).
pub struct WordPool {
    /// Insertion-ordered, deduplicated, uppercased words for uniform pick.
    words: Vec<String>,
    /// Membership index over the same words.
    index: HashSet<String>,
    word_len: usize,
}

impl WordPool {
    /// Builds a pool from a raw word list.
    ///
    /// Words are uppercased and kept only if they are exactly `word_len`
    /// ASCII-alphabetic characters; duplicates are dropped. Returns
    /// [`WordsError::EmptyPool`] if nothing survives the filter — callers
    /// treat that as fatal.
    pub fn from_words<I, S>(source: I, word_len: usize) -> Result<Self, WordsError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if word_len == 0 {
            return Err(WordsError::ZeroLength);
        }

        let mut words = Vec::new();
        let mut index = HashSet::new();
        for raw in source {
            let raw = raw.as_ref().trim();
            if raw.len() != word_len || !raw.chars().all(|c| c.is_ascii_alphabetic()) {
                continue;
            }
            let word = raw.to_ascii_uppercase();
            if index.insert(word.clone()) {
                words.push(word);
            }
        }

        if words.is_empty() {
            return Err(WordsError::EmptyPool(word_len));
        }

        tracing::info!(
            words = words.len(),
            word_len,
            "word pool built"
        );

        Ok(Self {
            words,
            index,
            word_len,
        })
    }

    /// Picks a secret word uniformly at random. Infallible: the
    /// constructor guarantees a non-empty pool.
    pub fn pick(&self) -> &str {
        let i = rand::rng().random_range(0..self.words.len());
        &self.words[i]
    }

    /// Whether `word` is in the dictionary. Expects the caller's
    /// uppercased form.
    pub fn contains(&self, word: &str) -> bool {
        self.index.contains(word)
    }

    /// The fixed letter count every word in the pool has.
    pub fn word_len(&self) -> usize {
        self.word_len
    }

    /// Number of words in the pool.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always `false` for a constructed pool; kept for idiom's sake.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

// =========================================================================
// Tests
// =========================================================================
