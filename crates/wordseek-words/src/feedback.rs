//! Letter-feedback scoring: classify a guess against the secret word.

use wordseek_protocol::Mark;

/// Scores `guess` against `answer`, one [`Mark`] per letter.
///
/// Two passes, which is what makes duplicate letters come out right:
///
/// 1. Exact matches are marked first and their answer letters consumed,
///    so a position-correct letter can never be "stolen" by an earlier
///    `Present` for the same letter value.
/// 2. Remaining guess letters are marked `Present` while unconsumed
///    copies exist in the answer, `Absent` once they run out.
///
/// A letter value is therefore credited at most as many times as it
/// occurs in `answer`, with `Exact` taking priority over `Present` —
/// standard Wordle tie-breaking.
///
/// Pure and total for well-formed input. The caller validates that both
/// words have the configured length before calling.
pub fn score(guess: &str, answer: &str) -> Vec<Mark> {
    let guess: Vec<char> = guess.chars().collect();
    let mut remaining: Vec<Option<char>> = answer.chars().map(Some).collect();
    debug_assert_eq!(guess.len(), remaining.len());

    let mut marks = vec![Mark::Absent; guess.len()];

    // Pass 1: exact matches consume their answer letter.
    for (i, &g) in guess.iter().enumerate() {
        if remaining[i] == Some(g) {
            marks[i] = Mark::Exact;
            remaining[i] = None;
        }
    }

    // Pass 2: present matches consume one unconsumed copy each.
    for (i, &g) in guess.iter().enumerate() {
        if marks[i] == Mark::Exact {
            continue;
        }
        if let Some(slot) = remaining.iter_mut().find(|c| **c == Some(g)) {
            marks[i] = Mark::Present;
            *slot = None;
        }
    }

    marks
}

// =========================================================================
// Tests
// =========================================================================
