//! Process-wide win counters and the leaderboard query.

use std::collections::HashMap;

use tokio::sync::Mutex;
use wordseek_protocol::{PlayerId, ScoreEntry};

/// Win counters for every participant who has ever won a game.
///
/// Shared by all sessions: any session's win resolution increments here,
/// guarded by one lock so concurrent wins from unrelated rooms never
/// lose an increment. Counters only grow — no decay, no expiry — and
/// live for the process lifetime.
pub struct ScoreBoard {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    wins: HashMap<PlayerId, u32>,
    /// Players in the order they first scored. Tie-break order for
    /// [`ScoreBoard::top_n`]: first-scored-first-shown.
    order: Vec<PlayerId>,
}

impl ScoreBoard {
    /// Creates an empty scoreboard.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Credits one win to `player` and returns their new total.
    pub async fn record_win(&self, player: PlayerId) -> u32 {
        let mut inner = self.inner.lock().await;
        let wins = inner.wins.entry(player).or_insert(0);
        *wins += 1;
        let total = *wins;
        if total == 1 {
            inner.order.push(player);
        }
        tracing::debug!(%player, total, "win recorded");
        total
    }

    /// The current win count for `player` (0 if they never won).
    pub async fn wins(&self, player: PlayerId) -> u32 {
        self.inner
            .lock()
            .await
            .wins
            .get(&player)
            .copied()
            .unwrap_or(0)
    }

    /// The top `n` players by win count, descending, ties broken by who
    /// scored first. Deterministic for a given history.
    pub async fn top_n(&self, n: usize) -> Vec<ScoreEntry> {
        let inner = self.inner.lock().await;
        let mut entries: Vec<ScoreEntry> = inner
            .order
            .iter()
            .map(|&player| ScoreEntry {
                player,
                wins: inner.wins[&player],
            })
            .collect();
        // Stable sort over insertion order keeps the tie-break.
        entries.sort_by(|a, b| b.wins.cmp(&a.wins));
        entries.truncate(n);
        entries
    }
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self::new()
    }
}

// =========================================================================
// Tests
// =========================================================================
