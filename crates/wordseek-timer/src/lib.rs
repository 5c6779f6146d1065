//! Per-turn countdown scheduler for WordSeek.
//!
//! Each active turn gets exactly one countdown task, spawned by the
//! session layer when the turn begins. The task polls at a coarse
//! interval rather than arming a single deadline timer: every tick it
//! first checks whether it has been retired (the session moved on to a
//! newer turn) and exits silently if so, which is the entire
//! cancellation mechanism — no separate cancel channel, no forced abort.
//!
//! # Retirement and staleness
//!
//! The session owns a `watch::Sender<TurnId>` holding the current turn
//! id; bumping it under the session lock retires whatever countdown is
//! running, bounded by one poll interval. Timeout/warning events carry
//! the turn id they were spawned for, and the consumer re-checks that id
//! against the session under the same lock before applying a timeout —
//! a stale event that lost the race is discarded, never applied.
//!
//! # Integration
//!
//! ```ignore
//! let (events_tx, mut events_rx) = mpsc::unbounded_channel();
//! let (turn_tx, turn_rx) = watch::channel(0);
//!
//! // turn begins: bump the id, then spawn the countdown
//! turn_tx.send_replace(turn_id);
//! spawn_turn_timer(key, turn_id, config.budget_for_round(round),
//!                  &config, turn_rx, events_tx.clone());
//! ```

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, trace};

/// Monotonically increasing identifier of a turn within one session.
///
/// Never reused: every new turn (and every terminal transition) bumps
/// it, so a countdown spawned for turn `n` can always tell whether the
/// session has moved past it.
pub type TurnId = u64;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Timing knobs for the per-turn countdown.
#[derive(Debug, Clone)]
pub struct TimerConfig {
    /// Budget of the first round, in seconds. Default: 120.
    pub init_turn_secs: u64,
    /// Seconds shaved off per round. Default: 10.
    pub decrement_secs: u64,
    /// Floor the budget never drops below. Default: 15.
    pub min_turn_secs: u64,
    /// Remaining-time threshold for the one-shot low-time warning.
    /// Default: 30.
    pub warning_secs: u64,
    /// How often the countdown polls. Whole-second budgets make finer
    /// resolution pointless. Default: 2 s.
    pub poll_interval: Duration,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            init_turn_secs: 120,
            decrement_secs: 10,
            min_turn_secs: 15,
            warning_secs: 30,
            poll_interval: Duration::from_secs(2),
        }
    }
}

impl TimerConfig {
    /// The time budget for round `round` (1-indexed).
    ///
    /// A non-increasing step function: `init - (round-1) * decrement`,
    /// floored at `min_turn_secs`.
    pub fn budget_for_round(&self, round: u32) -> Duration {
        let step = self
            .decrement_secs
            .saturating_mul(u64::from(round.saturating_sub(1)));
        let secs = self
            .init_turn_secs
            .saturating_sub(step)
            .max(self.min_turn_secs);
        Duration::from_secs(secs)
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// A notification from a countdown task to the session layer.
///
/// Generic over the session key `K` so the timer crate stays ignorant of
/// how sessions are addressed (group rooms vs. solo room+player pairs).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent<K> {
    /// Remaining time first dropped to the warning threshold. Fired at
    /// most once per turn; informational, mutates nothing.
    Warning {
        key: K,
        turn: TurnId,
        seconds_left: u64,
    },

    /// The budget is exhausted. Fired at most once per turn; the
    /// consumer must re-validate `turn` under the session lock.
    Timeout { key: K, turn: TurnId },
}

// ---------------------------------------------------------------------------
// Countdown task
// ---------------------------------------------------------------------------

/// Spawns the countdown task for one turn.
///
/// The task exits in exactly one of three ways:
/// - retired: `current_turn` no longer matches `turn` — no event emitted;
/// - timeout: budget exhausted — one `Timeout` emitted, then exit;
/// - orphaned: the event channel is closed — exit without emitting.
///
/// Delivery is fire-and-forget on an unbounded channel, so the task
/// never blocks on the consumer.
pub fn spawn_turn_timer<K>(
    key: K,
    turn: TurnId,
    budget: Duration,
    config: &TimerConfig,
    current_turn: watch::Receiver<TurnId>,
    events: mpsc::UnboundedSender<TimerEvent<K>>,
) -> JoinHandle<()>
where
    K: Clone + Send + Sync + std::fmt::Debug + 'static,
{
    let warning = Duration::from_secs(config.warning_secs);
    let poll = config.poll_interval;

    tokio::spawn(async move {
        let started = Instant::now();
        let mut warned = false;
        debug!(?key, turn, budget_secs = budget.as_secs(), "turn countdown started");

        loop {
            // Retirement check first: a superseded countdown must never
            // emit, even if its deadline has notionally passed.
            if *current_turn.borrow() != turn {
                trace!(?key, turn, "turn countdown retired");
                return;
            }

            let elapsed = started.elapsed();
            if elapsed >= budget {
                debug!(?key, turn, "turn countdown expired");
                let _ = events.send(TimerEvent::Timeout { key, turn });
                return;
            }

            let remaining = budget - elapsed;
            if !warned && remaining <= warning {
                warned = true;
                let _ = events.send(TimerEvent::Warning {
                    key: key.clone(),
                    turn,
                    seconds_left: remaining.as_secs(),
                });
            }

            tokio::time::sleep(poll).await;
        }
    })
}

// =========================================================================
// Tests
// =========================================================================
