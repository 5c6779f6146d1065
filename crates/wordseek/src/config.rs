//! Engine configuration.

use std::time::Duration;

use wordseek_timer::TimerConfig;

/// Tunables for the game engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// How long the join window stays open after `/new`.
    /// Default: 120 s.
    pub join_window: Duration,

    /// Per-turn countdown knobs (initial budget, decrement, floor,
    /// warning threshold, poll interval).
    pub timers: TimerConfig,

    /// How many rows a leaderboard query returns. Default: 10.
    pub leaderboard_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            join_window: Duration::from_secs(120),
            timers: TimerConfig::default(),
            leaderboard_size: 10,
        }
    }
}
