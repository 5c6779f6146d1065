//! The group session state machine.
//!
//! A [`GroupSession`] owns everything about one room's game: the roster,
//! the turn pointer, the current secret word and trail, and the handle
//! to the running countdown. All mutation happens under the session's
//! exclusive lock (the `Arc<Mutex<GroupSession>>` held by the store);
//! the methods here assume the caller holds it.
//!
//! # Scheduler retirement
//!
//! The session owns a `watch::Sender<TurnId>`. Bumping the turn id is
//! the atomic "retire whatever countdown is running" action: the old
//! task observes the bump on its next poll and exits without emitting.
//! Every turn transition bumps the id *before* anything else, so a
//! timeout racing with a correct guess can only be applied if its turn
//! id still matches — whichever event takes the lock first wins the
//! turn, and the loser becomes a no-op.

use std::collections::HashMap;
use std::time::Duration;

use rand::seq::SliceRandom;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info};
use wordseek_protocol::{GuessRecord, Outbound, PlayerId, RejectReason, RoomId};
use wordseek_timer::{spawn_turn_timer, TimerConfig, TimerEvent, TurnId};
use wordseek_words::{feedback, WordPool};

use crate::{SessionError, SessionPhase};

/// Addresses a session in timer events: group sessions by room, solo
/// sessions by room + participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKey {
    Group(RoomId),
    Solo(RoomId, PlayerId),
}

/// How a session reached its terminal state.
///
/// Returned alongside the outbound events so the caller (which holds
/// the store and scoreboard) can credit the win and drop the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Correct guess, sole survivor, or solo win.
    Won(PlayerId),
    /// Solo timeout.
    Lost(PlayerId),
    /// Join window closed with fewer than two participants.
    Cancelled,
}

/// Shared collaborators a session needs when it starts or rotates a
/// turn: the word pool, the timing knobs, and the channel countdown
/// tasks report into.
pub struct SessionContext<'a> {
    pub pool: &'a WordPool,
    pub timers: &'a TimerConfig,
    pub events: &'a mpsc::UnboundedSender<TimerEvent<SessionKey>>,
}

/// One in-progress group game bound to a room.
pub struct GroupSession {
    room: RoomId,
    phase: SessionPhase,
    /// Turn rotation order. Shuffled once at activation; shrinks only
    /// on elimination.
    players: Vec<PlayerId>,
    display_names: HashMap<PlayerId, String>,
    /// Index into `players` for the current turn. Valid only while
    /// `phase` is Active.
    turn_index: usize,
    round: u32,
    secret_word: String,
    /// Scored guesses of the current round. Reset every round.
    guess_trail: Vec<GuessRecord>,
    /// Id of the current turn; bumping it retires the countdown.
    turn: TurnId,
    turn_tx: watch::Sender<TurnId>,
    turn_budget: Duration,
}

impl GroupSession {
    /// Creates a session in the join window.
    pub fn new(room: RoomId) -> Self {
        let (turn_tx, _) = watch::channel(0);
        Self {
            room,
            phase: SessionPhase::Joining,
            players: Vec::new(),
            display_names: HashMap::new(),
            turn_index: 0,
            round: 0,
            secret_word: String::new(),
            guess_trail: Vec::new(),
            turn: 0,
            turn_tx,
            turn_budget: Duration::ZERO,
        }
    }

    pub fn room(&self) -> RoomId {
        self.room
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Roster in rotation order.
    pub fn players(&self) -> &[PlayerId] {
        &self.players
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    /// The participant whose turn it is, while Active.
    pub fn current_player(&self) -> Option<PlayerId> {
        self.phase
            .is_active()
            .then(|| self.players.get(self.turn_index).copied())
            .flatten()
    }

    /// Whether `turn` is still the live turn. Timer events must pass
    /// this check under the session lock before being applied.
    pub fn is_current_turn(&self, turn: TurnId) -> bool {
        self.phase.is_active() && self.turn == turn
    }

    /// The display name captured at join time, or the id rendered as a
    /// fallback.
    pub fn display_name(&self, player: PlayerId) -> String {
        self.display_names
            .get(&player)
            .cloned()
            .unwrap_or_else(|| player.to_string())
    }

    pub fn turn_budget(&self) -> Duration {
        self.turn_budget
    }

    /// The current round's target word. Exposed so a frontend can
    /// reveal it after an elimination or loss.
    pub fn secret_word(&self) -> &str {
        &self.secret_word
    }

    /// Registers a participant during the join window.
    pub fn join(
        &mut self,
        player: PlayerId,
        display_name: String,
    ) -> Result<(), SessionError> {
        if !self.phase.is_joining() {
            return Err(SessionError::NoJoinableSession(self.room));
        }
        if self.players.contains(&player) {
            return Err(SessionError::AlreadyJoined(player, self.room));
        }
        self.players.push(player);
        self.display_names.insert(player, display_name);
        info!(
            room_id = %self.room,
            %player,
            players = self.players.len(),
            "player joined"
        );
        Ok(())
    }

    /// Closes the join window.
    ///
    /// With at least two participants the roster is shuffled (turn order
    /// must not leak join order), the first round begins, and its
    /// countdown is spawned. With fewer, the session is cancelled.
    pub fn activate(
        &mut self,
        ctx: &SessionContext<'_>,
    ) -> (Vec<Outbound>, Option<SessionEnd>) {
        if !self.phase.is_joining() {
            return (Vec::new(), None);
        }

        if self.players.len() < 2 {
            info!(
                room_id = %self.room,
                players = self.players.len(),
                "join window closed short of two players, cancelling"
            );
            self.phase = SessionPhase::Finished;
            return (
                vec![Outbound::SessionCancelled { room: self.room }],
                Some(SessionEnd::Cancelled),
            );
        }

        self.players.shuffle(&mut rand::rng());
        self.phase = SessionPhase::Active;
        self.turn_index = 0;
        self.round = 1;
        info!(
            room_id = %self.room,
            players = self.players.len(),
            "game started"
        );

        let mut out = vec![Outbound::SessionStarted {
            room: self.room,
            players: self.players.clone(),
        }];
        out.extend(self.begin_turn(ctx));
        (out, None)
    }

    /// Resolves a submitted guess.
    ///
    /// Guesses from anyone but the current player are ignored without a
    /// trace — not their turn is routine, not an error. Structural and
    /// dictionary failures are rejected without consuming the turn:
    /// round, rotation, and the running countdown are all untouched.
    pub fn handle_guess(
        &mut self,
        player: PlayerId,
        text: &str,
        ctx: &SessionContext<'_>,
    ) -> (Vec<Outbound>, Option<SessionEnd>) {
        if !self.phase.is_active() || self.players[self.turn_index] != player {
            return (Vec::new(), None);
        }

        let word = text.trim().to_ascii_uppercase();
        if let Some(reason) = self.validate(&word, ctx.pool) {
            return (
                vec![Outbound::GuessRejected {
                    room: self.room,
                    player,
                    reason,
                }],
                None,
            );
        }

        let marks = feedback::score(&word, &self.secret_word);
        let correct = word == self.secret_word;
        self.guess_trail.push(GuessRecord { word, marks });

        let mut out = vec![Outbound::FeedbackRendered {
            room: self.room,
            trail: self.guess_trail.clone(),
        }];

        if correct {
            // Retire the countdown before anything else so a timeout
            // arriving after we release the lock finds a stale turn id.
            self.retire_turn();
            self.phase = SessionPhase::Finished;
            info!(room_id = %self.room, %player, "session won by correct guess");
            out.push(Outbound::SessionWon {
                room: self.room,
                player,
                display_name: self.display_name(player),
            });
            return (out, Some(SessionEnd::Won(player)));
        }

        // Wrong but valid word: the turn is consumed, the roster is not.
        self.round += 1;
        self.turn_index = (self.turn_index + 1) % self.players.len();
        out.extend(self.begin_turn(ctx));
        (out, None)
    }

    /// Resolves a countdown timeout for turn `turn`.
    ///
    /// A stale id means the turn already ended some other way; the event
    /// lost the race and is discarded. A live timeout eliminates the
    /// current player. If the index now points past the shrunken roster
    /// it wraps to 0 — index collapse, not rotation-relative succession.
    pub fn handle_timeout(
        &mut self,
        turn: TurnId,
        ctx: &SessionContext<'_>,
    ) -> (Vec<Outbound>, Option<SessionEnd>) {
        if !self.is_current_turn(turn) {
            debug!(room_id = %self.room, turn, "stale timeout discarded");
            return (Vec::new(), None);
        }

        let eliminated = self.players.remove(self.turn_index);
        if self.turn_index >= self.players.len() {
            self.turn_index = 0;
        }
        self.round += 1;
        info!(
            room_id = %self.room,
            player = %eliminated,
            remaining = self.players.len(),
            "player eliminated on timeout"
        );

        let mut out = vec![Outbound::PlayerEliminated {
            room: self.room,
            player: eliminated,
            display_name: self.display_name(eliminated),
        }];

        if self.players.len() == 1 {
            let winner = self.players[0];
            self.retire_turn();
            self.phase = SessionPhase::Finished;
            info!(room_id = %self.room, %winner, "session won as sole survivor");
            out.push(Outbound::SessionWon {
                room: self.room,
                player: winner,
                display_name: self.display_name(winner),
            });
            return (out, Some(SessionEnd::Won(winner)));
        }

        out.extend(self.begin_turn(ctx));
        (out, None)
    }

    fn validate(&self, word: &str, pool: &WordPool) -> Option<RejectReason> {
        let expected_len = pool.word_len();
        if word.chars().count() != expected_len
            || !word.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Some(RejectReason::Malformed { expected_len });
        }
        if !pool.contains(word) {
            return Some(RejectReason::NotInDictionary {
                word: word.to_string(),
            });
        }
        None
    }

    /// Starts the current round's turn: fresh word, cleared trail,
    /// recomputed budget, new countdown. Bumping the turn id first
    /// retires any countdown still running for the previous turn.
    fn begin_turn(&mut self, ctx: &SessionContext<'_>) -> Vec<Outbound> {
        self.retire_turn();
        self.secret_word = ctx.pool.pick().to_string();
        self.guess_trail.clear();
        self.turn_budget = ctx.timers.budget_for_round(self.round);

        let player = self.players[self.turn_index];
        debug!(
            room_id = %self.room,
            %player,
            round = self.round,
            budget_secs = self.turn_budget.as_secs(),
            "turn started"
        );

        spawn_turn_timer(
            SessionKey::Group(self.room),
            self.turn,
            self.turn_budget,
            ctx.timers,
            self.turn_tx.subscribe(),
            ctx.events.clone(),
        );

        vec![Outbound::TurnStarted {
            room: self.room,
            player,
            display_name: self.display_name(player),
            round: self.round,
            seconds_allowed: self.turn_budget.as_secs(),
        }]
    }

    /// Advances the turn id so any running countdown exits on its next
    /// poll without emitting.
    fn retire_turn(&mut self) {
        self.turn += 1;
        self.turn_tx.send_replace(self.turn);
    }
}
