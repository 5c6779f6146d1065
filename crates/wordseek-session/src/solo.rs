//! The single-player session: same round/timer/trail structure as a
//! group game, but no rotation and no elimination. A round ends in a
//! correct guess (win, session over) or a timeout (loss, session over);
//! anything else regenerates the word and continues indefinitely.

use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info};
use wordseek_protocol::{GuessRecord, Outbound, PlayerId, RejectReason, RoomId};
use wordseek_timer::{spawn_turn_timer, TurnId};
use wordseek_words::feedback;

use crate::{SessionContext, SessionEnd, SessionKey, SessionPhase};

/// One in-progress solo game, keyed by (room, participant).
pub struct SoloSession {
    room: RoomId,
    player: PlayerId,
    display_name: String,
    phase: SessionPhase,
    round: u32,
    secret_word: String,
    guess_trail: Vec<GuessRecord>,
    turn: TurnId,
    turn_tx: watch::Sender<TurnId>,
    turn_budget: Duration,
}

impl SoloSession {
    /// Creates the session and begins round 1 immediately — solo games
    /// have no join window.
    pub fn start(
        room: RoomId,
        player: PlayerId,
        display_name: String,
        ctx: &SessionContext<'_>,
    ) -> (Self, Vec<Outbound>) {
        let (turn_tx, _) = watch::channel(0);
        let mut session = Self {
            room,
            player,
            display_name,
            phase: SessionPhase::Active,
            round: 1,
            secret_word: String::new(),
            guess_trail: Vec::new(),
            turn: 0,
            turn_tx,
            turn_budget: Duration::ZERO,
        };
        info!(room_id = %room, %player, "solo game started");
        let out = session.begin_round(ctx);
        (session, out)
    }

    pub fn room(&self) -> RoomId {
        self.room
    }

    pub fn player(&self) -> PlayerId {
        self.player
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    /// The current round's target word. Exposed so a frontend can
    /// reveal it after a loss.
    pub fn secret_word(&self) -> &str {
        &self.secret_word
    }

    /// Whether `turn` is still the live round's turn.
    pub fn is_current_turn(&self, turn: TurnId) -> bool {
        self.phase.is_active() && self.turn == turn
    }

    /// Resolves a submitted guess. Validation failures reject without
    /// consuming the round; a wrong valid word advances to a fresh word
    /// and budget; the correct word wins and ends the session.
    pub fn handle_guess(
        &mut self,
        text: &str,
        ctx: &SessionContext<'_>,
    ) -> (Vec<Outbound>, Option<SessionEnd>) {
        if !self.phase.is_active() {
            return (Vec::new(), None);
        }

        let word = text.trim().to_ascii_uppercase();
        let expected_len = ctx.pool.word_len();
        if word.chars().count() != expected_len
            || !word.chars().all(|c| c.is_ascii_alphabetic())
        {
            return (
                vec![Outbound::GuessRejected {
                    room: self.room,
                    player: self.player,
                    reason: RejectReason::Malformed { expected_len },
                }],
                None,
            );
        }
        if !ctx.pool.contains(&word) {
            return (
                vec![Outbound::GuessRejected {
                    room: self.room,
                    player: self.player,
                    reason: RejectReason::NotInDictionary { word },
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
            self.retire_turn();
            self.phase = SessionPhase::Finished;
            info!(room_id = %self.room, player = %self.player, "solo game won");
            out.push(Outbound::SessionWon {
                room: self.room,
                player: self.player,
                display_name: self.display_name.clone(),
            });
            return (out, Some(SessionEnd::Won(self.player)));
        }

        self.round += 1;
        out.extend(self.begin_round(ctx));
        (out, None)
    }

    /// Resolves a countdown timeout. Live timeout means the solo game is
    /// lost; a stale id is discarded.
    pub fn handle_timeout(&mut self, turn: TurnId) -> (Vec<Outbound>, Option<SessionEnd>) {
        if !self.is_current_turn(turn) {
            debug!(room_id = %self.room, turn, "stale solo timeout discarded");
            return (Vec::new(), None);
        }

        self.retire_turn();
        self.phase = SessionPhase::Finished;
        info!(room_id = %self.room, player = %self.player, "solo game lost on timeout");
        (
            vec![Outbound::SoloLost {
                room: self.room,
                player: self.player,
                display_name: self.display_name.clone(),
            }],
            Some(SessionEnd::Lost(self.player)),
        )
    }

    fn begin_round(&mut self, ctx: &SessionContext<'_>) -> Vec<Outbound> {
        self.retire_turn();
        self.secret_word = ctx.pool.pick().to_string();
        self.guess_trail.clear();
        self.turn_budget = ctx.timers.budget_for_round(self.round);

        debug!(
            room_id = %self.room,
            player = %self.player,
            round = self.round,
            budget_secs = self.turn_budget.as_secs(),
            "solo round started"
        );

        spawn_turn_timer(
            SessionKey::Solo(self.room, self.player),
            self.turn,
            self.turn_budget,
            ctx.timers,
            self.turn_tx.subscribe(),
            ctx.events.clone(),
        );

        vec![Outbound::TurnStarted {
            room: self.room,
            player: self.player,
            display_name: self.display_name.clone(),
            round: self.round,
            seconds_allowed: self.turn_budget.as_secs(),
        }]
    }

    fn retire_turn(&mut self) {
        self.turn += 1;
        self.turn_tx.send_replace(self.turn);
    }
}
