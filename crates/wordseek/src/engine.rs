//! The engine: wires the word pool, session registry, scoreboard, and
//! timer events together behind a single inbound/outbound seam.
//!
//! Every path that touches a session takes that session's lock, applies
//! the mutation, and releases — guess resolution, timeout resolution,
//! join-window closure, and scheduler replacement are all serialized
//! per session. Timer events arrive on their own channel and are pumped
//! through the same locks by a background task, so a timeout racing a
//! guess for the same turn is decided by lock order alone: the loser
//! finds a stale turn id (or no session at all) and discards itself.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;
use wordseek_protocol::{Inbound, Outbound, PlayerId, RoomId};
use wordseek_session::{
    ScoreBoard, SessionContext, SessionEnd, SessionKey, SessionStore, SoloSession,
};
use wordseek_timer::{TimerEvent, TurnId};
use wordseek_words::WordPool;

use crate::{EngineConfig, EngineError};

struct Inner {
    config: EngineConfig,
    pool: WordPool,
    store: SessionStore,
    scores: ScoreBoard,
    outbound: mpsc::UnboundedSender<Outbound>,
    timer_tx: mpsc::UnboundedSender<TimerEvent<SessionKey>>,
}

/// The process-wide game engine. Cheap to clone; all clones share one
/// registry and scoreboard.
#[derive(Clone)]
pub struct Engine {
    inner: Arc<Inner>,
}

impl Engine {
    /// Builds the word pool from a raw word list and starts the engine.
    ///
    /// Returns the engine handle and the outbound notification stream.
    /// Must be called inside a Tokio runtime — the timer-event pump is
    /// spawned here. Fails fatally if no usable words survive the
    /// length/alphabetic filter.
    pub fn from_word_list<I, S>(
        words: I,
        word_len: usize,
        config: EngineConfig,
    ) -> Result<(Self, mpsc::UnboundedReceiver<Outbound>), EngineError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let pool = WordPool::from_words(words, word_len)?;
        Ok(Self::new(pool, config))
    }

    /// Starts the engine over an already-built pool.
    pub fn new(
        pool: WordPool,
        config: EngineConfig,
    ) -> (Self, mpsc::UnboundedReceiver<Outbound>) {
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let (timer_tx, mut timer_rx) = mpsc::unbounded_channel();

        let engine = Self {
            inner: Arc::new(Inner {
                config,
                pool,
                store: SessionStore::new(),
                scores: ScoreBoard::new(),
                outbound: outbound_tx,
                timer_tx,
            }),
        };

        // Pump countdown events into the serialized session paths.
        let pump = engine.clone();
        tokio::spawn(async move {
            while let Some(event) = timer_rx.recv().await {
                pump.handle_timer_event(event).await;
            }
        });

        (engine, outbound_rx)
    }

    /// The shared scoreboard (all sessions credit wins here).
    pub fn scores(&self) -> &ScoreBoard {
        &self.inner.scores
    }

    /// The session registry.
    pub fn store(&self) -> &SessionStore {
        &self.inner.store
    }

    /// Processes one inbound chat event.
    pub async fn handle_inbound(&self, event: Inbound) {
        match event {
            Inbound::NewGameRequested { room } => self.open_join_window(room).await,
            Inbound::JoinRequested {
                room,
                player,
                display_name,
            } => self.join(room, player, display_name).await,
            Inbound::SoloRequested {
                room,
                player,
                display_name,
            } => self.start_solo(room, player, display_name).await,
            Inbound::GuessSubmitted { room, player, text } => {
                self.guess(room, player, &text).await
            }
            Inbound::LeaderboardRequested { room } => self.leaderboard(room).await,
        }
    }

    // -- Group lifecycle --------------------------------------------------

    async fn open_join_window(&self, room: RoomId) {
        match self.inner.store.create_group(room).await {
            Ok(_) => {
                let window = self.inner.config.join_window;
                self.emit_one(Outbound::JoinWindowOpened {
                    room,
                    window_secs: window.as_secs(),
                });

                let engine = self.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(window).await;
                    engine.close_join_window(room).await;
                });
            }
            Err(err) => self.notice(room, err.to_string()),
        }
    }

    async fn close_join_window(&self, room: RoomId) {
        let Some(session) = self.inner.store.group(room).await else {
            return;
        };
        let mut session = session.lock().await;
        if !session.phase().is_joining() {
            return;
        }
        let (out, end) = session.activate(&self.ctx());
        drop(session);
        self.emit(out);
        self.finish_group(room, end).await;
    }

    async fn join(&self, room: RoomId, player: PlayerId, display_name: String) {
        let Some(session) = self.inner.store.group(room).await else {
            self.notice(room, format!("no joinable game in room {room}"));
            return;
        };
        let mut session = session.lock().await;
        match session.join(player, display_name.clone()) {
            Ok(()) => self.emit_one(Outbound::PlayerJoined {
                room,
                player,
                display_name,
            }),
            Err(err) => self.notice(room, err.to_string()),
        }
    }

    // -- Solo lifecycle ---------------------------------------------------

    async fn start_solo(&self, room: RoomId, player: PlayerId, display_name: String) {
        let ctx = self.ctx();
        let result = self
            .inner
            .store
            .create_solo_with(room, player, || {
                SoloSession::start(room, player, display_name, &ctx)
            })
            .await;
        match result {
            Ok((_, out)) => self.emit(out),
            Err(err) => self.notice(room, err.to_string()),
        }
    }

    // -- Guesses ----------------------------------------------------------

    async fn guess(&self, room: RoomId, player: PlayerId, text: &str) {
        // An active group game in the room claims every guess, even ones
        // the session ignores as out of turn; otherwise the sender's own
        // solo game (if any) gets it.
        if let Some(session) = self.inner.store.group(room).await {
            let mut session = session.lock().await;
            if session.phase().is_active() {
                let (out, end) = session.handle_guess(player, text, &self.ctx());
                drop(session);
                self.emit(out);
                self.finish_group(room, end).await;
                return;
            }
        }

        if let Some(session) = self.inner.store.solo(room, player).await {
            let mut session = session.lock().await;
            let (out, end) = session.handle_guess(text, &self.ctx());
            drop(session);
            self.emit(out);
            self.finish_solo(room, player, end).await;
        }
    }

    // -- Leaderboard ------------------------------------------------------

    async fn leaderboard(&self, room: RoomId) {
        let entries = self
            .inner
            .scores
            .top_n(self.inner.config.leaderboard_size)
            .await;
        self.emit_one(Outbound::Leaderboard { room, entries });
    }

    // -- Timer events -----------------------------------------------------

    async fn handle_timer_event(&self, event: TimerEvent<SessionKey>) {
        match event {
            TimerEvent::Timeout { key, turn } => match key {
                SessionKey::Group(room) => self.group_timeout(room, turn).await,
                SessionKey::Solo(room, player) => {
                    self.solo_timeout(room, player, turn).await
                }
            },
            TimerEvent::Warning {
                key,
                turn,
                seconds_left,
            } => self.warning(key, turn, seconds_left).await,
        }
    }

    async fn group_timeout(&self, room: RoomId, turn: TurnId) {
        let Some(session) = self.inner.store.group(room).await else {
            debug!(room_id = %room, turn, "timeout for a gone session, discarded");
            return;
        };
        let mut session = session.lock().await;
        let (out, end) = session.handle_timeout(turn, &self.ctx());
        drop(session);
        self.emit(out);
        self.finish_group(room, end).await;
    }

    async fn solo_timeout(&self, room: RoomId, player: PlayerId, turn: TurnId) {
        let Some(session) = self.inner.store.solo(room, player).await else {
            debug!(room_id = %room, %player, turn, "timeout for a gone solo session, discarded");
            return;
        };
        let mut session = session.lock().await;
        let (out, end) = session.handle_timeout(turn);
        drop(session);
        self.emit(out);
        self.finish_solo(room, player, end).await;
    }

    async fn warning(&self, key: SessionKey, turn: TurnId, seconds_left: u64) {
        // Validated under the session lock like any timer event, but
        // warnings mutate nothing — a stale one just goes unrendered.
        let current = match key {
            SessionKey::Group(room) => match self.inner.store.group(room).await {
                Some(session) => session.lock().await.is_current_turn(turn),
                None => false,
            },
            SessionKey::Solo(room, player) => {
                match self.inner.store.solo(room, player).await {
                    Some(session) => session.lock().await.is_current_turn(turn),
                    None => false,
                }
            }
        };
        if current {
            let room = match key {
                SessionKey::Group(room) | SessionKey::Solo(room, _) => room,
            };
            self.emit_one(Outbound::TimeWarning { room, seconds_left });
        }
    }

    // -- Session completion ----------------------------------------------

    async fn finish_group(&self, room: RoomId, end: Option<SessionEnd>) {
        match end {
            Some(SessionEnd::Won(player)) => {
                self.inner.scores.record_win(player).await;
                self.inner.store.remove_group(room).await;
            }
            Some(SessionEnd::Cancelled) => {
                self.inner.store.remove_group(room).await;
            }
            Some(SessionEnd::Lost(_)) | None => {}
        }
    }

    async fn finish_solo(&self, room: RoomId, player: PlayerId, end: Option<SessionEnd>) {
        match end {
            Some(SessionEnd::Won(winner)) => {
                self.inner.scores.record_win(winner).await;
                self.inner.store.remove_solo(room, player).await;
            }
            Some(SessionEnd::Lost(_)) => {
                self.inner.store.remove_solo(room, player).await;
            }
            Some(SessionEnd::Cancelled) | None => {}
        }
    }

    // -- Plumbing ---------------------------------------------------------

    fn ctx(&self) -> SessionContext<'_> {
        SessionContext {
            pool: &self.inner.pool,
            timers: &self.inner.config.timers,
            events: &self.inner.timer_tx,
        }
    }

    fn emit(&self, events: Vec<Outbound>) {
        for event in events {
            self.emit_one(event);
        }
    }

    fn emit_one(&self, event: Outbound) {
        // Fire-and-forget: a dropped receiver just means nobody is
        // rendering notifications anymore.
        let _ = self.inner.outbound.send(event);
    }

    fn notice(&self, room: RoomId, text: String) {
        self.emit_one(Outbound::Notice { room, text });
    }
}
