//! End-to-end engine tests: inbound events in, outbound notifications
//! out, with time driven manually on a paused runtime.
//!
//! Countdown tasks capture their start instant when first polled, so
//! every test yields (`settle`) before advancing the clock.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedReceiver;
use wordseek::{
    Engine, EngineConfig, Inbound, Outbound, PlayerId, RejectReason, RoomId,
};

const ROOM: RoomId = RoomId(-1001);
const WINDOW: Duration = Duration::from_secs(120);
const WORDS: [&str; 5] = ["CRANE", "SPEED", "ERASE", "ABBEY", "ALARM"];

fn new_engine() -> (Engine, UnboundedReceiver<Outbound>) {
    Engine::from_word_list(WORDS, 5, EngineConfig::default()).unwrap()
}

/// Lets spawned tasks (join window, countdowns, the timer pump) run to
/// their next await point without moving the clock.
async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

fn drain(rx: &mut UnboundedReceiver<Outbound>) -> Vec<Outbound> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

async fn join(engine: &Engine, player: PlayerId, name: &str) {
    engine
        .handle_inbound(Inbound::JoinRequested {
            room: ROOM,
            player,
            display_name: name.to_string(),
        })
        .await;
}

async fn guess(engine: &Engine, player: PlayerId, text: &str) {
    engine
        .handle_inbound(Inbound::GuessSubmitted {
            room: ROOM,
            player,
            text: text.to_string(),
        })
        .await;
}

/// Opens a game, joins two players, closes the window, and returns
/// (current player, the other one). Drains all startup events.
async fn active_pair(
    engine: &Engine,
    rx: &mut UnboundedReceiver<Outbound>,
) -> (PlayerId, PlayerId) {
    engine
        .handle_inbound(Inbound::NewGameRequested { room: ROOM })
        .await;
    join(engine, PlayerId(1), "ada").await;
    join(engine, PlayerId(2), "ben").await;
    settle().await;
    tokio::time::advance(WINDOW).await;
    settle().await;
    drain(rx);

    let session = engine.store().group(ROOM).await.unwrap();
    let current = session.lock().await.current_player().unwrap();
    let other = if current == PlayerId(1) {
        PlayerId(2)
    } else {
        PlayerId(1)
    };
    (current, other)
}

async fn group_secret(engine: &Engine) -> String {
    let session = engine.store().group(ROOM).await.unwrap();
    let secret = session.lock().await.secret_word().to_string();
    secret
}

/// Any pool word other than `secret`.
fn wrong_word(secret: &str) -> &'static str {
    WORDS.iter().copied().find(|&w| w != secret).unwrap()
}

// ---------------------------------------------------------------------------
// Group lifecycle
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn test_new_game_opens_join_window_once() {
    let (engine, mut rx) = new_engine();

    engine
        .handle_inbound(Inbound::NewGameRequested { room: ROOM })
        .await;
    let events = drain(&mut rx);
    assert!(matches!(
        events[..],
        [Outbound::JoinWindowOpened {
            room: ROOM,
            window_secs: 120,
        }]
    ));

    // A second /new while one is pending is a notice, not a reset.
    engine
        .handle_inbound(Inbound::NewGameRequested { room: ROOM })
        .await;
    let events = drain(&mut rx);
    assert!(matches!(events[..], [Outbound::Notice { room: ROOM, .. }]));
    assert_eq!(engine.store().group_count().await, 1);
}

#[tokio::test(start_paused = true)]
async fn test_join_without_open_window_notices() {
    let (engine, mut rx) = new_engine();

    join(&engine, PlayerId(1), "ada").await;
    let events = drain(&mut rx);
    assert!(matches!(events[..], [Outbound::Notice { room: ROOM, .. }]));
}

#[tokio::test(start_paused = true)]
async fn test_duplicate_join_notices() {
    let (engine, mut rx) = new_engine();
    engine
        .handle_inbound(Inbound::NewGameRequested { room: ROOM })
        .await;
    join(&engine, PlayerId(1), "ada").await;
    drain(&mut rx);

    join(&engine, PlayerId(1), "ada").await;
    let events = drain(&mut rx);
    assert!(matches!(events[..], [Outbound::Notice { room: ROOM, .. }]));
}

#[tokio::test(start_paused = true)]
async fn test_join_window_cancels_short_roster() {
    let (engine, mut rx) = new_engine();
    engine
        .handle_inbound(Inbound::NewGameRequested { room: ROOM })
        .await;
    join(&engine, PlayerId(1), "ada").await;
    drain(&mut rx);

    settle().await;
    tokio::time::advance(WINDOW).await;
    settle().await;

    let events = drain(&mut rx);
    assert!(matches!(events[..], [Outbound::SessionCancelled { room: ROOM }]));
    assert_eq!(engine.store().group_count().await, 0);

    // The room is free for a fresh game.
    engine
        .handle_inbound(Inbound::NewGameRequested { room: ROOM })
        .await;
    let events = drain(&mut rx);
    assert!(matches!(events[..], [Outbound::JoinWindowOpened { .. }]));
}

#[tokio::test(start_paused = true)]
async fn test_activation_starts_round_one() {
    let (engine, mut rx) = new_engine();
    engine
        .handle_inbound(Inbound::NewGameRequested { room: ROOM })
        .await;
    join(&engine, PlayerId(1), "ada").await;
    join(&engine, PlayerId(2), "ben").await;
    drain(&mut rx);

    settle().await;
    tokio::time::advance(WINDOW).await;
    settle().await;

    let events = drain(&mut rx);
    assert_eq!(events.len(), 2);
    assert!(matches!(
        &events[0],
        Outbound::SessionStarted { room: ROOM, players } if players.len() == 2
    ));
    assert!(matches!(
        events[1],
        Outbound::TurnStarted {
            room: ROOM,
            round: 1,
            seconds_allowed: 120,
            ..
        }
    ));
}

// ---------------------------------------------------------------------------
// Guess routing and resolution
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn test_invalid_guesses_reject_without_consuming_turn() {
    let (engine, mut rx) = new_engine();
    let (current, _) = active_pair(&engine, &mut rx).await;

    guess(&engine, current, "xy").await;
    let events = drain(&mut rx);
    assert!(matches!(
        events[..],
        [Outbound::GuessRejected {
            reason: RejectReason::Malformed { expected_len: 5 },
            ..
        }]
    ));

    guess(&engine, current, "zzzzz").await;
    let events = drain(&mut rx);
    assert!(matches!(
        events[..],
        [Outbound::GuessRejected {
            reason: RejectReason::NotInDictionary { .. },
            ..
        }]
    ));

    // Round and roster untouched; the same player is still up.
    let session = engine.store().group(ROOM).await.unwrap();
    let session = session.lock().await;
    assert_eq!(session.round(), 1);
    assert_eq!(session.current_player(), Some(current));
}

#[tokio::test(start_paused = true)]
async fn test_out_of_turn_guess_is_ignored() {
    let (engine, mut rx) = new_engine();
    let (_, other) = active_pair(&engine, &mut rx).await;
    let secret = group_secret(&engine).await;

    guess(&engine, other, wrong_word(&secret)).await;
    assert!(drain(&mut rx).is_empty());

    let session = engine.store().group(ROOM).await.unwrap();
    assert_eq!(session.lock().await.round(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_wrong_guess_passes_the_turn() {
    let (engine, mut rx) = new_engine();
    let (current, other) = active_pair(&engine, &mut rx).await;
    let secret = group_secret(&engine).await;

    guess(&engine, current, wrong_word(&secret)).await;
    let events = drain(&mut rx);
    assert_eq!(events.len(), 2);
    assert!(matches!(
        &events[0],
        Outbound::FeedbackRendered { room: ROOM, trail } if trail.len() == 1
    ));
    assert!(matches!(
        events[1],
        Outbound::TurnStarted {
            player,
            round: 2,
            seconds_allowed: 110,
            ..
        } if player == other
    ));

    // Nobody was eliminated.
    let session = engine.store().group(ROOM).await.unwrap();
    assert_eq!(session.lock().await.players().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_correct_guess_wins_and_scores() {
    let (engine, mut rx) = new_engine();
    let (current, _) = active_pair(&engine, &mut rx).await;
    let secret = group_secret(&engine).await;

    guess(&engine, current, &secret).await;
    let events = drain(&mut rx);
    assert_eq!(events.len(), 2);
    assert!(matches!(&events[0], Outbound::FeedbackRendered { .. }));
    assert!(matches!(
        events[1],
        Outbound::SessionWon { player, .. } if player == current
    ));

    assert_eq!(engine.scores().wins(current).await, 1);
    assert_eq!(engine.store().group_count().await, 0);
}

#[tokio::test(start_paused = true)]
async fn test_guess_is_case_insensitive() {
    let (engine, mut rx) = new_engine();
    let (current, _) = active_pair(&engine, &mut rx).await;
    let secret = group_secret(&engine).await.to_ascii_lowercase();

    guess(&engine, current, &format!("  {secret} ")).await;
    let events = drain(&mut rx);
    assert!(matches!(&events[1], Outbound::SessionWon { .. }));
}

// ---------------------------------------------------------------------------
// Timeouts
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn test_timeout_eliminates_and_last_player_wins() {
    let (engine, mut rx) = new_engine();
    let (current, other) = active_pair(&engine, &mut rx).await;

    tokio::time::advance(Duration::from_secs(120)).await;
    settle().await;

    let events = drain(&mut rx);
    assert_eq!(events.len(), 2);
    assert!(matches!(
        events[0],
        Outbound::PlayerEliminated { player, .. } if player == current
    ));
    assert!(matches!(
        events[1],
        Outbound::SessionWon { player, .. } if player == other
    ));

    assert_eq!(engine.scores().wins(other).await, 1);
    assert_eq!(engine.scores().wins(current).await, 0);
    assert_eq!(engine.store().group_count().await, 0);
}

#[tokio::test(start_paused = true)]
async fn test_low_time_warning_surfaces() {
    let (engine, mut rx) = new_engine();
    active_pair(&engine, &mut rx).await;

    tokio::time::advance(Duration::from_secs(100)).await;
    settle().await;

    let events = drain(&mut rx);
    assert!(matches!(
        events[..],
        [Outbound::TimeWarning {
            room: ROOM,
            seconds_left: 20,
        }]
    ));
}

#[tokio::test(start_paused = true)]
async fn test_guess_beats_timeout_for_the_same_turn() {
    let (engine, mut rx) = new_engine();
    let (current, _) = active_pair(&engine, &mut rx).await;
    let secret = group_secret(&engine).await;

    // Resolve the turn by a win, then let the old deadline pass; the
    // stale countdown must not eliminate anyone or double-finish.
    guess(&engine, current, &secret).await;
    drain(&mut rx);

    tokio::time::advance(Duration::from_secs(120)).await;
    settle().await;
    assert!(drain(&mut rx).is_empty());
    assert_eq!(engine.scores().wins(current).await, 1);
}

// ---------------------------------------------------------------------------
// Solo games
// ---------------------------------------------------------------------------

async fn start_solo(engine: &Engine, player: PlayerId) {
    engine
        .handle_inbound(Inbound::SoloRequested {
            room: ROOM,
            player,
            display_name: "ada".to_string(),
        })
        .await;
}

async fn solo_secret(engine: &Engine, player: PlayerId) -> String {
    let session = engine.store().solo(ROOM, player).await.unwrap();
    let secret = session.lock().await.secret_word().to_string();
    secret
}

#[tokio::test(start_paused = true)]
async fn test_solo_starts_immediately_and_win_scores() {
    let (engine, mut rx) = new_engine();
    let player = PlayerId(7);

    start_solo(&engine, player).await;
    let events = drain(&mut rx);
    assert!(matches!(
        events[..],
        [Outbound::TurnStarted {
            room: ROOM,
            round: 1,
            seconds_allowed: 120,
            ..
        }]
    ));

    let secret = solo_secret(&engine, player).await;
    guess(&engine, player, &secret).await;
    let events = drain(&mut rx);
    assert!(matches!(&events[0], Outbound::FeedbackRendered { .. }));
    assert!(matches!(
        events[1],
        Outbound::SessionWon { player: p, .. } if p == player
    ));
    assert_eq!(engine.scores().wins(player).await, 1);
    assert_eq!(engine.store().solo_count().await, 0);
}

#[tokio::test(start_paused = true)]
async fn test_solo_wrong_guess_regenerates_word() {
    let (engine, mut rx) = new_engine();
    let player = PlayerId(7);
    start_solo(&engine, player).await;
    drain(&mut rx);
    let secret = solo_secret(&engine, player).await;

    guess(&engine, player, wrong_word(&secret)).await;
    let events = drain(&mut rx);
    assert!(matches!(&events[0], Outbound::FeedbackRendered { .. }));
    assert!(matches!(
        events[1],
        Outbound::TurnStarted {
            round: 2,
            seconds_allowed: 110,
            ..
        }
    ));
}

#[tokio::test(start_paused = true)]
async fn test_solo_timeout_loses_without_scoring() {
    let (engine, mut rx) = new_engine();
    let player = PlayerId(7);
    start_solo(&engine, player).await;
    drain(&mut rx);

    settle().await;
    tokio::time::advance(Duration::from_secs(120)).await;
    settle().await;

    let events = drain(&mut rx);
    assert!(matches!(
        events[..],
        [Outbound::SoloLost { room: ROOM, player: p, .. }] if p == player
    ));
    assert_eq!(engine.scores().wins(player).await, 0);
    assert_eq!(engine.store().solo_count().await, 0);
}

#[tokio::test(start_paused = true)]
async fn test_duplicate_solo_notices() {
    let (engine, mut rx) = new_engine();
    let player = PlayerId(7);
    start_solo(&engine, player).await;
    drain(&mut rx);

    start_solo(&engine, player).await;
    let events = drain(&mut rx);
    assert!(matches!(events[..], [Outbound::Notice { room: ROOM, .. }]));
    assert_eq!(engine.store().solo_count().await, 1);
}

#[tokio::test(start_paused = true)]
async fn test_active_group_claims_guesses_over_solo() {
    let (engine, mut rx) = new_engine();
    let (current, _) = active_pair(&engine, &mut rx).await;

    start_solo(&engine, current).await;
    drain(&mut rx);
    let group_word = group_secret(&engine).await;

    // The current group player also has a solo game in this room; their
    // guess belongs to the group game, not the solo one.
    guess(&engine, current, wrong_word(&group_word)).await;
    drain(&mut rx);

    let solo = engine.store().solo(ROOM, current).await.unwrap();
    assert_eq!(solo.lock().await.round(), 1);
    let group = engine.store().group(ROOM).await.unwrap();
    assert_eq!(group.lock().await.round(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_guess_with_no_session_is_ignored() {
    let (engine, mut rx) = new_engine();
    guess(&engine, PlayerId(1), "crane").await;
    assert!(drain(&mut rx).is_empty());
}

// ---------------------------------------------------------------------------
// Leaderboard
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn test_leaderboard_starts_empty_then_ranks_winners() {
    let (engine, mut rx) = new_engine();

    engine
        .handle_inbound(Inbound::LeaderboardRequested { room: ROOM })
        .await;
    let events = drain(&mut rx);
    assert!(matches!(
        &events[..],
        [Outbound::Leaderboard { room: ROOM, entries }] if entries.is_empty()
    ));

    let (current, _) = active_pair(&engine, &mut rx).await;
    let secret = group_secret(&engine).await;
    guess(&engine, current, &secret).await;
    drain(&mut rx);

    engine
        .handle_inbound(Inbound::LeaderboardRequested { room: ROOM })
        .await;
    let events = drain(&mut rx);
    match &events[..] {
        [Outbound::Leaderboard { entries, .. }] => {
            assert_eq!(entries.len(), 1);
            assert_eq!(entries[0].player, current);
            assert_eq!(entries[0].wins, 1);
        }
        other => panic!("unexpected events: {other:?}"),
    }
}
