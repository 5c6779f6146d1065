//! The session registry: at most one active session per key.
//!
//! Two maps, both guarded by their own lock: group sessions keyed by
//! room, solo sessions keyed by (room, participant). The store lock
//! only guards creation/lookup/removal — each session carries its own
//! `Mutex` that serializes every mutation to it, so holding a session
//! lock never requires holding the store lock.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;
use wordseek_protocol::{Outbound, PlayerId, RoomId};

use crate::{GroupSession, SessionError, SoloSession};

/// Registry of all live sessions in the process.
pub struct SessionStore {
    groups: Mutex<HashMap<RoomId, Arc<Mutex<GroupSession>>>>,
    solos: Mutex<HashMap<(RoomId, PlayerId), Arc<Mutex<SoloSession>>>>,
}

impl SessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            groups: Mutex::new(HashMap::new()),
            solos: Mutex::new(HashMap::new()),
        }
    }

    /// Creates a group session in its join window.
    ///
    /// Fails with [`SessionError::AlreadyRunning`] if the room already
    /// has one — a duplicate `/new` is a routine user notice, and the
    /// existing game is untouched.
    pub async fn create_group(
        &self,
        room: RoomId,
    ) -> Result<Arc<Mutex<GroupSession>>, SessionError> {
        let mut groups = self.groups.lock().await;
        if groups.contains_key(&room) {
            return Err(SessionError::AlreadyRunning(room));
        }
        let session = Arc::new(Mutex::new(GroupSession::new(room)));
        groups.insert(room, session.clone());
        info!(room_id = %room, "group session created");
        Ok(session)
    }

    /// Looks up the room's group session, if any.
    pub async fn group(&self, room: RoomId) -> Option<Arc<Mutex<GroupSession>>> {
        self.groups.lock().await.get(&room).cloned()
    }

    /// Removes the room's group session. Later timer events for it find
    /// nothing and discard themselves.
    pub async fn remove_group(&self, room: RoomId) -> Option<Arc<Mutex<GroupSession>>> {
        let removed = self.groups.lock().await.remove(&room);
        if removed.is_some() {
            info!(room_id = %room, "group session removed");
        }
        removed
    }

    /// Creates a solo session for (room, player), constructing it with
    /// `init` only if the slot is vacant. The construction runs under
    /// the map lock so two simultaneous requests cannot both succeed.
    pub async fn create_solo_with(
        &self,
        room: RoomId,
        player: PlayerId,
        init: impl FnOnce() -> (SoloSession, Vec<Outbound>),
    ) -> Result<(Arc<Mutex<SoloSession>>, Vec<Outbound>), SessionError> {
        let mut solos = self.solos.lock().await;
        if solos.contains_key(&(room, player)) {
            return Err(SessionError::SoloAlreadyRunning(room, player));
        }
        let (session, out) = init();
        let session = Arc::new(Mutex::new(session));
        solos.insert((room, player), session.clone());
        info!(room_id = %room, %player, "solo session created");
        Ok((session, out))
    }

    /// Looks up a participant's solo session in a room, if any.
    pub async fn solo(
        &self,
        room: RoomId,
        player: PlayerId,
    ) -> Option<Arc<Mutex<SoloSession>>> {
        self.solos.lock().await.get(&(room, player)).cloned()
    }

    /// Removes a solo session.
    pub async fn remove_solo(
        &self,
        room: RoomId,
        player: PlayerId,
    ) -> Option<Arc<Mutex<SoloSession>>> {
        let removed = self.solos.lock().await.remove(&(room, player));
        if removed.is_some() {
            info!(room_id = %room, %player, "solo session removed");
        }
        removed
    }

    /// Number of live group sessions.
    pub async fn group_count(&self) -> usize {
        self.groups.lock().await.len()
    }

    /// Number of live solo sessions.
    pub async fn solo_count(&self) -> usize {
        self.solos.lock().await.len()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

// =========================================================================
// Tests
// =========================================================================
