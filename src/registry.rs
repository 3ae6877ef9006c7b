//! Concurrent sessions keyed by id.
//!
//! Each session sits behind its own mutex. Dispatch never waits: an action
//! sent to a session that is still processing another one is rejected with
//! [`SessionError::Busy`]. Bot searches run outside the lock; the session
//! itself rejects player actions until the reply is applied.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock, TryLockError};

use log::{debug, warn};

use crate::engine::{Session, SessionConfig, SessionError};
use crate::game::{Action, Commit};
use crate::search::BotMove;

pub type SharedSession = Arc<Mutex<Session>>;

#[derive(Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, SharedSession>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        SessionRegistry::default()
    }

    /// Creates (or replaces) the session `id`.
    pub fn create(&self, id: &str, config: SessionConfig) -> SharedSession {
        let session = Arc::new(Mutex::new(Session::new(config)));
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        if sessions.insert(id.to_string(), Arc::clone(&session)).is_some() {
            debug!("session '{}' replaced", id);
        }
        session
    }

    pub fn get(&self, id: &str) -> Option<SharedSession> {
        let sessions = self.sessions.read().unwrap_or_else(PoisonError::into_inner);
        sessions.get(id).cloned()
    }

    pub fn remove(&self, id: &str) -> bool {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        sessions.remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Runs `f` on session `id` unless another caller holds it.
    pub fn with_session<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut Session) -> Result<T, SessionError>,
    ) -> Result<T, SessionError> {
        let shared = self.get(id).ok_or_else(|| SessionError::UnknownSession(id.to_string()))?;
        let mut guard = match shared.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::WouldBlock) => return Err(SessionError::Busy),
            Err(TryLockError::Poisoned(poisoned)) => {
                warn!("session '{}' recovered after a panic", id);
                poisoned.into_inner()
            }
        };
        f(&mut guard)
    }

    /// Like `with_session`, but waits for the lock.
    fn with_session_blocking<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut Session) -> Result<T, SessionError>,
    ) -> Result<T, SessionError> {
        let shared = self.get(id).ok_or_else(|| SessionError::UnknownSession(id.to_string()))?;
        let mut guard = shared.lock().unwrap_or_else(|poisoned| {
            warn!("session '{}' recovered after a panic", id);
            poisoned.into_inner()
        });
        f(&mut guard)
    }

    pub fn dispatch(&self, id: &str, action: Action) -> Result<Commit, SessionError> {
        self.with_session(id, |session| session.dispatch(action))
    }

    pub fn play_bot_turn(&self, id: &str) -> Result<Option<BotMove>, SessionError> {
        let Some(search) = self.with_session(id, |session| Ok(session.begin_bot_turn()))? else {
            return Ok(None);
        };
        let reply = search.run();
        self.with_session_blocking(id, |session| session.finish_bot_turn(reply))
    }
}
