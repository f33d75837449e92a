//! Game session management for the HTTP host.
//!
//! Each player gets an isolated [`GameController`] behind its own mutex, so
//! commands for one game are serialized while different games proceed
//! independently.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use derive_more::{Display, From};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::games::ladder::{GameCommand, GameController, GameView, LadderError, QuestionPool};

/// Unique identifier for a game session.
pub type SessionId = String;

type SharedController = Arc<Mutex<GameController>>;

/// Default cap on live sessions.
pub const DEFAULT_MAX_SESSIONS: usize = 1024;

/// Error from a session-level operation.
#[derive(Debug, Clone, PartialEq, Eq, Display, From)]
pub enum SessionError {
    /// No session with this id.
    #[display("Session {_0} not found")]
    NotFound(SessionId),
    /// A session with this id already exists.
    #[display("Session {_0} already exists")]
    AlreadyExists(SessionId),
    /// Every slot holds a game that is still in progress.
    #[display("Session limit of {_0} reached")]
    Full(usize),
    /// The game rejected the command.
    #[display("{_0}")]
    #[from]
    Game(LadderError),
}

impl std::error::Error for SessionError {}

impl SessionError {
    /// Machine-readable error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            SessionError::NotFound(_) => "session_not_found",
            SessionError::AlreadyExists(_) => "session_exists",
            SessionError::Full(_) => "session_limit_reached",
            SessionError::Game(e) => e.kind(),
        }
    }
}

/// Manages all live games.
#[derive(Debug, Clone)]
pub struct SessionManager {
    pool: Arc<QuestionPool>,
    seed: Option<u64>,
    max_sessions: usize,
    sessions: Arc<Mutex<HashMap<SessionId, SharedController>>>,
    next_id: Arc<AtomicU64>,
}

impl SessionManager {
    /// Creates a manager drawing every game from `pool`.
    ///
    /// With a `seed`, the n-th session is seeded with `seed + n`.
    #[instrument(skip(pool), fields(pool_size = pool.len()))]
    pub fn new(pool: Arc<QuestionPool>, seed: Option<u64>) -> Self {
        info!("Creating session manager");
        Self {
            pool,
            seed,
            max_sessions: DEFAULT_MAX_SESSIONS,
            sessions: Arc::new(Mutex::new(HashMap::new())),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Caps the number of live sessions.
    ///
    /// When the cap is reached, finished games are dropped to make room.
    pub fn with_max_sessions(mut self, max_sessions: usize) -> Self {
        self.max_sessions = max_sessions;
        self
    }

    /// Starts a new game, under `id` or a generated one.
    ///
    /// At the session cap, finished games are evicted first; if none are
    /// finished the request fails with [`SessionError::Full`].
    #[instrument(skip(self))]
    pub async fn create_session(
        &self,
        id: Option<SessionId>,
    ) -> Result<(SessionId, GameView), SessionError> {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed);
        let id = id.unwrap_or_else(|| format!("game_{n}"));

        let mut sessions = self.sessions.lock().await;
        if sessions.contains_key(&id) {
            warn!(session_id = %id, "Session already exists");
            return Err(SessionError::AlreadyExists(id));
        }
        if sessions.len() >= self.max_sessions {
            evict_finished(&mut sessions);
            if sessions.len() >= self.max_sessions {
                warn!(max_sessions = self.max_sessions, "Session limit reached");
                return Err(SessionError::Full(self.max_sessions));
            }
        }

        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(n)),
            None => StdRng::from_os_rng(),
        };
        let controller = GameController::start(Arc::clone(&self.pool), rng)?;
        let view = controller.view();
        sessions.insert(id.clone(), Arc::new(Mutex::new(controller)));

        info!(session_id = %id, "Created new session");
        Ok((id, view))
    }

    /// Current view of a game.
    #[instrument(skip(self))]
    pub async fn view(&self, id: &str) -> Result<GameView, SessionError> {
        let controller = self.controller(id).await?;
        let view = controller.lock().await.view();
        Ok(view)
    }

    /// Runs `command` against a game.
    #[instrument(skip(self))]
    pub async fn execute(&self, id: &str, command: GameCommand) -> Result<GameView, SessionError> {
        let controller = self.controller(id).await?;
        let view = controller.lock().await.execute(command)?;
        debug!(session_id = id, ended = view.ended, "Command applied");
        Ok(view)
    }

    /// Replaces a game with a fresh one under the same id.
    pub async fn restart(&self, id: &str) -> Result<GameView, SessionError> {
        self.execute(id, GameCommand::Start).await
    }

    /// Drops a game.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: &str) -> Result<(), SessionError> {
        match self.sessions.lock().await.remove(id) {
            Some(_) => {
                info!(session_id = id, "Removed session");
                Ok(())
            }
            None => Err(SessionError::NotFound(id.to_string())),
        }
    }

    /// Ids of all live games, sorted.
    #[instrument(skip(self))]
    pub async fn list_sessions(&self) -> Vec<SessionId> {
        let mut ids: Vec<_> = self.sessions.lock().await.keys().cloned().collect();
        ids.sort();
        debug!(count = ids.len(), "Listed sessions");
        ids
    }

    async fn controller(&self, id: &str) -> Result<SharedController, SessionError> {
        self.sessions
            .lock()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| {
                debug!(session_id = id, "Session not found");
                SessionError::NotFound(id.to_string())
            })
    }
}

/// Drops every session whose game has ended.
///
/// Sessions locked by a running command are in use and kept.
fn evict_finished(sessions: &mut HashMap<SessionId, SharedController>) {
    let before = sessions.len();
    sessions.retain(|_, controller| {
        controller
            .try_lock()
            .map(|c| !c.session().is_ended())
            .unwrap_or(true)
    });
    info!(evicted = before - sessions.len(), "Evicted finished sessions");
}
