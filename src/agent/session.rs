// ABOUTME: Conversation sessions and their in-memory store. A session is an
// ABOUTME: append-only list of user/assistant turns, locked per invocation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use crate::llm::{Message, Role};

/// One user or assistant utterance.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationTurn {
    pub role: Role,
    pub text: String,
}

/// An ordered conversation owned by one client context.
#[derive(Debug, Clone, Default)]
pub struct Session {
    id: String,
    turns: Vec<ConversationTurn>,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            turns: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.turns.push(ConversationTurn {
            role: Role::User,
            text: text.into(),
        });
    }

    pub fn push_assistant(&mut self, text: impl Into<String>) {
        self.turns.push(ConversationTurn {
            role: Role::Assistant,
            text: text.into(),
        });
    }

    /// Drop the trailing user turn of an invocation that did not complete.
    pub(crate) fn discard_pending_user_turn(&mut self) {
        if self.turns.last().is_some_and(|t| t.role == Role::User) {
            self.turns.pop();
        }
    }

    /// The transcript as engine messages.
    pub fn to_messages(&self) -> Vec<Message> {
        self.turns
            .iter()
            .map(|turn| match turn.role {
                Role::User => Message::user(&turn.text),
                Role::Assistant => Message::assistant(&turn.text),
            })
            .collect()
    }
}

/// Storage for sessions keyed by id.
///
/// Each session sits behind its own mutex so invocations on the same session
/// run one at a time while different sessions proceed concurrently.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Fetch a session, creating it empty if it does not exist.
    async fn open(&self, id: &str) -> Arc<Mutex<Session>>;

    /// Fetch an existing session.
    async fn get(&self, id: &str) -> Option<Arc<Mutex<Session>>>;

    /// Remove a session. Returns whether it existed.
    async fn remove(&self, id: &str) -> bool;

    /// List all session ids, sorted.
    async fn list(&self) -> Vec<String>;
}

/// In-memory session store. Sessions live until removed or the process exits.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, Arc<Mutex<Session>>>>,
}

impl MemorySessionStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new store wrapped in Arc for sharing.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn open(&self, id: &str) -> Arc<Mutex<Session>> {
        if let Some(session) = self.sessions.read().await.get(id) {
            return Arc::clone(session);
        }
        let mut sessions = self.sessions.write().await;
        Arc::clone(
            sessions
                .entry(id.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(Session::new(id)))),
        )
    }

    async fn get(&self, id: &str) -> Option<Arc<Mutex<Session>>> {
        self.sessions.read().await.get(id).cloned()
    }

    async fn remove(&self, id: &str) -> bool {
        self.sessions.write().await.remove(id).is_some()
    }

    async fn list(&self) -> Vec<String> {
        let mut ids: Vec<_> = self.sessions.read().await.keys().cloned().collect();
        ids.sort();
        ids
    }
}
