use crate::error::Result;
use crate::storage::StateStorage;
use chrono::Utc;
use sage_types::{derive_title, ChatSession, Message};
use serde::de::DeserializeOwned;

// Record keys match the browser-era client so existing state hydrates
// unchanged.
const SESSIONS_KEY: &str = "chatSessions";
const CURRENT_SESSION_KEY: &str = "currentSessionId";
const SIDEBAR_KEY: &str = "sidebarOpen";

/// Owns the session list and mirrors every mutation to the injected storage
/// before returning (write-through, no batching).
///
/// The session list keeps insertion order with the newest-created session
/// first; activity never re-sorts it.
pub struct SessionStore {
    sessions: Vec<ChatSession>,
    current_session_id: Option<String>,
    sidebar_open: bool,
    storage: Box<dyn StateStorage>,
}

impl SessionStore {
    /// Hydrates from storage. A missing or unreadable record falls back to
    /// its default with a warning; startup never fails on bad state.
    pub fn load(storage: Box<dyn StateStorage>) -> Result<Self> {
        let sessions: Vec<ChatSession> =
            decode_record(storage.get(SESSIONS_KEY)?, SESSIONS_KEY).unwrap_or_default();
        let current_session_id: Option<String> =
            decode_record(storage.get(CURRENT_SESSION_KEY)?, CURRENT_SESSION_KEY).flatten();
        let sidebar_open: bool =
            decode_record(storage.get(SIDEBAR_KEY)?, SIDEBAR_KEY).unwrap_or(true);

        tracing::debug!(sessions = sessions.len(), "session store hydrated");
        Ok(Self {
            sessions,
            current_session_id,
            sidebar_open,
            storage,
        })
    }

    /// Creates a fresh session at the front of the list and makes it current.
    pub fn create_session(&mut self) -> Result<String> {
        let session = ChatSession::new();
        let id = session.id.clone();
        self.sessions.insert(0, session);
        self.current_session_id = Some(id.clone());
        self.persist_sessions()?;
        self.persist_current()?;
        Ok(id)
    }

    /// Removes a session. Unknown ids are a silent no-op. If the current
    /// session was removed, the first remaining one (or none) becomes
    /// current.
    pub fn delete_session(&mut self, id: &str) -> Result<()> {
        let before = self.sessions.len();
        self.sessions.retain(|session| session.id != id);
        if self.sessions.len() == before {
            return Ok(());
        }

        if self.current_session_id.as_deref() == Some(id) {
            self.current_session_id = self.sessions.first().map(|session| session.id.clone());
            self.persist_current()?;
        }
        self.persist_sessions()
    }

    /// Replaces the title unconditionally. Validation (trim, non-empty) is
    /// the caller's responsibility. Unknown ids are a no-op.
    pub fn rename_session(&mut self, id: &str, new_title: impl Into<String>) -> Result<()> {
        match self.sessions.iter_mut().find(|session| session.id == id) {
            Some(session) => {
                session.title = new_title.into();
                self.persist_sessions()
            }
            None => Ok(()),
        }
    }

    /// Replaces a session's message list, refreshing the preview cache and
    /// activity timestamp. The title is auto-derived from the first message
    /// only while it still reads the default. An unknown id materializes a
    /// new session rather than failing (recovery for out-of-order updates).
    pub fn update_session_messages(&mut self, id: &str, messages: Vec<Message>) -> Result<()> {
        let last_message = messages
            .last()
            .map(|message| message.content.clone())
            .unwrap_or_default();

        match self.sessions.iter_mut().find(|session| session.id == id) {
            Some(session) => {
                if session.has_default_title() {
                    if let Some(first) = messages.first() {
                        session.title = derive_title(&first.content);
                    }
                }
                session.last_message = last_message;
                session.timestamp = Utc::now();
                session.messages = messages;
            }
            None => {
                tracing::debug!(session_id = id, "update for unknown session, materializing it");
                let mut session = ChatSession::with_id(id);
                if let Some(first) = messages.first() {
                    session.title = derive_title(&first.content);
                }
                session.last_message = last_message;
                session.messages = messages;
                self.sessions.insert(0, session);
            }
        }
        self.persist_sessions()
    }

    pub fn get_current_session(&self) -> Option<&ChatSession> {
        let current = self.current_session_id.as_deref()?;
        self.sessions.iter().find(|session| session.id == current)
    }

    pub fn set_current_session(&mut self, id: Option<String>) -> Result<()> {
        self.current_session_id = id;
        self.persist_current()
    }

    pub fn toggle_sidebar(&mut self) -> Result<bool> {
        self.sidebar_open = !self.sidebar_open;
        self.persist_sidebar()?;
        Ok(self.sidebar_open)
    }

    pub fn sessions(&self) -> &[ChatSession] {
        &self.sessions
    }

    pub fn current_session_id(&self) -> Option<&str> {
        self.current_session_id.as_deref()
    }

    pub fn sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    fn persist_sessions(&self) -> Result<()> {
        self.storage
            .set(SESSIONS_KEY, &serde_json::to_string(&self.sessions)?)
    }

    fn persist_current(&self) -> Result<()> {
        self.storage
            .set(CURRENT_SESSION_KEY, &serde_json::to_string(&self.current_session_id)?)
    }

    fn persist_sidebar(&self) -> Result<()> {
        self.storage
            .set(SIDEBAR_KEY, &serde_json::to_string(&self.sidebar_open)?)
    }
}

fn decode_record<T: DeserializeOwned>(raw: Option<String>, key: &str) -> Option<T> {
    let text = raw?;
    match serde_json::from_str(&text) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(%err, key, "unreadable stored record, falling back to default");
            None
        }
    }
}
