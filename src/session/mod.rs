use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who produced a transcript message. Closed set: the widget only ever shows
/// the visitor and the onboarding agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Agent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    pub timestamp: String,
}

impl Message {
    fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            text: text.into(),
            sender,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    pub fn agent(text: impl Into<String>) -> Self {
        Self::new(Sender::Agent, text)
    }
}

/// Lifecycle of a conversation, derived from the two flags below.
/// `Dispatching` is entered only from `Ready` and always returns to `Ready`;
/// there is no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Bootstrapping,
    Ready,
    Dispatching,
}

/// In-memory conversational session: a service-issued id plus an ordered,
/// append-only message log. Held for the lifetime of one run; nothing is
/// persisted across runs.
#[derive(Debug)]
pub struct ChatSession {
    session_id: Option<String>,
    messages: Vec<Message>,
    pub(crate) loading: bool,
    pub(crate) busy: bool,
    pub created_at: DateTime<Utc>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            session_id: None,
            messages: Vec::new(),
            loading: true,
            busy: false,
            created_at: Utc::now(),
        }
    }

    /// Attach the service-issued session id. Set at most once: later calls
    /// are ignored so a stray handshake can never re-key a live conversation.
    pub fn set_session_id(&mut self, id: impl Into<String>) {
        if self.session_id.is_none() {
            self.session_id = Some(id.into());
        }
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// Append a message. Insertion order is display order; there is no API to
    /// remove or reorder entries.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn state(&self) -> SessionState {
        if self.loading {
            SessionState::Bootstrapping
        } else if self.busy {
            SessionState::Dispatching
        } else {
            SessionState::Ready
        }
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}
