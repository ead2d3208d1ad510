use crate::session::{ChatSession, Message, SessionState};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

/// Greeting shown when the backend cannot be reached at session start. The
/// widget stays usable; later round-trips simply run without a session id.
pub const OFFLINE_GREETING: &str = "Hello! I'm your hackathon portal agent. \
    I'm having trouble reaching the portal service right now, but we can still \
    get started - what's the name of your hackathon?";

/// Substituted for the agent's reply when a round-trip fails.
pub const CONNECT_APOLOGY: &str =
    "Sorry, I'm having trouble connecting right now. Please try again in a moment.";

/// Result of `POST /chat/new`: a service-issued session id plus the opening
/// agent message.
#[derive(Debug, Clone)]
pub struct SessionHandshake {
    pub session_id: String,
    pub greeting: String,
}

/// Seam between the conversation core and whatever produces agent replies:
/// the portal backend over HTTP, or the scripted offline flow.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn new_session(&self) -> anyhow::Result<SessionHandshake>;

    /// Exchange one user message for one agent reply. `session_id` is `None`
    /// when bootstrap never succeeded; the backend decides what that means.
    async fn send_message(&self, text: &str, session_id: Option<&str>) -> anyhow::Result<String>;

    /// Service-side summary of the parameters collected so far.
    async fn session_summary(&self, session_id: &str) -> anyhow::Result<String>;
}

/// Outcome of a dispatch attempt. Rejections leave the transcript untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchStatus {
    /// One user message and one agent message were appended (the agent side
    /// may be the canned apology).
    Exchanged,
    /// Input was empty or whitespace-only.
    EmptyInput,
    /// A previous round-trip is still outstanding.
    Busy,
}

/// One onboarding conversation: a session plus the backend it talks to.
/// All transcript mutation goes through `start` and `send`; failures on
/// either path are absorbed into transcript content, never returned.
pub struct Conversation {
    backend: Arc<dyn ChatBackend>,
    session: ChatSession,
}

impl Conversation {
    /// Bootstrap a session: one attempt to obtain a session id and opening
    /// greeting. On any failure the conversation degrades to a fixed local
    /// greeting with no session id. The loading flag clears exactly once,
    /// on both paths.
    pub async fn start(backend: Arc<dyn ChatBackend>) -> Self {
        let mut session = ChatSession::new();

        match backend.new_session().await {
            Ok(handshake) => {
                debug!("session established: {}", handshake.session_id);
                session.set_session_id(handshake.session_id);
                session.push(Message::agent(handshake.greeting));
            }
            Err(e) => {
                warn!("session bootstrap failed, continuing offline: {:#}", e);
                session.push(Message::agent(OFFLINE_GREETING));
            }
        }
        session.loading = false;

        Self { backend, session }
    }

    /// One round-trip: append the user message immediately, then exchange it
    /// for exactly one agent message. Single attempt, no retry or timeout at
    /// this layer; a failed exchange appends the canned apology instead.
    pub async fn send(&mut self, input: &str) -> DispatchStatus {
        let text = input.trim();
        if text.is_empty() {
            return DispatchStatus::EmptyInput;
        }
        if self.session.busy {
            return DispatchStatus::Busy;
        }

        // Optimistic append: the user's message lands before the network call
        // resolves, and stays even if it fails.
        self.session.push(Message::user(text));
        self.session.busy = true;

        let reply = match self
            .backend
            .send_message(text, self.session.session_id())
            .await
        {
            Ok(reply) => reply,
            Err(e) => {
                warn!("chat round-trip failed: {:#}", e);
                CONNECT_APOLOGY.to_string()
            }
        };

        self.session.push(Message::agent(reply));
        self.session.busy = false;

        DispatchStatus::Exchanged
    }

    /// Fetch the service-side summary of collected parameters. `Ok(None)`
    /// when the conversation never obtained a session id.
    pub async fn summary(&self) -> anyhow::Result<Option<String>> {
        match self.session.session_id() {
            Some(id) => Ok(Some(self.backend.session_summary(id).await?)),
            None => Ok(None),
        }
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    pub fn messages(&self) -> &[Message] {
        self.session.messages()
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    /// Last agent message, if any. What a caller renders after a dispatch.
    pub fn last_reply(&self) -> Option<&str> {
        self.session
            .messages()
            .iter()
            .rev()
            .find(|m| m.sender == crate::session::Sender::Agent)
            .map(|m| m.text.as_str())
    }

    #[cfg(test)]
    pub(crate) fn session_mut(&mut self) -> &mut ChatSession {
        &mut self.session
    }
}
