use async_trait::async_trait;
use hatchbot::chat::{ChatBackend, SessionHandshake};
use std::sync::{Arc, Mutex};

/// A recorded `send_message` call: the text and the session id it carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedSend {
    pub text: String,
    pub session_id: Option<String>,
}

/// Scriptable backend for driving the conversation core in tests. Replies are
/// consumed in order; once exhausted, every exchange fails, which doubles as
/// the "backend went down mid-conversation" case.
pub struct MockBackend {
    handshake: Option<(String, String)>,
    replies: Mutex<Vec<Result<String, String>>>,
    pub calls: Arc<Mutex<Vec<RecordedSend>>>,
}

impl MockBackend {
    pub fn online(session_id: &str, greeting: &str) -> Self {
        Self {
            handshake: Some((session_id.to_string(), greeting.to_string())),
            replies: Mutex::new(Vec::new()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            handshake: None,
            replies: Mutex::new(Vec::new()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_replies(self, replies: Vec<Result<String, String>>) -> Self {
        Self {
            replies: Mutex::new(replies),
            ..self
        }
    }
}

#[async_trait]
impl ChatBackend for MockBackend {
    async fn new_session(&self) -> anyhow::Result<SessionHandshake> {
        match &self.handshake {
            Some((session_id, greeting)) => Ok(SessionHandshake {
                session_id: session_id.clone(),
                greeting: greeting.clone(),
            }),
            None => Err(anyhow::anyhow!("connection refused")),
        }
    }

    async fn send_message(&self, text: &str, session_id: Option<&str>) -> anyhow::Result<String> {
        self.calls.lock().expect("lock calls").push(RecordedSend {
            text: text.to_string(),
            session_id: session_id.map(String::from),
        });

        let mut replies = self.replies.lock().expect("lock replies");
        if replies.is_empty() {
            return Err(anyhow::anyhow!("backend unavailable"));
        }
        replies.remove(0).map_err(|e| anyhow::anyhow!(e))
    }

    async fn session_summary(&self, session_id: &str) -> anyhow::Result<String> {
        Ok(format!("summary for {}", session_id))
    }
}
