//! Offline onboarding flow: a fixed question sequence with no backend.
//!
//! The prompt choice is a pure function of how many user turns have already
//! completed, so the flow is deterministic and trivially testable. The
//! network-backed path never routes through this module.

use crate::chat::{ChatBackend, SessionHandshake};
use async_trait::async_trait;
use std::sync::Mutex;

pub const WELCOME: &str = "Hello! I'm your hackathon portal agent. \
    I'll help you create a custom hackathon portal by gathering some details. \
    Let's start with the basics - what's the name of your hackathon?";

/// What each scripted turn collects, in order. Used to label the summary.
pub const FIELDS: [&str; 7] = [
    "Name",
    "Date",
    "Venue",
    "Theme",
    "Participants",
    "Prizes",
    "Requirements",
];

const PROMPTS: [&str; 7] = [
    // Slot 0 is a template; `next_prompt` fills in the hackathon name.
    "Great! \"{name}\" sounds like an exciting hackathon. Now, when will it take place?",
    "Perfect timing! And where will it be held?",
    "Excellent location choice! What's the main theme or focus area for this hackathon?",
    "That theme sounds fascinating! How many participants are you expecting?",
    "Great scale! What prizes or rewards will you be offering to participants?",
    "Impressive prizes! Are there any specific technologies or requirements participants \
     should know about?",
    "Perfect! I have all the information I need. Based on your inputs, I'll now generate \
     a custom hackathon portal.",
];

/// Next agent prompt given the number of user turns completed before this one
/// and the user's latest input. Clamps at the wrap-up line once the script is
/// exhausted.
pub fn next_prompt(completed_turns: usize, input: &str) -> String {
    let index = completed_turns.min(PROMPTS.len() - 1);
    if index == 0 {
        PROMPTS[0].replace("{name}", input)
    } else {
        PROMPTS[index].to_string()
    }
}

/// Adapter that runs the scripted flow behind the `ChatBackend` seam, so the
/// CLI can host it interchangeably with the HTTP client. Collected answers
/// live behind a mutex because the trait takes `&self`.
#[derive(Default)]
pub struct ScriptedBackend {
    answers: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    async fn new_session(&self) -> anyhow::Result<SessionHandshake> {
        Ok(SessionHandshake {
            session_id: format!("scripted-{}", uuid::Uuid::new_v4()),
            greeting: WELCOME.to_string(),
        })
    }

    async fn send_message(&self, text: &str, _session_id: Option<&str>) -> anyhow::Result<String> {
        let mut answers = self.answers.lock().expect("lock answers");
        let prompt = next_prompt(answers.len(), text);
        answers.push(text.to_string());
        Ok(prompt)
    }

    async fn session_summary(&self, _session_id: &str) -> anyhow::Result<String> {
        let answers = self.answers.lock().expect("lock answers");
        if answers.is_empty() {
            return Ok("No details collected yet.".to_string());
        }
        let lines: Vec<String> = answers
            .iter()
            .enumerate()
            .map(|(i, answer)| {
                let label = FIELDS.get(i).copied().unwrap_or("Notes");
                format!("{}: {}", label, answer)
            })
            .collect();
        Ok(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests;
