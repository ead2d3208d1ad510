use super::*;
use crate::chat::ChatBackend;

#[test]
fn first_prompt_echoes_the_hackathon_name() {
    let prompt = next_prompt(0, "HackX");
    assert!(prompt.contains("\"HackX\""), "got: {}", prompt);
    assert!(prompt.contains("when will it take place"));
}

#[test]
fn prompts_advance_in_order() {
    assert!(next_prompt(1, "March 3").contains("where will it be held"));
    assert!(next_prompt(2, "Berlin").contains("theme or focus area"));
    assert!(next_prompt(3, "AI safety").contains("How many participants"));
    assert!(next_prompt(4, "200").contains("prizes or rewards"));
    assert!(next_prompt(5, "GPUs").contains("technologies or requirements"));
}

#[test]
fn script_clamps_at_wrap_up() {
    let wrap_up = next_prompt(6, "none");
    assert!(wrap_up.contains("generate"));
    assert_eq!(next_prompt(7, "anything"), wrap_up);
    assert_eq!(next_prompt(100, "anything"), wrap_up);
}

#[tokio::test]
async fn backend_walks_the_script() {
    let backend = ScriptedBackend::new();

    let handshake = backend.new_session().await.unwrap();
    assert!(handshake.session_id.starts_with("scripted-"));
    assert_eq!(handshake.greeting, WELCOME);

    let first = backend.send_message("HackX", None).await.unwrap();
    assert!(first.contains("\"HackX\""));

    let second = backend.send_message("March 3", None).await.unwrap();
    assert!(second.contains("where will it be held"));
}

#[tokio::test]
async fn summary_labels_collected_answers() {
    let backend = ScriptedBackend::new();
    backend.send_message("HackX", None).await.unwrap();
    backend.send_message("March 3", None).await.unwrap();

    let summary = backend.session_summary("scripted-x").await.unwrap();
    assert_eq!(summary, "Name: HackX\nDate: March 3");
}

#[tokio::test]
async fn summary_before_any_answer() {
    let backend = ScriptedBackend::new();
    let summary = backend.session_summary("scripted-x").await.unwrap();
    assert_eq!(summary, "No details collected yet.");
}
