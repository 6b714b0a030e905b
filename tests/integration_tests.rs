//! Integration tests for the mobileguru library.
//! The live test requires an API key in the environment to run.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use mobileguru::{
    ChatController, Error, GeminiClient, Relay, Result, RetryPolicy, SendOutcome, Turn, TurnRole,
};

/// A relay that replays a fixed script of outcomes.
struct ScriptedRelay {
    outcomes: Mutex<VecDeque<Result<String>>>,
    calls: AtomicU32,
}

impl ScriptedRelay {
    fn new(outcomes: Vec<Result<String>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            calls: AtomicU32::new(0),
        }
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Relay for ScriptedRelay {
    async fn generate(&self, _history: &[Turn], _instruction: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::bad_response("script exhausted")))
    }
}

#[tokio::test(start_paused = true)]
async fn flaky_session_keeps_log_consistent() {
    // Each exchange eventually succeeds; transient failures along the way
    // must never leave phantom model turns behind.
    let relay = Arc::new(ScriptedRelay::new(vec![
        Ok("answer one".to_string()),
        Err(Error::upstream(503, "overloaded")),
        Ok("answer two".to_string()),
        Err(Error::rate_limit("slow down", Some(1))),
        Err(Error::connection("reset", None)),
        Ok("answer three".to_string()),
    ]));
    let mut controller = ChatController::new(Arc::clone(&relay), "Be MobileGuru.");

    for text in ["one", "two", "three"] {
        let outcome = controller.send_message(text).await;
        assert!(matches!(outcome, SendOutcome::Answer(_)));
    }

    // 2N turns after N successful exchanges, strictly alternating.
    let turns = controller.log().turns();
    assert_eq!(turns.len(), 6);
    for (i, turn) in turns.iter().enumerate() {
        let expected = if i % 2 == 0 {
            TurnRole::User
        } else {
            TurnRole::Model
        };
        assert_eq!(turn.role, expected);
    }
    // Six scripted outcomes, all consumed.
    assert_eq!(relay.calls(), 6);
}

#[tokio::test(start_paused = true)]
async fn exhausted_attempts_leave_only_the_user_turn() {
    let relay = Arc::new(ScriptedRelay::new(vec![
        Err(Error::upstream(500, "boom")),
        Err(Error::upstream(500, "boom")),
        Err(Error::upstream(500, "boom")),
        Err(Error::upstream(500, "boom")),
        Err(Error::upstream(500, "boom")),
    ]));
    let mut controller = ChatController::new(Arc::clone(&relay), "Be MobileGuru.")
        .with_retry_policy(RetryPolicy::new(5));

    let outcome = controller.send_message("budget $300").await;
    assert!(matches!(outcome, SendOutcome::Unavailable { .. }));
    assert_eq!(controller.log().len(), 1);
    // All five attempts were spent on the single send.
    assert_eq!(relay.calls(), 5);
}

#[tokio::test]
async fn recommendation_example() {
    let relay = Arc::new(ScriptedRelay::new(vec![Ok(
        "Consider the X phone.".to_string()
    )]));
    let mut controller = ChatController::new(Arc::clone(&relay), "Be MobileGuru.");

    let outcome = controller.send_message("budget $300").await;
    assert_eq!(
        outcome,
        SendOutcome::Answer("Consider the X phone.".to_string())
    );
    assert_eq!(
        controller.log().turns(),
        &[
            Turn::user("budget $300"),
            Turn::model("Consider the X phone."),
        ]
    );
}

#[tokio::test]
async fn test_live_generate() {
    // This test requires GEMINI_API_KEY to be set
    let api_key = std::env::var("GEMINI_API_KEY").ok();
    if api_key.is_none() {
        eprintln!("Skipping test: GEMINI_API_KEY not set");
        return;
    }

    let client = GeminiClient::new(api_key).expect("Failed to create client");
    let history = vec![Turn::user("Say 'test passed'")];
    let response = client.generate(&history, "You are terse.").await;
    assert!(
        response.is_ok(),
        "Request should succeed with valid API key"
    );
}
