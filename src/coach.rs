//! Coach conversation state
//!
//! The chat-completion HTTP call lives outside this crate. This module owns
//! what surrounds it: the conversation history, the request body sent to the
//! endpoint, reading the response, and turning failures into a terminal
//! message in the conversation. Hosts plug their HTTP client in through
//! [`ChatBackend`].

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ScoreError;
use crate::types::InsightResult;

/// Model identifier sent with every request
pub const DEFAULT_MODEL: &str = "mistralai/mistral-small-3.1-24b-instruct:free";

/// Reply used when the response carries no text
pub const NO_RESPONSE: &str = "No response received.";

const GREETING: &str = "Hey, I'm your fitness coach. I've been analysing your patterns.\n\n\
Ask me why your risks look the way they do, and what to do about it.";

const CLEARED_GREETING: &str =
    "Chat cleared. I still remember your patterns. What would you like to explore?";

const PERSONA: &str = "You are a behavioural fitness coach.\n\
You detect unhealthy behaviour patterns, make data-driven predictions about fitness outcomes, \
and deliver context-aware interventions, not generic motivation.\n\
Never say generic things like \"Stay strong!\". Always connect insights to the user's numbers. \
Keep responses concise.\n\
FORMAT: Lead with the insight. Follow with the data. End with the action.";

/// Message author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// A role-tagged chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }
}

/// Conversation history snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    /// Start a conversation with the coach greeting
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::assistant(GREETING)],
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Return a copy with one more message
    pub fn with_message(&self, message: ChatMessage) -> Self {
        let mut messages = self.messages.clone();
        messages.push(message);
        Self { messages }
    }

    /// Return a fresh conversation holding only the cleared greeting
    pub fn cleared(&self) -> Self {
        Self {
            messages: vec![ChatMessage::assistant(CLEARED_GREETING)],
        }
    }
}

/// Request body for the chat-completion endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: Option<CompletionMessage>,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: Option<String>,
}

/// Read the reply text from a successful response body
///
/// Uses `choices[0].message.content`, falling back to [`NO_RESPONSE`] when it
/// is missing or empty.
pub fn parse_chat_completion(body: &str) -> Result<String, ScoreError> {
    let response: CompletionResponse = serde_json::from_str(body)
        .map_err(|e| ScoreError::Coach(format!("Invalid completion response: {e}")))?;

    let text = response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message)
        .and_then(|m| m.content)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| NO_RESPONSE.to_string());
    Ok(text)
}

/// Human-readable message for a non-success HTTP response
pub fn api_error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<ApiErrorResponse>(body)
        .ok()
        .and_then(|r| r.error)
        .and_then(|e| e.message)
        .unwrap_or_else(|| format!("API error: {status}"))
}

/// Render the coach system prompt with the user's own aggregates
pub fn build_system_prompt(insights: &InsightResult) -> String {
    let c = &insights.correlations;
    format!(
        "{persona}\n\n\
USER DATA ({days} days):\n\
Sleep: avg {sleep}h/night\n\
Steps: avg {steps}/day\n\
Hydration: avg {water}L/day\n\
Mood: avg {mood}/10\n\
Gym: {gym_rate}% of days, current streak {streak} days\n\
Junk food: {junk_rate}% of days\n\
CORRELATIONS: sleep-gym r={sleep_gym}, mood-junk r={mood_junk}, steps-water r={steps_water}",
        persona = PERSONA,
        days = insights.days,
        sleep = insights.avg_sleep,
        steps = insights.avg_steps,
        water = insights.avg_water,
        mood = insights.avg_mood,
        gym_rate = insights.gym_rate,
        streak = insights.streak,
        junk_rate = insights.junk_rate,
        sleep_gym = c.sleep_gym,
        mood_junk = c.mood_junk,
        steps_water = c.steps_water,
    )
}

/// Seam for the chat-completion transport
pub trait ChatBackend {
    /// Perform one completion and return the reply text
    fn complete(&self, request: &ChatRequest) -> Result<String, ScoreError>;
}

/// Conversation plus request bookkeeping
///
/// At most one request is in flight. A new message while one is outstanding
/// is refused, not queued, and nothing is cancelled.
#[derive(Debug, Clone)]
pub struct CoachSession {
    conversation: Conversation,
    system_prompt: String,
    model: String,
    in_flight: bool,
    last_error: Option<String>,
}

impl CoachSession {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            conversation: Conversation::new(),
            system_prompt: system_prompt.into(),
            model: DEFAULT_MODEL.to_string(),
            in_flight: false,
            last_error: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Record a user message and build the request for it
    ///
    /// Returns `None` for blank text or while another request is outstanding.
    pub fn begin(&mut self, text: &str) -> Option<ChatRequest> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        if self.in_flight {
            debug!("coach request already in flight, ignoring message");
            return None;
        }

        let mut messages = Vec::with_capacity(self.conversation.messages().len() + 2);
        messages.push(ChatMessage::system(self.system_prompt.clone()));
        messages.extend(self.conversation.messages().iter().cloned());
        messages.push(ChatMessage::user(text));

        self.conversation = self.conversation.with_message(ChatMessage::user(text));
        self.in_flight = true;
        self.last_error = None;

        Some(ChatRequest {
            model: self.model.clone(),
            messages,
        })
    }

    /// Record the outcome of the outstanding request
    pub fn complete(&mut self, outcome: Result<String, ScoreError>) {
        if !self.in_flight {
            warn!("coach reply received with no request in flight");
            return;
        }
        self.in_flight = false;

        let reply = match outcome {
            Ok(text) => text,
            Err(e) => {
                let message = match e {
                    ScoreError::Coach(msg) => msg,
                    other => other.to_string(),
                };
                warn!(error = %message, "coach request failed");
                let reply = format!(
                    "Error: {message}\n\nCheck that the coach API key is configured and try again."
                );
                self.last_error = Some(message);
                reply
            }
        };
        self.conversation = self.conversation.with_message(ChatMessage::assistant(reply));
    }

    /// Drive one full round trip through a backend
    ///
    /// Returns `false` when the message was refused by [`CoachSession::begin`].
    pub fn send<B: ChatBackend>(&mut self, backend: &B, text: &str) -> bool {
        match self.begin(text) {
            Some(request) => {
                let outcome = backend.complete(&request);
                self.complete(outcome);
                true
            }
            None => false,
        }
    }

    /// Reset the conversation to the cleared greeting
    pub fn clear(&mut self) {
        self.conversation = self.conversation.cleared();
        self.last_error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::insights::generate_insights;
    use crate::sample::sample_week;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    struct EchoBackend {
        seen: RefCell<Vec<ChatRequest>>,
    }

    impl ChatBackend for EchoBackend {
        fn complete(&self, request: &ChatRequest) -> Result<String, ScoreError> {
            self.seen.borrow_mut().push(request.clone());
            let last = request.messages.last().map(|m| m.content.clone());
            Ok(format!("echo: {}", last.unwrap_or_default()))
        }
    }

    struct FailingBackend;

    impl ChatBackend for FailingBackend {
        fn complete(&self, _request: &ChatRequest) -> Result<String, ScoreError> {
            Err(ScoreError::Coach("API error: 503".to_string()))
        }
    }

    #[test]
    fn test_request_shape() {
        let mut session = CoachSession::new("system text");
        let request = session.begin("  why do I skip the gym?  ").unwrap();

        assert_eq!(request.model, DEFAULT_MODEL);
        assert_eq!(request.messages.len(), 3);
        assert_eq!(request.messages[0], ChatMessage::system("system text"));
        assert_eq!(request.messages[1].role, ChatRole::Assistant);
        assert_eq!(request.messages[2], ChatMessage::user("why do I skip the gym?"));

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "assistant");
    }

    #[test]
    fn test_single_request_in_flight() {
        let mut session = CoachSession::new("sys");
        assert!(session.begin("first").is_some());
        assert!(session.is_in_flight());
        assert!(session.begin("second").is_none());

        session.complete(Ok("reply".to_string()));
        assert!(!session.is_in_flight());
        assert!(session.begin("second").is_some());
    }

    #[test]
    fn test_blank_message_refused() {
        let mut session = CoachSession::new("sys");
        assert!(session.begin("   ").is_none());
        assert_eq!(session.conversation().messages().len(), 1);
    }

    #[test]
    fn test_send_round_trip() {
        let backend = EchoBackend {
            seen: RefCell::new(Vec::new()),
        };
        let mut session = CoachSession::new("sys").with_model("test-model");

        assert!(session.send(&backend, "hello"));
        assert!(session.send(&backend, "again"));

        let messages = session.conversation().messages();
        assert_eq!(messages.len(), 5);
        assert_eq!(messages[2], ChatMessage::assistant("echo: hello"));
        assert_eq!(messages[4], ChatMessage::assistant("echo: again"));

        // Second request carries the whole history after the system prompt
        let seen = backend.seen.borrow();
        assert_eq!(seen[1].model, "test-model");
        assert_eq!(seen[1].messages.len(), 5);
    }

    #[test]
    fn test_failure_becomes_terminal_message() {
        let mut session = CoachSession::new("sys");
        assert!(session.send(&FailingBackend, "hello"));

        let last = session.conversation().messages().last().unwrap();
        assert_eq!(last.role, ChatRole::Assistant);
        assert!(last.content.starts_with("Error: API error: 503"));
        assert_eq!(session.last_error(), Some("API error: 503"));
        assert!(!session.is_in_flight());
    }

    #[test]
    fn test_stray_completion_ignored() {
        let mut session = CoachSession::new("sys");
        session.complete(Ok("unsolicited".to_string()));
        assert_eq!(session.conversation().messages().len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut session = CoachSession::new("sys");
        session.send(&FailingBackend, "hello");
        session.clear();

        let messages = session.conversation().messages();
        assert_eq!(messages, &[ChatMessage::assistant(CLEARED_GREETING)]);
        assert!(session.last_error().is_none());
    }

    #[test]
    fn test_parse_chat_completion() {
        let body = r#"{"choices": [{"message": {"role": "assistant", "content": "Sleep more."}}]}"#;
        assert_eq!(parse_chat_completion(body).unwrap(), "Sleep more.");

        assert_eq!(parse_chat_completion(r#"{"choices": []}"#).unwrap(), NO_RESPONSE);
        assert_eq!(parse_chat_completion("{}").unwrap(), NO_RESPONSE);
        assert!(parse_chat_completion("<html>").is_err());
    }

    #[test]
    fn test_api_error_message() {
        let body = r#"{"error": {"message": "Rate limit exceeded"}}"#;
        assert_eq!(api_error_message(429, body), "Rate limit exceeded");
        assert_eq!(api_error_message(500, "oops"), "API error: 500");
        assert_eq!(api_error_message(401, "{}"), "API error: 401");
    }

    #[test]
    fn test_system_prompt_includes_user_numbers() {
        let insights = generate_insights(&sample_week(), &AnalysisConfig::dashboard());
        let prompt = build_system_prompt(&insights);
        assert!(prompt.contains("avg 6.8h/night"));
        assert!(prompt.contains("avg 6443/day"));
        assert!(prompt.contains("sleep-gym r=0.74"));
        assert!(prompt.contains("7 days"));
    }
}
