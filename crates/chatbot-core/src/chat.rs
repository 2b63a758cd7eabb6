//! Conversation state for the chat screen.
//!
//! `ChatScreen` owns the message list, the draft being typed, the in-flight
//! flag and the theme flag. A submit is split into [`ChatScreen::begin_submit`]
//! and [`ChatScreen::complete`] so a front-end can run the network call off its
//! event loop; [`ChatScreen::submit`] runs both halves back to back.

use tracing::{debug, warn};

use crate::ai::{GenerateContent, GenerateContentResponse};
use crate::error::ProviderError;
use crate::state::{ChatMessage, ChatState};

pub const GREETING: &str = "Hi there! I'm your AI assistant. How can I help you today?";
pub const NO_RESPONSE_FALLBACK: &str = "No valid response from AI.";
pub const FAILURE_FALLBACK: &str = "Something went wrong. Try again.";

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

#[derive(Debug, Clone)]
pub struct ChatScreen {
    messages: Vec<ChatMessage>,
    draft: String,
    cursor: usize, // in chars, not bytes
    in_flight: bool,
    dark_mode: bool,
}

impl Default for ChatScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatScreen {
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::assistant(GREETING)],
            draft: String::new(),
            cursor: 0,
            in_flight: false,
            dark_mode: false,
        }
    }

    pub fn with_dark_mode(mut self, dark_mode: bool) -> Self {
        self.dark_mode = dark_mode;
        self
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    pub fn state(&self) -> ChatState {
        if self.in_flight {
            ChatState::AwaitingResponse
        } else {
            ChatState::Idle
        }
    }

    pub fn is_dark(&self) -> bool {
        self.dark_mode
    }

    pub fn toggle_theme(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        self.dark_mode
    }

    /// Whether a submit right now would be accepted.
    pub fn can_send(&self) -> bool {
        !self.in_flight && !self.draft.trim().is_empty()
    }

    // Draft editing. The input is disabled while a request is in flight.

    pub fn set_draft(&mut self, text: &str) {
        if self.in_flight {
            return;
        }
        self.draft = text.to_string();
        self.cursor = self.draft.chars().count();
    }

    pub fn insert_char(&mut self, c: char) {
        if self.in_flight {
            return;
        }
        let byte_pos = char_to_byte_index(&self.draft, self.cursor);
        self.draft.insert(byte_pos, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.in_flight || self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let byte_pos = char_to_byte_index(&self.draft, self.cursor);
        self.draft.remove(byte_pos);
    }

    pub fn delete(&mut self) {
        if self.in_flight || self.cursor >= self.draft.chars().count() {
            return;
        }
        let byte_pos = char_to_byte_index(&self.draft, self.cursor);
        self.draft.remove(byte_pos);
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.draft.chars().count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.draft.chars().count();
    }

    /// First half of a submit. Appends the user message, clears the draft and
    /// marks the screen as awaiting a response. Returns the prompt to send, or
    /// `None` if the draft is blank or a request is already outstanding.
    pub fn begin_submit(&mut self) -> Option<String> {
        if !self.can_send() {
            return None;
        }

        let prompt = std::mem::take(&mut self.draft);
        self.cursor = 0;
        self.messages.push(ChatMessage::user(prompt.clone()));
        self.in_flight = true;

        debug!(messages = self.messages.len(), "submit accepted");
        Some(prompt)
    }

    /// Second half of a submit. Appends the answer or a fallback and returns
    /// the screen to idle.
    pub fn complete(&mut self, outcome: Result<GenerateContentResponse, ProviderError>) {
        if !self.in_flight {
            debug!("ignoring completion with no request in flight");
            return;
        }

        let reply = match outcome {
            Ok(response) => match response.first_text() {
                Some(text) => text.to_string(),
                None => {
                    debug!("response had no candidate text");
                    NO_RESPONSE_FALLBACK.to_string()
                }
            },
            Err(err) => {
                warn!(error = %err, "generation call failed");
                FAILURE_FALLBACK.to_string()
            }
        };

        self.messages.push(ChatMessage::assistant(reply));
        self.in_flight = false;
    }

    /// Run a whole submit against `client`: one call, raw draft as the only
    /// prompt, no earlier turns.
    pub async fn submit(&mut self, client: &dyn GenerateContent) {
        let Some(prompt) = self.begin_submit() else {
            return;
        };
        let outcome = client.generate(&prompt).await;
        self.complete(outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ChatRole;
    use async_trait::async_trait;
    use std::sync::Mutex;

    enum Reply {
        Text(&'static str),
        Empty,
        Fail,
    }

    struct ScriptedClient {
        reply: Reply,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedClient {
        fn new(reply: Reply) -> Self {
            Self {
                reply,
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GenerateContent for ScriptedClient {
        async fn generate(&self, prompt: &str) -> Result<GenerateContentResponse, ProviderError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match self.reply {
                Reply::Text(text) => Ok(GenerateContentResponse::from_text(text)),
                Reply::Empty => Ok(GenerateContentResponse::default()),
                Reply::Fail => Err(ProviderError::Api {
                    status: 500,
                    body: "boom".to_string(),
                }),
            }
        }
    }

    #[test]
    fn test_new_screen_has_greeting() {
        let screen = ChatScreen::new();
        assert_eq!(screen.messages(), &[ChatMessage::assistant(GREETING)]);
        assert_eq!(screen.state(), ChatState::Idle);
        assert!(!screen.is_dark());
    }

    #[test]
    fn test_blank_draft_is_rejected() {
        let mut screen = ChatScreen::new();
        for draft in ["", "   ", "\t\n "] {
            screen.set_draft(draft);
            assert_eq!(screen.begin_submit(), None);
            assert_eq!(screen.messages().len(), 1);
            assert!(!screen.is_loading());
        }
    }

    #[test]
    fn test_begin_submit_appends_user_message_and_clears_draft() {
        let mut screen = ChatScreen::new();
        screen.set_draft("  hello there ");

        let prompt = screen.begin_submit();

        assert_eq!(prompt.as_deref(), Some("  hello there "));
        assert_eq!(screen.messages().len(), 2);
        assert_eq!(screen.messages()[1], ChatMessage::user("  hello there "));
        assert_eq!(screen.draft(), "");
        assert_eq!(screen.cursor(), 0);
        assert_eq!(screen.state(), ChatState::AwaitingResponse);
    }

    #[test]
    fn test_second_submit_while_in_flight_is_noop() {
        let mut screen = ChatScreen::new();
        screen.set_draft("first");
        assert!(screen.begin_submit().is_some());

        screen.set_draft("second");
        screen.insert_char('x');
        assert_eq!(screen.draft(), "");
        assert_eq!(screen.begin_submit(), None);
        assert_eq!(screen.messages().len(), 2);

        screen.complete(Ok(GenerateContentResponse::from_text("ok")));
        assert_eq!(screen.messages().len(), 3);

        screen.set_draft("second");
        assert!(screen.begin_submit().is_some());
        assert_eq!(screen.messages().len(), 4);
    }

    #[test]
    fn test_complete_without_request_is_ignored() {
        let mut screen = ChatScreen::new();
        screen.complete(Ok(GenerateContentResponse::from_text("stray")));
        assert_eq!(screen.messages().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_appends_reply_text() {
        let client = ScriptedClient::new(Reply::Text("Hello!"));
        let mut screen = ChatScreen::new();
        screen.set_draft("hi");

        screen.submit(&client).await;

        assert_eq!(screen.messages().len(), 3);
        assert_eq!(screen.messages()[2], ChatMessage::assistant("Hello!"));
        assert!(!screen.is_loading());
    }

    #[tokio::test]
    async fn test_submit_empty_response_uses_fallback() {
        let client = ScriptedClient::new(Reply::Empty);
        let mut screen = ChatScreen::new();
        screen.set_draft("hi");

        screen.submit(&client).await;

        assert_eq!(screen.messages().len(), 3);
        assert_eq!(screen.messages()[2], ChatMessage::assistant(NO_RESPONSE_FALLBACK));
        assert!(!screen.is_loading());
    }

    #[tokio::test]
    async fn test_submit_failure_uses_fallback_and_clears_flag() {
        let client = ScriptedClient::new(Reply::Fail);
        let mut screen = ChatScreen::new();
        screen.set_draft("hi");

        screen.submit(&client).await;

        assert_eq!(screen.messages().len(), 3);
        assert_eq!(screen.messages()[2], ChatMessage::assistant(FAILURE_FALLBACK));
        assert_eq!(screen.state(), ChatState::Idle);

        // Still usable after a failure
        screen.set_draft("again");
        assert!(screen.can_send());
    }

    #[tokio::test]
    async fn test_blank_submit_never_calls_client() {
        let client = ScriptedClient::new(Reply::Text("unused"));
        let mut screen = ChatScreen::new();
        screen.set_draft("   ");

        screen.submit(&client).await;

        assert!(client.prompts().is_empty());
        assert_eq!(screen.messages().len(), 1);
    }

    #[tokio::test]
    async fn test_history_is_not_sent() {
        let client = ScriptedClient::new(Reply::Text("sure"));
        let mut screen = ChatScreen::new();

        screen.set_draft("first question");
        screen.submit(&client).await;
        screen.set_draft("second question");
        screen.submit(&client).await;

        assert_eq!(client.prompts(), vec!["first question", "second question"]);
    }

    #[tokio::test]
    async fn test_full_exchange() {
        let client = ScriptedClient::new(Reply::Text("4."));
        let mut screen = ChatScreen::new();

        for c in "What is 2+2?".chars() {
            screen.insert_char(c);
        }
        screen.submit(&client).await;

        let roles: Vec<ChatRole> = screen.messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![ChatRole::Assistant, ChatRole::User, ChatRole::Assistant]);
        assert_eq!(
            screen.messages(),
            &[
                ChatMessage::assistant(GREETING),
                ChatMessage::user("What is 2+2?"),
                ChatMessage::assistant("4."),
            ]
        );
    }

    #[test]
    fn test_cursor_editing_is_utf8_safe() {
        let mut screen = ChatScreen::new();
        screen.set_draft("héllo");
        screen.move_home();
        screen.move_right();
        screen.move_right();
        screen.backspace();
        assert_eq!(screen.draft(), "hllo");
        screen.insert_char('ë');
        assert_eq!(screen.draft(), "hëllo");
        screen.move_end();
        screen.delete();
        assert_eq!(screen.draft(), "hëllo");
        screen.move_left();
        screen.delete();
        assert_eq!(screen.draft(), "hëll");
    }

    #[test]
    fn test_toggle_theme_leaves_messages_alone() {
        let mut screen = ChatScreen::new();
        assert!(screen.toggle_theme());
        assert!(screen.is_dark());
        assert!(!screen.toggle_theme());
        assert_eq!(screen.messages().len(), 1);
    }
}
