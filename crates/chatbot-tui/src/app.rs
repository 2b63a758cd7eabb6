use std::path::PathBuf;
use std::sync::Arc;

use chatbot_core::{ChatScreen, Config, GenerateContent, GenerateContentResponse, ProviderError};
use tokio::task::JoinHandle;
use tracing::{info, warn};

type PendingReply = JoinHandle<Result<GenerateContentResponse, ProviderError>>;

pub struct App {
    // Core state
    pub should_quit: bool,
    pub chat: ChatScreen,
    pub model: String,

    // The one outstanding generation call, if any
    pending: Option<PendingReply>,
    client: Arc<dyn GenerateContent>,

    // Message list scrolling
    pub scroll: u16,
    pub chat_height: u16, // Visible rows of the message list
    pub max_scroll: u16,  // Updated during render
    last_seen: (usize, bool),

    // Animation state
    pub animation_frame: u8, // 0-2 for ellipsis animation

    // Where the theme flag is persisted
    config_path: Option<PathBuf>,
}

impl App {
    pub fn new(client: Arc<dyn GenerateContent>, model: &str) -> Self {
        Self {
            should_quit: false,
            chat: ChatScreen::new(),
            model: model.to_string(),
            pending: None,
            client,
            scroll: 0,
            chat_height: 0,
            max_scroll: 0,
            last_seen: (0, false),
            animation_frame: 0,
            config_path: None,
        }
    }

    pub fn with_dark_mode(mut self, dark_mode: bool) -> Self {
        self.chat = self.chat.with_dark_mode(dark_mode);
        self
    }

    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Submit the draft and start the generation call in the background.
    pub fn submit(&mut self) {
        let Some(prompt) = self.chat.begin_submit() else {
            return;
        };

        let client = Arc::clone(&self.client);
        self.pending = Some(tokio::spawn(async move { client.generate(&prompt).await }));
        self.animation_frame = 0;
    }

    /// Hand a finished generation call back to the chat screen.
    pub async fn poll_pending(&mut self) {
        let finished = self.pending.as_ref().is_some_and(|task| task.is_finished());
        if !finished {
            return;
        }

        if let Some(task) = self.pending.take() {
            let outcome = match task.await {
                Ok(outcome) => outcome,
                Err(err) => Err(ProviderError::Task(err.to_string())),
            };
            self.chat.complete(outcome);
        }
    }

    pub fn toggle_theme(&mut self) {
        let dark = self.chat.toggle_theme();
        info!(dark, "theme toggled");

        if let Some(path) = &self.config_path {
            if let Err(err) = Config::save_dark_mode(path, dark) {
                warn!(error = %err, "could not persist theme");
            }
        }
    }

    /// Tick animation frame (called by Tick event)
    pub fn tick_animation(&mut self) {
        if self.chat.is_loading() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }

    /// True once per change to the message list or the loading flag.
    pub fn take_content_changed(&mut self) -> bool {
        let seen = (self.chat.messages().len(), self.chat.is_loading());
        if seen == self.last_seen {
            return false;
        }
        self.last_seen = seen;
        true
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll = self.max_scroll;
    }

    pub fn scroll_up(&mut self, rows: u16) {
        self.scroll = self.scroll.saturating_sub(rows);
    }

    pub fn scroll_down(&mut self, rows: u16) {
        self.scroll = self.scroll.saturating_add(rows).min(self.max_scroll);
    }

    pub fn half_page(&self) -> u16 {
        (self.chat_height / 2).max(1)
    }
}
