use crate::domain::model::ChatMessage;
use crate::domain::ports::{ChatBackend, ChatView};

pub const FALLBACK_GREETING: &str = "Hello! I'm Hayya. How can I help you today?";
pub const CONNECTION_TROUBLE: &str = "Sorry, I'm having trouble connecting. Please try again later.";

/// One chat window's worth of conversation with the backend.
pub struct ChatSession<B: ChatBackend> {
    backend: B,
    transcript: Vec<ChatMessage>,
}

impl<B: ChatBackend> ChatSession<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            transcript: Vec::new(),
        }
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    fn append<V: ChatView>(&mut self, message: ChatMessage, view: &mut V) {
        view.append_message(&message);
        self.transcript.push(message);
    }

    /// Seeds the conversation with the backend's welcome, or a canned one if that fails.
    pub async fn load_greeting<V: ChatView>(&mut self, view: &mut V) -> &ChatMessage {
        view.show_typing();

        let text = match self.backend.initial_message().await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Initial message fetch error: {}", e);
                FALLBACK_GREETING.to_string()
            }
        };

        self.append(ChatMessage::assistant(text), view);
        view.hide_typing();
        &self.transcript[self.transcript.len() - 1]
    }

    /// Sends one user message. Blank input is ignored and returns `None`.
    pub async fn send<V: ChatView>(&mut self, text: &str, view: &mut V) -> Option<&ChatMessage> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        self.append(ChatMessage::user(text), view);
        view.show_typing();

        let reply = match self.backend.chat(text).await {
            Ok(reply) => match reply.text() {
                Some(text) => text.to_string(),
                None => {
                    tracing::warn!("Chat reply carried neither 'response' nor 'error'");
                    CONNECTION_TROUBLE.to_string()
                }
            },
            Err(e) => {
                tracing::error!("Chat error: {}", e);
                CONNECTION_TROUBLE.to_string()
            }
        };

        self.append(ChatMessage::assistant(reply), view);
        view.hide_typing();
        self.transcript.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{ChatReply, Speaker};
    use crate::utils::error::{HayyaError, Result};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct ScriptedBackend {
        greeting: Option<String>,
        replies: Mutex<Vec<Result<ChatReply>>>,
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ChatBackend for ScriptedBackend {
        async fn initial_message(&self) -> Result<String> {
            self.greeting.clone().ok_or_else(|| HayyaError::ServerRejected {
                status: 500,
                detail: None,
            })
        }

        async fn chat(&self, message: &str) -> Result<ChatReply> {
            self.seen.lock().unwrap().push(message.to_string());
            self.replies.lock().unwrap().remove(0)
        }
    }

    #[derive(Default)]
    struct RecordingView {
        events: Vec<String>,
    }

    impl ChatView for RecordingView {
        fn show_typing(&mut self) {
            self.events.push("typing".to_string());
        }

        fn hide_typing(&mut self) {
            self.events.push("done".to_string());
        }

        fn append_message(&mut self, message: &ChatMessage) {
            let who = match message.speaker {
                Speaker::User => "user",
                Speaker::Assistant => "ai",
            };
            self.events.push(format!("{}:{}", who, message.text));
        }
    }

    fn reply(response: Option<&str>, error: Option<&str>) -> Result<ChatReply> {
        Ok(ChatReply {
            response: response.map(str::to_string),
            error: error.map(str::to_string),
        })
    }

    #[tokio::test]
    async fn test_greeting_from_backend() {
        let backend = ScriptedBackend {
            greeting: Some("Assalamu Alaikum!".to_string()),
            ..Default::default()
        };
        let mut session = ChatSession::new(backend);
        let mut view = RecordingView::default();

        let greeting = session.load_greeting(&mut view).await;
        assert_eq!(greeting.text, "Assalamu Alaikum!");
        assert_eq!(view.events, vec!["typing", "ai:Assalamu Alaikum!", "done"]);
    }

    #[tokio::test]
    async fn test_greeting_falls_back_on_failure() {
        let mut session = ChatSession::new(ScriptedBackend::default());
        let mut view = RecordingView::default();

        let greeting = session.load_greeting(&mut view).await;
        assert_eq!(greeting.text, FALLBACK_GREETING);
        assert_eq!(greeting.speaker, Speaker::Assistant);
    }

    #[tokio::test]
    async fn test_blank_message_is_ignored() {
        let mut session = ChatSession::new(ScriptedBackend::default());
        let mut view = RecordingView::default();

        assert!(session.send("   \n", &mut view).await.is_none());
        assert!(session.transcript().is_empty());
        assert!(view.events.is_empty());
        assert!(session.backend.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_send_trims_and_appends_reply() {
        let backend = ScriptedBackend {
            replies: Mutex::new(vec![reply(Some("Drink water 💧"), None)]),
            ..Default::default()
        };
        let mut session = ChatSession::new(backend);
        let mut view = RecordingView::default();

        let answer = session.send("  cramps?  ", &mut view).await.unwrap();
        assert_eq!(answer.text, "Drink water 💧");
        assert_eq!(
            view.events,
            vec!["user:cramps?", "typing", "ai:Drink water 💧", "done"]
        );
        assert_eq!(*session.backend.seen.lock().unwrap(), vec!["cramps?"]);
    }

    #[tokio::test]
    async fn test_error_field_used_when_response_missing() {
        let backend = ScriptedBackend {
            replies: Mutex::new(vec![reply(None, Some("model unavailable"))]),
            ..Default::default()
        };
        let mut session = ChatSession::new(backend);
        let mut view = RecordingView::default();

        let answer = session.send("hi", &mut view).await.unwrap();
        assert_eq!(answer.text, "model unavailable");
    }

    #[tokio::test]
    async fn test_backend_failure_shows_connection_message() {
        let backend = ScriptedBackend {
            replies: Mutex::new(vec![Err(HayyaError::ServerRejected {
                status: 500,
                detail: Some("I'm having a little trouble thinking.".to_string()),
            })]),
            ..Default::default()
        };
        let mut session = ChatSession::new(backend);
        let mut view = RecordingView::default();

        let answer = session.send("hi", &mut view).await.unwrap();
        assert_eq!(answer.text, CONNECTION_TROUBLE);
        assert_eq!(session.transcript().len(), 2);
        assert_eq!(view.events.last().map(String::as_str), Some("done"));
    }
}
