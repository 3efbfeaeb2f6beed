use crate::domain::model::{ChatMessage, ChatReply, DisplayModel, PredictionResult, ValidatedRequest};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn timeout(&self) -> Duration;
}

#[async_trait]
pub trait PredictionBackend: Send + Sync {
    /// Address used in the connectivity failure message.
    fn base_url(&self) -> &str;
    async fn predict(&self, request: &ValidatedRequest) -> Result<PredictionResult>;
}

#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn initial_message(&self) -> Result<String>;
    async fn chat(&self, message: &str) -> Result<ChatReply>;
}

/// Render adapter for the prediction form.
pub trait Presenter {
    fn show_loading(&mut self);
    fn hide_loading(&mut self);
    fn show_result(&mut self, display: &DisplayModel);
    fn show_error(&mut self, message: &str);
}

/// Render adapter for the chat window.
pub trait ChatView {
    fn show_typing(&mut self);
    fn hide_typing(&mut self);
    fn append_message(&mut self, message: &ChatMessage);
}
