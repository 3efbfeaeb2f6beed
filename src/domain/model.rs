use serde::{Deserialize, Serialize};

/// Prediction payload as sent to `POST /predict`.
///
/// Every entry of `past_starts` is `YYYY-MM-DD` shaped and the list is never empty
/// when built through [`crate::core::input::parse_input`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedRequest {
    pub past_starts: Vec<String>,
    pub lookback: i64,
}

/// Forecast returned by the backend. Values are passed through as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub predicted_date: String,
    pub mean_cycle: f64,
    pub std_dev: f64,
    pub ci_lower: String,
    pub ci_upper: String,
    pub fertile_window_start: String,
    pub fertile_window_end: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl PredictionResult {
    /// Date fields in display order, paired with their wire names.
    pub fn date_fields(&self) -> [(&'static str, &str); 5] {
        [
            ("predicted_date", &self.predicted_date),
            ("ci_lower", &self.ci_lower),
            ("ci_upper", &self.ci_upper),
            ("fertile_window_start", &self.fertile_window_start),
            ("fertile_window_end", &self.fertile_window_end),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestOutcome {
    Success(PredictionResult),
    Failure(String),
}

impl RequestOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RequestOutcome::Success(_))
    }
}

/// Render-ready strings for one forecast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayModel {
    pub intro: String,
    pub predicted_date: String,
    pub mean_cycle: String,
    pub std_dev: String,
    pub confidence_range: String,
    pub fertile_window: String,
    /// `None` means the note region is not rendered at all.
    pub note: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Displaying,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ChatReply {
    /// `response` when present and non-empty, otherwise `error`.
    pub fn text(&self) -> Option<&str> {
        self.response
            .as_deref()
            .filter(|r| !r.is_empty())
            .or(self.error.as_deref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub speaker: Speaker,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Assistant,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub detail: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_to_wire_shape() {
        let request = ValidatedRequest {
            past_starts: vec!["2025-07-01".to_string(), "2025-07-29".to_string()],
            lookback: 6,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"past_starts": ["2025-07-01", "2025-07-29"], "lookback": 6})
        );
    }

    #[test]
    fn test_chat_reply_prefers_response_over_error() {
        let reply: ChatReply = serde_json::from_str(r#"{"response": "hi", "error": "x"}"#).unwrap();
        assert_eq!(reply.text(), Some("hi"));

        let reply: ChatReply = serde_json::from_str(r#"{"error": "model offline"}"#).unwrap();
        assert_eq!(reply.text(), Some("model offline"));

        let reply: ChatReply = serde_json::from_str(r#"{"response": "", "error": "empty"}"#).unwrap();
        assert_eq!(reply.text(), Some("empty"));

        let reply: ChatReply = serde_json::from_str("{}").unwrap();
        assert_eq!(reply.text(), None);
    }

    #[test]
    fn test_prediction_result_note_is_optional() {
        let body = r#"{
            "predicted_date": "2025-11-28", "mean_cycle": 29.0, "std_dev": 1.2,
            "ci_lower": "2025-11-27", "ci_upper": "2025-11-29",
            "fertile_window_start": "2025-11-10", "fertile_window_end": "2025-11-18"
        }"#;
        let result: PredictionResult = serde_json::from_str(body).unwrap();
        assert!(result.note.is_none());
        assert_eq!(result.date_fields()[0], ("predicted_date", "2025-11-28"));
    }
}
