use crate::core::display::parse_wire_date;
use crate::domain::model::{
    ChatReply, ChatRequest, ErrorBody, HealthStatus, PredictionResult, ValidatedRequest,
};
use crate::domain::ports::{ChatBackend, ConfigProvider, PredictionBackend};
use crate::utils::error::{HayyaError, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

/// HTTP client for the Hayya backend. One `reqwest::Client` is reused for every call.
#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: String,
    client: Client,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(base_url.into()),
            client: Client::new(),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| HayyaError::ConfigError {
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            base_url: normalize_base_url(config.base_url().to_string()),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn transport_error(&self, source: reqwest::Error) -> HayyaError {
        HayyaError::Transport {
            base_url: self.base_url.clone(),
            source,
        }
    }

    /// `GET /`
    pub async fn health(&self) -> Result<HealthStatus> {
        let url = self.url("/");
        tracing::debug!("Checking backend health at {}", url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        let body = self.success_body(response).await?;
        decode_json(&body)
    }

    /// Returns the body of a 2xx response, or a `ServerRejected` carrying the backend's `detail`.
    async fn success_body(&self, response: Response) -> Result<String> {
        let status = response.status();
        tracing::debug!("Backend response status: {}", status);

        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if status.is_success() {
            return Ok(body);
        }

        let detail = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.detail)
            .filter(|d| !d.is_empty());

        if detail.is_none() {
            tracing::warn!("Backend returned {} without a usable detail message", status);
        }

        Err(HayyaError::ServerRejected {
            status: status.as_u16(),
            detail,
        })
    }
}

fn normalize_base_url(base_url: String) -> String {
    base_url.trim_end_matches('/').to_string()
}

fn decode_json<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| HayyaError::MalformedResponse {
        message: e.to_string(),
    })
}

/// Deserializes a forecast and checks that every date field is a real calendar date.
pub fn decode_prediction(body: &str) -> Result<PredictionResult> {
    let result: PredictionResult = decode_json(body)?;
    for (field, value) in result.date_fields() {
        parse_wire_date(field, value)?;
    }
    Ok(result)
}

#[async_trait]
impl PredictionBackend for BackendClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn predict(&self, request: &ValidatedRequest) -> Result<PredictionResult> {
        let url = self.url("/predict");
        tracing::debug!(
            "POST {} with {} dates, lookback {}",
            url,
            request.past_starts.len(),
            request.lookback
        );

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let body = self.success_body(response).await?;
        decode_prediction(&body)
    }
}

#[async_trait]
impl ChatBackend for BackendClient {
    async fn initial_message(&self) -> Result<String> {
        let url = self.url("/get-initial-message");
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let body = self.success_body(response).await?;
        let reply: ChatReply = decode_json(&body)?;
        reply
            .response
            .filter(|text| !text.is_empty())
            .ok_or_else(|| HayyaError::MalformedResponse {
                message: "initial message has no 'response' field".to_string(),
            })
    }

    async fn chat(&self, message: &str) -> Result<ChatReply> {
        let url = self.url("/chat");
        tracing::debug!("POST {} ({} chars)", url, message.len());

        let response = self
            .client
            .post(&url)
            .json(&ChatRequest {
                message: message.to_string(),
            })
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let body = self.success_body(response).await?;
        decode_json(&body)
    }
}
