use std::sync::Arc;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde_json::{json, Value};

use super::base::ChatProvider;
use super::token::TokenCache;
use crate::clock::Clock;
use crate::config::{ProviderSettings, SamplingConfig};
use crate::errors::{CampoError, Result};

/// Chat-completion client for the hosted Granite endpoint.
pub struct ChatClient {
    client: Client,
    chat_url: String,
    project_id: String,
    model_id: String,
    tokens: TokenCache,
}

impl ChatClient {
    pub fn new(settings: &ProviderSettings, clock: Arc<dyn Clock>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(600)) // 10 minutes timeout
            .build()?;

        let tokens = TokenCache::new(
            client.clone(),
            settings.token_url.clone(),
            settings.api_key.clone(),
            clock,
        );

        Ok(Self {
            client,
            chat_url: settings.chat_url.clone(),
            project_id: settings.project_id.clone(),
            model_id: settings.model_id.clone(),
            tokens,
        })
    }

    fn payload(&self, user_message: &str, system_message: &str, sampling: &SamplingConfig) -> Value {
        json!({
            "messages": [
                { "role": "system", "content": system_message },
                { "role": "user", "content": user_message }
            ],
            "project_id": self.project_id,
            "model_id": self.model_id,
            "frequency_penalty": sampling.frequency_penalty,
            "max_tokens": sampling.max_tokens,
            "presence_penalty": sampling.presence_penalty,
            "temperature": sampling.temperature,
            "top_p": sampling.top_p
        })
    }

    fn post(&self, payload: Value) -> Result<Value> {
        let token = self.tokens.get_token()?;
        let response = self
            .client
            .post(&self.chat_url)
            .header("Accept", "application/json")
            .header("Authorization", format!("Bearer {}", token))
            .json(&payload)
            .send()?;

        match response.status() {
            StatusCode::OK => {
                let body = response.text()?;
                serde_json::from_str(&body)
                    .map_err(|e| CampoError::Parse(format!("response is not JSON: {}", e)))
            }
            status => {
                let body = response.text().unwrap_or_default();
                tracing::warn!("Chat request failed with {}", status);
                Err(CampoError::Provider {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }
}

/// Pull `choices[0].message.content` out of a chat response.
pub fn response_text(data: &Value) -> Result<String> {
    data.get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(|content| content.as_str())
        .map(str::to_string)
        .ok_or_else(|| {
            CampoError::Parse("missing choices[0].message.content in chat response".to_string())
        })
}

impl ChatProvider for ChatClient {
    fn send(
        &self,
        user_message: &str,
        system_message: &str,
        sampling: &SamplingConfig,
    ) -> Result<String> {
        tracing::debug!(
            "Sending chat request to {} ({} prompt chars)",
            self.model_id,
            user_message.chars().count()
        );
        let payload = self.payload(user_message, system_message, sampling);
        let response = self.post(payload)?;
        response_text(&response)
    }

    fn validate(&self) -> Result<()> {
        self.tokens.get_token().map(|_| ())
    }
}
