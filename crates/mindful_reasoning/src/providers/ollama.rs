//! Ollama `/api/generate` provider.
//!
//! Sends one non-streaming generate request per attempt and reads the reply
//! from the `response` field. Retries follow the injected [`RetryPolicy`].

use crate::api_types::{GenerateOptions, GenerateRequest, GenerateResponse};
use crate::llm::{CompletionClient, CompletionError, CompletionParams};
use crate::retry::{with_retry, RetryPolicy};
use anyhow::Result;
use mindful_core::SessionConfig;
use reqwest::Client;
use std::time::Duration;

const ERROR_BODY_LIMIT: usize = 200;

#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: Client,
    api_url: String,
    model: String,
    timeout: Duration,
    params: CompletionParams,
    retry: RetryPolicy,
}

impl OllamaClient {
    pub fn new(api_url: &str, model: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_url: api_url.trim().to_string(),
            model: model.to_string(),
            timeout,
            params: CompletionParams::default(),
            retry: RetryPolicy::default(),
        })
    }

    pub fn from_config(config: &SessionConfig) -> Result<Self> {
        Ok(Self::new(&config.api_url, &config.model, config.timeout())?
            .with_params(CompletionParams {
                temperature: config.temperature,
            })
            .with_retry_policy(RetryPolicy::from_config(config)))
    }

    pub fn with_params(mut self, params: CompletionParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn build_request(&self, prompt: &str) -> GenerateRequest {
        GenerateRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
            options: GenerateOptions {
                temperature: self.params.temperature,
            },
        }
    }

    fn classify(&self, e: reqwest::Error) -> CompletionError {
        if e.is_timeout() {
            CompletionError::Timeout(self.timeout)
        } else if e.is_decode() {
            CompletionError::Decode(e.to_string())
        } else {
            CompletionError::Transport(e.to_string())
        }
    }

    async fn attempt(&self, body: &GenerateRequest) -> Result<String, CompletionError> {
        let response = self
            .client
            .post(&self.api_url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body: text.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }

        let parsed: GenerateResponse = response.json().await.map_err(|e| self.classify(e))?;
        parsed
            .reply()
            .map(str::to_string)
            .ok_or(CompletionError::EmptyReply)
    }
}

#[async_trait::async_trait]
impl CompletionClient for OllamaClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let body = self.build_request(prompt);
        tracing::debug!(
            "Sending {} prompt chars to {} ({})",
            prompt.len(),
            self.api_url,
            self.model
        );
        with_retry(&self.retry, self.provider_name(), |_| self.attempt(&body)).await
    }

    fn provider_name(&self) -> &'static str {
        "ollama"
    }
}
