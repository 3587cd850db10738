pub mod config;

pub use config::ClientConfig;

use crate::config::api_keys::{ApiKey, ConfigurationError};
use crate::config::constants::credentials;
use crate::gemini::models::GenerateContentRequest;
use crate::gemini::streaming::{SseDecoder, error_message_from_body, parse_event};
use crate::llm::provider::{FragmentStream, GenerationError, TextGenerator};
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client as ReqwestClient;
use std::time::Instant;
use tracing::{debug, warn};

/// Gemini REST client for streamed text generation
#[derive(Clone)]
pub struct Client {
    api_key: ApiKey,
    http: ReqwestClient,
    config: ClientConfig,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("api_key", &self.api_key)
            .field("config", &self.config)
            .finish()
    }
}

impl Client {
    /// Create a client for `model` with default transport settings
    pub fn new(api_key: ApiKey, model: impl Into<String>) -> Result<Self, ConfigurationError> {
        Self::with_config(api_key, ClientConfig::default().with_model(model))
    }

    /// Create a client with custom configuration
    pub fn with_config(api_key: ApiKey, config: ClientConfig) -> Result<Self, ConfigurationError> {
        let mut builder = ReqwestClient::builder()
            .connect_timeout(config.connect_timeout)
            .tcp_keepalive(config.tcp_keepalive)
            .user_agent(&config.user_agent);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ConfigurationError::HttpClient(e.to_string()))?;

        Ok(Self {
            api_key,
            http,
            config,
        })
    }

    /// Get current client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn open(&self, prompt: &str) -> Result<reqwest::Response, GenerationError> {
        let request = GenerateContentRequest::from_prompt(prompt);
        let url = self.config.stream_url();

        let response = self
            .http
            .post(&url)
            .header(credentials::API_KEY_HEADER, self.api_key.expose())
            .json(&request)
            .send()
            .await
            .map_err(|e| GenerationError::network(format!("Failed to send request: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message_from_body(&body);
            warn!(status = status.as_u16(), "gemini request rejected");
            return Err(GenerationError::Api {
                status_code: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl TextGenerator for Client {
    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn stream(&self, prompt: &str) -> Result<FragmentStream, GenerationError> {
        let started = Instant::now();
        let response = self.open(prompt).await?;
        debug!(
            model = %self.config.model,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "stream opened"
        );

        let mut body = response.bytes_stream();
        let fragments = async_stream::stream! {
            let mut decoder = SseDecoder::new();

            while let Some(chunk) = body.next().await {
                let bytes = match chunk {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        yield Err(GenerationError::network(format!("Failed to read chunk: {e}")));
                        return;
                    }
                };

                for event in decoder.push(&bytes) {
                    match parse_event(&event) {
                        Ok(fragment) => yield Ok(fragment),
                        Err(e) => {
                            yield Err(e);
                            return;
                        }
                    }
                }
            }

            if let Some(event) = decoder.finish() {
                yield parse_event(&event);
            }

            let metrics = decoder.metrics();
            debug!(
                chunks = metrics.total_chunks,
                bytes = metrics.total_bytes,
                events = metrics.total_events,
                "stream finished"
            );
        };

        Ok(Box::pin(fragments))
    }
}
