use crate::config::constants::{client, models, urls};
use crate::config::loader::{ClientSection, ModelConfig};
use std::time::Duration;

/// Configuration for the Gemini HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Gemini model ID
    pub model: String,
    /// REST API base URL, e.g. `https://generativelanguage.googleapis.com/v1beta`
    pub base_url: String,
    /// Connection timeout
    pub connect_timeout: Duration,
    /// Overall request timeout; `None` lets a stream run as long as the provider takes
    pub request_timeout: Option<Duration>,
    /// TCP keepalive duration
    pub tcp_keepalive: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            model: models::google::DEFAULT_MODEL.to_string(),
            base_url: urls::GEMINI_API_BASE.to_string(),
            connect_timeout: Duration::from_secs(client::CONNECT_TIMEOUT_SECS),
            request_timeout: None,
            tcp_keepalive: Duration::from_secs(60),
            user_agent: client::USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Build from the `[model]` and `[client]` configuration sections
    pub fn from_sections(model: &ModelConfig, section: &ClientSection) -> Self {
        Self {
            model: model.name.clone(),
            base_url: model.base_url.clone(),
            connect_timeout: Duration::from_secs(section.connect_timeout_secs),
            request_timeout: section.request_timeout_secs.map(Duration::from_secs),
            user_agent: section.user_agent.clone(),
            ..Self::default()
        }
    }

    /// Point the client at another endpoint (used by tests against a local server)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Streaming endpoint for the configured model
    pub fn stream_url(&self) -> String {
        format!(
            "{}/models/{}:streamGenerateContent?alt=sse",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}
