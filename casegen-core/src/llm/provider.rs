//! Text generation provider abstraction
//!
//! The interaction controller only depends on [`TextGenerator`]: given a
//! finished prompt it opens a streamed call and hands back a lazy stream of
//! [`Fragment`]s in arrival order. The Gemini client is the production
//! implementation; tests substitute scripted generators.

use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;

/// One decoded chunk of a streamed generation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    pub text: Option<String>,
    pub finish_reason: Option<String>,
}

impl Fragment {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            finish_reason: None,
        }
    }

    /// A fragment carrying no text payload
    pub fn empty() -> Self {
        Self::default()
    }

    /// Text payload, `None` when absent or empty
    pub fn content(&self) -> Option<&str> {
        self.text.as_deref().filter(|text| !text.is_empty())
    }
}

/// Lazy, finite, non-restartable sequence of fragments
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<Fragment, GenerationError>> + Send>>;

/// Failure of a generation call, at open time or mid-stream
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    #[error("Network error: {message}")]
    Network { message: String },
    #[error("API error ({status_code}): {message}")]
    Api { status_code: u16, message: String },
    #[error("Response blocked by the provider: {reason}")]
    Blocked { reason: String },
    #[error("Parse error: {message}")]
    Parse {
        message: String,
        raw_response: String,
    },
    #[error("Streaming error: {message}")]
    Stream { message: String },
}

impl GenerationError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn stream(message: impl Into<String>) -> Self {
        Self::Stream {
            message: message.into(),
        }
    }
}

/// Streamed text generation capability
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Provider name (e.g. "gemini")
    fn name(&self) -> &str;

    /// Model used for generation
    fn model(&self) -> &str;

    /// Open a streamed generation for `prompt`
    async fn stream(&self, prompt: &str) -> Result<FragmentStream, GenerationError>;
}

#[async_trait]
impl<T: TextGenerator + ?Sized> TextGenerator for std::sync::Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn model(&self) -> &str {
        (**self).model()
    }

    async fn stream(&self, prompt: &str) -> Result<FragmentStream, GenerationError> {
        (**self).stream(prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_content_skips_empty() {
        assert_eq!(Fragment::text("hi").content(), Some("hi"));
        assert_eq!(Fragment::text("").content(), None);
        assert_eq!(Fragment::empty().content(), None);
    }

    #[test]
    fn test_error_messages_are_human_readable() {
        let err = GenerationError::Api {
            status_code: 403,
            message: "API key not valid".to_string(),
        };
        assert_eq!(err.to_string(), "API error (403): API key not valid");
        assert_eq!(
            GenerationError::network("connection refused").to_string(),
            "Network error: connection refused"
        );
    }
}
