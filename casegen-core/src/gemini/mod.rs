//! Gemini API client
//!
//! Split into HTTP client configuration, wire models, and the SSE streaming
//! decoder.

pub mod client;
pub mod models;
pub mod streaming;

pub use client::{Client, ClientConfig};
pub use models::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, Part, PromptFeedback,
};
pub use streaming::{SseDecoder, StreamingMetrics};
