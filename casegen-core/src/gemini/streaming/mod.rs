pub mod processor;

pub use processor::{SseDecoder, error_message_from_body, parse_event};

use std::time::Instant;

/// Streaming metrics for monitoring and debugging
#[derive(Debug, Clone, Default)]
pub struct StreamingMetrics {
    pub first_chunk_time: Option<Instant>,
    pub total_chunks: usize,
    pub total_bytes: usize,
    pub total_events: usize,
}
