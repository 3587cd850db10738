//! Incremental decoder for Gemini Server-Sent Events responses
//!
//! Bytes arrive in arbitrary chunks from the HTTP body. The decoder buffers
//! raw bytes, splits on `\n` (so multi-byte UTF-8 characters are never cut),
//! and groups `data:` lines into events. Each complete event is parsed into a
//! [`Fragment`] as soon as its terminating blank line arrives.

use crate::gemini::models::GenerateContentResponse;
use crate::gemini::streaming::StreamingMetrics;
use crate::llm::provider::{Fragment, GenerationError};
use serde_json::Value;
use std::time::Instant;

/// Line-oriented SSE event decoder
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    current_event_data: String,
    metrics: StreamingMetrics,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a body chunk; returns the data payloads of every event it completed
    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        if self.metrics.first_chunk_time.is_none() {
            self.metrics.first_chunk_time = Some(Instant::now());
        }
        self.metrics.total_chunks += 1;
        self.metrics.total_bytes += bytes.len();
        self.buffer.extend_from_slice(bytes);

        let mut events = Vec::new();
        while let Some(newline) = self.buffer.iter().position(|&b| b == b'\n') {
            let line_bytes: Vec<u8> = self.buffer.drain(..=newline).collect();
            let line = String::from_utf8_lossy(&line_bytes[..line_bytes.len() - 1]).into_owned();
            if let Some(event) = self.handle_line(&line) {
                events.push(event);
            }
        }
        events
    }

    /// Flush whatever is left once the body ends
    pub fn finish(&mut self) -> Option<String> {
        if !self.buffer.is_empty() {
            let remaining = std::mem::take(&mut self.buffer);
            let line = String::from_utf8_lossy(&remaining).into_owned();
            if let Some(event) = self.handle_line(&line) {
                self.current_event_data.clear();
                return Some(event);
            }
        }
        self.take_event()
    }

    pub fn metrics(&self) -> &StreamingMetrics {
        &self.metrics
    }

    fn handle_line(&mut self, raw_line: &str) -> Option<String> {
        let line = raw_line.trim_end_matches('\r');

        if line.trim().is_empty() {
            return self.take_event();
        }

        let trimmed = line.trim_start();

        if trimmed.starts_with(':')
            || trimmed.starts_with("event:")
            || trimmed.starts_with("id:")
            || trimmed.starts_with("retry:")
        {
            return None;
        }

        if let Some(data) = trimmed.strip_prefix("data:") {
            let data = data.strip_prefix(' ').unwrap_or(data);
            if data.trim() == "[DONE]" {
                return self.take_event();
            }
            if !self.current_event_data.is_empty() {
                self.current_event_data.push('\n');
            }
            self.current_event_data.push_str(data);
            return None;
        }

        // Bare JSON line from a non-SSE body; treat it as a self-contained event
        if self.current_event_data.is_empty() && trimmed.starts_with('{') {
            return Some(trimmed.to_string());
        }

        if !self.current_event_data.is_empty() {
            self.current_event_data.push('\n');
        }
        self.current_event_data.push_str(trimmed);
        None
    }

    fn take_event(&mut self) -> Option<String> {
        if self.current_event_data.trim().is_empty() {
            self.current_event_data.clear();
            return None;
        }
        self.metrics.total_events += 1;
        Some(std::mem::take(&mut self.current_event_data))
    }
}

/// Parse one event payload into a fragment
pub fn parse_event(data: &str) -> Result<Fragment, GenerationError> {
    let trimmed = data.trim();

    let value: Value = serde_json::from_str(trimmed).map_err(|e| GenerationError::Parse {
        message: format!("Failed to parse streaming JSON: {e}"),
        raw_response: trimmed.to_string(),
    })?;

    if let Some(error) = value.get("error") {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Gemini streaming error")
            .to_string();
        let status_code = error
            .get("code")
            .and_then(Value::as_u64)
            .and_then(|code| u16::try_from(code).ok())
            .unwrap_or(500);
        return Err(GenerationError::Api {
            status_code,
            message,
        });
    }

    let response: GenerateContentResponse =
        serde_json::from_value(value).map_err(|e| GenerationError::Parse {
            message: format!("Unexpected response chunk: {e}"),
            raw_response: trimmed.to_string(),
        })?;

    if let Some(reason) = response.block_reason() {
        return Err(GenerationError::Blocked { reason });
    }

    Ok(Fragment {
        text: response.text(),
        finish_reason: response.finish_reason().map(str::to_string),
    })
}

/// Extract a readable message from a non-2xx response body
pub fn error_message_from_body(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("error")
                .and_then(|error| error.get("message"))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| {
            let body = body.trim();
            if body.is_empty() {
                "empty response body".to_string()
            } else {
                body.to_string()
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHUNK_A: &str = r#"{"candidates":[{"content":{"parts":[{"text":"Hello, "}],"role":"model"}}]}"#;
    const CHUNK_B: &str = r#"{"candidates":[{"content":{"parts":[{"text":"world"}],"role":"model"},"finishReason":"STOP"}]}"#;

    fn sse_body() -> String {
        format!("data: {CHUNK_A}\r\n\r\ndata: {CHUNK_B}\r\n\r\n")
    }

    #[test]
    fn test_decodes_events_in_order() {
        let mut decoder = SseDecoder::new();
        let events = decoder.push(sse_body().as_bytes());
        assert_eq!(events, vec![CHUNK_A.to_string(), CHUNK_B.to_string()]);
        assert_eq!(decoder.finish(), None);
        assert_eq!(decoder.metrics().total_events, 2);
    }

    #[test]
    fn test_decodes_across_arbitrary_chunk_boundaries() {
        let body = format!("data: {}\n\n", r#"{"candidates":[{"content":{"parts":[{"text":"Prüfung ✓"}]}}]}"#);
        let bytes = body.as_bytes();

        for split in 1..bytes.len() {
            let mut decoder = SseDecoder::new();
            let mut events = decoder.push(&bytes[..split]);
            events.extend(decoder.push(&bytes[split..]));
            events.extend(decoder.finish());
            assert_eq!(events.len(), 1, "split at {split}");
            let fragment = parse_event(&events[0]).unwrap();
            assert_eq!(fragment.content(), Some("Prüfung ✓"));
        }
    }

    #[test]
    fn test_finish_flushes_unterminated_event() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.push(format!("data: {CHUNK_A}").as_bytes()).is_empty());
        assert_eq!(decoder.finish(), Some(CHUNK_A.to_string()));
    }

    #[test]
    fn test_ignores_comments_and_control_fields() {
        let mut decoder = SseDecoder::new();
        let body = format!(": keep-alive\nevent: message\nid: 7\ndata: {CHUNK_A}\n\ndata: [DONE]\n\n");
        assert_eq!(decoder.push(body.as_bytes()), vec![CHUNK_A.to_string()]);
    }

    #[test]
    fn test_multiline_data_is_joined() {
        let mut decoder = SseDecoder::new();
        let events = decoder.push(b"data: {\"candidates\":\ndata: []}\n\n");
        assert_eq!(events, vec!["{\"candidates\":\n[]}".to_string()]);
        assert_eq!(parse_event(&events[0]).unwrap(), Fragment::empty());
    }

    #[test]
    fn test_parse_event_text_and_finish_reason() {
        let fragment = parse_event(CHUNK_B).unwrap();
        assert_eq!(fragment.content(), Some("world"));
        assert_eq!(fragment.finish_reason.as_deref(), Some("STOP"));
    }

    #[test]
    fn test_parse_event_error_object() {
        let err = parse_event(r#"{"error":{"code":429,"message":"Resource has been exhausted"}}"#)
            .unwrap_err();
        assert_eq!(
            err,
            GenerationError::Api {
                status_code: 429,
                message: "Resource has been exhausted".to_string()
            }
        );
    }

    #[test]
    fn test_parse_event_blocked_prompt() {
        let err = parse_event(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#).unwrap_err();
        assert!(matches!(err, GenerationError::Blocked { .. }));
    }

    #[test]
    fn test_parse_event_invalid_json() {
        let err = parse_event("{not json").unwrap_err();
        assert!(matches!(err, GenerationError::Parse { .. }));
    }

    #[test]
    fn test_error_message_from_body() {
        assert_eq!(
            error_message_from_body(r#"{"error":{"code":400,"message":"API key not valid.","status":"INVALID_ARGUMENT"}}"#),
            "API key not valid."
        );
        assert_eq!(error_message_from_body("Bad Gateway"), "Bad Gateway");
        assert_eq!(error_message_from_body(""), "empty response body");
    }
}
