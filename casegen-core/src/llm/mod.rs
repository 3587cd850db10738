//! LLM integration layer
//!
//! A single streamed-generation seam ([`provider::TextGenerator`]) with the
//! Gemini REST client as its implementation.

pub mod provider;

pub use provider::{Fragment, FragmentStream, GenerationError, TextGenerator};
