//! Prompt construction

pub mod template;

pub use template::{PromptTemplate, REQ_ID_SLOT, REQ_TEXT_SLOT};
