//! Terminal user interface
//!
//! The requirement form, the static sidebar content, and the display sinks
//! that show streamed output.

pub mod form;
pub mod markdown;
pub mod sidebar;
pub mod sink;
pub mod spinner;

pub use form::RequirementForm;
pub use markdown::MarkdownRenderer;
pub use sink::{DisplaySink, PlainSink, TerminalSink};
pub use spinner::Spinner;
