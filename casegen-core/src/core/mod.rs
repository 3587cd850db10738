//! Core generation flow
//!
//! [`InteractionController`] validates a requirement, renders the prompt,
//! drives one streamed generation and pushes the accumulated output to a
//! [`DisplaySink`](crate::ui::DisplaySink) after every fragment.

pub mod controller;

pub use controller::{GenerationOutcome, InteractionController, RequirementInput, ValidationError};
