//! # casegen-core - AI test case generation for healthcare requirements
//!
//! `casegen-core` turns a software requirement (an identifier plus free
//! text) into a prompt for a Google Gemini model and streams the generated
//! test cases back to a display region as they arrive.
//!
//! ## Architecture Overview
//!
//! - `cli/`: command-line arguments.
//! - `config/`: `casegen.toml` loading, credential lookup, and constants.
//! - `prompts/`: the test case prompt template and slot substitution.
//! - `llm/`: the [`TextGenerator`] seam and generation errors.
//! - `gemini/`: the Gemini REST client with SSE stream decoding.
//! - `core/`: the [`InteractionController`] that ties a request together.
//! - `ui/`: the requirement form, static content, and display sinks.
//!
//! ## Quickstart
//!
//! ```rust,ignore
//! use casegen_core::{
//!     ApiKeySources, Client, InteractionController, MarkdownRenderer, PromptTemplate,
//!     TerminalSink, get_api_key,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), anyhow::Error> {
//!     let (api_key, _source) = get_api_key(&ApiKeySources::default())?;
//!     let client = Client::new(api_key, "gemini-1.5-flash-latest")?;
//!     let controller = InteractionController::new(client, PromptTemplate::builtin());
//!
//!     let mut sink = TerminalSink::stdout(MarkdownRenderer::default());
//!     let outcome = controller
//!         .generate("REQ-045", "As a doctor, I want to search for a patient by last name", &mut sink)
//!         .await;
//!     println!("completed: {}", outcome.is_completed());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod gemini;
pub mod llm;
pub mod prompts;
pub mod ui;

pub use cli::{Cli, Commands};
pub use config::{
    ApiKey, ApiKeySources, CasegenConfig, ConfigManager, ConfigurationError, KeySource,
    get_api_key, load_dotenv,
};
pub use core::{GenerationOutcome, InteractionController, RequirementInput, ValidationError};
pub use gemini::{Client, ClientConfig};
pub use llm::{Fragment, FragmentStream, GenerationError, TextGenerator};
pub use prompts::PromptTemplate;
pub use ui::{DisplaySink, MarkdownRenderer, PlainSink, RequirementForm, TerminalSink};
