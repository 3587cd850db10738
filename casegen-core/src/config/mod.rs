//! casegen configuration module
//!
//! Handles loading `casegen.toml`, resolving the API credential, and the
//! constants shared across the crate.

pub mod api_keys;
pub mod constants;
pub mod loader;

pub use api_keys::{ApiKey, ApiKeySources, ConfigurationError, KeySource, get_api_key, load_dotenv};
pub use loader::{
    CasegenConfig, ClientSection, ConfigManager, CredentialsConfig, ModelConfig, PromptConfig,
};

use serde::{Deserialize, Serialize};

/// UI configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiConfig {
    /// Show the About blurb and sample requirements before the form
    #[serde(default = "default_true")]
    pub show_sidebar: bool,

    /// Render generated output as styled Markdown (plain text otherwise)
    #[serde(default = "default_true")]
    pub render_markdown: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_sidebar: default_true(),
            render_markdown: default_true(),
        }
    }
}

fn default_true() -> bool {
    true
}
