use crate::config::UiConfig;
use crate::config::api_keys::ConfigurationError;
use crate::config::constants::{client, credentials, models, paths, urls};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Model selection
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelConfig {
    /// Gemini model ID
    #[serde(default = "default_model")]
    pub name: String,

    /// REST API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_model() -> String {
    models::google::DEFAULT_MODEL.to_string()
}
fn default_base_url() -> String {
    urls::GEMINI_API_BASE.to_string()
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: default_model(),
            base_url: default_base_url(),
        }
    }
}

/// HTTP transport settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientSection {
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Overall request timeout; unset means the stream may run as long as the provider takes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_connect_timeout() -> u64 {
    client::CONNECT_TIMEOUT_SECS
}
fn default_user_agent() -> String {
    client::USER_AGENT.to_string()
}

impl Default for ClientSection {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout(),
            request_timeout_secs: None,
            user_agent: default_user_agent(),
        }
    }
}

/// Credential lookup settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CredentialsConfig {
    /// Primary environment variable holding the API key
    #[serde(default = "default_env_var")]
    pub env_var: String,
}

fn default_env_var() -> String {
    credentials::PRIMARY_ENV.to_string()
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            env_var: default_env_var(),
        }
    }
}

/// Prompt template settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PromptConfig {
    /// Custom prompt skeleton; must contain `{req_id}` and `{req_text}`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_path: Option<PathBuf>,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CasegenConfig {
    #[serde(default)]
    pub model: ModelConfig,

    #[serde(default)]
    pub client: ClientSection,

    #[serde(default)]
    pub credentials: CredentialsConfig,

    #[serde(default)]
    pub prompt: PromptConfig,

    #[serde(default)]
    pub ui: UiConfig,
}

impl CasegenConfig {
    /// Serialized default configuration with a header comment
    pub fn sample_toml() -> Result<String, ConfigurationError> {
        let body = toml::to_string_pretty(&CasegenConfig::default())
            .map_err(|e| ConfigurationError::Serialize(e.to_string()))?;
        Ok(format!(
            "# casegen configuration\n# Uncomment `request_timeout_secs` under [client] or `template_path` under [prompt] to customize.\n\n{body}"
        ))
    }

    /// Write the sample configuration to `output`, refusing to overwrite unless `force`
    pub fn create_sample_config(output: &Path, force: bool) -> Result<bool, ConfigurationError> {
        if output.exists() && !force {
            return Ok(false);
        }
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ConfigurationError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(output, Self::sample_toml()?).map_err(|source| ConfigurationError::Write {
            path: output.to_path_buf(),
            source,
        })?;
        Ok(true)
    }
}

/// Configuration manager for loading configuration from disk
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: CasegenConfig,
    config_path: Option<PathBuf>,
    workspace: PathBuf,
}

impl ConfigManager {
    /// Load configuration from the default locations under the current directory
    pub fn load() -> Result<Self, ConfigurationError> {
        let cwd = std::env::current_dir().map_err(|source| ConfigurationError::Read {
            path: PathBuf::from("."),
            source,
        })?;
        Self::load_from_workspace(cwd)
    }

    /// Candidate config files in lookup order
    pub fn candidate_paths(workspace: &Path) -> Vec<PathBuf> {
        let mut candidates = vec![
            workspace.join(paths::CONFIG_FILE),
            workspace.join(paths::CONFIG_DIR).join(paths::CONFIG_FILE),
        ];
        if let Some(home) = dirs::home_dir() {
            candidates.push(home.join(paths::CONFIG_DIR).join(paths::CONFIG_FILE));
        }
        candidates
    }

    /// Load configuration for a workspace, falling back to defaults when no file exists
    pub fn load_from_workspace(workspace: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let workspace = workspace.as_ref();

        for candidate in Self::candidate_paths(workspace) {
            if candidate.is_file() {
                let mut manager = Self::load_from_file(&candidate)?;
                manager.workspace = workspace.to_path_buf();
                return Ok(manager);
            }
        }

        debug!("no configuration file found, using defaults");
        Ok(Self {
            config: CasegenConfig::default(),
            config_path: None,
            workspace: workspace.to_path_buf(),
        })
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigurationError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: CasegenConfig =
            toml::from_str(&content).map_err(|e| ConfigurationError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        debug!(path = %path.display(), "loaded configuration");

        let workspace = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self {
            config,
            config_path: Some(path.to_path_buf()),
            workspace,
        })
    }

    /// Get the loaded configuration
    pub fn config(&self) -> &CasegenConfig {
        &self.config
    }

    /// Mutable access for command-line overrides
    pub fn config_mut(&mut self) -> &mut CasegenConfig {
        &mut self.config
    }

    /// Get the configuration file path (if loaded from file)
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Directory used to resolve relative paths and secrets files
    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    /// Resolve a possibly relative path against the workspace
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workspace.join(path)
        }
    }
}
