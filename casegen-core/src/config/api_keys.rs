//! API key management for secure retrieval from environment variables,
//! .env files, and Streamlit-style `secrets.toml` files.
//!
//! The key is looked up exactly once at startup. Environment variables take
//! priority, then secrets files in the workspace, then the user's home
//! directory. The resolved [`ApiKey`] is handed to the generation client
//! constructor and never exposed in full through `Debug` or `Display`.

use crate::config::constants::{credentials, paths};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors raised while resolving configuration at startup
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("API key not found. Set {env_var} (or add it to .env) or add it to {searched}")]
    MissingApiKey { env_var: String, searched: String },
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize configuration: {0}")]
    Serialize(String),
    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("invalid prompt template {path}: {message}")]
    InvalidTemplate { path: PathBuf, message: String },
    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// The Gemini API credential
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Raw key for request authentication
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Masked form safe for display, e.g. `AIza…c9Xk`
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 8 {
            return "****".to_string();
        }
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}…{tail}")
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&self.masked()).finish()
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

/// Where a key was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    Environment(String),
    SecretsFile(PathBuf),
}

impl fmt::Display for KeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeySource::Environment(name) => write!(f, "environment variable {name}"),
            KeySource::SecretsFile(path) => write!(f, "{}", path.display()),
        }
    }
}

/// API key sources to consult, in priority order
#[derive(Debug, Clone)]
pub struct ApiKeySources {
    /// Primary environment variable name
    pub primary_env: String,
    /// Additional environment variables tried after the primary one
    pub fallback_envs: Vec<String>,
    /// Secrets files tried after the environment
    pub secrets_files: Vec<PathBuf>,
}

impl Default for ApiKeySources {
    fn default() -> Self {
        Self {
            primary_env: credentials::PRIMARY_ENV.to_string(),
            fallback_envs: vec![credentials::FALLBACK_ENV.to_string()],
            secrets_files: Vec::new(),
        }
    }
}

impl ApiKeySources {
    /// Default sources for a workspace: environment, then workspace and home secrets files
    pub fn for_workspace(workspace: &Path) -> Self {
        let mut secrets_files = vec![
            workspace.join(credentials::SECRETS_FILE),
            workspace
                .join(paths::STREAMLIT_DIR)
                .join(credentials::SECRETS_FILE),
            workspace.join(paths::CONFIG_DIR).join(credentials::SECRETS_FILE),
        ];
        if let Some(home) = dirs::home_dir() {
            secrets_files.push(home.join(paths::CONFIG_DIR).join(credentials::SECRETS_FILE));
        }

        Self {
            secrets_files,
            ..Self::default()
        }
    }

    /// Override the primary environment variable name
    pub fn with_primary_env(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if name != self.primary_env {
            let previous = std::mem::replace(&mut self.primary_env, name);
            if !self.fallback_envs.contains(&previous) {
                self.fallback_envs.insert(0, previous);
            }
        }
        self
    }

    fn env_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.primary_env.as_str()).chain(self.fallback_envs.iter().map(String::as_str))
    }
}

/// Load environment variables from a .env file in the current directory.
///
/// A missing file is fine; an unreadable one is logged and ignored.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => debug!(path = %path.display(), "loaded environment from .env"),
        Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!("failed to load .env file: {e}"),
    }
}

/// Resolve the API key from the configured sources.
pub fn get_api_key(sources: &ApiKeySources) -> Result<(ApiKey, KeySource), ConfigurationError> {
    for name in sources.env_names() {
        if let Ok(value) = env::var(name) {
            let value = value.trim();
            if !value.is_empty() {
                return Ok((ApiKey::new(value), KeySource::Environment(name.to_string())));
            }
        }
    }

    for path in &sources.secrets_files {
        if !path.is_file() {
            continue;
        }
        if let Some(key) = read_secrets_file(path, sources)? {
            return Ok((key, KeySource::SecretsFile(path.clone())));
        }
    }

    let searched = sources
        .secrets_files
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");

    Err(ConfigurationError::MissingApiKey {
        env_var: sources.primary_env.clone(),
        searched: if searched.is_empty() {
            credentials::SECRETS_FILE.to_string()
        } else {
            searched
        },
    })
}

#[derive(Debug, Deserialize)]
#[serde(transparent)]
struct SecretsFile(BTreeMap<String, toml::Value>);

fn read_secrets_file(
    path: &Path,
    sources: &ApiKeySources,
) -> Result<Option<ApiKey>, ConfigurationError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigurationError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let secrets: SecretsFile = toml::from_str(&content).map_err(|e| ConfigurationError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let key = sources.env_names().find_map(|name| {
        secrets
            .0
            .get(name)
            .and_then(toml::Value::as_str)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(ApiKey::new)
    });

    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    fn isolated_sources(dir: &Path) -> ApiKeySources {
        ApiKeySources {
            primary_env: "CASEGEN_TEST_PRIMARY_KEY".to_string(),
            fallback_envs: vec!["CASEGEN_TEST_FALLBACK_KEY".to_string()],
            secrets_files: vec![dir.join("secrets.toml")],
        }
    }

    #[test]
    #[serial]
    fn test_get_api_key_from_env() {
        let dir = TempDir::new().unwrap();
        unsafe {
            env::set_var("CASEGEN_TEST_PRIMARY_KEY", "env-key-123456789");
        }

        let (key, source) = get_api_key(&isolated_sources(dir.path())).unwrap();
        assert_eq!(key.expose(), "env-key-123456789");
        assert_eq!(
            source,
            KeySource::Environment("CASEGEN_TEST_PRIMARY_KEY".to_string())
        );

        unsafe {
            env::remove_var("CASEGEN_TEST_PRIMARY_KEY");
        }
    }

    #[test]
    #[serial]
    fn test_fallback_env_used_when_primary_empty() {
        let dir = TempDir::new().unwrap();
        unsafe {
            env::set_var("CASEGEN_TEST_PRIMARY_KEY", "  ");
            env::set_var("CASEGEN_TEST_FALLBACK_KEY", "fallback-key-000");
        }

        let (key, _) = get_api_key(&isolated_sources(dir.path())).unwrap();
        assert_eq!(key.expose(), "fallback-key-000");

        unsafe {
            env::remove_var("CASEGEN_TEST_PRIMARY_KEY");
            env::remove_var("CASEGEN_TEST_FALLBACK_KEY");
        }
    }

    #[test]
    #[serial]
    fn test_get_api_key_from_secrets_file() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("secrets.toml"),
            "CASEGEN_TEST_PRIMARY_KEY = \"file-key-abcdefgh\"\n",
        )
        .unwrap();

        let (key, source) = get_api_key(&isolated_sources(dir.path())).unwrap();
        assert_eq!(key.expose(), "file-key-abcdefgh");
        assert_eq!(source, KeySource::SecretsFile(dir.path().join("secrets.toml")));
    }

    #[test]
    #[serial]
    fn test_env_takes_priority_over_secrets_file() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("secrets.toml"),
            "CASEGEN_TEST_PRIMARY_KEY = \"file-key\"\n",
        )
        .unwrap();
        unsafe {
            env::set_var("CASEGEN_TEST_FALLBACK_KEY", "env-key");
        }

        let (key, _) = get_api_key(&isolated_sources(dir.path())).unwrap();
        assert_eq!(key.expose(), "env-key");

        unsafe {
            env::remove_var("CASEGEN_TEST_FALLBACK_KEY");
        }
    }

    #[test]
    #[serial]
    fn test_missing_key_is_configuration_error() {
        let dir = TempDir::new().unwrap();
        let err = get_api_key(&isolated_sources(dir.path())).unwrap_err();
        assert!(matches!(err, ConfigurationError::MissingApiKey { .. }));
        assert!(err.to_string().contains("CASEGEN_TEST_PRIMARY_KEY"));
    }

    #[test]
    #[serial]
    fn test_malformed_secrets_file_is_reported() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("secrets.toml"), "not = [valid").unwrap();
        let err = get_api_key(&isolated_sources(dir.path())).unwrap_err();
        assert!(matches!(err, ConfigurationError::Parse { .. }));
    }

    #[test]
    fn test_api_key_is_masked() {
        let key = ApiKey::new("AIzaSyExampleKey1234");
        assert_eq!(key.to_string(), "AIza…1234");
        assert!(!format!("{key:?}").contains("ExampleKey"));
        assert_eq!(ApiKey::new("short").masked(), "****");
    }

    #[test]
    fn test_with_primary_env_keeps_previous_as_fallback() {
        let sources = ApiKeySources::default().with_primary_env("MY_KEY");
        let names: Vec<&str> = sources.env_names().collect();
        assert_eq!(names, vec!["MY_KEY", "GOOGLE_API_KEY", "GEMINI_API_KEY"]);
    }
}
