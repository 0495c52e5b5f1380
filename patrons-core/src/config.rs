//! Run configuration.
//!
//! Layering, lowest to highest precedence:
//!
//! 1. built-in defaults ([`Config::default`])
//! 2. optional YAML file (`patrons.yaml` in the working directory, or `--config`)
//! 3. environment variables ([`Config::apply_env`])
//! 4. CLI flags (applied by the binary)
//!
//! Credentials and the CI output path only ever come from the environment;
//! they are skipped when (de)serializing the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::RegistryContract;

pub const DEFAULT_API_BASE: &str = "https://www.patreon.com/api/oauth2/v2";
pub const DEFAULT_OUTPUT_PATH: &str = "src/Core/PatronsInit.lua";
pub const DEFAULT_CONFIG_FILE: &str = "patrons.yaml";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_PAGES: usize = 100;
pub const DEFAULT_PAGE_SIZE: u32 = 500;
pub const DEFAULT_WEBHOOK_FOOTER: &str = "Patreon Supporters";

pub const ENV_ACCESS_TOKEN: &str = "PATREON_ACCESS_TOKEN";
pub const ENV_CAMPAIGN_ID: &str = "PATREON_CAMPAIGN_ID";
pub const ENV_GITHUB_OUTPUT: &str = "GITHUB_OUTPUT";
pub const ENV_WEBHOOK_URL: &str = "PATRONS_WEBHOOK_URL";

/// Chat webhook settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookConfig {
    /// Destination URL. `None` disables notifications.
    pub url: Option<String>,
    /// Footer text attached to every announcement.
    pub footer: String,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: None,
            footer: DEFAULT_WEBHOOK_FOOTER.to_string(),
        }
    }
}

/// Everything one sync run needs to know.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Generated Lua document location.
    pub output_path: PathBuf,
    pub api_base: String,
    pub campaign_id: Option<String>,
    /// Per-request network timeout.
    pub timeout_secs: u64,
    /// Pagination safety cap.
    pub max_pages: usize,
    pub page_size: u32,
    pub webhook: WebhookConfig,
    pub registry: RegistryContract,

    #[serde(skip)]
    pub access_token: Option<String>,
    /// Orchestration output file (`$GITHUB_OUTPUT`).
    #[serde(skip)]
    pub github_output: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            api_base: DEFAULT_API_BASE.to_string(),
            campaign_id: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_pages: DEFAULT_MAX_PAGES,
            page_size: DEFAULT_PAGE_SIZE,
            webhook: WebhookConfig::default(),
            registry: RegistryContract::default(),
            access_token: None,
            github_output: None,
        }
    }
}

impl Config {
    /// Parse a YAML config file.
    pub fn load_at(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config =
            serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Load the file layer.
    ///
    /// An explicit path must exist. Without one, `patrons.yaml` in `dir` is used
    /// when present and defaults otherwise.
    pub fn load_file_layer(explicit: Option<&Path>, dir: &Path) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load_at(path),
            None => {
                let implicit = dir.join(DEFAULT_CONFIG_FILE);
                if implicit.exists() {
                    Self::load_at(&implicit)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Overlay the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Overlay values from `lookup`. Empty values count as unset.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = get(ENV_ACCESS_TOKEN) {
            self.access_token = Some(token);
        }
        if let Some(id) = get(ENV_CAMPAIGN_ID) {
            self.campaign_id = Some(id);
        }
        if let Some(path) = get(ENV_GITHUB_OUTPUT) {
            self.github_output = Some(PathBuf::from(path));
        }
        if let Some(url) = get(ENV_WEBHOOK_URL) {
            self.webhook.url = Some(url);
        }
    }

    /// Bearer token for the upstream API.
    pub fn access_token(&self) -> Result<&str, ConfigError> {
        self.access_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingToken)
    }

    /// Reject values that would make a run meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "api_base",
                message: "must not be empty".to_string(),
            });
        }
        if self.max_pages == 0 {
            return Err(ConfigError::Invalid {
                field: "max_pages",
                message: "must be at least 1".to_string(),
            });
        }
        if self.page_size == 0 {
            return Err(ConfigError::Invalid {
                field: "page_size",
                message: "must be at least 1".to_string(),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "timeout_secs",
                message: "must be at least 1".to_string(),
            });
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid {
                field: "output_path",
                message: "must not be empty".to_string(),
            });
        }
        let registry = [
            ("registry.global", &self.registry.global),
            ("registry.namespace", &self.registry.namespace),
            ("registry.add_batch", &self.registry.add_batch),
            ("registry.clear", &self.registry.clear),
        ];
        for (field, value) in registry {
            if !is_lua_identifier(value) {
                return Err(ConfigError::Invalid {
                    field,
                    message: format!("'{value}' is not a Lua identifier"),
                });
            }
        }
        Ok(())
    }
}

/// ASCII letter or underscore, then letters, digits or underscores.
fn is_lua_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
