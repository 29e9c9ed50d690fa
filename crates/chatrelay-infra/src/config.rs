//! Startup configuration loader.
//!
//! Credentials come from the environment (`TELEGRAM_TOKEN`, `OPENAI_API_KEY`,
//! `BOT_USERNAME`). Tuning knobs come from an optional `config.toml`, looked
//! up in the config directory (`~/.chatrelay/` in production) unless a path
//! is given explicitly.

use std::path::{Path, PathBuf};

use secrecy::SecretString;

use chatrelay_types::config::FileConfig;
use chatrelay_types::error::ConfigError;

use crate::secret::EnvSecretProvider;

/// Overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "CHATRELAY_CONFIG_DIR";

pub const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_TOKEN";
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const BOT_USERNAME_VAR: &str = "BOT_USERNAME";

/// Resolve the config directory.
///
/// Uses `CHATRELAY_CONFIG_DIR` if set, otherwise `~/.chatrelay`.
pub fn resolve_config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".chatrelay");
    }

    // Last resort: current directory
    PathBuf::from(".chatrelay")
}

/// Default location of `config.toml`.
pub fn default_config_path() -> PathBuf {
    resolve_config_dir().join("config.toml")
}

/// Load `config.toml` from its default location.
///
/// - If the file does not exist, returns [`FileConfig::default()`].
/// - If the file exists but fails to read or parse, logs a warning and
///   returns the default.
pub async fn load_file_config(config_path: &Path) -> FileConfig {
    let content = match tokio::fs::read_to_string(config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return FileConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return FileConfig::default();
        }
    };

    match toml::from_str::<FileConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            FileConfig::default()
        }
    }
}

/// Load a config file the operator named explicitly. Any failure is fatal.
pub async fn load_explicit_config(config_path: &Path) -> Result<FileConfig, ConfigError> {
    let content = tokio::fs::read_to_string(config_path)
        .await
        .map_err(|err| ConfigError::Io {
            path: config_path.display().to_string(),
            message: err.to_string(),
        })?;

    toml::from_str(&content).map_err(|err| ConfigError::Parse {
        path: config_path.display().to_string(),
        message: err.to_string(),
    })
}

/// Everything the bot needs at startup.
#[derive(Debug)]
pub struct RelayConfig {
    pub telegram_token: SecretString,
    pub openai_api_key: SecretString,
    /// The bot's own handle, without the leading `@`.
    pub bot_username: String,
    pub file: FileConfig,
    /// Where `file` was looked up.
    pub config_path: PathBuf,
}

impl RelayConfig {
    /// Load from the process environment and `config.toml`.
    pub async fn load(explicit_path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(explicit_path, &EnvSecretProvider::new()).await
    }

    /// Load with an injected environment.
    pub async fn load_with<F>(
        explicit_path: Option<&Path>,
        env: &EnvSecretProvider<F>,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let telegram_token = env.require_secret(TELEGRAM_TOKEN_VAR)?;
        let openai_api_key = env.require_secret(OPENAI_API_KEY_VAR)?;
        let bot_username = normalize_handle(&env.require(BOT_USERNAME_VAR)?)
            .ok_or(ConfigError::MissingVariable(BOT_USERNAME_VAR))?;

        let (file, config_path) = match explicit_path {
            Some(path) => (load_explicit_config(path).await?, path.to_path_buf()),
            None => {
                let path = default_config_path();
                (load_file_config(&path).await, path)
            }
        };

        Ok(Self {
            telegram_token,
            openai_api_key,
            bot_username,
            file,
            config_path,
        })
    }
}

/// Strip one leading `@` from a bot handle. A handle that is empty after
/// stripping is rejected, since `@` alone would match every mention.
fn normalize_handle(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let handle = trimmed.strip_prefix('@').unwrap_or(trimmed).trim();
    (!handle.is_empty()).then(|| handle.to_string())
}
