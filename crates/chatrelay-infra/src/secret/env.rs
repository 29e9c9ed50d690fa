//! Environment variable secret provider.
//!
//! A read-only provider resolving credentials from environment variables.
//! The lookup function is injectable so tests never touch the process
//! environment.

use chatrelay_types::error::ConfigError;
use secrecy::SecretString;

/// Signature of a variable lookup.
pub type Lookup = fn(&str) -> Option<String>;

/// Environment variable secret provider.
pub struct EnvSecretProvider<F = Lookup> {
    lookup: F,
}

impl EnvSecretProvider {
    /// Create a provider reading the process environment.
    pub fn new() -> Self {
        Self {
            lookup: read_process_env,
        }
    }
}

impl Default for EnvSecretProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> EnvSecretProvider<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Create a provider backed by an arbitrary lookup.
    pub fn with_lookup(lookup: F) -> Self {
        Self { lookup }
    }

    /// Value of `key`, or `None` when unset or blank.
    pub fn get(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Value of `key`, failing with [`ConfigError::MissingVariable`].
    pub fn require(&self, key: &'static str) -> Result<String, ConfigError> {
        self.get(key).ok_or(ConfigError::MissingVariable(key))
    }

    /// Like [`require`](Self::require), wrapped as a secret.
    pub fn require_secret(&self, key: &'static str) -> Result<SecretString, ConfigError> {
        self.require(key).map(SecretString::from)
    }
}

fn read_process_env(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(val) => Some(val),
        Err(std::env::VarError::NotPresent) => None,
        // Present but not valid Unicode: secrets must be valid strings.
        Err(std::env::VarError::NotUnicode(_)) => None,
    }
}
