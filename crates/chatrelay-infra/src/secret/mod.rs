//! Credential sources.
//!
//! - `env`: Environment variable provider (read-only)

pub mod env;

pub use env::EnvSecretProvider;
