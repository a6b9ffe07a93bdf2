use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Reads, parses and validates the TOML file at `path`
///
/// Missing sections and keys fall back to their defaults.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    load_config_with_hash(path).map(|(config, _)| config)
}

/// SHA-256 of the file at `path`, hex encoded
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let raw = std::fs::read(path)?;
    Ok(digest(&raw))
}

/// Loads a configuration together with the hash of the exact bytes parsed
///
/// The hash is written into the run summary so two result files can be
/// traced back to the same settings.
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let raw = std::fs::read_to_string(path)?;
    let parsed: Config = toml::from_str(&raw)?;
    validate(&parsed)?;
    tracing::debug!("Parsed configuration from {}", path.display());
    Ok((parsed, digest(raw.as_bytes())))
}

fn digest(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}
