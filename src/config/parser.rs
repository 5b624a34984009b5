use crate::config::types::Config;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Reads a configuration file and returns it with the hash of its content
///
/// The configuration is parsed but not validated: the binary applies its
/// command-line overrides first and then calls [`validate`](crate::config::validate).
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok((Config, String))` - Parsed configuration and hex-encoded SHA-256 hash
/// * `Err(ConfigError)` - Failed to read or parse the file
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use linkwalk::config::{load_config_with_hash, validate};
///
/// let (config, hash) = load_config_with_hash(Path::new("linkwalk.toml")).unwrap();
/// validate(&config).unwrap();
/// println!("Max pages: {} (config {})", config.crawler.max_pages, hash);
/// ```
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    Ok((config, hash_content(&content)))
}

/// Parses TOML text into a configuration without validating it
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Hex-encoded SHA-256 of a configuration text
///
/// The hash is printed in the report header so a report can be tied to the
/// exact configuration it was produced with.
pub fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}
