//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `PEAKFORM_API_BASE_URL`: Backend base URL (required)
//! - `PEAKFORM_API_TIMEOUT`: Request timeout in seconds (optional)
//! - `PEAKFORM_API_USER_AGENT`: User-Agent header value (optional)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./peakform.json` or `./peakform.toml` (current working directory)
//! 2. `./config.json` or `./config.toml` (current working directory)
//! 3. `../peakform.json` or `../peakform.toml` (parent directory)

use std::path::{Path, PathBuf};

use peakform_domain::constants::{DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use peakform_domain::{ApiConfig, ClientConfig, PeakFormError, Result};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `PeakFormError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - The resulting configuration fails validation
pub fn load() -> Result<ClientConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// `PEAKFORM_API_BASE_URL` is required; the timeout and user agent fall
/// back to their defaults when unset.
///
/// # Errors
/// Returns `PeakFormError::Config` if required variables are missing or
/// have invalid values.
pub fn load_from_env() -> Result<ClientConfig> {
    let base_url = env_var("PEAKFORM_API_BASE_URL")?;

    let timeout_seconds = match std::env::var("PEAKFORM_API_TIMEOUT") {
        Ok(raw) => raw
            .parse::<u64>()
            .map_err(|e| PeakFormError::Config(format!("Invalid timeout: {e}")))?,
        Err(_) => DEFAULT_REQUEST_TIMEOUT_SECS,
    };

    let user_agent = std::env::var("PEAKFORM_API_USER_AGENT")
        .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());

    let config = ClientConfig { api: ApiConfig { base_url, timeout_seconds, user_agent } };
    config.validate()?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Arguments
/// * `path` - Optional path to config file. If `None`, uses
///   [`probe_config_paths`].
///
/// # Errors
/// Returns `PeakFormError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - The resulting configuration fails validation
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(PeakFormError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            PeakFormError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| PeakFormError::Config(format!("Failed to read config file: {e}")))?;

    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| PeakFormError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| PeakFormError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(PeakFormError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(vec![
            cwd.join("peakform.json"),
            cwd.join("peakform.toml"),
            cwd.join("config.json"),
            cwd.join("config.toml"),
            cwd.join("../peakform.json"),
            cwd.join("../peakform.toml"),
        ]);
    }

    candidates.into_iter().find(|path| path.exists())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        PeakFormError::Config(format!("Missing required environment variable: {key}"))
    })
}
