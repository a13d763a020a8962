//! Configuration loader
//!
//! Loads adapter configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `DENTAL_OFFICE_BASE_URL`: Customer-specific API base URL (required)
//! - `DENTAL_OFFICE_CLIENT_ID`: Client ID (required)
//! - `DENTAL_OFFICE_SECRET`: Client secret (required)
//! - `DENTAL_OFFICE_TIMEOUT_SECS`: HTTP timeout in seconds
//! - `DENTAL_OFFICE_TOKEN_TTL_SECS`: How long an issued token is reused
//! - `DENTAL_OFFICE_USER_AGENT`: Overrides the default `User-Agent`
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./dentaloffice.{json,toml}` then `./config.{json,toml}`
//! 2. The same names in the parent and grandparent directories
//! 3. Relative to executable location

use std::path::{Path, PathBuf};

use dentaloffice_domain::constants::MAX_TOKEN_TTL_SECS;
use dentaloffice_domain::{AuthConfig, Config, Credentials, DentalOfficeError, HttpConfig, Result};
use url::Url;

const FILE_STEMS: [&str; 2] = ["dentaloffice", "config"];
const EXTENSIONS: [&str; 2] = ["json", "toml"];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `DentalOfficeError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing or the base URL is malformed
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `DentalOfficeError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<Config> {
    let credentials = Credentials::new(
        env_var("DENTAL_OFFICE_BASE_URL")?,
        env_var("DENTAL_OFFICE_CLIENT_ID")?,
        env_var("DENTAL_OFFICE_SECRET")?,
    );

    let mut http = HttpConfig::default();
    if let Some(timeout) = env_u64("DENTAL_OFFICE_TIMEOUT_SECS")? {
        http.timeout_secs = timeout;
    }
    http.user_agent = std::env::var("DENTAL_OFFICE_USER_AGENT").ok().filter(|s| !s.is_empty());

    let mut auth = AuthConfig::default();
    if let Some(ttl) = env_u64("DENTAL_OFFICE_TOKEN_TTL_SECS")? {
        auth.token_ttl_secs = ttl;
    }

    let config = Config { credentials, http, auth };
    validate(&config)?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `DentalOfficeError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(DentalOfficeError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            DentalOfficeError::Config(
                "No config file found and DENTAL_OFFICE_* environment variables are not set"
                    .to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| DentalOfficeError::Config(format!("Failed to read config file: {e}")))?;

    let config = parse_config(&contents, &config_path)?;
    validate(&config)?;
    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| DentalOfficeError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| DentalOfficeError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(DentalOfficeError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Check that credentials are complete, the base URL is an absolute
/// `http`/`https` URL and the timeout and token TTL are in range.
///
/// # Errors
/// Returns `DentalOfficeError::Config` describing the first problem found.
pub fn validate(config: &Config) -> Result<()> {
    config.credentials.validate()?;

    let url = Url::parse(config.credentials.api_base()).map_err(|e| {
        DentalOfficeError::Config(format!(
            "Invalid base URL '{}': {e}",
            config.credentials.base_url
        ))
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(DentalOfficeError::Config(format!(
            "Base URL must use http or https, got '{}'",
            url.scheme()
        )));
    }

    if config.http.timeout_secs == 0 {
        return Err(DentalOfficeError::Config("HTTP timeout must be greater than zero".into()));
    }

    let ttl = config.auth.token_ttl_secs;
    if ttl == 0 || ttl > MAX_TOKEN_TTL_SECS {
        return Err(DentalOfficeError::Config(format!(
            "Token TTL must be between 1 and {MAX_TOKEN_TTL_SECS} seconds, got {ttl}"
        )));
    }
    Ok(())
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.extend([cwd.clone(), cwd.join(".."), cwd.join("../..")]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.extend([exe_dir.to_path_buf(), exe_dir.join(".."), exe_dir.join("../..")]);
        }
    }

    roots.iter().flat_map(|root| candidates_in(root)).find(|path| path.exists())
}

fn candidates_in(root: &Path) -> Vec<PathBuf> {
    FILE_STEMS
        .iter()
        .flat_map(|stem| EXTENSIONS.iter().map(move |ext| root.join(format!("{stem}.{ext}"))))
        .collect()
}

/// Get required environment variable
///
/// # Errors
/// Returns `DentalOfficeError::Config` if the variable is not set or empty.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty()).ok_or_else(|| {
        DentalOfficeError::Config(format!("Missing required environment variable: {key}"))
    })
}

/// Parse an optional numeric environment variable.
fn env_u64(key: &str) -> Result<Option<u64>> {
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|e| DentalOfficeError::Config(format!("Invalid value for {key}: {e}"))),
        _ => Ok(None),
    }
}
