//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. Reads a `.env` file into the environment, if one exists
//! 2. Attempts to load from environment variables
//! 3. If the required ones are missing, falls back to loading from file
//! 4. Probes multiple paths for config files (JSON or TOML)
//! 5. Validates the result
//!
//! ## Environment Variables
//! Required:
//! - `HRSYNC_CLIENT_ID`: OAuth2 client id
//! - `HRSYNC_CLIENT_SECRET`: OAuth2 client secret
//!
//! Optional (defaults from [`hrsync_domain::constants`]):
//! - `HRSYNC_TOKEN_URL`, `HRSYNC_BASE_URL`
//! - `HRSYNC_CLIENT_CERT_PEM`: PEM certificate followed by its private key
//! - `HRSYNC_CLIENT_CERT_BASE64`: the same PEM, base64 encoded
//! - `HRSYNC_ENVIRONMENT`: `production`, `test` or `unknown`
//! - `HRSYNC_PAGE_SIZE`, `HRSYNC_TIMEOUT_SECS`, `HRSYNC_MIN_REQUEST_INTERVAL_MS`
//! - `HRSYNC_CONCURRENCY`, `HRSYNC_PROGRESS_EVERY`
//! - `HRSYNC_LOG_LEVEL`, `HRSYNC_LOG_JSON` (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./hrsync.{json,toml}` and `./config.{json,toml}` (current working
//!    directory)
//! 2. The same names in the parent directory
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};
use std::str::FromStr;

use hrsync_domain::{
    ApiConfig, AuthConfig, Config, ConnectionEnvironment, HrSyncError, LoggingConfig, Result,
    SyncConfig,
};

const CONFIG_FILE_NAMES: [&str; 4] = ["hrsync.json", "hrsync.toml", "config.json", "config.toml"];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If a required variable
/// is missing, falls back to loading from a config file. Either way the
/// result is validated.
///
/// # Errors
/// Returns `HrSyncError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - The loaded configuration fails validation
pub fn load() -> Result<Config> {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "Loaded .env file");
    }

    let config = match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            config
        }
        Err(e) => {
            tracing::debug!(error = %e, "Failed to load from environment, trying file");
            load_from_file(None)?
        }
    };

    config.validate()?;
    Ok(config)
}

/// Load configuration from environment variables
///
/// Only the client credentials are required; everything else falls back to
/// its default.
///
/// # Errors
/// Returns `HrSyncError::Config` if a required variable is missing or a
/// value does not parse.
pub fn load_from_env() -> Result<Config> {
    let client_id = env_var("HRSYNC_CLIENT_ID")?;
    let client_secret = env_var("HRSYNC_CLIENT_SECRET")?;

    let api_defaults = ApiConfig::default();
    let api = ApiConfig {
        base_url: env_opt("HRSYNC_BASE_URL").unwrap_or(api_defaults.base_url),
        timeout_secs: env_parse("HRSYNC_TIMEOUT_SECS")?.unwrap_or(api_defaults.timeout_secs),
        page_size: env_parse("HRSYNC_PAGE_SIZE")?.unwrap_or(api_defaults.page_size),
        min_request_interval_ms: env_parse("HRSYNC_MIN_REQUEST_INTERVAL_MS")?
            .unwrap_or(api_defaults.min_request_interval_ms),
        user_agent: env_opt("HRSYNC_USER_AGENT"),
    };

    let auth = AuthConfig {
        token_url: env_opt("HRSYNC_TOKEN_URL").unwrap_or_else(|| AuthConfig::default().token_url),
        client_id,
        client_secret,
        client_certificate_pem: env_opt("HRSYNC_CLIENT_CERT_PEM"),
        client_certificate_base64: env_opt("HRSYNC_CLIENT_CERT_BASE64"),
        environment: env_opt("HRSYNC_ENVIRONMENT")
            .map(|raw| parse_environment(&raw))
            .transpose()?
            .unwrap_or_default(),
    };

    let sync_defaults = SyncConfig::default();
    let sync = SyncConfig {
        concurrency: env_parse("HRSYNC_CONCURRENCY")?.unwrap_or(sync_defaults.concurrency),
        progress_every: env_parse("HRSYNC_PROGRESS_EVERY")?
            .unwrap_or(sync_defaults.progress_every),
    };

    let logging_defaults = LoggingConfig::default();
    let logging = LoggingConfig {
        level: env_opt("HRSYNC_LOG_LEVEL").unwrap_or(logging_defaults.level),
        json: env_bool("HRSYNC_LOG_JSON", logging_defaults.json),
    };

    Ok(Config { api, auth, sync, logging })
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
/// Returns `HrSyncError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(HrSyncError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            HrSyncError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| HrSyncError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `HrSyncError::Config` if format is invalid or parsing fails.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| HrSyncError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| HrSyncError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(HrSyncError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd.clone());
        dirs.push(cwd.join(".."));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            dirs.push(exe_dir.to_path_buf());
        }
    }

    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

fn parse_environment(raw: &str) -> Result<ConnectionEnvironment> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "production" | "prod" => Ok(ConnectionEnvironment::Production),
        "test" | "sandbox" => Ok(ConnectionEnvironment::Test),
        "unknown" | "" => Ok(ConnectionEnvironment::Unknown),
        other => Err(HrSyncError::Config(format!("Invalid HRSYNC_ENVIRONMENT: {other}"))),
    }
}

/// Get required environment variable
///
/// # Errors
/// Returns `HrSyncError::Config` if the variable is not set or blank.
fn env_var(key: &str) -> Result<String> {
    env_opt(key).ok_or_else(|| {
        HrSyncError::Config(format!("Missing required environment variable: {key}"))
    })
}

/// Non-blank value of an optional environment variable
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Parse an optional environment variable
///
/// # Errors
/// Returns `HrSyncError::Config` if the variable is set but does not parse.
fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_opt(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| HrSyncError::Config(format!("Invalid {key}: {e}")))
        })
        .transpose()
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
