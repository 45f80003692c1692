use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) codetally/0.1";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if values are present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Parsing and validation core, decoupled from the process environment so
/// tests can drive it from a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("CODETALLY_ENV", "development"))?;

    let bind_addr = or_default("CODETALLY_BIND_ADDR", "0.0.0.0:5000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("CODETALLY_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("CODETALLY_LOG_LEVEL", "info");
    let database_url = lookup("DATABASE_URL")
        .ok()
        .filter(|url| !url.trim().is_empty());

    let db_max_connections = parse_u32("CODETALLY_DB_MAX_CONNECTIONS", "5")?;
    let db_min_connections = parse_u32("CODETALLY_DB_MIN_CONNECTIONS", "0")?;
    let db_acquire_timeout_secs = parse_u64("CODETALLY_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let source_request_timeout_secs = parse_u64("CODETALLY_SOURCE_REQUEST_TIMEOUT_SECS", "15")?;
    if source_request_timeout_secs == 0 {
        return Err(invalid(
            "CODETALLY_SOURCE_REQUEST_TIMEOUT_SECS",
            "timeout must be at least 1 second".to_string(),
        ));
    }
    let source_user_agent = or_default("CODETALLY_SOURCE_USER_AGENT", DEFAULT_USER_AGENT);
    let source_max_concurrent = parse_usize("CODETALLY_SOURCE_MAX_CONCURRENT", "4")?;
    let source_max_attempts = parse_u32("CODETALLY_SOURCE_MAX_ATTEMPTS", "3")?;
    if source_max_attempts == 0 {
        return Err(invalid(
            "CODETALLY_SOURCE_MAX_ATTEMPTS",
            "at least one attempt is required".to_string(),
        ));
    }
    let source_backoff_base_secs = parse_u64("CODETALLY_SOURCE_BACKOFF_BASE_SECS", "2")?;
    let source_backoff_max_secs = parse_u64("CODETALLY_SOURCE_BACKOFF_MAX_SECS", "10")?;

    let cors_allowed_origins = or_default("CODETALLY_CORS_ALLOWED_ORIGINS", "")
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect();

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        database_url,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        source_request_timeout_secs,
        source_user_agent,
        source_max_concurrent,
        source_max_attempts,
        source_backoff_base_secs,
        source_backoff_max_secs,
        cors_allowed_origins,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "CODETALLY_ENV".to_string(),
            reason: format!("expected development, test, or production; got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
