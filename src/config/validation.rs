use crate::config::types::{Config, FingerprintConfig, IndexConfig, RemoteConfig, SearchConfig};
use crate::{ConfigError, ConfigResult};
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_remote_config(&config.remote)?;
    validate_fingerprint(&config.remote.fingerprint)?;
    validate_search_config(&config.search)?;
    validate_index_config(&config.index)?;
    Ok(())
}

fn validate_remote_config(config: &RemoteConfig) -> ConfigResult<()> {
    validate_http_url("base_url", &config.base_url)?;
    validate_http_url("file_url_prefix", &config.file_url_prefix)?;
    validate_http_url("search_url", &config.search_url)?;

    if !config.dataset_path.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "dataset_path must start with '/', got '{}'",
            config.dataset_path
        )));
    }

    if !config.dataset_path.contains("{id}") {
        return Err(ConfigError::Validation(format!(
            "dataset_path must contain the {{id}} placeholder, got '{}'",
            config.dataset_path
        )));
    }

    if config.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "timeout_secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

fn validate_fingerprint(config: &FingerprintConfig) -> ConfigResult<()> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    for cookie in &config.cookies {
        match cookie.split_once('=') {
            Some((name, _)) if !name.trim().is_empty() => {}
            _ => {
                return Err(ConfigError::Validation(format!(
                    "cookie must have the form name=value, got '{}'",
                    cookie
                )));
            }
        }
    }

    Ok(())
}

fn validate_search_config(config: &SearchConfig) -> ConfigResult<()> {
    if config.page_size < 1 {
        return Err(ConfigError::Validation(format!(
            "page_size must be >= 1, got {}",
            config.page_size
        )));
    }

    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    Ok(())
}

fn validate_index_config(config: &IndexConfig) -> ConfigResult<()> {
    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database_path cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Remote endpoints must be absolute http(s) URLs
fn validate_http_url(field: &str, value: &str) -> ConfigResult<()> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", field, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} must use http or https, got '{}'",
            field, value
        )));
    }

    Ok(())
}
