//! Validation applied after loading.

use std::time::Duration;

use crate::error::{ConfigError, ConfigResult};
use crate::model::AppConfig;

const MAX_STORE_TIMEOUT: Duration = Duration::from_secs(120);

/// Check a loaded configuration for values that would fail at runtime.
///
/// # Errors
///
/// Returns a [`ConfigError::InvalidValue`] naming the offending field.
pub fn validate(config: &AppConfig) -> ConfigResult<()> {
    if config.http_port == 0 {
        return Err(ConfigError::InvalidValue {
            name: "LINKBOARD_HTTP_PORT",
            reason: "must not be zero",
            value: Some(config.http_port.to_string()),
        });
    }
    for (name, value) in [
        ("LINKBOARD_STORE_OWNER", &config.store.owner),
        ("LINKBOARD_STORE_REPO", &config.store.repo),
    ] {
        if !value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
        {
            return Err(ConfigError::InvalidValue {
                name,
                reason: "must be a repository path segment",
                value: Some(value.clone()),
            });
        }
    }
    if config.store.request_timeout.is_zero() || config.store.request_timeout > MAX_STORE_TIMEOUT {
        return Err(ConfigError::InvalidValue {
            name: "LINKBOARD_STORE_TIMEOUT_SECS",
            reason: "must be between 1 and 120 seconds",
            value: Some(config.store.request_timeout.as_secs().to_string()),
        });
    }
    if config.store.api_base.cannot_be_a_base() {
        return Err(ConfigError::InvalidValue {
            name: "LINKBOARD_STORE_API_BASE",
            reason: "must be a base URL",
            value: Some(config.store.api_base.to_string()),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StoreConfig;
    use url::Url;

    fn config() -> AppConfig {
        AppConfig {
            bind_addr: [127, 0, 0, 1].into(),
            http_port: 7080,
            log_level: "info".into(),
            store: StoreConfig {
                api_base: Url::parse("https://api.github.com").expect("base url"),
                owner: "acme".into(),
                repo: "directory".into(),
                token: "token-value".into(),
                request_timeout: Duration::from_secs(10),
                user_agent: "linkboard/0.1".into(),
            },
        }
    }

    #[test]
    fn well_formed_config_passes() {
        validate(&config()).expect("valid config");
    }

    #[test]
    fn zero_port_is_rejected() {
        let mut cfg = config();
        cfg.http_port = 0;
        let err = validate(&cfg).expect_err("zero port");
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                name: "LINKBOARD_HTTP_PORT",
                ..
            }
        ));
    }

    #[test]
    fn owner_with_path_separator_is_rejected() {
        let mut cfg = config();
        cfg.store.owner = "acme/evil".into();
        let err = validate(&cfg).expect_err("owner with slash");
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                name: "LINKBOARD_STORE_OWNER",
                ..
            }
        ));
    }

    #[test]
    fn out_of_range_timeout_is_rejected() {
        let mut cfg = config();
        cfg.store.request_timeout = Duration::from_secs(600);
        let err = validate(&cfg).expect_err("timeout too long");
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                name: "LINKBOARD_STORE_TIMEOUT_SECS",
                ..
            }
        ));
    }
}
