//! Environment loading for the application configuration.

use std::net::IpAddr;
use std::time::Duration;

use url::Url;

use crate::defaults;
use crate::error::{ConfigError, ConfigResult};
use crate::model::{AppConfig, StoreConfig};
use crate::validate::validate;

impl AppConfig {
    /// Load and validate configuration from the process environment.
    ///
    /// A `.env` file is honoured in development when present.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the variable that was missing or
    /// could not be parsed.
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();
        let config = Self::from_lookup(|name| std::env::var(name).ok())?;
        validate(&config)?;
        Ok(config)
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Separated from [`AppConfig::from_env`] so tests can supply variables
    /// without mutating process state.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the variable that was missing or
    /// could not be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        let bind_addr = optional(&lookup, "LINKBOARD_BIND_ADDR")
            .unwrap_or_else(|| defaults::BIND_ADDR.to_string());
        let bind_addr: IpAddr = bind_addr.parse().map_err(|_| ConfigError::InvalidValue {
            name: "LINKBOARD_BIND_ADDR",
            reason: "not an IP address",
            value: Some(bind_addr),
        })?;

        let http_port = match optional(&lookup, "LINKBOARD_HTTP_PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                name: "LINKBOARD_HTTP_PORT",
                reason: "not a port number",
                value: Some(raw),
            })?,
            None => defaults::HTTP_PORT,
        };

        let log_level = optional(&lookup, "LINKBOARD_LOG_LEVEL")
            .unwrap_or_else(|| defaults::LOG_LEVEL.to_string());

        let api_base = optional(&lookup, "LINKBOARD_STORE_API_BASE")
            .unwrap_or_else(|| defaults::STORE_API_BASE.to_string());
        let api_base = Url::parse(&api_base).map_err(|_| ConfigError::InvalidValue {
            name: "LINKBOARD_STORE_API_BASE",
            reason: "not an absolute URL",
            value: Some(api_base),
        })?;

        let request_timeout = match optional(&lookup, "LINKBOARD_STORE_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|_| ConfigError::InvalidValue {
                    name: "LINKBOARD_STORE_TIMEOUT_SECS",
                    reason: "not a number of seconds",
                    value: Some(raw),
                })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(defaults::STORE_TIMEOUT_SECS),
        };

        Ok(Self {
            bind_addr,
            http_port,
            log_level,
            store: StoreConfig {
                api_base,
                owner: required(&lookup, "LINKBOARD_STORE_OWNER")?,
                repo: required(&lookup, "LINKBOARD_STORE_REPO")?,
                token: required(&lookup, "LINKBOARD_STORE_TOKEN")?,
                request_timeout,
                user_agent: optional(&lookup, "LINKBOARD_STORE_USER_AGENT")
                    .unwrap_or_else(|| defaults::STORE_USER_AGENT.to_string()),
            },
        })
    }
}

fn optional(lookup: &impl Fn(&str) -> Option<String>, name: &'static str) -> Option<String> {
    lookup(name).map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}

fn required(lookup: &impl Fn(&str) -> Option<String>, name: &'static str) -> ConfigResult<String> {
    optional(lookup, name).ok_or(ConfigError::MissingVar { name })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("LINKBOARD_STORE_OWNER", "acme"),
            ("LINKBOARD_STORE_REPO", "directory"),
            ("LINKBOARD_STORE_TOKEN", "token-value"),
        ])
    }

    fn lookup<'a>(map: &'a HashMap<&'static str, &'static str>) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| map.get(name).map(|v| (*v).to_string())
    }

    #[test]
    fn minimal_environment_falls_back_to_defaults() {
        let map = vars();
        let config = AppConfig::from_lookup(lookup(&map)).expect("config loads");
        assert_eq!(config.http_port, defaults::HTTP_PORT);
        assert_eq!(config.store.api_base.as_str(), "https://api.github.com/");
        assert_eq!(
            config.store.request_timeout,
            Duration::from_secs(defaults::STORE_TIMEOUT_SECS)
        );
    }

    #[test]
    fn missing_token_is_reported_by_name() {
        let mut map = vars();
        map.remove("LINKBOARD_STORE_TOKEN");
        let err = AppConfig::from_lookup(lookup(&map)).expect_err("token required");
        assert!(matches!(
            err,
            ConfigError::MissingVar {
                name: "LINKBOARD_STORE_TOKEN",
            }
        ));
    }

    #[test]
    fn unparseable_port_is_rejected() {
        let mut map = vars();
        map.insert("LINKBOARD_HTTP_PORT", "eighty");
        let err = AppConfig::from_lookup(lookup(&map)).expect_err("bad port");
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                name: "LINKBOARD_HTTP_PORT",
                ..
            }
        ));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let mut map = vars();
        map.insert("LINKBOARD_STORE_TOKEN", "   ");
        let err = AppConfig::from_lookup(lookup(&map)).expect_err("blank token");
        assert!(matches!(err, ConfigError::MissingVar { .. }));
    }
}
