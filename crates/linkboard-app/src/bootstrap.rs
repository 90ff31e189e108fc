//! Application bootstrap and environment loading.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use linkboard_api::ApiServer;
use linkboard_config::{AppConfig, StoreConfig};
use linkboard_events::EventBus;
use linkboard_github::{GithubIssueStore, StoreOptions};
use linkboard_moderation::ModerationService;
use linkboard_telemetry::{LogFormat, LoggingConfig, Metrics};

use crate::error::{AppError, AppResult};

/// Dependencies required to bootstrap the application.
pub(crate) struct BootstrapDependencies {
    config: AppConfig,
    events: EventBus,
    telemetry: Metrics,
}

impl BootstrapDependencies {
    /// Construct production dependencies from the environment.
    pub(crate) fn from_env() -> AppResult<Self> {
        let config =
            AppConfig::from_env().map_err(|err| AppError::config("config.from_env", err))?;
        let telemetry =
            Metrics::new().map_err(|err| AppError::telemetry("telemetry.metrics", err))?;
        let events = EventBus::new();

        Ok(Self {
            config,
            events,
            telemetry,
        })
    }
}

/// Entry point for the application boot sequence.
///
/// # Errors
///
/// Returns an error if dependency construction or application startup fails.
pub async fn run_app() -> AppResult<()> {
    let dependencies = BootstrapDependencies::from_env()?;
    run_app_with(dependencies).await
}

/// Boot sequence that relies entirely on injected dependencies to simplify testing.
pub(crate) async fn run_app_with(dependencies: BootstrapDependencies) -> AppResult<()> {
    let BootstrapDependencies {
        config,
        events,
        telemetry,
    } = dependencies;

    let logging = LoggingConfig {
        level: &config.log_level,
        format: log_format_from_env(),
        build_sha: option_env!("LINKBOARD_BUILD_SHA").unwrap_or("dev"),
    };
    linkboard_telemetry::init_logging(&logging)
        .map_err(|err| AppError::telemetry("telemetry.init", err))?;

    info!("Linkboard application bootstrap starting");

    let store = GithubIssueStore::new(store_options_from(&config.store), telemetry.clone())
        .map_err(|err| AppError::store("issue_store.new", err))?;
    let moderation = ModerationService::new(Arc::new(store), events.clone(), telemetry.clone());
    info!(
        owner = %config.store.owner,
        repo = %config.store.repo,
        "Issue store client ready"
    );

    let api = ApiServer::new(moderation, events, telemetry);
    let addr = SocketAddr::new(config.bind_addr, config.http_port);
    info!(addr = %addr, "Launching API listener");

    api.serve(addr)
        .await
        .map_err(|err| AppError::api_server("api_server.serve", err))?;
    info!("API server shutdown complete");
    Ok(())
}

fn store_options_from(store: &StoreConfig) -> StoreOptions {
    StoreOptions {
        api_base: store.api_base.as_str().trim_end_matches('/').to_string(),
        owner: store.owner.clone(),
        repo: store.repo.clone(),
        token: store.token.clone(),
        request_timeout: store.request_timeout,
        user_agent: store.user_agent.clone(),
    }
}

fn log_format_from_env() -> LogFormat {
    log_format_from_value(std::env::var("LINKBOARD_LOG_FORMAT").ok().as_deref())
}

fn log_format_from_value(value: Option<&str>) -> LogFormat {
    match value.map(str::trim) {
        Some("json") => LogFormat::Json,
        Some("pretty") => LogFormat::Pretty,
        _ => LogFormat::infer(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use url::Url;

    #[test]
    fn log_format_parses_known_values() {
        assert!(matches!(
            log_format_from_value(Some("json")),
            LogFormat::Json
        ));
        assert!(matches!(
            log_format_from_value(Some("pretty")),
            LogFormat::Pretty
        ));
        match (log_format_from_value(Some("unknown")), LogFormat::infer()) {
            (LogFormat::Json, LogFormat::Json) | (LogFormat::Pretty, LogFormat::Pretty) => {}
            other => panic!("unexpected format mapping: {other:?}"),
        }
    }

    #[test]
    fn store_options_strip_trailing_base_slash() {
        let store = StoreConfig {
            api_base: Url::parse("https://api.github.com/").expect("base url"),
            owner: "acme".into(),
            repo: "directory".into(),
            token: "token-value".into(),
            request_timeout: Duration::from_secs(10),
            user_agent: "linkboard/0.1".into(),
        };
        let options = store_options_from(&store);
        assert_eq!(options.api_base, "https://api.github.com");
        assert_eq!(options.owner, "acme");
        assert_eq!(options.request_timeout, Duration::from_secs(10));
    }
}
