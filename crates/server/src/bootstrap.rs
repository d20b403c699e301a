use std::sync::Arc;

use freighty_core::config::{AppConfig, ConfigError, LoadOptions};
use freighty_core::dialog::DialogService;
use freighty_core::quote::QuoteEngine;
use freighty_core::tariff::{default_catalog, CatalogBuildError};
use freighty_telegram::{BotGateway, NoopTelegramTransport, PollingRunner, ReconnectPolicy};
use thiserror::Error;
use tracing::info;

pub struct Application {
    pub config: AppConfig,
    pub runner: PollingRunner,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("rate catalog construction failed: {0}")]
    Catalog(#[from] CatalogBuildError),
}

pub fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config)
}

/// Wires the quoting core behind the transport seam. The catalog is built
/// and validated here so a broken tariff table kills the process at startup
/// instead of failing lookups mid-conversation.
pub fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let catalog = default_catalog()?;
    info!(
        event_name = "system.bootstrap.catalog_validated",
        correlation_id = "bootstrap",
        entries = catalog.len(),
        "rate catalog constructed and validated"
    );

    let engine = QuoteEngine::new(catalog);
    let service = DialogService::new(engine);
    let gateway = BotGateway::new(service);
    let runner =
        PollingRunner::new(Arc::new(NoopTelegramTransport), gateway, ReconnectPolicy::default());

    Ok(Application { config, runner })
}

#[cfg(test)]
mod tests {
    use freighty_core::config::{ConfigOverrides, LoadOptions};

    use super::bootstrap;

    fn options_with_token(token: &str) -> LoadOptions {
        LoadOptions {
            overrides: ConfigOverrides {
                bot_token: Some(token.to_string()),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        }
    }

    #[test]
    fn bootstrap_fails_fast_without_a_usable_bot_token() {
        let result = bootstrap(options_with_token("not-a-token"));

        assert!(result.is_err());
        let message = result.err().expect("error").to_string();
        assert!(message.contains("telegram.bot_token"));
    }

    #[tokio::test]
    async fn bootstrap_wires_a_working_quote_path() {
        let app = bootstrap(options_with_token("12345:TEST-token"))
            .expect("bootstrap should succeed with a valid token");

        assert_eq!(app.runner.transport_name(), "noop");

        // Drive one dialogue straight through the wired gateway to prove the
        // catalog, engine and session registry are all connected.
        use freighty_core::dialog::SessionId;
        use freighty_telegram::{InboundUpdate, UpdateKind};

        let gateway = app.runner.gateway();
        let session = |kind: UpdateKind| InboundUpdate { session_id: SessionId::new("smoke"), kind };
        let callback =
            |data: &str| session(UpdateKind::CallbackQuery { data: data.to_string() });
        let message = |text: &str| session(UpdateKind::Message { text: text.to_string() });

        gateway.on_update(callback("delivery:cargo"), "smoke-1").await;
        gateway.on_update(callback("cargo_type:tools"), "smoke-2").await;
        gateway.on_update(message("10"), "smoke-3").await;
        gateway.on_update(message("300"), "smoke-4").await;
        let result = gateway
            .on_update(message("1.5"), "smoke-5")
            .await
            .expect("terminal quote render");

        assert!(result.render.text.contains("450.00 $"));
    }
}
