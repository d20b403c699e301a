use std::{sync::Arc, time::Duration};

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::gateway::{BotGateway, InboundUpdate, OutboundMessage};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("transport failed to connect: {0}")]
    Connect(String),
    #[error("transport read failed: {0}")]
    Receive(String),
    #[error("transport send failed: {0}")]
    Send(String),
    #[error("transport disconnect failed: {0}")]
    Disconnect(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReconnectPolicy {
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self { max_retries: 5, base_delay_ms: 250, max_delay_ms: 5_000 }
    }
}

impl ReconnectPolicy {
    fn backoff(&self, attempt: u32) -> Duration {
        let exponent = attempt.min(16);
        let multiplier = 1_u64 << exponent;
        let delay_ms = self.base_delay_ms.saturating_mul(multiplier).min(self.max_delay_ms);
        Duration::from_millis(delay_ms)
    }
}

/// Seam to the real messaging transport. The production implementation lives
/// outside this workspace; everything here is exercised against fakes.
#[async_trait]
pub trait TelegramTransport: Send + Sync {
    fn name(&self) -> &'static str {
        "telegram"
    }
    async fn connect(&self) -> Result<(), TransportError>;
    async fn next_update(&self) -> Result<Option<InboundUpdate>, TransportError>;
    async fn send(&self, message: OutboundMessage) -> Result<(), TransportError>;
    async fn disconnect(&self) -> Result<(), TransportError>;
}

#[derive(Default)]
pub struct NoopTelegramTransport;

#[async_trait]
impl TelegramTransport for NoopTelegramTransport {
    fn name(&self) -> &'static str {
        "noop"
    }

    async fn connect(&self) -> Result<(), TransportError> {
        Ok(())
    }

    async fn next_update(&self) -> Result<Option<InboundUpdate>, TransportError> {
        Ok(None)
    }

    async fn send(&self, _message: OutboundMessage) -> Result<(), TransportError> {
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), TransportError> {
        Ok(())
    }
}

pub struct PollingRunner {
    transport: Arc<dyn TelegramTransport>,
    gateway: BotGateway,
    reconnect_policy: ReconnectPolicy,
}

impl PollingRunner {
    pub fn new(
        transport: Arc<dyn TelegramTransport>,
        gateway: BotGateway,
        reconnect_policy: ReconnectPolicy,
    ) -> Self {
        Self { transport, gateway, reconnect_policy }
    }

    pub fn transport_name(&self) -> &'static str {
        self.transport.name()
    }

    pub fn gateway(&self) -> &BotGateway {
        &self.gateway
    }

    pub async fn start(&self) -> Result<()> {
        for attempt in 0..=self.reconnect_policy.max_retries {
            match self.connect_and_pump().await {
                Ok(()) => return Ok(()),
                Err(transport_error) => {
                    warn!(
                        attempt,
                        max_retries = self.reconnect_policy.max_retries,
                        error = %transport_error,
                        "telegram transport failed"
                    );

                    if attempt == self.reconnect_policy.max_retries {
                        return Err(transport_error.into());
                    }
                    tokio::time::sleep(self.reconnect_policy.backoff(attempt)).await;
                }
            }
        }

        Ok(())
    }

    async fn connect_and_pump(&self) -> Result<(), TransportError> {
        self.transport.connect().await?;
        info!(
            event_name = "telegram.transport_connected",
            transport = self.transport.name(),
            "update stream open"
        );

        while let Some(update) = self.transport.next_update().await? {
            let correlation_id = Uuid::new_v4().to_string();
            debug!(
                event_name = "telegram.update_received",
                correlation_id = %correlation_id,
                session_id = %update.session_id,
                "processing inbound update"
            );

            if let Some(message) = self.gateway.on_update(update, &correlation_id).await {
                self.transport.send(message).await?;
            }
        }

        self.transport.disconnect().await?;
        info!(
            event_name = "telegram.transport_drained",
            transport = self.transport.name(),
            "update stream drained"
        );
        Ok(())
    }
}
