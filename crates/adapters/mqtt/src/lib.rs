//! # verdant-adapter-mqtt
//!
//! MQTT adapter — implements the retained-publisher port on top of
//! [`rumqttc`].
//!
//! ## Responsibilities
//! - Connect to an MQTT broker and keep the connection alive
//! - Publish retained messages (auto-discovery configs and state snapshots)
//! - Clear retained messages by publishing an empty payload
//!
//! ## Dependency rule
//! Same as other adapters: depends on `verdant-app` and `verdant-domain`.

pub mod config;
pub mod error;

use std::time::Duration;

use rumqttc::{AsyncClient, MqttOptions, QoS};
use verdant_app::ports::RetainedPublisher;
use verdant_domain::error::VerdantError;

pub use self::config::MqttConfig;
pub use self::error::MqttError;

/// Retained-message publisher backed by a rumqttc [`AsyncClient`].
///
/// [`connect`](Self::connect) spawns a background task that drives the
/// rumqttc event loop for the lifetime of the process. rumqttc reconnects
/// on the next poll after a connection error, so a broker outage degrades
/// publishes into timeouts rather than crashing the task.
#[derive(Clone)]
pub struct MqttPublisher {
    client: AsyncClient,
    publish_timeout: Duration,
}

impl MqttPublisher {
    /// Connect to the broker described by `config` and spawn the event-loop
    /// driver task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn connect(config: &MqttConfig) -> Self {
        let mut options = MqttOptions::new(
            config.client_id.clone(),
            config.broker_host.clone(),
            config.broker_port,
        );
        options.set_keep_alive(Duration::from_secs(u64::from(config.keep_alive_secs)));

        let (client, mut event_loop) = AsyncClient::new(options, 64);

        tokio::spawn(async move {
            loop {
                match event_loop.poll().await {
                    Ok(event) => tracing::trace!(?event, "mqtt event"),
                    Err(err) => {
                        tracing::warn!(error = %err, "mqtt connection error, retrying in 5s");
                        tokio::time::sleep(Duration::from_secs(5)).await;
                    }
                }
            }
        });

        Self {
            client,
            publish_timeout: Duration::from_secs(u64::from(config.publish_timeout_secs)),
        }
    }

    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<(), MqttError> {
        tokio::time::timeout(
            self.publish_timeout,
            self.client.publish(topic, QoS::AtLeastOnce, true, payload),
        )
        .await
        .map_err(MqttError::Timeout)?
        .map_err(MqttError::Client)
    }
}

impl RetainedPublisher for MqttPublisher {
    async fn publish_retained(&self, topic: &str, payload: Vec<u8>) -> Result<(), VerdantError> {
        tracing::debug!(topic, bytes = payload.len(), "publishing retained message");
        self.publish(topic, payload).await?;
        Ok(())
    }

    async fn clear_retained(&self, topic: &str) -> Result<(), VerdantError> {
        tracing::debug!(topic, "clearing retained message");
        self.publish(topic, Vec::new()).await?;
        Ok(())
    }
}
