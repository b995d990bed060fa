// crates/sensor-gate-broker/src/publisher.rs
// ============================================================================
// Module: Reading Publisher
// Description: Publisher seam, bounded publish-window loop, MQTT backend.
// Purpose: Deliver readings to the namespaced topic for a fixed wall-clock window.
// Dependencies: async-trait, mqtt5, sensor-gate-core, thiserror, tokio
// ============================================================================

//! ## Overview
//! The publish loop is a deliberate redundancy strategy: the consumer side
//! (the service's broker subscription) is outside this system's control and
//! may miss individual messages, so the same payload is re-published on a
//! short delay until the window elapses. Individual publish rejections are
//! counted and tolerated; only connection failures propagate.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;
use std::time::Instant;

use async_trait::async_trait;
use mqtt5::MqttClient;
use thiserror::Error;

use sensor_gate_core::ScenarioError;

use crate::payload::ReadingPayload;

// ============================================================================
// SECTION: Broker Errors
// ============================================================================

/// Errors raised by the reading publisher.
#[derive(Debug, Error)]
pub enum BrokerError {
    /// Connection to the broker could not be established.
    #[error("broker connection failed: {0}")]
    Connect(String),
    /// A single publish attempt was rejected; tolerated inside the window.
    #[error("publish rejected: {0}")]
    Publish(String),
    /// Payload could not be encoded as JSON.
    #[error("payload encoding failed: {0}")]
    Encode(String),
    /// Disconnect after the window failed.
    #[error("broker disconnect failed: {0}")]
    Disconnect(String),
}

impl From<BrokerError> for ScenarioError {
    fn from(err: BrokerError) -> Self {
        Self::Transport(err.to_string())
    }
}

// ============================================================================
// SECTION: Topic Derivation
// ============================================================================

/// Derives the readings topic from the externally supplied namespace.
///
/// The namespace isolates this gauntlet's traffic from other tenants of the
/// shared public broker.
#[must_use]
pub fn readings_topic(namespace: &str) -> String {
    format!("{namespace}/readings")
}

// ============================================================================
// SECTION: Publish Window
// ============================================================================

/// Bounded wall-clock window driving the publish loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishWindow {
    /// Total wall-clock duration to keep publishing.
    pub window: Duration,
    /// Delay between consecutive publish attempts.
    pub delay: Duration,
}

impl PublishWindow {
    /// Creates a window with explicit bounds.
    #[must_use]
    pub const fn new(window: Duration, delay: Duration) -> Self {
        Self {
            window,
            delay,
        }
    }
}

/// Counters describing one publish window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishStats {
    /// Publish attempts made inside the window.
    pub attempted: u64,
    /// Attempts the broker or transport rejected.
    pub rejected: u64,
}

// ============================================================================
// SECTION: Publisher Seams
// ============================================================================

/// Transport-level sink delivering one payload to one topic.
#[async_trait]
pub trait ReadingSink: Send + Sync {
    /// Sends the payload bytes to the topic, best-effort, no ack wait.
    ///
    /// # Errors
    ///
    /// Returns [`BrokerError::Publish`] when the attempt is rejected.
    async fn send(&self, topic: &str, payload: &[u8]) -> Result<(), BrokerError>;
}

/// High-level publisher seam the scenarios depend on.
#[async_trait]
pub trait ReadingBroker: Send + Sync {
    /// Publishes the payload repeatedly for the bounded window.
    ///
    /// # Errors
    ///
    /// Returns [`BrokerError`] when the connection cannot be established or
    /// the payload cannot be encoded.
    async fn publish_readings(
        &self,
        topic: &str,
        payload: &ReadingPayload,
        window: PublishWindow,
    ) -> Result<PublishStats, BrokerError>;
}

// ============================================================================
// SECTION: Publish Loop
// ============================================================================

/// Publishes the payload through the sink until the window elapses.
///
/// At least one attempt is always made, so a shrunken test window still
/// exercises delivery. Rejections are counted, never fatal.
///
/// # Errors
///
/// Returns [`BrokerError::Encode`] when the payload cannot be serialized.
pub async fn publish_for_window(
    sink: &dyn ReadingSink,
    topic: &str,
    payload: &ReadingPayload,
    window: PublishWindow,
) -> Result<PublishStats, BrokerError> {
    let bytes = payload.encode().map_err(|err| BrokerError::Encode(err.to_string()))?;
    let started = Instant::now();
    let mut stats = PublishStats::default();
    loop {
        stats.attempted += 1;
        if sink.send(topic, &bytes).await.is_err() {
            stats.rejected += 1;
        }
        if started.elapsed() >= window.window {
            break;
        }
        tokio::time::sleep(window.delay).await;
    }
    Ok(stats)
}

// ============================================================================
// SECTION: MQTT Backend
// ============================================================================

/// Reading publisher backed by the shared public MQTT broker.
#[derive(Debug, Clone)]
pub struct MqttReadingBroker {
    /// Broker host.
    host: String,
    /// Broker port.
    port: u16,
}

impl MqttReadingBroker {
    /// Creates a publisher for the given broker endpoint.
    #[must_use]
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            host: host.to_string(),
            port,
        }
    }

    /// Renders the TCP connection address.
    fn address(&self) -> String {
        format!("mqtt://{}:{}", self.host, self.port)
    }
}

/// Sink adapter over a connected MQTT client.
struct MqttSink {
    /// Connected client; QoS stays at the client default.
    client: MqttClient,
}

#[async_trait]
impl ReadingSink for MqttSink {
    async fn send(&self, topic: &str, payload: &[u8]) -> Result<(), BrokerError> {
        self.client
            .publish(topic, payload)
            .await
            .map(|_| ())
            .map_err(|err| BrokerError::Publish(err.to_string()))
    }
}

#[async_trait]
impl ReadingBroker for MqttReadingBroker {
    async fn publish_readings(
        &self,
        topic: &str,
        payload: &ReadingPayload,
        window: PublishWindow,
    ) -> Result<PublishStats, BrokerError> {
        let client = MqttClient::new(format!("sensor-gate-{}", std::process::id()));
        client
            .connect(&self.address())
            .await
            .map_err(|err| BrokerError::Connect(err.to_string()))?;
        let sink = MqttSink {
            client,
        };
        let stats = publish_for_window(&sink, topic, payload, window).await;
        let disconnected = sink.client.disconnect().await;
        let stats = stats?;
        disconnected.map_err(|err| BrokerError::Disconnect(err.to_string()))?;
        Ok(stats)
    }
}
