// crates/sensor-gate-scenarios/tests/helpers/fake_broker.rs
// ============================================================================
// Module: Forwarding Broker
// Description: ReadingBroker double that delivers straight into the stub API.
// Purpose: Stand in for the MQTT path the way the service's subscriber would.
// Dependencies: async-trait, sensor-gate-broker, sensor-gate-client
// ============================================================================

//! ## Overview
//! The real ingestion path is broker -> service subscriber -> POST into
//! storage. This double collapses it to one POST per publish window so the
//! correlation checks in `ingest-1.1` can be exercised without a live broker.
//! A configurable value skew lets tests force the correlation to fail.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Mutex;

use async_trait::async_trait;

use sensor_gate_broker::BrokerError;
use sensor_gate_broker::PublishStats;
use sensor_gate_broker::PublishWindow;
use sensor_gate_broker::ReadingBroker;
use sensor_gate_broker::ReadingPayload;
use sensor_gate_client::ProbeClient;
use sensor_gate_core::NewReading;
use sensor_gate_core::reading::now_timestamp;

// ============================================================================
// SECTION: Forwarding Broker
// ============================================================================

/// Broker double forwarding published readings into the stub API.
pub struct ForwardingBroker {
    /// Probe client bound to the stub API.
    probe: ProbeClient,
    /// Offset added to the forwarded value; non-zero breaks correlation.
    value_skew: f64,
    /// Topic observed on the most recent publish window.
    last_topic: Mutex<Option<String>>,
}

impl ForwardingBroker {
    /// Creates a forwarding broker bound to the stub API.
    pub fn new(base_url: &str) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            probe: ProbeClient::new(base_url)?,
            value_skew: 0.0,
            last_topic: Mutex::new(None),
        })
    }

    /// Creates a broker that forwards a skewed value, breaking correlation.
    pub fn with_value_skew(
        base_url: &str,
        value_skew: f64,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            probe: ProbeClient::new(base_url)?,
            value_skew,
            last_topic: Mutex::new(None),
        })
    }

    /// Returns the topic observed on the most recent publish window.
    pub fn last_topic(&self) -> Option<String> {
        self.last_topic.lock().map_or(None, |topic| topic.clone())
    }
}

#[async_trait]
impl ReadingBroker for ForwardingBroker {
    async fn publish_readings(
        &self,
        topic: &str,
        payload: &ReadingPayload,
        _window: PublishWindow,
    ) -> Result<PublishStats, BrokerError> {
        if let Ok(mut last) = self.last_topic.lock() {
            *last = Some(topic.to_string());
        }
        let timestamp =
            now_timestamp().map_err(|err| BrokerError::Connect(err.to_string()))?;
        #[allow(
            clippy::cast_precision_loss,
            reason = "Published temperatures are small integers, exactly representable as f64."
        )]
        let value = payload.temperature as f64 + self.value_skew;
        let body = NewReading::with_timestamp(value, "C", &timestamp);
        let response = self
            .probe
            .post("/api/temperature", &body)
            .await
            .map_err(|err| BrokerError::Connect(err.to_string()))?;
        if response.status() != 200 {
            return Err(BrokerError::Connect(format!(
                "stub ingestion POST returned status {}",
                response.status()
            )));
        }
        Ok(PublishStats {
            attempted: 1,
            rejected: 0,
        })
    }
}
