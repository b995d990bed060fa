// crates/sensor-gate-scenarios/src/ingest.rs
// ============================================================================
// Module: Ingestion Scenario
// Description: Cross-channel correlation from the MQTT broker into the API.
// Purpose: Prove published readings propagate into the service's storage.
// Dependencies: rand, sensor-gate-broker, sensor-gate-core
// ============================================================================

//! ## Overview
//! The scenario publishes one randomly sampled reading for the configured
//! window, then asks the API for temperature records ordered by timestamp.
//! The most recent record must carry the current `YYYY-MM` prefix and a value
//! exactly equal to the published temperature. The topic namespace comes from
//! `BASE_TOPIC`; its absence surfaces here, at topic-derivation time, not at
//! configuration load.

// ============================================================================
// SECTION: Imports
// ============================================================================

use sensor_gate_broker::PublishWindow;
use sensor_gate_broker::ReadingPayload;
use sensor_gate_broker::readings_topic;
use sensor_gate_core::ScenarioFuture;
use sensor_gate_core::StoredReading;
use sensor_gate_core::check;
use sensor_gate_core::reading::current_month_prefix;

use crate::context::ScenarioContext;

// ============================================================================
// SECTION: Ingestion Scenario
// ============================================================================

/// `ingest-1.1`: publish to `{namespace}/readings` for the bounded window,
/// then confirm the service stored the reading.
pub fn mqtt_to_webserver(cx: &mut ScenarioContext) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let payload = ReadingPayload::sample(&mut rand::thread_rng());
        let message = serde_json::to_string(&payload)
            .map_err(|err| sensor_gate_core::ScenarioError::Transport(err.to_string()))?;

        cx.step(format!("Sending message to MQTT broker: {message}"));
        let namespace = cx.config().namespace()?.to_string();
        let topic = readings_topic(&namespace);
        let window =
            PublishWindow::new(cx.config().publish_window, cx.config().publish_delay);
        let _stats = cx.broker().publish_readings(&topic, &payload, window).await?;

        cx.step("Checking if the webserver received the message");
        let response = cx.probe().get("/api/temperature?order-by=timestamp").await?;
        check::expect_status("order-by=timestamp query", response.status(), 200)?;
        let readings: Vec<StoredReading> = response.decode("temperature list")?;
        let last = check::expect_last("order-by=timestamp query", &readings)?;
        let timestamp = check::expect_timestamp("most recent reading", last)?.to_string();

        cx.step(format!(
            "Checking if the most recent timestamp is in the current month. Your most recent timestamp is: {timestamp}"
        ));
        let prefix = current_month_prefix()?;
        check::check_month_prefix(&timestamp, &prefix)?;

        cx.step("Checking if the most recent temperature is the same as the one sent to the MQTT broker");
        #[allow(
            clippy::cast_precision_loss,
            reason = "Published temperatures are small integers, exactly representable as f64."
        )]
        let published = payload.temperature as f64;
        check::expect_eq("most recent temperature", last.value, published)?;
        Ok(())
    })
}
