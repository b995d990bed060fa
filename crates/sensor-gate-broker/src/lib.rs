// crates/sensor-gate-broker/src/lib.rs
// ============================================================================
// Module: Sensor Gate Broker
// Description: MQTT reading publisher for the ingestion scenario.
// Purpose: Push sensor readings onto the shared broker for a bounded window.
// Dependencies: async-trait, mqtt5, rand, sensor-gate-core, serde, tokio
// ============================================================================

//! ## Overview
//! The ingestion scenario publishes a fixed-shape reading onto a shared
//! public broker and then observes whether the service under test ingested
//! it. Publishing is best-effort at-most-once with no acknowledgement wait;
//! the bounded repeat loop exists to counteract broker and consumer
//! flakiness, not to guarantee delivery. Topics are namespaced so this
//! gauntlet's traffic never collides with other tenants.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod payload;
pub mod publisher;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use payload::ReadingPayload;
pub use publisher::BrokerError;
pub use publisher::MqttReadingBroker;
pub use publisher::PublishStats;
pub use publisher::PublishWindow;
pub use publisher::ReadingBroker;
pub use publisher::ReadingSink;
pub use publisher::publish_for_window;
pub use publisher::readings_topic;
