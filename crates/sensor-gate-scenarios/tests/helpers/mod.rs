// crates/sensor-gate-scenarios/tests/helpers/mod.rs
// ============================================================================
// Module: Acceptance Test Helpers
// Description: Shared helpers for the Sensor Gate acceptance suite.
// Purpose: Provide an in-process sensor API stub and a forwarding broker.
// Dependencies: axum, sensor-gate-broker, sensor-gate-client, sensor-gate-core
// ============================================================================

//! ## Overview
//! Shared helpers for the acceptance suite. The stub API reproduces the
//! reference fixture so the scenarios can be exercised end to end without the
//! real service, and the forwarding broker stands in for the MQTT path by
//! delivering published readings straight into the stub.

#![allow(dead_code, reason = "Shared helpers are reused across multiple test cases.")]

pub mod fake_broker;
pub mod stub_api;
