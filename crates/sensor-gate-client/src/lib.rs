// crates/sensor-gate-client/src/lib.rs
// ============================================================================
// Module: Sensor Gate Client
// Description: HTTP probe client for the sensor-data API under test.
// Purpose: Issue raw probes and hand decoded responses to the scenarios.
// Dependencies: reqwest, serde, serde_json, sensor-gate-core, thiserror, url
// ============================================================================

//! ## Overview
//! The probe client issues GET/POST/PUT/DELETE requests against
//! `{base_url}{path}` and returns the status code plus the decoded JSON
//! body. It deliberately performs no retries and no timeout tuning beyond
//! the transport default: a hung or refused request is a test failure, not a
//! condition to mask.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod probe;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use probe::ProbeClient;
pub use probe::ProbeError;
pub use probe::ProbeResponse;
