// crates/sensor-gate-broker/src/payload.rs
// ============================================================================
// Module: Reading Payload
// Description: Fixed-shape JSON payload published to the readings topic.
// Purpose: Carry the temperature/pressure pair the consumer must ingest.
// Dependencies: rand, serde, serde_json
// ============================================================================

//! ## Overview
//! The wire shape is a compact JSON object with integer `temperature` and
//! `pressure` fields. The ingestion scenario later asserts that the most
//! recent stored record's value equals the published temperature, so the
//! payload keeps the sampled values around for the correlation check.

// ============================================================================
// SECTION: Imports
// ============================================================================

use rand::Rng;
use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Payload Type
// ============================================================================

/// Sampling range for the temperature field, inclusive on both ends.
const TEMPERATURE_RANGE: std::ops::RangeInclusive<i64> = 10..=40;

/// Sampling range for the pressure field, inclusive on both ends.
const PRESSURE_RANGE: std::ops::RangeInclusive<i64> = 900..=1100;

/// Fixed-shape reading published to `{namespace}/readings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingPayload {
    /// Integer temperature reading.
    pub temperature: i64,
    /// Integer pressure reading.
    pub pressure: i64,
}

impl ReadingPayload {
    /// Creates a payload with explicit values.
    #[must_use]
    pub const fn new(temperature: i64, pressure: i64) -> Self {
        Self {
            temperature,
            pressure,
        }
    }

    /// Samples a payload in the ranges the consumer contract expects.
    #[must_use]
    pub fn sample<R: Rng>(rng: &mut R) -> Self {
        Self {
            temperature: rng.gen_range(TEMPERATURE_RANGE),
            pressure: rng.gen_range(PRESSURE_RANGE),
        }
    }

    /// Encodes the payload as compact JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns the serializer error when encoding fails.
    pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}
