// crates/sensor-gate-core/src/lib.rs
// ============================================================================
// Module: Sensor Gate Core
// Description: Scenario model, verification layer, and runner for the gauntlet.
// Purpose: Provide the test-execution engine shared by all Sensor Gate crates.
// Dependencies: serde, serde_json, thiserror, time
// ============================================================================

//! ## Overview
//! Sensor Gate validates a third-party sensor-data web service and its MQTT
//! ingestion path. This crate holds the pieces that do not touch the network:
//! the step trace, the verification checks, the diagnostic failure type, the
//! scenario registry, the sequential runner, and process configuration.
//! Invariants:
//! - Every failure crossing a scenario boundary carries the full step
//!   narrative; a bare failure is a defect in the gauntlet itself.
//! - Scenarios are declared once at startup and never mutated.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod check;
pub mod config;
pub mod failure;
pub mod reading;
pub mod registry;
pub mod runner;
pub mod trace;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use check::CheckError;
pub use config::ConfigError;
pub use config::GauntletConfig;
pub use config::GauntletEnv;
pub use failure::ScenarioError;
pub use failure::StepFailure;
pub use reading::CreatedReading;
pub use reading::NewReading;
pub use reading::StoredReading;
pub use reading::TimestampError;
pub use registry::Registry;
pub use registry::RegistryError;
pub use registry::Scenario;
pub use registry::ScenarioFuture;
pub use registry::ScenarioId;
pub use registry::ScenarioMetadata;
pub use registry::ScenarioProc;
pub use runner::ScenarioOutcome;
pub use runner::TraceHost;
pub use runner::Verdict;
pub use runner::run_all;
pub use runner::run_scenario;
pub use trace::StepTrace;
