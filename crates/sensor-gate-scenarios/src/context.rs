// crates/sensor-gate-scenarios/src/context.rs
// ============================================================================
// Module: Scenario Context
// Description: Per-run bundle of probe client, broker seam, and step trace.
// Purpose: Give scenario procedures one handle to everything they may touch.
// Dependencies: sensor-gate-broker, sensor-gate-client, sensor-gate-core
// ============================================================================

//! ## Overview
//! The context owns the step trace exclusively for the duration of one
//! scenario invocation; the runner clears it at entry and exit. Configuration
//! is read-only after setup, so scenarios share the context sequentially
//! without any locking.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use sensor_gate_broker::ReadingBroker;
use sensor_gate_client::ProbeClient;
use sensor_gate_client::ProbeError;
use sensor_gate_core::GauntletConfig;
use sensor_gate_core::StepTrace;
use sensor_gate_core::TraceHost;

// ============================================================================
// SECTION: Scenario Context
// ============================================================================

/// Shared context threaded through every scenario procedure.
pub struct ScenarioContext {
    /// HTTP probe client bound to the API under test.
    probe: ProbeClient,
    /// Broker seam used by the ingestion scenario.
    broker: Arc<dyn ReadingBroker>,
    /// Read-only process configuration.
    config: GauntletConfig,
    /// Step trace owned exclusively by the running scenario.
    trace: StepTrace,
}

impl ScenarioContext {
    /// Builds a context from configuration and a broker implementation.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError`] when the probe client cannot be constructed
    /// from the configured base URL.
    pub fn new(
        config: GauntletConfig,
        broker: Arc<dyn ReadingBroker>,
    ) -> Result<Self, ProbeError> {
        let probe = ProbeClient::new(&config.base_url)?;
        Ok(Self {
            probe,
            broker,
            config,
            trace: StepTrace::new(),
        })
    }

    /// Returns the probe client.
    #[must_use]
    pub const fn probe(&self) -> &ProbeClient {
        &self.probe
    }

    /// Returns the broker seam.
    #[must_use]
    pub fn broker(&self) -> &dyn ReadingBroker {
        &*self.broker
    }

    /// Returns the process configuration.
    #[must_use]
    pub const fn config(&self) -> &GauntletConfig {
        &self.config
    }

    /// Appends a breadcrumb describing the action about to be taken.
    pub fn step(&mut self, step: impl Into<String>) {
        self.trace.push(step);
    }
}

impl TraceHost for ScenarioContext {
    fn trace(&self) -> &StepTrace {
        &self.trace
    }

    fn trace_mut(&mut self) -> &mut StepTrace {
        &mut self.trace
    }
}
