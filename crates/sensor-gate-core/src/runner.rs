// crates/sensor-gate-core/src/runner.rs
// ============================================================================
// Module: Scenario Runner
// Description: Sequential executor mapping failures to diagnostic outcomes.
// Purpose: Drive scenarios through INIT -> STEP* -> DONE/FAILED exactly once.
// Dependencies: std
// ============================================================================

//! ## Overview
//! A scenario is atomic from the harness's point of view: it passes or fails
//! as a whole, once, with no partial retry. The runner clears the trace at
//! entry, lets the procedure accumulate breadcrumbs, and converts any error
//! into a [`StepFailure`] that embeds the breadcrumbs collected so far plus
//! the original error. The trace is discarded when the scenario exits.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;
use std::time::Instant;

use crate::failure::StepFailure;
use crate::registry::Registry;
use crate::registry::Scenario;
use crate::registry::ScenarioId;
use crate::trace::StepTrace;

// ============================================================================
// SECTION: Trace Host
// ============================================================================

/// Context capability: exclusive ownership of the per-invocation step trace.
pub trait TraceHost {
    /// Returns the trace for reading.
    fn trace(&self) -> &StepTrace;

    /// Returns the trace for appending.
    fn trace_mut(&mut self) -> &mut StepTrace;
}

// ============================================================================
// SECTION: Outcomes
// ============================================================================

/// Terminal verdict of one scenario invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Every step and assertion succeeded.
    Passed,
    /// A step failed; the diagnostic carries the full narrative.
    Failed(StepFailure),
}

impl Verdict {
    /// Returns true for a passing verdict.
    #[must_use]
    pub const fn is_pass(&self) -> bool {
        matches!(self, Self::Passed)
    }
}

/// Outcome of one scenario invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioOutcome {
    /// Identifier of the scenario that ran.
    pub id: ScenarioId,
    /// Grading weight of the scenario.
    pub weight: u32,
    /// Terminal verdict.
    pub verdict: Verdict,
    /// Wall-clock duration of the invocation.
    pub duration: Duration,
}

// ============================================================================
// SECTION: Execution
// ============================================================================

/// Runs one scenario to completion.
///
/// The trace is cleared before the procedure starts (INIT), snapshotted into
/// the diagnostic on failure, and cleared again when the scenario exits so
/// no breadcrumbs leak into the next invocation.
pub async fn run_scenario<Cx: TraceHost>(
    scenario: &Scenario<Cx>,
    cx: &mut Cx,
) -> ScenarioOutcome {
    cx.trace_mut().clear();
    let started = Instant::now();
    let result = (scenario.proc)(cx).await;
    let duration = started.elapsed();
    let verdict = match result {
        Ok(()) => Verdict::Passed,
        Err(err) => Verdict::Failed(StepFailure::new(cx.trace().snapshot(), &err)),
    };
    cx.trace_mut().clear();
    ScenarioOutcome {
        id: scenario.id.clone(),
        weight: scenario.weight,
        verdict,
        duration,
    }
}

/// Runs every registered scenario sequentially, in declaration order.
///
/// A failure never short-circuits the run; later scenarios still execute.
pub async fn run_all<Cx: TraceHost>(
    registry: &Registry<Cx>,
    cx: &mut Cx,
) -> Vec<ScenarioOutcome> {
    let mut outcomes = Vec::with_capacity(registry.len());
    for scenario in registry.iter() {
        outcomes.push(run_scenario(scenario, cx).await);
    }
    outcomes
}

#[cfg(test)]
mod tests {
    use super::ScenarioOutcome;
    use super::TraceHost;
    use super::Verdict;
    use super::run_all;
    use super::run_scenario;
    use crate::failure::ScenarioError;
    use crate::registry::Registry;
    use crate::registry::Scenario;
    use crate::registry::ScenarioFuture;
    use crate::trace::StepTrace;

    /// Bare context carrying only the trace.
    struct TestContext {
        /// Per-invocation step trace.
        trace: StepTrace,
    }

    impl TraceHost for TestContext {
        fn trace(&self) -> &StepTrace {
            &self.trace
        }

        fn trace_mut(&mut self) -> &mut StepTrace {
            &mut self.trace
        }
    }

    /// Procedure recording two steps and succeeding.
    fn passing(cx: &mut TestContext) -> ScenarioFuture<'_> {
        Box::pin(async move {
            cx.trace_mut().push("first probe");
            cx.trace_mut().push("second probe");
            Ok(())
        })
    }

    /// Procedure failing after its second step.
    fn failing(cx: &mut TestContext) -> ScenarioFuture<'_> {
        Box::pin(async move {
            cx.trace_mut().push("Checking invalid sensor type");
            cx.trace_mut().push("Verifying status code");
            Err(ScenarioError::Transport("connection refused".to_string()))
        })
    }

    #[tokio::test]
    async fn passing_scenario_yields_passed_verdict() {
        let scenario = Scenario::new("api-1.1", "sensor counts", 0, passing);
        let mut cx = TestContext {
            trace: StepTrace::new(),
        };
        let outcome = run_scenario(&scenario, &mut cx).await;
        assert!(outcome.verdict.is_pass());
        assert!(cx.trace.is_empty());
    }

    #[tokio::test]
    async fn failure_embeds_the_collected_narrative() -> Result<(), Box<dyn std::error::Error>> {
        let scenario = Scenario::new("api-1.2", "invalid sensor type", 0, failing);
        let mut cx = TestContext {
            trace: StepTrace::new(),
        };
        let outcome = run_scenario(&scenario, &mut cx).await;
        let Verdict::Failed(failure) = outcome.verdict else {
            return Err("expected a failed verdict".into());
        };
        assert_eq!(
            failure.to_string(),
            "Failed at steps: Checking invalid sensor type -> Verifying status code\nError: connection refused"
        );
        assert!(cx.trace.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn stale_breadcrumbs_never_leak_between_scenarios() -> Result<(), Box<dyn std::error::Error>> {
        let first = Scenario::new("api-1.1", "sensor counts", 0, passing);
        let second = Scenario::new("api-1.2", "invalid sensor type", 0, failing);
        let mut cx = TestContext {
            trace: StepTrace::new(),
        };
        let _ = run_scenario(&first, &mut cx).await;
        let outcome = run_scenario(&second, &mut cx).await;
        let Verdict::Failed(failure) = outcome.verdict else {
            return Err("expected a failed verdict".into());
        };
        assert_eq!(
            failure.steps(),
            ["Checking invalid sensor type".to_string(), "Verifying status code".to_string()]
        );
        Ok(())
    }

    #[tokio::test]
    async fn run_all_executes_every_scenario_in_order() -> Result<(), Box<dyn std::error::Error>> {
        let mut registry: Registry<TestContext> = Registry::new();
        registry.register(Scenario::new("api-1.1", "sensor counts", 0, passing))?;
        registry.register(Scenario::new("api-1.2", "invalid sensor type", 0, failing))?;
        registry.register(Scenario::new("ingest-1.1", "mqtt to webserver", 50, passing))?;
        let mut cx = TestContext {
            trace: StepTrace::new(),
        };
        let outcomes = run_all(&registry, &mut cx).await;
        let verdicts: Vec<(&str, bool)> = outcomes
            .iter()
            .map(|outcome: &ScenarioOutcome| (outcome.id.as_str(), outcome.verdict.is_pass()))
            .collect();
        assert_eq!(
            verdicts,
            vec![("api-1.1", true), ("api-1.2", false), ("ingest-1.1", true)]
        );
        Ok(())
    }
}
