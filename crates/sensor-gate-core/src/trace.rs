// crates/sensor-gate-core/src/trace.rs
// ============================================================================
// Module: Step Trace
// Description: Ordered breadcrumb trail scoped to one scenario invocation.
// Purpose: Enrich failure diagnostics with the actions taken so far.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Each scenario invocation owns exactly one [`StepTrace`]. The trace starts
//! empty, accumulates human-readable breadcrumbs as the scenario progresses,
//! and is discarded when the scenario finishes. Traces are never shared
//! across scenarios.

/// Separator used when joining breadcrumbs into a narrative.
pub(crate) const NARRATIVE_SEPARATOR: &str = " -> ";

/// Append-only breadcrumb trail for a single scenario invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepTrace {
    /// Ordered breadcrumbs, oldest first.
    steps: Vec<String>,
}

impl StepTrace {
    /// Creates an empty trace.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            steps: Vec::new(),
        }
    }

    /// Appends a breadcrumb describing the action about to be taken.
    pub fn push(&mut self, step: impl Into<String>) {
        self.steps.push(step.into());
    }

    /// Removes every breadcrumb, returning the trace to its initial state.
    pub fn clear(&mut self) {
        self.steps.clear();
    }

    /// Returns the breadcrumbs in insertion order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<String> {
        self.steps.clone()
    }

    /// Joins the breadcrumbs into a single arrow-separated narrative.
    #[must_use]
    pub fn narrative(&self) -> String {
        self.steps.join(NARRATIVE_SEPARATOR)
    }

    /// Returns the number of recorded breadcrumbs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true when no breadcrumbs have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
