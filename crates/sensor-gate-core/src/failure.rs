// crates/sensor-gate-core/src/failure.rs
// ============================================================================
// Module: Diagnostic Failure
// Description: Scenario-boundary error union and the step-annotated failure.
// Purpose: Guarantee that every failure carries the full step narrative.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Scenario procedures return [`ScenarioError`] values; the runner converts
//! them into [`StepFailure`] values that embed the breadcrumbs collected up
//! to the point of failure. The `Display` format of [`StepFailure`] is
//! load-bearing for debugging and must not change:
//! `Failed at steps: {steps joined by " -> "}` on the first line, then
//! `Error: {original}` on the second.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use thiserror::Error;

use crate::check::CheckError;
use crate::config::ConfigError;
use crate::reading::TimestampError;
use crate::trace::NARRATIVE_SEPARATOR;

// ============================================================================
// SECTION: Scenario Errors
// ============================================================================

/// Errors that cross a scenario boundary.
///
/// # Invariants
/// - The scenario boundary is the sole recovery point; nothing below it
///   retries or recovers.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// An observed value, status, ordering, or cardinality violated the
    /// contract under test.
    #[error(transparent)]
    Check(#[from] CheckError),
    /// A transport-level failure from the HTTP probe or the broker link.
    #[error("{0}")]
    Transport(String),
    /// A configuration problem surfaced while the scenario was running.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<TimestampError> for ScenarioError {
    fn from(err: TimestampError) -> Self {
        Self::Transport(err.to_string())
    }
}

// ============================================================================
// SECTION: Step Failure
// ============================================================================

/// Diagnostic failure combining the step narrative with the original error.
///
/// # Invariants
/// - `steps` is the exact breadcrumb sequence collected before the failure.
/// - The rendered message is self-contained; consumers never need the
///   original error object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepFailure {
    /// Breadcrumbs collected before the failure, oldest first.
    steps: Vec<String>,
    /// Stringified original error.
    error: String,
}

impl StepFailure {
    /// Creates a failure from the collected breadcrumbs and the original
    /// error.
    #[must_use]
    pub fn new(steps: Vec<String>, error: &ScenarioError) -> Self {
        Self {
            steps,
            error: error.to_string(),
        }
    }

    /// Returns the breadcrumbs collected before the failure.
    #[must_use]
    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    /// Joins the breadcrumbs into the arrow-separated narrative.
    #[must_use]
    pub fn narrative(&self) -> String {
        self.steps.join(NARRATIVE_SEPARATOR)
    }

    /// Returns the stringified original error.
    #[must_use]
    pub fn error(&self) -> &str {
        &self.error
    }
}

impl fmt::Display for StepFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed at steps: {}\nError: {}", self.narrative(), self.error)
    }
}

impl std::error::Error for StepFailure {}
