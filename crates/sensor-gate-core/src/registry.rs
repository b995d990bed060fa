// crates/sensor-gate-core/src/registry.rs
// ============================================================================
// Module: Scenario Registry
// Description: Static scenario declarations keyed by stable identifier.
// Purpose: Expose the identifier/weight surface consumed by the scoring harness.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Scenarios are declared once at process start and never mutated. The
//! registry preserves declaration order (which is also execution order for
//! the run-all driver), rejects duplicate identifiers, and renders the
//! `{id, weight, description}` manifest that is the only surface the
//! external scoring harness consumes.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use serde::Serialize;
use thiserror::Error;

use crate::failure::ScenarioError;

// ============================================================================
// SECTION: Identifiers
// ============================================================================

/// Stable scenario identifier: a category plus a sequence number, for
/// example `api-1.3` or `ingest-1.1`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ScenarioId(String);

impl ScenarioId {
    /// Creates an identifier from its string form.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// SECTION: Scenario Declarations
// ============================================================================

/// Boxed future returned by a scenario procedure.
pub type ScenarioFuture<'a> = Pin<Box<dyn Future<Output = Result<(), ScenarioError>> + Send + 'a>>;

/// Procedure executed for a scenario, borrowing the shared context for the
/// duration of the run.
pub type ScenarioProc<Cx> = for<'a> fn(&'a mut Cx) -> ScenarioFuture<'a>;

/// One independently pass/fail-able test case.
///
/// # Invariants
/// - Declared statically; immutable after registration.
/// - `weight` is the non-negative grading weight owned by the external
///   harness; this system only transports it.
pub struct Scenario<Cx> {
    /// Stable identifier exposed to the scoring harness.
    pub id: ScenarioId,
    /// Human-readable description.
    pub description: &'static str,
    /// Non-negative grading weight.
    pub weight: u32,
    /// Executable procedure.
    pub proc: ScenarioProc<Cx>,
}

impl<Cx> Scenario<Cx> {
    /// Declares a scenario.
    #[must_use]
    pub fn new(
        id: &str,
        description: &'static str,
        weight: u32,
        proc: ScenarioProc<Cx>,
    ) -> Self {
        Self {
            id: ScenarioId::new(id),
            description,
            weight,
            proc,
        }
    }
}

/// Metadata surface consumed by the external scoring harness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioMetadata {
    /// Stable identifier.
    pub id: ScenarioId,
    /// Grading weight.
    pub weight: u32,
    /// Human-readable description.
    pub description: String,
}

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Errors raised while building the registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A scenario with the same identifier is already registered.
    #[error("duplicate scenario id: {0}")]
    DuplicateId(ScenarioId),
}

/// Declaration-ordered mapping of identifier to scenario.
pub struct Registry<Cx> {
    /// Scenarios in declaration order.
    entries: Vec<Scenario<Cx>>,
}

impl<Cx> Default for Registry<Cx> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Cx> Registry<Cx> {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Registers a scenario, preserving declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateId`] when the identifier is taken.
    pub fn register(&mut self, scenario: Scenario<Cx>) -> Result<(), RegistryError> {
        if self.entries.iter().any(|entry| entry.id == scenario.id) {
            return Err(RegistryError::DuplicateId(scenario.id));
        }
        self.entries.push(scenario);
        Ok(())
    }

    /// Looks up a scenario by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Scenario<Cx>> {
        self.entries.iter().find(|entry| entry.id.as_str() == id)
    }

    /// Iterates scenarios in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Scenario<Cx>> {
        self.entries.iter()
    }

    /// Returns the number of registered scenarios.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no scenarios are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders the metadata manifest for the external scoring harness.
    #[must_use]
    pub fn manifest(&self) -> Vec<ScenarioMetadata> {
        self.entries
            .iter()
            .map(|entry| ScenarioMetadata {
                id: entry.id.clone(),
                weight: entry.weight,
                description: entry.description.to_string(),
            })
            .collect()
    }
}
