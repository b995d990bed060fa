// crates/sensor-gate-cli/src/reporter.rs
// ============================================================================
// Module: Run Reporter
// Description: Artifact writer for gauntlet runs.
// Purpose: Persist deterministic run summaries next to the console output.
// Dependencies: serde, serde_jcs, sensor-gate-core
// ============================================================================

//! ## Overview
//! Each run writes two artifacts under its run root: `summary.json` in
//! canonical JCS form for machine consumers, and `summary.md` for humans.
//! Score aggregation stays with the external harness; the summary only
//! records outcomes and the metadata surface.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use sensor_gate_core::ScenarioOutcome;
use sensor_gate_core::Verdict;

// ============================================================================
// SECTION: Summary Types
// ============================================================================

/// One scenario outcome as persisted in the summary.
#[derive(Debug, Serialize)]
struct OutcomeRecord {
    /// Scenario identifier.
    id: String,
    /// Grading weight.
    weight: u32,
    /// `pass` or `fail`.
    status: String,
    /// Wall-clock duration in milliseconds.
    duration_ms: u128,
    /// Full diagnostic message for failures.
    failure: Option<String>,
}

/// Persisted run summary.
#[derive(Debug, Serialize)]
struct RunSummary {
    /// `pass` when every scenario passed.
    status: String,
    /// Run start, unix milliseconds.
    started_at_ms: u128,
    /// Run end, unix milliseconds.
    ended_at_ms: u128,
    /// Total wall-clock duration in milliseconds.
    duration_ms: u128,
    /// Number of passing scenarios.
    passed: usize,
    /// Number of failing scenarios.
    failed: usize,
    /// Per-scenario outcomes in execution order.
    outcomes: Vec<OutcomeRecord>,
}

/// Returns the current unix time in milliseconds.
fn now_millis() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}

/// Returns the default run root for a new run.
fn default_run_root() -> PathBuf {
    let stamp = now_millis();
    PathBuf::from("target/sensor-gate").join(format!("run_{stamp}"))
}

// ============================================================================
// SECTION: Reporter
// ============================================================================

/// Artifact writer for one gauntlet run.
#[derive(Debug)]
pub struct RunReporter {
    /// Artifact root for this run.
    root: PathBuf,
    /// Run start, unix milliseconds.
    started_at_ms: u128,
}

impl RunReporter {
    /// Creates the run root, honoring an explicit directory when given.
    ///
    /// # Errors
    ///
    /// Returns the underlying error when the directory cannot be created.
    pub fn new(root: Option<PathBuf>) -> io::Result<Self> {
        let root = root.unwrap_or_else(default_run_root);
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            started_at_ms: now_millis(),
        })
    }

    /// Returns the artifact root for this run.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes `summary.json` and `summary.md` for the finished run.
    ///
    /// # Errors
    ///
    /// Returns the underlying error when serialization or writing fails.
    pub fn finish(&self, outcomes: &[ScenarioOutcome]) -> io::Result<()> {
        let ended_at_ms = now_millis();
        let records: Vec<OutcomeRecord> = outcomes
            .iter()
            .map(|outcome| OutcomeRecord {
                id: outcome.id.to_string(),
                weight: outcome.weight,
                status: if outcome.verdict.is_pass() { "pass" } else { "fail" }.to_string(),
                duration_ms: outcome.duration.as_millis(),
                failure: match &outcome.verdict {
                    Verdict::Passed => None,
                    Verdict::Failed(failure) => Some(failure.to_string()),
                },
            })
            .collect();
        let passed = records.iter().filter(|record| record.status == "pass").count();
        let summary = RunSummary {
            status: if passed == records.len() { "pass" } else { "fail" }.to_string(),
            started_at_ms: self.started_at_ms,
            ended_at_ms,
            duration_ms: ended_at_ms.saturating_sub(self.started_at_ms),
            passed,
            failed: records.len() - passed,
            outcomes: records,
        };
        let bytes = serde_jcs::to_vec(&summary)
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err.to_string()))?;
        fs::write(self.root.join("summary.json"), bytes)?;
        fs::write(self.root.join("summary.md"), summary_markdown(&summary))?;
        Ok(())
    }
}

/// Renders the human-readable summary.
fn summary_markdown(summary: &RunSummary) -> String {
    let mut out = String::new();
    out.push_str("# Sensor Gate Run Summary\n\n");
    out.push_str("## Status\n\n");
    out.push_str(&format!("- Status: {}\n", summary.status));
    out.push_str(&format!("- Passed: {}\n", summary.passed));
    out.push_str(&format!("- Failed: {}\n", summary.failed));
    out.push_str(&format!("- Duration (ms): {}\n", summary.duration_ms));
    out.push_str("\n## Scenarios\n\n");
    for outcome in &summary.outcomes {
        out.push_str(&format!(
            "- `{}` (weight {}): {} in {} ms\n",
            outcome.id, outcome.weight, outcome.status, outcome.duration_ms
        ));
        if let Some(failure) = &outcome.failure {
            for line in failure.lines() {
                out.push_str(&format!("  - {line}\n"));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use sensor_gate_core::ScenarioError;
    use sensor_gate_core::ScenarioId;
    use sensor_gate_core::ScenarioOutcome;
    use sensor_gate_core::StepFailure;
    use sensor_gate_core::Verdict;

    use super::RunReporter;

    fn outcomes() -> Vec<ScenarioOutcome> {
        let error = ScenarioError::Transport("connection refused".to_string());
        vec![
            ScenarioOutcome {
                id: ScenarioId::new("api-1.1"),
                weight: 0,
                verdict: Verdict::Passed,
                duration: Duration::from_millis(12),
            },
            ScenarioOutcome {
                id: ScenarioId::new("ingest-1.1"),
                weight: 50,
                verdict: Verdict::Failed(StepFailure::new(
                    vec!["Sending message to MQTT broker".to_string()],
                    &error,
                )),
                duration: Duration::from_millis(20_000),
            },
        ]
    }

    #[test]
    fn summary_json_is_written_canonically() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let reporter = RunReporter::new(Some(dir.path().join("run")))?;
        reporter.finish(&outcomes())?;

        let raw = std::fs::read_to_string(reporter.root().join("summary.json"))?;
        let summary: serde_json::Value = serde_json::from_str(&raw)?;
        assert_eq!(summary["status"], "fail");
        assert_eq!(summary["passed"], 1);
        assert_eq!(summary["failed"], 1);
        assert_eq!(summary["outcomes"][0]["id"], "api-1.1");
        assert_eq!(summary["outcomes"][1]["weight"], 50);
        let failure = summary["outcomes"][1]["failure"]
            .as_str()
            .ok_or("failure message missing")?;
        assert!(failure.starts_with("Failed at steps: Sending message to MQTT broker"));
        Ok(())
    }

    #[test]
    fn summary_markdown_lists_every_scenario() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let reporter = RunReporter::new(Some(dir.path().join("run")))?;
        reporter.finish(&outcomes())?;

        let rendered = std::fs::read_to_string(reporter.root().join("summary.md"))?;
        assert!(rendered.contains("`api-1.1` (weight 0): pass"));
        assert!(rendered.contains("`ingest-1.1` (weight 50): fail"));
        assert!(rendered.contains("Error: connection refused"));
        Ok(())
    }
}
