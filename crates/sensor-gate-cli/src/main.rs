// crates/sensor-gate-cli/src/main.rs
// ============================================================================
// Module: Sensor Gate CLI Entry Point
// Description: Command dispatcher for the acceptance gauntlet.
// Purpose: Expose the manifest and a sequential run-all driver.
// Dependencies: clap, sensor-gate-broker, sensor-gate-core, sensor-gate-scenarios, tokio
// ============================================================================

//! ## Overview
//! `sensor-gate list` prints the scenario manifest (identifier, weight,
//! description) the external scoring harness consumes. `sensor-gate run`
//! executes scenarios strictly sequentially against the configured service
//! and broker, prints PASS/FAIL lines with full diagnostics, and writes
//! summary artifacts. Exit-code semantics beyond non-zero-on-failure belong
//! to the harness, not to this binary.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod reporter;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use clap::Subcommand;

use sensor_gate_broker::MqttReadingBroker;
use sensor_gate_core::GauntletConfig;
use sensor_gate_core::ScenarioOutcome;
use sensor_gate_core::Verdict;
use sensor_gate_core::run_all;
use sensor_gate_core::run_scenario;
use sensor_gate_scenarios::ScenarioContext;
use sensor_gate_scenarios::build_registry;

use crate::reporter::RunReporter;

// ============================================================================
// SECTION: CLI Definition
// ============================================================================

/// Top-level command-line interface.
#[derive(Debug, Parser)]
#[command(name = "sensor-gate", about = "Acceptance gauntlet for a sensor-data web service")]
struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

/// Supported subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Print the scenario manifest consumed by the scoring harness.
    List,
    /// Run scenarios sequentially and report outcomes.
    Run {
        /// Run a single scenario by identifier instead of the full gauntlet.
        #[arg(long)]
        scenario: Option<String>,
        /// Override the base URL of the service under test.
        #[arg(long)]
        base_url: Option<String>,
        /// Directory to write summary artifacts into.
        #[arg(long)]
        report_dir: Option<PathBuf>,
    },
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match dispatch(cli).await {
        Ok(code) => code,
        Err(err) => {
            let _ = writeln!(io::stderr().lock(), "sensor-gate: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Routes the parsed command to its handler.
async fn dispatch(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    match cli.command {
        Command::List => list(),
        Command::Run {
            scenario,
            base_url,
            report_dir,
        } => run(scenario, base_url, report_dir).await,
    }
}

// ============================================================================
// SECTION: Commands
// ============================================================================

/// Prints the registry manifest as JSON.
fn list() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let registry = build_registry()?;
    let rendered = serde_json::to_string_pretty(&registry.manifest())?;
    writeln!(io::stdout().lock(), "{rendered}")?;
    Ok(ExitCode::SUCCESS)
}

/// Runs the selected scenarios and writes summary artifacts.
async fn run(
    scenario: Option<String>,
    base_url: Option<String>,
    report_dir: Option<PathBuf>,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let mut config = GauntletConfig::load()?;
    if let Some(base_url) = base_url {
        config.base_url = base_url;
    }
    let broker = Arc::new(MqttReadingBroker::new(&config.broker_host, config.broker_port));
    let registry = build_registry()?;
    let mut cx = ScenarioContext::new(config, broker)?;

    let reporter = RunReporter::new(report_dir)?;
    let outcomes = match scenario {
        Some(id) => {
            let scenario =
                registry.get(&id).ok_or_else(|| format!("unknown scenario id: {id}"))?;
            vec![run_scenario(scenario, &mut cx).await]
        }
        None => run_all(&registry, &mut cx).await,
    };

    let mut stdout = io::stdout().lock();
    let mut all_passed = true;
    for outcome in &outcomes {
        report_outcome(&mut stdout, outcome)?;
        all_passed &= outcome.verdict.is_pass();
    }
    reporter.finish(&outcomes)?;
    writeln!(stdout, "report written to {}", reporter.root().display())?;
    Ok(if all_passed { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Prints one PASS/FAIL line, with the diagnostic for failures.
fn report_outcome(
    stdout: &mut impl Write,
    outcome: &ScenarioOutcome,
) -> Result<(), Box<dyn std::error::Error>> {
    match &outcome.verdict {
        Verdict::Passed => {
            writeln!(stdout, "PASS {} ({} ms)", outcome.id, outcome.duration.as_millis())?;
        }
        Verdict::Failed(failure) => {
            writeln!(stdout, "FAIL {} ({} ms)", outcome.id, outcome.duration.as_millis())?;
            for line in failure.to_string().lines() {
                writeln!(stdout, "  {line}")?;
            }
        }
    }
    Ok(())
}
