//! Run command
//!
//! rig run [NAMES...] [--keep] [--stream] [--json]

use anyhow::{bail, Result};
use indicatif::{ProgressBar, ProgressStyle};
use scenario_rig::config::{Config, VersionPins};
use scenario_rig::scenario::{catalog, run_scenario, Harness, ScenarioOutcome};
use scenario_rig::util::ui;
use std::path::Path;
use std::time::Duration;

pub struct RunOptions {
    pub keep: bool,
    pub stream: bool,
    pub json: bool,
}

pub fn run(config_path: Option<&Path>, names: &[String], opts: RunOptions) -> Result<()> {
    let config = Config::load(config_path)?;
    let selected = catalog::select(names)?;

    let mut harness = Harness::from_config(&config, &VersionPins::from_env())?;
    harness.settings.keep_roots |= opts.keep;
    harness.settings.capture &= !opts.stream;

    if !opts.json {
        ui::info(&format!(
            "Running {} scenario(s) with {}",
            selected.len(),
            harness.tool.display()
        ));
        println!();
    }

    let mut outcomes = Vec::with_capacity(selected.len());
    for scenario in selected {
        let spinner = (!opts.json && harness.settings.capture).then(|| spinner(scenario.name));
        let outcome = run_scenario(&harness, scenario);
        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }

        if !opts.json {
            print_outcome(&outcome);
        }
        outcomes.push(outcome);
    }

    let failed = outcomes.iter().filter(|o| !o.passed).count();

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
    } else {
        println!();
        ui::info(&format!(
            "{} passed, {} failed",
            outcomes.len() - failed,
            failed
        ));
    }

    if failed > 0 {
        bail!("{} of {} scenarios failed", failed, outcomes.len());
    }
    Ok(())
}

fn spinner(name: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} [{elapsed}]")
            .expect("Invalid spinner template"),
    );
    pb.set_message(name.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn print_outcome(outcome: &ScenarioOutcome) {
    let secs = outcome.duration_ms as f64 / 1000.0;

    if outcome.passed {
        ui::success(&format!("{} ({:.1}s)", outcome.name, secs));
    } else {
        let phase = outcome
            .failed_in
            .map(|p| format!(" while {}", p))
            .unwrap_or_default();
        ui::error(&format!("{}{} ({:.1}s)", outcome.name, phase, secs));

        match (&outcome.failure, &outcome.error) {
            (Some(failure), _) => ui::block(&failure.to_string()),
            (None, Some(error)) => ui::block(error),
            (None, None) => {}
        }
    }

    for root in &outcome.kept_roots {
        ui::dim(&format!("kept {}", root.display()));
    }
}
