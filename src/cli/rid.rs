//! Rid command - print the runtime identifier the tool reports
//!
//! rig rid

use anyhow::{Context, Result};
use scenario_rig::config::{Config, VersionPins};
use scenario_rig::scenario::Harness;
use std::path::Path;

pub fn run(config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path)?;
    let harness = Harness::from_config(&config, &VersionPins::from_env())?;

    let mut ctx = harness.context();
    let rid = ctx
        .current_rid()
        .with_context(|| format!("Could not determine RID from {} --info", harness.tool.display()))?;

    println!("{}", rid);
    Ok(())
}
