//! Which command - show the tool executable scenarios will invoke
//!
//! rig which

use anyhow::Result;
use scenario_rig::config::Config;
use std::path::Path;

pub fn run(config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path)?;
    let tool = config.tool_path()?;
    println!("{}", tool.display());
    Ok(())
}
