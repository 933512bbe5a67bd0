//! List command
//!
//! rig list [--json]

use anyhow::Result;
use scenario_rig::scenario::catalog;
use serde::Serialize;

#[derive(Serialize)]
struct Entry {
    name: &'static str,
    description: &'static str,
}

pub fn run(json: bool) -> Result<()> {
    let entries: Vec<Entry> = catalog::all()
        .iter()
        .map(|s| Entry {
            name: s.name,
            description: s.description,
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    let width = entries.iter().map(|e| e.name.len()).max().unwrap_or(0);
    for entry in &entries {
        println!("{:width$}  {}", entry.name, entry.description, width = width);
    }
    Ok(())
}
