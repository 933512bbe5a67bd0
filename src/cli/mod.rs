use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rig")]
#[command(about = "End-to-end restore/build/run/publish scenarios for the dotnet CLI")]
#[command(version)]
pub struct Cli {
    /// Config file (default: rig.toml in the current directory or a parent)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log every spawned command (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List available scenarios
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run scenarios (all of them if none are named)
    Run {
        /// Scenario names, in the order to run them
        names: Vec<String>,

        /// Leave test roots on disk after the run
        #[arg(long)]
        keep: bool,

        /// Stream tool output to the terminal instead of capturing it
        #[arg(long)]
        stream: bool,

        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the runtime identifier reported by `<tool> --info`
    Rid,

    /// Print the resolved path of the tool under test
    Which,
}

pub mod list;
pub mod rid;
pub mod run;
pub mod which;
