mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use scenario_rig::{logging, util::ui};

fn main() {
    if let Err(e) = run() {
        ui::error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = cli.config.as_deref();

    match cli.command {
        Some(Commands::List { json }) => cli::list::run(json),
        Some(Commands::Run {
            names,
            keep,
            stream,
            json,
        }) => cli::run::run(config, &names, cli::run::RunOptions { keep, stream, json }),
        Some(Commands::Rid) => cli::rid::run(config),
        Some(Commands::Which) => cli::which::run(config),
        None => {
            // No command provided, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
            Ok(())
        }
    }
}
