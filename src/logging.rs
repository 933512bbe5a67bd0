//! Tracing setup for the rig binary
//!
//! Diagnostics go to stderr so they never mix with `--json` output on stdout.
//! `RUST_LOG` takes precedence over the `--verbose` default.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "scenario_rig=debug,warn"
    } else {
        "scenario_rig=info,warn"
    }
}

pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}
