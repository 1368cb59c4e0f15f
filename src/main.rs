use clap::Parser;

use seqserver::bootstrap::BootstrapError;
use seqserver::cli::{self, Commands};
use seqserver::logging;

fn main() {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    logging::init(cli.verbose);

    if let Err(err) = run(cli) {
        tracing::error!("{err:#}");
        std::process::exit(exit_code(&err));
    }
}

fn run(cli: cli::Cli) -> anyhow::Result<()> {
    let options = cli.startup_options();

    match cli.command {
        Commands::Databases(args) => {
            cli::databases::run(args, options, cli.format, cli.verbose)?;
        }
        Commands::Scan(args) => {
            cli::scan::run(args, options, cli.format)?;
        }
        Commands::Check => {
            cli::check::run(options, cli.format)?;
        }
    }

    Ok(())
}

/// Startup failures carry their own status; anything else exits with 1
fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<BootstrapError>()
        .map_or(1, BootstrapError::exit_code)
}
