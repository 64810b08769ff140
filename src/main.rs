use anyhow::Result;
use clap::Parser;

use formatflex::cli::{self, Args, CliConfig};

fn main() -> Result<()> {
    let args = Args::parse();

    cli::init_logging(args.verbose, args.quiet);

    let config = CliConfig::from_args(args);
    cli::run(&config)
}
