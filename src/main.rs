use anyhow::Result;
use clap::Parser;
use impensa::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    impensa::logging::init(cli.verbose);
    cli.run()
}
