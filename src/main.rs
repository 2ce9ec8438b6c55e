use clap::Parser;
use datamap::cli::{run, Cli};
use datamap::error::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}
