use clap::Parser;
use laserium::cli::{self, Cli};

#[tokio::main]
async fn main() -> miette::Result<()> {
    cli::run(Cli::parse()).await
}
