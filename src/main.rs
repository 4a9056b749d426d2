use anyhow::Result;
use clap::Parser;
use orderly_config::{cli::Cli, run};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
