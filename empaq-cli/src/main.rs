//! empaq CLI - extract and assess the Empacotamento hourly reading.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "empaq-cli",
    version,
    about = "Empacotamento hourly series monitor"
)]
struct Cli {
    #[command(subcommand)]
    command: empaq_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    empaq_cmd::run(cli.command).await
}
