use clap::Parser;
use legal_strategy_gateway::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve::run().await,
        Command::Status => cli::status::run().await,
        Command::Generate(args) => cli::generate::run(args).await,
    }
}
