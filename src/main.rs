use clap::Parser;
use relayswap::cli::{self, Cli};
use relayswap::core::SwapError;

#[tokio::main]
async fn main() -> Result<(), SwapError> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Arguments first, so --help works whatever the environment holds
    let cli = Cli::parse();
    cli::run(cli).await
}
