use crate::core::{Config, SwapResult};
use clap::{Parser, Subcommand};
use solana_sdk::pubkey::Pubkey;

pub mod commands;
pub mod display;

#[derive(Parser)]
#[command(name = "relayswap")]
#[command(about = "Bridge SOL from Solana to Base through Relay", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch a bridge quote without sending anything
    Quote(QuoteArgs),

    /// Bridge 0.01 SOL to a Base address
    Swap(SwapArgs),
}

#[derive(Parser)]
pub struct QuoteArgs {
    /// Solana address paying for the bridge
    #[arg(long, value_parser = parse_pubkey)]
    pub user: Pubkey,

    /// Base (EVM) address receiving the funds
    #[arg(long, value_parser = parse_evm_address)]
    pub recipient: String,
}

#[derive(Parser)]
pub struct SwapArgs {
    /// Base (EVM) address receiving the funds
    #[arg(long, value_parser = parse_evm_address)]
    pub recipient: String,

    /// Skip confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

/// Load configuration and dispatch a parsed command.
pub async fn run(cli: Cli) -> SwapResult<()> {
    dotenv::dotenv().ok();
    let config = Config::from_env()?;
    config.validate()?;

    match cli.command {
        Commands::Quote(args) => commands::quote::execute(args, &config).await,
        Commands::Swap(args) => commands::swap::execute(args, &config).await,
    }
}

fn parse_pubkey(s: &str) -> Result<Pubkey, String> {
    crate::utils::parse_pubkey(s).map_err(|e| e.to_string())
}

fn parse_evm_address(s: &str) -> Result<String, String> {
    crate::utils::validate_evm_address(s)
        .map(|_| s.to_string())
        .map_err(|e| e.to_string())
}
