use crate::cli::{display::BridgeDisplay, SwapArgs};
use crate::core::{Config, SwapError, SwapResult};
use crate::executor::{validate_quote, SwapOrchestrator};
use crate::quotes::QuoteClient;
use crate::transaction::KeypairSigner;
use crate::utils::parse_keypair;
use colored::*;
use dialoguer::{theme::ColorfulTheme, Confirm, Password};
use log::info;

pub async fn execute(args: SwapArgs, config: &Config) -> SwapResult<()> {
    println!("{}", "🚀 Relay Bridge: Solana → Base".bold().cyan());

    let private_key = match std::env::var("WALLET_PRIVATE_KEY")
        .or_else(|_| std::env::var("PRIVATE_KEY"))
    {
        Ok(key) => key,
        Err(_) => {
            println!("{}", "🔑 Enter your private key".yellow());
            Password::with_theme(&ColorfulTheme::default())
                .with_prompt("Private Key")
                .interact()
                .map_err(|e| SwapError::ConfigError(format!("Failed to read private key: {}", e)))?
        }
    };

    let signer = KeypairSigner::new(parse_keypair(&private_key)?);
    let user_pubkey = signer.pubkey();
    info!("Using wallet: {}", user_pubkey);

    let pb = BridgeDisplay::create_progress_bar("Requesting quote...");
    let client = QuoteClient::new(&config.relay_api_url, config.http_timeout_secs)?;
    let quote = match client
        .request_quote(&user_pubkey.to_string(), &args.recipient)
        .await
        .and_then(|quote| {
            validate_quote(&quote)?;
            Ok(quote)
        })
    {
        Ok(quote) => quote,
        Err(e) => {
            pb.finish_and_clear();
            BridgeDisplay::display_error(&e);
            return Err(e);
        }
    };
    pb.finish_and_clear();

    BridgeDisplay::display_quote(&quote, &user_pubkey.to_string(), &args.recipient);

    let proceed = if args.yes {
        true
    } else {
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Do you want to proceed with this bridge transfer?")
            .default(false)
            .interact()
            .map_err(|e| SwapError::ConfigError(format!("Failed to read confirmation: {}", e)))?
    };

    if !proceed {
        println!("{}", "❌ Bridge cancelled".yellow());
        return Ok(());
    }

    let pb = BridgeDisplay::create_progress_bar("Sending deposit and waiting for settlement...");
    let orchestrator = SwapOrchestrator::from_config(config)?;

    match orchestrator.execute_swap(&quote, &user_pubkey, &signer).await {
        Ok(result) => {
            pb.finish_and_clear();
            BridgeDisplay::display_submission(&result);
            Ok(())
        }
        Err(e) => {
            pb.finish_and_clear();
            BridgeDisplay::display_error(&e);
            Err(e)
        }
    }
}
