use crate::cli::{display::BridgeDisplay, QuoteArgs};
use crate::core::{Config, SwapResult};
use crate::quotes::QuoteClient;
use colored::*;
use log::info;

pub async fn execute(args: QuoteArgs, config: &Config) -> SwapResult<()> {
    println!("{}", "🚀 Relay Bridge Quote".bold().cyan());

    let pb = BridgeDisplay::create_progress_bar("Requesting quote...");

    let client = QuoteClient::new(&config.relay_api_url, config.http_timeout_secs)?;
    let user = args.user.to_string();
    info!("Getting quote for {} -> {}", user, args.recipient);

    let quote = match client.request_quote(&user, &args.recipient).await {
        Ok(quote) => quote,
        Err(e) => {
            pb.finish_and_clear();
            BridgeDisplay::display_error(&e);
            return Err(e);
        }
    };

    pb.finish_and_clear();
    BridgeDisplay::display_quote(&quote, &user, &args.recipient);

    Ok(())
}
