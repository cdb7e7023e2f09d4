use clap::Parser;
use dotenvy::dotenv;
use log::info;
use upi_payment_bot::{
    cli::{handle_command, Arguments},
    BotConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();
    let args = Arguments::parse();
    let config = BotConfig::from_env_or_default();
    info!("🚀️ Using database {} and gateway {}", config.database_url, config.gateway.base_url);
    handle_command(args, config).await?;
    Ok(())
}
