use std::{
    fs,
    path::{Path, PathBuf},
};

use clap::{Args, Parser, Subcommand};
use log::*;
use upg_common::Paise;
use upi_payment_engine::{db_types::OrderId, gateway::GatewayClient, OrderFlowApi, SqliteDatabase};

use crate::{
    chat::{BotCommand, ChatReply, ChatTrigger},
    console::{format_reply, run_console},
    payment_code::render_svg,
    BotConfig,
    BotError,
    CallbackToken,
    PaymentBot,
};

#[derive(Parser, Debug)]
#[command(version, about = "Take UPI payments from a chat conversation")]
pub struct Arguments {
    /// Print replies as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[clap(name = "new-order", about = "Create an order, as if the requester had sent /start")]
    NewOrder(NewOrderParams),
    #[clap(name = "check", about = "Verify the payment for an order, as if the requester had pressed Check Payment")]
    Check(CheckParams),
    #[clap(name = "orders", about = "List a requester's orders")]
    Orders(RequesterParams),
    #[clap(name = "console", about = "Chat with the bot on the terminal")]
    Console(RequesterParams),
    #[clap(name = "migrate", about = "Create or upgrade the order database")]
    Migrate,
}

#[derive(Debug, Args)]
pub struct RequesterParams {
    /// The chat identity of the requester
    #[arg(short = 'r', long = "requester")]
    pub requester: String,
}

#[derive(Debug, Args)]
pub struct NewOrderParams {
    /// The chat identity of the requester
    #[arg(short = 'r', long = "requester")]
    pub requester: String,
    /// The order amount in rupees. Defaults to UPG_ORDER_AMOUNT
    #[arg(short = 'a', long = "amount")]
    pub amount: Option<Paise>,
    /// Also write the payment code as an SVG image to this file
    #[arg(long = "svg")]
    pub svg: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct CheckParams {
    /// The chat identity of the requester
    #[arg(short = 'r', long = "requester")]
    pub requester: String,
    /// A callback token (check:<order_id>) or a bare order id
    pub token: String,
}

impl CheckParams {
    pub fn callback_token(&self) -> CallbackToken {
        self.token.parse::<CallbackToken>().unwrap_or_else(|_| CallbackToken::check(OrderId::from(self.token.trim())))
    }
}

pub async fn open_database(config: &BotConfig) -> Result<SqliteDatabase, BotError> {
    if let Some(dir) = config.database_dir() {
        fs::create_dir_all(&dir)?;
    }
    let db = SqliteDatabase::new_with_url(&config.database_url, config.max_connections)
        .await
        .map_err(|e| BotError::DatabaseError(e.to_string()))?;
    db.run_migrations().await.map_err(|e| BotError::MigrationError(e.to_string()))?;
    Ok(db)
}

/// Orders can only be paid if the payment code names a payee.
fn require_payee(config: &BotConfig) -> Result<(), BotError> {
    if config.payee.vpa.is_empty() {
        return Err(BotError::ConfigurationError("UPG_PAYEE_VPA must be set to create orders".into()));
    }
    Ok(())
}

/// Payments can only be verified with the merchant credentials.
fn require_gateway_credentials(config: &BotConfig) -> Result<(), BotError> {
    if config.gateway.merchant_id.is_empty() || config.gateway.merchant_key.is_empty() {
        return Err(BotError::ConfigurationError(
            "UPG_MERCHANT_ID and UPG_MERCHANT_KEY must be set to verify payments".into(),
        ));
    }
    Ok(())
}

pub async fn new_bot(config: &BotConfig) -> Result<PaymentBot<SqliteDatabase, GatewayClient>, BotError> {
    let db = open_database(config).await?;
    let gateway = GatewayClient::new(config.gateway.clone())?;
    let api = OrderFlowApi::new(db, gateway);
    Ok(PaymentBot::new(api, config.payee.clone(), config.order_amount))
}

pub async fn handle_command(args: Arguments, config: BotConfig) -> Result<(), BotError> {
    let json = args.json;
    match args.command {
        Command::Migrate => {
            let db = open_database(&config).await?;
            println!("Database at {} is up to date", db.url());
            db.pool().close().await;
            Ok(())
        },
        Command::NewOrder(params) => {
            require_payee(&config)?;
            let mut bot = new_bot(&config).await?;
            if let Some(amount) = params.amount {
                bot = bot.with_order_amount(amount);
            }
            let reply = bot.handle(ChatTrigger::command(&params.requester, BotCommand::Start)).await;
            if let Some(path) = &params.svg {
                save_payment_code(&reply, path)?;
            }
            print_reply(&reply, json)
        },
        Command::Check(params) => {
            require_gateway_credentials(&config)?;
            let bot = new_bot(&config).await?;
            let token = params.callback_token();
            debug!("🖥️ Checking order [{}] for requester {}", token.order_id(), params.requester);
            let reply = bot.handle(ChatTrigger::callback(&params.requester, &token.to_string())).await;
            print_reply(&reply, json)
        },
        Command::Orders(params) => {
            let bot = new_bot(&config).await?;
            let reply = bot.handle(ChatTrigger::command(&params.requester, BotCommand::Orders)).await;
            print_reply(&reply, json)
        },
        Command::Console(params) => {
            require_payee(&config)?;
            require_gateway_credentials(&config)?;
            let bot = new_bot(&config).await?;
            run_console(&bot, &params.requester).await
        },
    }
}

/// Writes the first payment code in the reply as an SVG image. Replies without one leave no file behind.
pub fn save_payment_code(reply: &ChatReply, path: &Path) -> Result<bool, BotError> {
    let Some(link) = reply.messages.iter().find_map(|m| m.payment_code.as_ref()) else {
        warn!("🖥️ The reply has no payment code. Nothing was written to {}", path.display());
        return Ok(false);
    };
    fs::write(path, render_svg(link)?)?;
    info!("🖥️ Payment code saved to {}", path.display());
    Ok(true)
}

fn print_reply(reply: &ChatReply, json: bool) -> Result<(), BotError> {
    if json {
        let s = serde_json::to_string_pretty(reply).map_err(|e| BotError::IOError(e.into()))?;
        println!("{s}");
    } else {
        print!("{}", format_reply(reply)?);
    }
    Ok(())
}
