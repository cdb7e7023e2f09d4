//! # UPI Payment Bot
//!
//! The chat-facing side of the UPI payment flow. A requester sends `/start`, gets a UPI payment code for a fixed
//! amount and a "Check Payment" button. Pressing the button asks the [`upi_payment_engine`] to verify the order
//! against the payment gateway.
//!
//! The bot is transport agnostic. [`PaymentBot`] consumes [`ChatTrigger`]s and produces [`ChatReply`]s; the console
//! transport in [`console`] and the command line in [`cli`] are the two front ends shipped here.
pub mod bot;
pub mod callback;
pub mod chat;
pub mod cli;
pub mod config;
pub mod console;
pub mod errors;
pub mod payment_code;

pub use bot::PaymentBot;
pub use callback::CallbackToken;
pub use chat::{BotCommand, ChatMessage, ChatReply, ChatTrigger, InlineButton};
pub use config::{BotConfig, PayeeConfig};
pub use errors::BotError;
