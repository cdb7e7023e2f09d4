//! The transport-neutral chat model.
//!
//! A chat transport turns whatever its platform delivers into a [`ChatTrigger`], hands it to the bot, and renders the
//! [`ChatReply`] that comes back. Rendering includes drawing any payment code (see [`crate::payment_code`]) and the
//! inline buttons.
use std::{fmt::Display, str::FromStr};

use serde::{Serialize, Serializer};
use upi_payment_engine::helpers::UpiPaymentLink;

use crate::BotError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotCommand {
    /// Create a new order and reply with a payment code
    Start,
    /// List the requester's orders
    Orders,
    Help,
}

impl Display for BotCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BotCommand::Start => write!(f, "/start"),
            BotCommand::Orders => write!(f, "/orders"),
            BotCommand::Help => write!(f, "/help"),
        }
    }
}

impl FromStr for BotCommand {
    type Err = BotError;

    /// Accepts `/start`, `start`, and the `/start@SomeBot` form that group chats use.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let word = s.split_whitespace().next().unwrap_or_default();
        let name = word.trim_start_matches('/').split('@').next().unwrap_or_default();
        match name.to_ascii_lowercase().as_str() {
            "start" => Ok(BotCommand::Start),
            "orders" => Ok(BotCommand::Orders),
            "help" => Ok(BotCommand::Help),
            _ => Err(BotError::UnknownCommand(s.trim().to_string())),
        }
    }
}

/// Something a requester did in the chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatTrigger {
    Command { requester_id: String, command: BotCommand },
    /// A button press. `data` is the button's callback payload, normally a [`crate::CallbackToken`].
    Callback { requester_id: String, data: String },
}

impl ChatTrigger {
    pub fn command(requester_id: &str, command: BotCommand) -> Self {
        Self::Command { requester_id: requester_id.to_string(), command }
    }

    pub fn callback(requester_id: &str, data: &str) -> Self {
        Self::Callback { requester_id: requester_id.to_string(), data: data.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineButton {
    pub text: String,
    pub callback_data: String,
}

impl InlineButton {
    pub fn new(text: &str, callback_data: String) -> Self {
        Self { text: text.to_string(), callback_data }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ChatMessage {
    pub text: String,
    /// When present, the transport draws this link as a scannable code and uses `text` as its caption
    #[serde(serialize_with = "link_as_uri")]
    pub payment_code: Option<UpiPaymentLink>,
    pub buttons: Vec<InlineButton>,
}

impl ChatMessage {
    pub fn text<S: Into<String>>(text: S) -> Self {
        Self { text: text.into(), ..Default::default() }
    }

    pub fn with_payment_code(mut self, link: UpiPaymentLink) -> Self {
        self.payment_code = Some(link);
        self
    }

    pub fn with_button(mut self, button: InlineButton) -> Self {
        self.buttons.push(button);
        self
    }
}

/// The bot's answer to a trigger.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ChatReply {
    /// Short acknowledgement shown on the button that was pressed. Only set for callbacks.
    pub callback_answer: Option<String>,
    pub messages: Vec<ChatMessage>,
}

impl ChatReply {
    pub fn message(message: ChatMessage) -> Self {
        Self { callback_answer: None, messages: vec![message] }
    }

    pub fn answer(answer: &str) -> Self {
        Self { callback_answer: Some(answer.to_string()), messages: vec![] }
    }

    pub fn answer_with_message(answer: &str, message: ChatMessage) -> Self {
        Self { callback_answer: Some(answer.to_string()), messages: vec![message] }
    }
}

fn link_as_uri<S: Serializer>(link: &Option<UpiPaymentLink>, s: S) -> Result<S::Ok, S::Error> {
    match link {
        Some(link) => s.serialize_some(&link.to_uri()),
        None => s.serialize_none(),
    }
}
