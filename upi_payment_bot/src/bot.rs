//! The chat adapter.
//!
//! [`PaymentBot`] maps chat triggers onto the two order flow operations: `/start` creates an order, and a callback
//! token verifies one. Every failure is rendered as a reply. Nothing a requester sends can stop the bot.
use std::fmt::Write;

use log::*;
use upg_common::Paise;
use upi_payment_engine::{
    db_types::{Order, OrderId, OrderStatusType},
    gateway::PaymentStatusGateway,
    helpers::UpiPaymentLink,
    OrderFlowApi,
    OrderStore,
    VerifyOutcome,
};

use crate::{
    chat::{BotCommand, ChatMessage, ChatReply, ChatTrigger, InlineButton},
    CallbackToken,
    PayeeConfig,
};

pub const CHECK_PAYMENT_BUTTON: &str = "Check Payment";
pub const ORDER_NOT_FOUND: &str = "Order not found.";
pub const ALREADY_VERIFIED: &str = "Payment already verified!";
pub const PAYMENT_VERIFIED: &str = "Payment verified!";
pub const NOT_RECEIVED: &str = "Payment not received yet.";
pub const CHECK_FAILED: &str = "Error checking payment.";
pub const UNKNOWN_ACTION: &str = "Unknown action.";

const HELP_TEXT: &str = "/start - create a new order and get a UPI payment code\n/orders - list your orders\n/help - \
                         show this message\n\nAfter paying, press \"Check Payment\" to confirm your payment.";

pub struct PaymentBot<B, G> {
    api: OrderFlowApi<B, G>,
    payee: PayeeConfig,
    order_amount: Paise,
}

impl<B, G> PaymentBot<B, G> {
    pub fn new(api: OrderFlowApi<B, G>, payee: PayeeConfig, order_amount: Paise) -> Self {
        Self { api, payee, order_amount }
    }

    pub fn api(&self) -> &OrderFlowApi<B, G> {
        &self.api
    }

    pub fn order_amount(&self) -> Paise {
        self.order_amount
    }

    pub fn with_order_amount(mut self, amount: Paise) -> Self {
        self.order_amount = amount;
        self
    }

    fn payment_link(&self, order_id: &OrderId, amount: Paise) -> UpiPaymentLink {
        UpiPaymentLink::for_order(&self.payee.vpa, &self.payee.name, order_id, amount)
    }
}

impl<B, G> PaymentBot<B, G>
where
    B: OrderStore,
    G: PaymentStatusGateway,
{
    pub async fn handle(&self, trigger: ChatTrigger) -> ChatReply {
        match trigger {
            ChatTrigger::Command { requester_id, command } => match command {
                BotCommand::Start => self.start_order(&requester_id).await,
                BotCommand::Orders => self.list_orders(&requester_id).await,
                BotCommand::Help => ChatReply::message(ChatMessage::text(HELP_TEXT)),
            },
            ChatTrigger::Callback { requester_id, data } => self.check_payment(&requester_id, &data).await,
        }
    }

    async fn start_order(&self, requester_id: &str) -> ChatReply {
        match self.api.create_order(requester_id, self.order_amount).await {
            Ok(order) => {
                let text = format!(
                    "Scan this QR to pay {} for Order ID: {}\nClick below to verify payment.",
                    order.amount, order.order_id
                );
                let link = self.payment_link(&order.order_id, order.amount);
                let message = ChatMessage::text(text).with_payment_code(link).with_button(check_button(&order.order_id));
                ChatReply::message(message)
            },
            Err(e) if e.is_duplicate() => {
                info!("🤖️ Requester {requester_id} asked for two orders in the same second. {e}");
                ChatReply::message(ChatMessage::text(
                    "You just created an order. Please wait a moment and send /start again.",
                ))
            },
            Err(e) => {
                error!("🤖️ Could not create an order for requester {requester_id}. {e}");
                ChatReply::message(ChatMessage::text(format!("Could not create your order. {e}")))
            },
        }
    }

    async fn list_orders(&self, requester_id: &str) -> ChatReply {
        let orders = match self.api.orders_for_requester(requester_id).await {
            Ok(orders) => orders,
            Err(e) => {
                error!("🤖️ Could not fetch the orders for requester {requester_id}. {e}");
                return ChatReply::message(ChatMessage::text(format!("Could not fetch your orders. {e}")));
            },
        };
        if orders.is_empty() {
            return ChatReply::message(ChatMessage::text("You have no orders yet. Send /start to create one."));
        }
        let mut message = ChatMessage::text(format_orders(&orders));
        for order in orders.iter().filter(|o| o.status == OrderStatusType::Pending) {
            message = message.with_button(InlineButton::new(
                &format!("{CHECK_PAYMENT_BUTTON} ({})", order.order_id),
                CallbackToken::check(order.order_id.clone()).to_string(),
            ));
        }
        ChatReply::message(message)
    }

    async fn check_payment(&self, requester_id: &str, data: &str) -> ChatReply {
        let token = match data.parse::<CallbackToken>() {
            Ok(t) => t,
            Err(e) => {
                warn!("🤖️ Ignoring callback from requester {requester_id}. {e}");
                return ChatReply::answer(UNKNOWN_ACTION);
            },
        };
        let order_id = token.order_id();
        // Orders belonging to somebody else are reported as missing
        match self.api.fetch_order(order_id).await {
            Ok(order) if order.requester_id == requester_id => {},
            Ok(order) => {
                warn!(
                    "🤖️ Requester {requester_id} tried to check order [{order_id}], which belongs to {}",
                    order.requester_id
                );
                return ChatReply::answer(ORDER_NOT_FOUND);
            },
            Err(e) if e.not_found().is_some() => return ChatReply::answer(ORDER_NOT_FOUND),
            Err(e) => return check_failed(order_id, &e),
        }
        let outcome = self.api.verify_order(order_id).await;
        if let Ok(result) = &outcome {
            debug!("🤖️ Requester {requester_id} checked order [{order_id}]: {result}");
        }
        match outcome {
            Ok(VerifyOutcome::AlreadySuccess { order_id, .. }) => ChatReply::answer_with_message(
                ALREADY_VERIFIED,
                ChatMessage::text(format!("Payment for Order ID: {order_id} is successful!")),
            ),
            Ok(VerifyOutcome::NewlySuccess { order_id, amount }) => ChatReply::answer_with_message(
                PAYMENT_VERIFIED,
                ChatMessage::text(format!("Payment for Order ID: {order_id} is successful! Amount: {amount}")),
            ),
            Ok(VerifyOutcome::StillPending { order_id }) => ChatReply::answer_with_message(
                NOT_RECEIVED,
                ChatMessage::text(format!("Payment for Order ID: {order_id} is still pending."))
                    .with_button(check_button(&order_id)),
            ),
            Ok(VerifyOutcome::VerifyFailed { order_id, error }) => check_failed(&order_id, &error),
            Err(e) if e.not_found().is_some() => ChatReply::answer(ORDER_NOT_FOUND),
            Err(e) => check_failed(order_id, &e),
        }
    }
}

fn check_button(order_id: &OrderId) -> InlineButton {
    InlineButton::new(CHECK_PAYMENT_BUTTON, CallbackToken::check(order_id.clone()).to_string())
}

fn check_failed<E: std::fmt::Display>(order_id: &OrderId, error: &E) -> ChatReply {
    debug!("🤖️ Verification of order [{order_id}] failed. {error}");
    ChatReply::answer_with_message(CHECK_FAILED, ChatMessage::text(format!("Error verifying payment: {error}")))
}

fn format_orders(orders: &[Order]) -> String {
    let mut f = String::from("Your orders:\n");
    for order in orders {
        let _ = writeln!(
            f,
            "{:<28} {:>10}  {:<8} {}",
            order.order_id.as_str(),
            order.amount.to_string(),
            order.status.to_string(),
            order.created_at.format("%Y-%m-%d %H:%M")
        );
    }
    f.trim_end().to_string()
}
