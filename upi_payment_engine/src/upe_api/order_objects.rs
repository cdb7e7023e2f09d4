use std::fmt::Display;

use serde::Serialize;
use upg_common::Paise;

use crate::{
    db_types::{Order, OrderId},
    gateway::GatewayError,
};

/// What the presentation layer needs to render a payment request for a freshly created order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderCreated {
    pub order_id: OrderId,
    pub requester_id: String,
    pub amount: Paise,
}

impl From<Order> for OrderCreated {
    fn from(order: Order) -> Self {
        Self { order_id: order.order_id, requester_id: order.requester_id, amount: order.amount }
    }
}

/// The result of a verification attempt.
#[derive(Debug, Clone)]
pub enum VerifyOutcome {
    /// The order was already settled locally. The gateway was not contacted.
    AlreadySuccess { order_id: OrderId, amount: Paise },
    /// The gateway confirmed the payment just now, and the order has been marked as settled.
    NewlySuccess { order_id: OrderId, amount: Paise },
    /// The gateway has not confirmed the payment. Nothing was changed; ask again later.
    StillPending { order_id: OrderId },
    /// The gateway could not be queried. Nothing was changed; the attempt can be retried.
    VerifyFailed { order_id: OrderId, error: GatewayError },
}

impl Display for VerifyOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerifyOutcome::AlreadySuccess { .. } => write!(f, "ALREADY_SUCCESS"),
            VerifyOutcome::NewlySuccess { .. } => write!(f, "NEWLY_SUCCESS"),
            VerifyOutcome::StillPending { .. } => write!(f, "STILL_PENDING"),
            VerifyOutcome::VerifyFailed { .. } => write!(f, "VERIFY_FAILED"),
        }
    }
}
