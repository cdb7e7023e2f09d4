//! Callback payloads attached to chat buttons.
//!
//! A token is `check:<order_id>`. The order id is everything after the prefix, so ids containing `_` or `:` survive
//! the round trip intact. Tokens written with the older `check_` prefix are still accepted, so buttons already sitting
//! in a chat keep working.
use std::{fmt::Display, str::FromStr};

use upi_payment_engine::db_types::OrderId;

use crate::BotError;

pub const CHECK_PREFIX: &str = "check:";
const LEGACY_CHECK_PREFIX: &str = "check_";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackToken {
    /// Verify the payment for the given order
    CheckPayment(OrderId),
}

impl CallbackToken {
    pub fn check(order_id: OrderId) -> Self {
        Self::CheckPayment(order_id)
    }

    pub fn order_id(&self) -> &OrderId {
        match self {
            CallbackToken::CheckPayment(id) => id,
        }
    }
}

impl Display for CallbackToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CallbackToken::CheckPayment(id) => write!(f, "{CHECK_PREFIX}{id}"),
        }
    }
}

impl FromStr for CallbackToken {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let id = s
            .strip_prefix(CHECK_PREFIX)
            .or_else(|| s.strip_prefix(LEGACY_CHECK_PREFIX))
            .filter(|id| !id.is_empty())
            .ok_or_else(|| BotError::InvalidCallbackToken(s.to_string()))?;
        Ok(Self::CheckPayment(OrderId::from(id)))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn order_ids_with_underscores_survive() {
        let id = OrderId::from("ORDER_42_1700000000");
        let token = CallbackToken::check(id.clone());
        assert_eq!(token.to_string(), "check:ORDER_42_1700000000");
        let parsed = token.to_string().parse::<CallbackToken>().unwrap();
        assert_eq!(parsed.order_id(), &id);
    }

    #[test]
    fn legacy_tokens() {
        let parsed = "check_ORDER_42_1700000000".parse::<CallbackToken>().unwrap();
        assert_eq!(parsed.order_id().as_str(), "ORDER_42_1700000000");
        let parsed = "check:ORDER_a:b_1".parse::<CallbackToken>().unwrap();
        assert_eq!(parsed.order_id().as_str(), "ORDER_a:b_1");
    }

    #[test]
    fn invalid_tokens() {
        for s in ["", "check:", "check_", "pay:ORDER_42_1", "ORDER_42_1700000000"] {
            let err = s.parse::<CallbackToken>().expect_err(s);
            assert!(matches!(err, BotError::InvalidCallbackToken(_)));
        }
    }
}
