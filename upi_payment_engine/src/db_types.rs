use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use thiserror::Error;
pub use upg_common::Paise;

//--------------------------------------   OrderStatusType     ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatusType {
    /// The order has been created, and the gateway has not (yet) confirmed a payment for it.
    Pending,
    /// The gateway has confirmed that the order was paid. This status is terminal.
    Success,
}

impl OrderStatusType {
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatusType::Success)
    }
}

impl Display for OrderStatusType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatusType::Pending => write!(f, "PENDING"),
            OrderStatusType::Success => write!(f, "SUCCESS"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid order status: {0}")]
pub struct ConversionError(String);

impl FromStr for OrderStatusType {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "SUCCESS" => Ok(Self::Success),
            s => Err(ConversionError(s.to_string())),
        }
    }
}

impl TryFrom<String> for OrderStatusType {
    type Error = ConversionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

//--------------------------------------        OrderId        ---------------------------------------------------------
/// An opaque order identifier. Ids are generated as `ORDER_<requester>_<unix seconds>`, but nothing should rely on
/// that structure. In particular, ids are never reconstructed by splitting strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl OrderId {
    pub fn new_for_requester(requester_id: &str, created_at: DateTime<Utc>) -> Self {
        Self(format!("ORDER_{requester_id}_{}", created_at.timestamp()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for OrderId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<String> for OrderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for OrderId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

//--------------------------------------        Order       ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Order {
    pub order_id: OrderId,
    /// The chat identity of whoever asked for the order
    pub requester_id: String,
    pub amount: Paise,
    #[sqlx(try_from = "String")]
    pub status: OrderStatusType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//--------------------------------------        NewOrder       ---------------------------------------------------------
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub order_id: OrderId,
    pub requester_id: String,
    pub amount: Paise,
}

impl NewOrder {
    pub fn new(order_id: OrderId, requester_id: String, amount: Paise) -> Self {
        Self { order_id, requester_id, amount }
    }
}

#[cfg(test)]
mod test {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn order_ids_embed_requester_and_timestamp() {
        let ts = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let id = OrderId::new_for_requester("42", ts);
        assert_eq!(id.as_str(), "ORDER_42_1700000000");
        assert_eq!(id.to_string(), "ORDER_42_1700000000");
    }

    #[test]
    fn status_round_trips_through_text() {
        assert_eq!("PENDING".parse::<OrderStatusType>().unwrap(), OrderStatusType::Pending);
        assert_eq!(OrderStatusType::try_from("SUCCESS".to_string()).unwrap(), OrderStatusType::Success);
        assert!("Paid".parse::<OrderStatusType>().is_err());
        assert!(OrderStatusType::Success.is_terminal());
        assert!(!OrderStatusType::Pending.is_terminal());
    }
}
