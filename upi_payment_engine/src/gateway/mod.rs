//! # Payment gateway client
//!
//! The gateway is the source of truth for whether an order has been paid. This module talks to its transaction status
//! endpoint.
//!
//! * [`PaymentStatusGateway`] is the seam used by the [`OrderFlowApi`](crate::OrderFlowApi). Anything that can answer
//!   "has this order been paid?" can be plugged in.
//! * [`GatewayClient`] is the HTTP implementation. It signs each status query with the merchant key (see
//!   [`checksum`](crate::helpers::checksum)) and normalises the answer into a [`GatewayStatus`].
//!
//! The client never retries. Retrying is the caller's decision.
mod config;
mod errors;
mod status_client;
pub mod wire_objects;

pub use config::GatewayConfig;
pub use errors::GatewayError;
pub use status_client::{GatewayClient, TXN_SUCCESS};

use crate::db_types::OrderId;

/// The settlement status of an order, as reported by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayStatus {
    /// The gateway reports that the transaction succeeded.
    Success,
    /// Any other answer: not paid yet, failed, or unknown to the gateway.
    Pending,
}

#[allow(async_fn_in_trait)]
pub trait PaymentStatusGateway {
    /// Ask the gateway for the settlement status of `order_id`.
    async fn query_status(&self, order_id: &OrderId) -> Result<GatewayStatus, GatewayError>;
}
