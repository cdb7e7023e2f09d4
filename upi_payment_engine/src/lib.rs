//! UPI Payment Engine
//!
//! The UPI Payment Engine tracks payment orders raised from a chat conversation and verifies their settlement against
//! a remote payment gateway. It knows nothing about the chat transport or how payment codes are drawn; those live in
//! the `upi_payment_bot` crate.
//!
//! The library is divided into the following sections:
//! 1. Order storage ([`OrderStore`]). A durable record of orders keyed by order id. SQLite is the supported backend
//!    ([`SqliteDatabase`]). The data types used by the store are defined in [`mod@db_types`] and are public.
//! 2. Request signing ([`helpers::checksum`]). Canonical JSON encoding and HMAC-SHA256 signatures shared with the
//!    gateway.
//! 3. The gateway client ([`mod@gateway`]). Builds signed transaction status queries and normalises the gateway's
//!    answer.
//! 4. The order flow API ([`OrderFlowApi`]). Owns the order state machine: orders are created `PENDING`, and move to
//!    `SUCCESS` only when the gateway confirms the payment.
pub mod db_types;
pub mod gateway;
pub mod helpers;
#[cfg(feature = "sqlite")]
mod sqlite;
mod traits;
mod upe_api;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;
pub use traits::{OrderStore, OrderStoreError};
pub use upe_api::{
    errors::OrderFlowError,
    order_flow_api::OrderFlowApi,
    order_objects::{self, OrderCreated, VerifyOutcome},
};
