//! # UPI payment engine public API
//!
//! * [`order_flow_api`] is the order lifecycle controller. It creates orders and verifies them against the payment
//!   gateway, applying the gateway's answer to the order store.
//! * [`order_objects`] holds the values handed back to the presentation and chat layers.
//!
//! An API instance is created by supplying an [`OrderStore`](crate::OrderStore) backend and a
//! [`PaymentStatusGateway`](crate::gateway::PaymentStatusGateway):
//!
//! ```rust,ignore
//! use upi_payment_engine::{gateway::{GatewayClient, GatewayConfig}, OrderFlowApi, SqliteDatabase};
//! let db = SqliteDatabase::new_with_url("sqlite://data/upi_payments.db", 5).await?;
//! let gateway = GatewayClient::new(GatewayConfig::new_from_env_or_default())?;
//! let api = OrderFlowApi::new(db, gateway);
//! let order = api.create_order("42", Paise::from_rupees(150)).await?;
//! let outcome = api.verify_order(&order.order_id).await?;
//! ```
pub mod errors;
pub mod order_flow_api;
pub mod order_objects;
