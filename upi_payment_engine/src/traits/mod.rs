//! # Order storage contracts
//!
//! This module defines the interface that order storage *backends* must provide to the payment engine.
//!
//! The [`OrderStore`] trait holds no business logic. It persists orders, looks them up by id, and
//! overwrites their status. Deciding *when* a status may change is the job of the
//! [`OrderFlowApi`](crate::OrderFlowApi).
mod order_store;

pub use order_store::{OrderStore, OrderStoreError};
