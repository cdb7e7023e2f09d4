use thiserror::Error;

use crate::db_types::{NewOrder, Order, OrderId, OrderStatusType};

/// The `OrderStore` trait defines the behaviour for persisting orders and their settlement status.
///
/// Every method is a single-key operation. Backends acquire whatever connection they need for the duration of the
/// call and release it on every exit path.
#[allow(async_fn_in_trait)]
pub trait OrderStore: Clone {
    /// Persists a new order with `PENDING` status and returns the stored record.
    ///
    /// ## Failure modes:
    /// - [`OrderStoreError::DuplicateOrder`] if an order with the same `order_id` already exists. The existing record
    ///   is left untouched.
    async fn insert_order(&self, order: NewOrder) -> Result<Order, OrderStoreError>;

    /// Fetches the order with the given id, or fails with [`OrderStoreError::OrderNotFound`].
    async fn fetch_order(&self, order_id: &OrderId) -> Result<Order, OrderStoreError>;

    /// Overwrites the status of the order and returns the updated record.
    ///
    /// `SUCCESS` is absorbing: setting `SUCCESS` on a settled order succeeds without effect, while trying to move a
    /// settled order back to `PENDING` fails with [`OrderStoreError::StatusRegression`].
    ///
    /// ## Failure modes:
    /// - [`OrderStoreError::OrderNotFound`] if the order does not exist.
    async fn update_order_status(&self, order_id: &OrderId, status: OrderStatusType) -> Result<Order, OrderStoreError>;

    /// Fetches every order raised by the given requester, oldest first.
    async fn fetch_orders_for_requester(&self, requester_id: &str) -> Result<Vec<Order>, OrderStoreError>;

    /// Closes the underlying storage.
    async fn close(&mut self) -> Result<(), OrderStoreError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Error)]
pub enum OrderStoreError {
    #[error("We have an internal database engine (configuration/uptime etc.) error: {0}")]
    DatabaseError(String),
    #[error("Cannot insert order, since it already exists with id {0}")]
    DuplicateOrder(OrderId),
    #[error("The requested order {0} does not exist")]
    OrderNotFound(OrderId),
    #[error("Order {0} has already been paid and cannot be moved back to {1}")]
    StatusRegression(OrderId, OrderStatusType),
}

impl From<sqlx::Error> for OrderStoreError {
    fn from(e: sqlx::Error) -> Self {
        OrderStoreError::DatabaseError(e.to_string())
    }
}
