use log::{debug, trace};
use sqlx::SqliteConnection;

use crate::{
    db_types::{NewOrder, Order, OrderId, OrderStatusType},
    traits::OrderStoreError,
};

/// Inserts a new order with `PENDING` status. This is not atomic with respect to other calls. You can embed it inside
/// a transaction and pass `&mut *tx` as the connection argument if you need that.
///
/// Returns `None` if an order with the same `order_id` already exists. The existing row is not modified.
pub async fn insert_order(order: NewOrder, conn: &mut SqliteConnection) -> Result<Option<Order>, sqlx::Error> {
    let order: Option<Order> = sqlx::query_as(
        r#"
            INSERT INTO orders (order_id, requester_id, amount, status)
            VALUES ($1, $2, $3, 'PENDING')
            ON CONFLICT (order_id) DO NOTHING
            RETURNING *;
        "#,
    )
    .bind(order.order_id)
    .bind(order.requester_id)
    .bind(order.amount)
    .fetch_optional(conn)
    .await?;
    if let Some(o) = &order {
        debug!("📝️ Order [{}] inserted for requester {}", o.order_id, o.requester_id);
    }
    Ok(order)
}

/// Returns the entry in the orders table for the corresponding `order_id`
pub async fn fetch_order_by_order_id(
    order_id: &OrderId,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, sqlx::Error> {
    let order =
        sqlx::query_as("SELECT * FROM orders WHERE order_id = $1").bind(order_id.as_str()).fetch_optional(conn).await?;
    Ok(order)
}

/// Returns all the orders for the requester, ordered by `created_at` in ascending order
pub async fn fetch_orders_for_requester(
    requester_id: &str,
    conn: &mut SqliteConnection,
) -> Result<Vec<Order>, sqlx::Error> {
    let orders: Vec<Order> =
        sqlx::query_as("SELECT * FROM orders WHERE requester_id = $1 ORDER BY created_at ASC, order_id ASC")
            .bind(requester_id)
            .fetch_all(conn)
            .await?;
    trace!("📝️ {} orders found for requester {requester_id}", orders.len());
    Ok(orders)
}

/// Sets the status of the order. A `SUCCESS` order is never moved back to `PENDING`; the `WHERE` clause filters
/// such updates out, so a stale writer cannot regress a settled order.
pub(crate) async fn update_order_status(
    order_id: &OrderId,
    new_status: OrderStatusType,
    conn: &mut SqliteConnection,
) -> Result<Order, OrderStoreError> {
    let status = new_status.to_string();
    let result: Option<Order> = sqlx::query_as(
        r#"
            UPDATE orders SET status = $1, updated_at = CURRENT_TIMESTAMP
            WHERE order_id = $2 AND (status <> 'SUCCESS' OR $3 = 'SUCCESS')
            RETURNING *;
        "#,
    )
    .bind(status.as_str())
    .bind(order_id.as_str())
    .bind(status.as_str())
    .fetch_optional(&mut *conn)
    .await?;
    match result {
        Some(order) => {
            trace!("📝️ Order [{order_id}] status set to {status}");
            Ok(order)
        },
        None => match fetch_order_by_order_id(order_id, conn).await? {
            Some(existing) => Err(OrderStoreError::StatusRegression(existing.order_id, new_status)),
            None => Err(OrderStoreError::OrderNotFound(order_id.clone())),
        },
    }
}
