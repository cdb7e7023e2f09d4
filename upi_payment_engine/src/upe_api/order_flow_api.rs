use std::fmt::Debug;

use chrono::{DateTime, Utc};
use log::*;
use upg_common::Paise;

use crate::{
    db_types::{NewOrder, Order, OrderId, OrderStatusType},
    gateway::{GatewayStatus, PaymentStatusGateway},
    order_objects::{OrderCreated, VerifyOutcome},
    traits::OrderStore,
    OrderFlowError,
};

/// `OrderFlowApi` owns the order state machine.
///
/// Orders are created `PENDING`. The only transition is `PENDING` → `SUCCESS`, and it only happens inside
/// [`Self::verify_order`] when the gateway confirms the payment. `SUCCESS` is terminal: once an order is settled
/// locally, the gateway is not asked about it again.
pub struct OrderFlowApi<B, G> {
    db: B,
    gateway: G,
}

impl<B, G> Debug for OrderFlowApi<B, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderFlowApi")
    }
}

impl<B, G> OrderFlowApi<B, G> {
    pub fn new(db: B, gateway: G) -> Self {
        Self { db, gateway }
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}

impl<B, G> OrderFlowApi<B, G>
where
    B: OrderStore,
    G: PaymentStatusGateway,
{
    /// Creates a new `PENDING` order for `requester_id`.
    ///
    /// The order id is derived from the requester and the current time. If the requester already created an order in
    /// the same second, this fails with a duplicate-order error (see [`OrderFlowError::is_duplicate`]) and the caller
    /// should try again.
    pub async fn create_order(&self, requester_id: &str, amount: Paise) -> Result<OrderCreated, OrderFlowError> {
        self.create_order_at(requester_id, amount, Utc::now()).await
    }

    /// As [`Self::create_order`], but with an explicit creation time for the order id.
    pub async fn create_order_at(
        &self,
        requester_id: &str,
        amount: Paise,
        created_at: DateTime<Utc>,
    ) -> Result<OrderCreated, OrderFlowError> {
        if !amount.is_positive() {
            return Err(OrderFlowError::InvalidAmount(amount));
        }
        let order_id = OrderId::new_for_requester(requester_id, created_at);
        let new_order = NewOrder::new(order_id, requester_id.to_string(), amount);
        let order = self.db.insert_order(new_order).await?;
        info!("🔄️📦️ Order [{}] for {} created for requester {requester_id}", order.order_id, order.amount);
        Ok(OrderCreated::from(order))
    }

    /// Checks whether `order_id` has been paid, updating the local record if the gateway says it has.
    ///
    /// Only store failures are returned as errors (including an unknown order id, in which case the gateway is not
    /// contacted). Gateway failures are reported as [`VerifyOutcome::VerifyFailed`] and never change local state.
    pub async fn verify_order(&self, order_id: &OrderId) -> Result<VerifyOutcome, OrderFlowError> {
        let order = self.db.fetch_order(order_id).await?;
        if order.status.is_terminal() {
            debug!("🔄️✅️ Order [{order_id}] is already settled. Not querying the gateway.");
            return Ok(VerifyOutcome::AlreadySuccess { order_id: order.order_id, amount: order.amount });
        }
        trace!("🔄️💳️ Order [{order_id}] is {}. Asking the gateway for its status.", order.status);
        let outcome = match self.gateway.query_status(order_id).await {
            Ok(GatewayStatus::Success) => {
                let updated = self.db.update_order_status(order_id, OrderStatusType::Success).await?;
                info!("🔄️✅️ Payment for order [{order_id}] confirmed by the gateway. {} received.", updated.amount);
                VerifyOutcome::NewlySuccess { order_id: updated.order_id, amount: updated.amount }
            },
            Ok(GatewayStatus::Pending) => {
                debug!("🔄️⏳️ Payment for order [{order_id}] has not been received yet.");
                VerifyOutcome::StillPending { order_id: order.order_id }
            },
            Err(error) => {
                warn!("🔄️❌️ Could not verify order [{order_id}]. {error}");
                VerifyOutcome::VerifyFailed { order_id: order.order_id, error }
            },
        };
        Ok(outcome)
    }

    /// Fetches a single order.
    pub async fn fetch_order(&self, order_id: &OrderId) -> Result<Order, OrderFlowError> {
        let order = self.db.fetch_order(order_id).await?;
        Ok(order)
    }

    /// Fetches all orders raised by `requester_id`, oldest first.
    pub async fn orders_for_requester(&self, requester_id: &str) -> Result<Vec<Order>, OrderFlowError> {
        let orders = self.db.fetch_orders_for_requester(requester_id).await?;
        Ok(orders)
    }
}
