use mockall::mock;
use upi_payment_engine::{
    db_types::OrderId,
    gateway::{GatewayError, GatewayStatus, PaymentStatusGateway},
};

mock! {
    pub Gateway {}
    impl PaymentStatusGateway for Gateway {
        async fn query_status(&self, order_id: &OrderId) -> Result<GatewayStatus, GatewayError>;
    }
}
