use std::sync::Arc;

use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    Client,
};
use serde_json::Value;

use super::{
    wire_objects::{SignedRequest, StatusResult, RESULT_STATUS_POINTER},
    GatewayConfig,
    GatewayError,
    GatewayStatus,
    PaymentStatusGateway,
};
use crate::db_types::OrderId;

/// The `resultStatus` value the gateway uses for a settled transaction. Every other value means "not paid".
pub const TXN_SUCCESS: &str = "TXN_SUCCESS";

#[derive(Clone)]
pub struct GatewayClient {
    config: GatewayConfig,
    client: Arc<Client>,
}

impl GatewayClient {
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let mut headers = HeaderMap::with_capacity(1);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    /// Sends a signed status query for `order_id` and returns the result fields from the response.
    pub async fn fetch_status(&self, order_id: &OrderId) -> Result<StatusResult, GatewayError> {
        let request = SignedRequest::status_query(order_id, &self.config.merchant_id, &self.config.merchant_key)?;
        let url = self.config.status_url();
        trace!("💳️ Sending status query for [{order_id}] to {url}");
        let response = self.client.post(url).body(request.to_json()?).send().await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            warn!("💳️ Status query for [{order_id}] failed with HTTP {status}");
            return Err(GatewayError::QueryError { status: status.as_u16(), message: text });
        }
        let json = serde_json::from_str::<Value>(&text).map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;
        let result = StatusResult::from_response(&json).ok_or_else(|| {
            warn!("💳️ Status response for [{order_id}] has no result status: {json}");
            GatewayError::MissingField(RESULT_STATUS_POINTER.trim_start_matches('/').replace('/', "."))
        })?;
        debug!(
            "💳️ Gateway status for [{order_id}]: {} ({}: {})",
            result.result_status,
            result.result_code.as_deref().unwrap_or("-"),
            result.result_msg.as_deref().unwrap_or("-")
        );
        Ok(result)
    }
}

impl PaymentStatusGateway for GatewayClient {
    async fn query_status(&self, order_id: &OrderId) -> Result<GatewayStatus, GatewayError> {
        let result = self.fetch_status(order_id).await?;
        if result.result_status == TXN_SUCCESS {
            Ok(GatewayStatus::Success)
        } else {
            Ok(GatewayStatus::Pending)
        }
    }
}
