use std::time::Duration;

use log::*;
use upg_common::Secret;

pub const DEFAULT_GATEWAY_URL: &str = "https://securegw.paytm.in";
pub const DEFAULT_GATEWAY_TIMEOUT: Duration = Duration::from_secs(15);
const STATUS_PATH: &str = "/v3/order/status";

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Scheme and host of the gateway, without a trailing slash. e.g. "https://securegw.paytm.in"
    pub base_url: String,
    /// The merchant id, sent as `mid` in every request
    pub merchant_id: String,
    /// The shared secret used to sign requests
    pub merchant_key: Secret<String>,
    /// Upper bound on a single status query, connection set-up included
    pub timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GATEWAY_URL.to_string(),
            merchant_id: String::default(),
            merchant_key: Secret::default(),
            timeout: DEFAULT_GATEWAY_TIMEOUT,
        }
    }
}

impl GatewayConfig {
    pub fn new(base_url: &str, merchant_id: &str, merchant_key: Secret<String>) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self { base_url, merchant_id: merchant_id.to_string(), merchant_key, ..Default::default() }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn new_from_env_or_default() -> Self {
        let base_url = std::env::var("UPG_GATEWAY_URL").unwrap_or_else(|_| {
            info!("🪛️ UPG_GATEWAY_URL not set, using {DEFAULT_GATEWAY_URL}");
            DEFAULT_GATEWAY_URL.to_string()
        });
        let merchant_id = std::env::var("UPG_MERCHANT_ID").unwrap_or_else(|_| {
            error!("🪛️ UPG_MERCHANT_ID is not set. Status queries will be rejected by the gateway.");
            String::default()
        });
        let merchant_key = Secret::new(std::env::var("UPG_MERCHANT_KEY").unwrap_or_else(|_| {
            error!("🪛️ UPG_MERCHANT_KEY is not set. Status queries will be rejected by the gateway.");
            String::default()
        }));
        let timeout = std::env::var("UPG_GATEWAY_TIMEOUT_SECS")
            .ok()
            .and_then(|s| {
                s.parse::<u64>()
                    .map_err(|e| {
                        warn!("🪛️ {s} is not a valid UPG_GATEWAY_TIMEOUT_SECS value. {e}. Using the default.");
                    })
                    .ok()
            })
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_GATEWAY_TIMEOUT);
        Self::new(&base_url, &merchant_id, merchant_key).with_timeout(timeout)
    }

    pub fn status_url(&self) -> String {
        format!("{}{STATUS_PATH}", self.base_url)
    }
}
