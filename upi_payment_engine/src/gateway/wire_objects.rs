//! Request and response shapes of the gateway's transaction status API.
//!
//! Request:
//! ```json
//! {"head":{"version":"v1","signature":"<base64 HMAC>"},"body":{"mid":"<merchant id>","orderId":"<order id>"}}
//! ```
//! The signature covers the canonical encoding of `body` only.
use serde::{Deserialize, Serialize};
use serde_json::Value;
use upg_common::Secret;

use crate::{
    db_types::OrderId,
    helpers::checksum::{ascii_json, canonical_value, sign, SignatureError},
};

pub const API_VERSION: &str = "v1";
/// JSON pointer to the field that carries the transaction status in a status response
pub const RESULT_STATUS_POINTER: &str = "/body/resultInfo/resultStatus";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusQueryBody {
    pub mid: String,
    pub order_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestHead {
    pub version: String,
    pub signature: String,
}

/// A signed request envelope. `body` holds the canonical form of the body, so the bytes sent are the bytes signed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignedRequest {
    pub head: RequestHead,
    pub body: Value,
}

impl SignedRequest {
    pub fn status_query(order_id: &OrderId, merchant_id: &str, key: &Secret<String>) -> Result<Self, SignatureError> {
        let body = StatusQueryBody { mid: merchant_id.to_string(), order_id: order_id.as_str().to_string() };
        let body = canonical_value(&body)?;
        let signature = sign(&body, key)?;
        Ok(Self { head: RequestHead { version: API_VERSION.to_string(), signature }, body })
    }

    /// The request as sent on the wire. The `body` text is byte-for-byte the text that was signed.
    pub fn to_json(&self) -> Result<String, SignatureError> {
        ascii_json(self)
    }
}

/// The parts of a status response that matter to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusResult {
    pub result_status: String,
    pub result_code: Option<String>,
    pub result_msg: Option<String>,
}

impl StatusResult {
    /// Pulls the result fields out of a status response. Returns `None` if `body.resultInfo.resultStatus` is absent or
    /// is not a string.
    pub fn from_response(response: &Value) -> Option<Self> {
        let result_status = response.pointer(RESULT_STATUS_POINTER)?.as_str()?.to_string();
        let field = |name: &str| {
            response.pointer(&format!("/body/resultInfo/{name}")).and_then(|v| match v {
                Value::String(s) => Some(s.clone()),
                Value::Null => None,
                other => Some(other.to_string()),
            })
        };
        Some(Self { result_status, result_code: field("resultCode"), result_msg: field("resultMsg") })
    }
}
