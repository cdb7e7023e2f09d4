use thiserror::Error;

use crate::helpers::SignatureError;

#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    #[error("Could not initialize the gateway client: {0}")]
    Initialization(String),
    #[error("Could not sign the status request. {0}")]
    Signature(#[from] SignatureError),
    #[error("Could not reach the payment gateway: {0}")]
    Network(String),
    #[error("The payment gateway did not answer in time: {0}")]
    Timeout(String),
    #[error("Status query failed. Error {status}. {message}")]
    QueryError { status: u16, message: String },
    #[error("The payment gateway sent a response that is not valid JSON: {0}")]
    InvalidResponse(String),
    #[error("The payment gateway response is missing the '{0}' field")]
    MissingField(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            GatewayError::Timeout(e.to_string())
        } else {
            GatewayError::Network(e.to_string())
        }
    }
}
