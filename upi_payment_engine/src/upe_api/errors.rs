use thiserror::Error;
use upg_common::Paise;

use crate::{db_types::OrderId, traits::OrderStoreError};

#[derive(Debug, Clone, Error)]
pub enum OrderFlowError {
    #[error("{0}")]
    StoreError(#[from] OrderStoreError),
    #[error("Order amounts must be positive, but {0} was requested")]
    InvalidAmount(Paise),
}

impl OrderFlowError {
    /// The order id, if this error means the order does not exist
    pub fn not_found(&self) -> Option<&OrderId> {
        match self {
            OrderFlowError::StoreError(OrderStoreError::OrderNotFound(id)) => Some(id),
            _ => None,
        }
    }

    /// True if the order id was already taken. The caller should try again with a fresh id.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, OrderFlowError::StoreError(OrderStoreError::DuplicateOrder(_)))
    }
}
