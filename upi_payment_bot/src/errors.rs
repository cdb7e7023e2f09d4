use thiserror::Error;
use upi_payment_engine::{gateway::GatewayError, OrderFlowError};

#[derive(Debug, Error)]
pub enum BotError {
    #[error("Invalid bot configuration. {0}")]
    ConfigurationError(String),
    #[error("Could not open the order database. {0}")]
    DatabaseError(String),
    #[error("Could not migrate the order database. {0}")]
    MigrationError(String),
    #[error("{0}")]
    OrderFlowError(#[from] OrderFlowError),
    #[error("{0}")]
    GatewayError(#[from] GatewayError),
    #[error("'{0}' is not a valid callback token")]
    InvalidCallbackToken(String),
    #[error("'{0}' is not a bot command. Try /help")]
    UnknownCommand(String),
    #[error("Could not render the payment code. {0}")]
    PaymentCodeError(String),
    #[error("An I/O error happened. {0}")]
    IOError(#[from] std::io::Error),
}

impl From<std::fmt::Error> for BotError {
    fn from(e: std::fmt::Error) -> Self {
        BotError::IOError(std::io::Error::new(std::io::ErrorKind::Other, e))
    }
}
