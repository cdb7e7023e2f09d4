use std::{
    env,
    path::{Path, PathBuf},
};

use log::*;
use upg_common::Paise;
use upi_payment_engine::gateway::GatewayConfig;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/upi_payments.db";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_PAYEE_NAME: &str = "Merchant";
pub const DEFAULT_ORDER_AMOUNT: &str = "150.00";

#[derive(Clone, Debug)]
pub struct BotConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub gateway: GatewayConfig,
    pub payee: PayeeConfig,
    /// The amount charged for every order created with `/start`
    pub order_amount: Paise,
}

/// Who gets paid. These values end up in the payment code.
#[derive(Clone, Debug, Default)]
pub struct PayeeConfig {
    /// The UPI virtual payment address, e.g. "merchant@paytm"
    pub vpa: String,
    /// The name shown by the payer's UPI app
    pub name: String,
}

impl PayeeConfig {
    pub fn new(vpa: &str, name: &str) -> Self {
        Self { vpa: vpa.to_string(), name: name.to_string() }
    }

    pub fn from_env_or_default() -> Self {
        let vpa = env::var("UPG_PAYEE_VPA").unwrap_or_else(|_| {
            error!("🪛️ UPG_PAYEE_VPA is not set. Payment codes will not name a payee and cannot be paid.");
            String::default()
        });
        let name = env::var("UPG_PAYEE_NAME").unwrap_or_else(|_| DEFAULT_PAYEE_NAME.to_string());
        Self { vpa, name }
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            gateway: GatewayConfig::default(),
            payee: PayeeConfig { name: DEFAULT_PAYEE_NAME.to_string(), ..Default::default() },
            order_amount: default_order_amount(),
        }
    }
}

impl BotConfig {
    pub fn from_env_or_default() -> Self {
        let database_url = env::var("UPG_DATABASE_URL").unwrap_or_else(|_| {
            info!("🪛️ UPG_DATABASE_URL is not set. Using {DEFAULT_DATABASE_URL}");
            DEFAULT_DATABASE_URL.to_string()
        });
        let max_connections = env::var("UPG_DB_MAX_CONNECTIONS")
            .map(|s| {
                s.parse::<u32>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid value for UPG_DB_MAX_CONNECTIONS. {e} Using the default, \
                         {DEFAULT_MAX_CONNECTIONS}, instead."
                    );
                    DEFAULT_MAX_CONNECTIONS
                })
            })
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);
        let order_amount = env::var("UPG_ORDER_AMOUNT")
            .map(|s| parse_order_amount(&s))
            .unwrap_or_else(|_| default_order_amount());
        let gateway = GatewayConfig::new_from_env_or_default();
        let payee = PayeeConfig::from_env_or_default();
        Self { database_url, max_connections, gateway, payee, order_amount }
    }

    /// The directory holding the database file, if the database lives in a file.
    pub fn database_dir(&self) -> Option<PathBuf> {
        let path = self.database_url.strip_prefix("sqlite://").or_else(|| self.database_url.strip_prefix("sqlite:"))?;
        let path = path.split('?').next().unwrap_or_default();
        if path.is_empty() || path == ":memory:" {
            return None;
        }
        Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()).map(Path::to_path_buf)
    }
}

fn default_order_amount() -> Paise {
    Paise::from_rupees(150)
}

/// Parses an order amount in rupees. Invalid and non-positive values fall back to the default.
pub fn parse_order_amount(s: &str) -> Paise {
    match s.parse::<Paise>() {
        Ok(amount) if amount.is_positive() => amount,
        Ok(amount) => {
            error!("🪛️ UPG_ORDER_AMOUNT must be positive, but is {amount}. Using {DEFAULT_ORDER_AMOUNT} instead.");
            default_order_amount()
        },
        Err(e) => {
            error!("🪛️ {s} is not a valid value for UPG_ORDER_AMOUNT. {e} Using {DEFAULT_ORDER_AMOUNT} instead.");
            default_order_amount()
        },
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn order_amounts() {
        assert_eq!(parse_order_amount("150.00"), Paise::from(15_000));
        assert_eq!(parse_order_amount("99.5"), Paise::from(9_950));
        assert_eq!(parse_order_amount("0"), Paise::from_rupees(150));
        assert_eq!(parse_order_amount("-5"), Paise::from_rupees(150));
        assert_eq!(parse_order_amount("lots"), Paise::from_rupees(150));
        assert_eq!(DEFAULT_ORDER_AMOUNT.parse::<Paise>().unwrap(), default_order_amount());
    }

    #[test]
    fn database_directory() {
        let mut config = BotConfig::default();
        assert_eq!(config.database_dir(), Some(PathBuf::from("data")));
        config.database_url = "sqlite:///tmp/upg/orders.db?mode=rwc".into();
        assert_eq!(config.database_dir(), Some(PathBuf::from("/tmp/upg")));
        config.database_url = "sqlite://orders.db".into();
        assert_eq!(config.database_dir(), None);
        config.database_url = "sqlite::memory:".into();
        assert_eq!(config.database_dir(), None);
    }
}
