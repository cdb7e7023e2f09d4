use std::fmt::Display;

use upg_common::{Paise, INR_CURRENCY_CODE};
use urlencoding::encode;

use crate::db_types::OrderId;

/// The data a UPI app needs to pay an order: `upi://pay?pa=<payee>&pn=<name>&am=<amount>&tn=<note>&cu=<currency>`.
///
/// This is only the payload for a scannable code. Rendering it is up to the presentation layer. Every value is
/// percent-encoded, so the `@` of the payee VPA is written as `%40`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpiPaymentLink {
    pub payee_vpa: String,
    pub payee_name: String,
    pub amount: Paise,
    pub note: String,
    pub currency: String,
}

impl UpiPaymentLink {
    pub fn for_order(payee_vpa: &str, payee_name: &str, order_id: &OrderId, amount: Paise) -> Self {
        Self {
            payee_vpa: payee_vpa.to_string(),
            payee_name: payee_name.to_string(),
            amount,
            note: format!("Order_{order_id}"),
            currency: INR_CURRENCY_CODE.to_string(),
        }
    }

    pub fn to_uri(&self) -> String {
        format!(
            "upi://pay?pa={}&pn={}&am={}&tn={}&cu={}",
            encode(&self.payee_vpa),
            encode(&self.payee_name),
            self.amount.to_rupee_string(),
            encode(&self.note),
            encode(&self.currency)
        )
    }
}

impl Display for UpiPaymentLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_uri())
    }
}
