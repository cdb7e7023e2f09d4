pub mod checksum;
mod upi_link;

pub use checksum::{ascii_json, canonical_json, sign, SignatureError};
pub use upi_link::UpiPaymentLink;
