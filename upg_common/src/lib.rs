mod paise;

pub mod op;
mod secret;

pub use paise::{Paise, PaiseConversionError, INR_CURRENCY_CODE, PAISE_PER_RUPEE};
pub use secret::Secret;
