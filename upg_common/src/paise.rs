use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign, Sub},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use sqlx::Type;
use thiserror::Error;

use crate::op;

pub const INR_CURRENCY_CODE: &str = "INR";
pub const PAISE_PER_RUPEE: i64 = 100;

//--------------------------------------        Paise         ---------------------------------------------------------
/// An amount of Indian rupees, held as an integer number of paise so that amounts are stored and compared exactly.
#[derive(Debug, Clone, Copy, Default, Type, PartialEq, Eq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct Paise(i64);

op!(binary Paise, Add, add);
op!(binary Paise, Sub, sub);
op!(inplace Paise, AddAssign, add_assign);

impl Sum for Paise {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Value cannot be represented as a rupee amount: {0}")]
pub struct PaiseConversionError(String);

impl From<i64> for Paise {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl Paise {
    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn from_rupees(rupees: i64) -> Self {
        Self(rupees * PAISE_PER_RUPEE)
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// The amount in rupees with exactly two decimal places and no currency symbol, e.g. `150.00`.
    /// This is the form used in UPI payment links.
    pub fn to_rupee_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let per_rupee = PAISE_PER_RUPEE.unsigned_abs();
        format!("{sign}{}.{:02}", abs / per_rupee, abs % per_rupee)
    }
}

impl Display for Paise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "₹{}", self.to_rupee_string())
    }
}

/// Parses a rupee amount such as `150`, `150.5` or `150.50`. At most two decimal places are accepted, and no
/// floating point arithmetic is involved.
impl FromStr for Paise {
    type Err = PaiseConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().trim_start_matches('₹').trim();
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (whole, frac) = digits.split_once('.').unwrap_or((digits, ""));
        let all_digits = |v: &str| v.chars().all(|c| c.is_ascii_digit());
        if whole.is_empty() || !all_digits(whole) || !all_digits(frac) || frac.len() > 2 {
            return Err(PaiseConversionError(s.to_string()));
        }
        let rupees = whole.parse::<i64>().map_err(|e| PaiseConversionError(format!("{s}: {e}")))?;
        let paise = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|e| PaiseConversionError(format!("{s}: {e}")))? * 10,
            _ => frac.parse::<i64>().map_err(|e| PaiseConversionError(format!("{s}: {e}")))?,
        };
        let value = rupees
            .checked_mul(PAISE_PER_RUPEE)
            .and_then(|v| v.checked_add(paise))
            .ok_or_else(|| PaiseConversionError(format!("{s} is too large")))?;
        Ok(Self(if negative { -value } else { value }))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_rupee_amounts() {
        assert_eq!("150".parse::<Paise>().unwrap(), Paise::from_rupees(150));
        assert_eq!("150.0".parse::<Paise>().unwrap(), Paise::from(15_000));
        assert_eq!("150.5".parse::<Paise>().unwrap(), Paise::from(15_050));
        assert_eq!("0.05".parse::<Paise>().unwrap(), Paise::from(5));
        assert_eq!("₹ 12.34".parse::<Paise>().unwrap(), Paise::from(1234));
        assert_eq!("-3.10".parse::<Paise>().unwrap(), Paise::from(-310));
    }

    #[test]
    fn reject_malformed_amounts() {
        for bad in ["", ".5", "1.234", "abc", "1,000", "1e3", "99999999999999999999"] {
            assert!(bad.parse::<Paise>().is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn display() {
        assert_eq!(Paise::from_rupees(150).to_string(), "₹150.00");
        assert_eq!(Paise::from(5).to_rupee_string(), "0.05");
        assert_eq!(Paise::from(-1205).to_rupee_string(), "-12.05");
    }

    #[test]
    fn arithmetic() {
        let total: Paise = [Paise::from(100), Paise::from(250)].into_iter().sum();
        assert_eq!(total, Paise::from(350));
        let mut p = Paise::from_rupees(1);
        p += Paise::from(1);
        assert_eq!(p - Paise::from(1), Paise::from_rupees(1));
        assert!(p.is_positive());
        assert!(!Paise::default().is_positive());
    }

    #[test]
    fn serializes_as_integer() {
        assert_eq!(serde_json::to_string(&Paise::from(15_000)).unwrap(), "15000");
    }
}
