//! Conversion of payment amounts to satoshis.

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::TransactionError;

/// Denomination of a payment amount.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Satoshi,
    /// 100 satoshis.
    Ubsv,
    /// 100 000 satoshis.
    Mbsv,
    /// 100 000 000 satoshis.
    Bsv,
}

impl Unit {
    /// Satoshis per one of this unit.
    pub fn satoshis_per_unit(self) -> u64 {
        match self {
            Unit::Satoshi => 1,
            Unit::Ubsv => 100,
            Unit::Mbsv => 100_000,
            Unit::Bsv => 100_000_000,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Unit::Satoshi => "satoshi",
            Unit::Ubsv => "ubsv",
            Unit::Mbsv => "mbsv",
            Unit::Bsv => "bsv",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = TransactionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "satoshi" | "sat" | "sats" => Ok(Unit::Satoshi),
            "ubsv" => Ok(Unit::Ubsv),
            "mbsv" => Ok(Unit::Mbsv),
            "bsv" => Ok(Unit::Bsv),
            other => Err(TransactionError::UsageError(format!(
                "unknown currency unit '{}'",
                other
            ))),
        }
    }
}

/// Convert `amount` in `unit` to whole satoshis.
///
/// # Returns
/// The satoshi count, or a `UsageError` if the amount is negative, does not
/// land on a whole satoshi, or does not fit in a `u64`.
pub fn to_satoshis(amount: Decimal, unit: Unit) -> Result<u64, TransactionError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(TransactionError::UsageError(format!(
            "negative amount {} {}",
            amount, unit
        )));
    }
    let sats = amount
        .checked_mul(Decimal::from(unit.satoshis_per_unit()))
        .ok_or_else(|| {
            TransactionError::UsageError(format!("amount {} {} overflows", amount, unit))
        })?;
    if !sats.fract().is_zero() {
        return Err(TransactionError::UsageError(format!(
            "amount {} {} is not a whole number of satoshis",
            amount, unit
        )));
    }
    sats.to_u64().ok_or_else(|| {
        TransactionError::UsageError(format!("amount {} {} overflows", amount, unit))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_satoshi_is_identity() {
        assert_eq!(to_satoshis(dec!(50000), Unit::Satoshi).unwrap(), 50000);
        assert_eq!(to_satoshis(dec!(0), Unit::Satoshi).unwrap(), 0);
    }

    #[test]
    fn test_unit_multipliers() {
        assert_eq!(to_satoshis(dec!(1.5), Unit::Ubsv).unwrap(), 150);
        assert_eq!(to_satoshis(dec!(0.001), Unit::Mbsv).unwrap(), 100);
        assert_eq!(to_satoshis(dec!(0.83658760), Unit::Bsv).unwrap(), 83658760);
    }

    #[test]
    fn test_fractional_satoshi_rejected() {
        assert!(matches!(
            to_satoshis(dec!(0.5), Unit::Satoshi),
            Err(TransactionError::UsageError(_))
        ));
        assert!(to_satoshis(dec!(0.000000001), Unit::Bsv).is_err());
    }

    #[test]
    fn test_negative_rejected() {
        assert!(to_satoshis(dec!(-1), Unit::Bsv).is_err());
    }

    #[test]
    fn test_parse_units() {
        assert_eq!("BSV".parse::<Unit>().unwrap(), Unit::Bsv);
        assert_eq!("satoshi".parse::<Unit>().unwrap(), Unit::Satoshi);
        assert!("usd".parse::<Unit>().is_err());
        assert_eq!(serde_json::to_string(&Unit::Mbsv).unwrap(), "\"mbsv\"");
    }
}
