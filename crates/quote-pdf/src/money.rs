use bigdecimal::{BigDecimal, RoundingMode};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};
use std::str::FromStr;

/// Monetary amount stored as an exact decimal.
///
/// Sums and products never go through binary floating point, so a subtotal
/// is exactly the sum of its line totals. Rounding to cents only happens
/// when the amount is displayed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(BigDecimal);

impl Money {
    pub fn zero() -> Self {
        Money(BigDecimal::from(0))
    }

    pub fn is_negative(&self) -> bool {
        self.0 < BigDecimal::from(0)
    }

    pub fn as_decimal(&self) -> &BigDecimal {
        &self.0
    }

    /// Amount rounded half-up to cents, e.g. `25.00`
    pub fn to_fixed2(&self) -> String {
        self.0.with_scale_round(2, RoundingMode::HalfUp).to_string()
    }

    /// Amount with currency prefix and two decimals, e.g. `$25.00`
    pub fn display_with(&self, symbol: &str) -> String {
        if self.is_negative() {
            let positive = Money(-self.0.clone());
            format!("-{}{}", symbol, positive.to_fixed2())
        } else {
            format!("{}{}", symbol, self.to_fixed2())
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_with("$"))
    }
}

impl FromStr for Money {
    type Err = bigdecimal::ParseBigDecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BigDecimal::from_str(s.trim()).map(Money)
    }
}

impl From<BigDecimal> for Money {
    fn from(value: BigDecimal) -> Self {
        Money(value)
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Money(BigDecimal::from(value))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl<'a> Add<&'a Money> for &'a Money {
    type Output = Money;

    fn add(self, rhs: &'a Money) -> Money {
        Money(&self.0 + &rhs.0)
    }
}

impl Mul<u32> for &Money {
    type Output = Money;

    fn mul(self, rhs: u32) -> Money {
        Money(&self.0 * BigDecimal::from(rhs))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), |acc, m| &acc + m)
    }
}

impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.normalized().to_string())
    }
}

// Backend payloads carry prices as JSON numbers, hand-edited files
// sometimes as strings. Floats are re-read through their shortest decimal
// form so `10.1` stays `10.1` instead of its binary expansion.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Int(i64),
    Float(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawAmount::deserialize(deserializer)? {
            RawAmount::Int(i) => Ok(Money::from(i)),
            RawAmount::Float(f) => {
                if !f.is_finite() {
                    return Err(serde::de::Error::custom("amount must be a finite number"));
                }
                Money::from_str(&f.to_string()).map_err(serde::de::Error::custom)
            }
            RawAmount::Text(s) => Money::from_str(&s).map_err(serde::de::Error::custom),
        }
    }
}
