use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    #[error("Empty amount")]
    Empty,
    #[error("Invalid amount: '{0}'")]
    Invalid(String),
    #[error("Amount out of range")]
    Overflow,
}

/// A monetary amount held to two decimal places.
///
/// Backed by a 96-bit `Decimal`: magnitudes up to about 7.9e28 are
/// representable, larger ones fail to parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(Decimal);

impl Money {
    pub const TEN: Money = Money(Decimal::TEN);

    pub fn from_decimal(decimal: Decimal) -> Self {
        Money(decimal.round_dp(2))
    }

    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    pub fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    /// Parse an amount as it appears in document text, e.g. `1,234.56`.
    /// Thousands separators are dropped; nothing else is tolerated. Values
    /// beyond the `Decimal` range are `Invalid`.
    pub fn parse_grouped(s: &str) -> Result<Self, MoneyError> {
        let clean = s.trim().replace(',', "");
        if clean.is_empty() {
            return Err(MoneyError::Empty);
        }
        Decimal::from_str(&clean)
            .map(Money::from_decimal)
            .map_err(|_| MoneyError::Invalid(s.to_string()))
    }

    /// Parse an amount typed by a person: surrounding whitespace, a leading
    /// currency symbol (`£`, `US$`, ...) and thousands separators are accepted.
    pub fn parse_lenient(s: &str) -> Result<Self, MoneyError> {
        let trimmed = s.trim();
        let (negative, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, trimmed),
        };
        let body = body.trim_start_matches(|c: char| !(c.is_ascii_digit() || c == '.'));
        let mut money = Money::parse_grouped(&body.replace(' ', ""))
            .map_err(|e| match e {
                MoneyError::Empty if !trimmed.is_empty() => MoneyError::Invalid(s.to_string()),
                MoneyError::Empty => MoneyError::Empty,
                MoneyError::Invalid(_) => MoneyError::Invalid(s.to_string()),
                MoneyError::Overflow => MoneyError::Overflow,
            })?;
        if negative {
            money = Money(-money.0);
        }
        Ok(money)
    }

    pub fn checked_add(self, rhs: Money) -> Result<Money, MoneyError> {
        self.0.checked_add(rhs.0).map(Money).ok_or(MoneyError::Overflow)
    }

    pub fn checked_sub(self, rhs: Money) -> Result<Money, MoneyError> {
        self.0.checked_sub(rhs.0).map(Money).ok_or(MoneyError::Overflow)
    }

    /// Two decimals with comma thousands separators: `1,234.56`.
    pub fn to_grouped_string(self) -> String {
        let plain = format!("{:.2}", self.0);
        let (sign, digits) = match plain.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", plain.as_str()),
        };
        let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, "00"));

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        format!("{sign}{grouped}.{frac_part}")
    }

    /// Plain two-decimal amount prefixed with a currency symbol: `£1234.56`.
    pub fn with_symbol(self, symbol: &str) -> String {
        format!("{symbol}{self}")
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::parse_lenient(s)
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |a, b| a + b)
    }
}
