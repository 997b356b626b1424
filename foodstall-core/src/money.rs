use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;

/// Currency amount held as integer cents.
///
/// Prices arrive as decimal text (`5.99`) and are rounded to the nearest
/// cent once, at the boundary. The operators panic on overflow in debug
/// builds; code handling operator-supplied quantities uses the `checked_*`
/// methods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Money(i64);

impl Money {
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Parse the decimal number at the start of `text`, after any leading
    /// whitespace, and return it with the unparsed remainder.
    ///
    /// Digits past the second fractional place round half away from zero,
    /// exactly, without going through floating point.
    pub fn parse_prefix(text: &str) -> Result<(Self, &str), ParseMoneyError> {
        let s = text.trim_start();
        let bytes = s.as_bytes();
        let mut pos = 0;

        let negative = match bytes.first() {
            Some(b'-') => {
                pos = 1;
                true
            }
            Some(b'+') => {
                pos = 1;
                false
            }
            _ => false,
        };

        let int_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        let int_digits = &s[int_start..pos];

        let mut frac_digits = "";
        if bytes.get(pos) == Some(&b'.') {
            let frac_start = pos + 1;
            let mut end = frac_start;
            while end < bytes.len() && bytes[end].is_ascii_digit() {
                end += 1;
            }
            frac_digits = &s[frac_start..end];
            if !int_digits.is_empty() || !frac_digits.is_empty() {
                pos = end;
            }
        }

        if int_digits.is_empty() && frac_digits.is_empty() {
            return Err(if s.is_empty() {
                ParseMoneyError::Empty
            } else {
                ParseMoneyError::NotANumber(s.to_string())
            });
        }

        let cents = digits_to_cents(int_digits, frac_digits).ok_or(ParseMoneyError::OutOfRange)?;
        Ok((Self(if negative { -cents } else { cents }), &s[pos..]))
    }

    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    pub fn checked_mul(self, quantity: i64) -> Option<Money> {
        self.0.checked_mul(quantity).map(Money)
    }

    pub fn saturating_mul(self, quantity: i64) -> Money {
        Money(self.0.saturating_mul(quantity))
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        // pad() so callers can align amounts in columns
        f.pad(&format!("{}{}.{:02}", sign, abs / 100, abs % 100))
    }
}

impl FromStr for Money {
    type Err = ParseMoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (money, rest) = Self::parse_prefix(s)?;
        if !rest.trim().is_empty() {
            return Err(ParseMoneyError::NotANumber(s.trim().to_string()));
        }
        Ok(money)
    }
}

// Magnitude in cents; the third fractional digit decides rounding
fn digits_to_cents(int_digits: &str, frac_digits: &str) -> Option<i64> {
    let mut cents: i64 = 0;
    for d in int_digits.bytes() {
        cents = cents.checked_mul(10)?.checked_add(i64::from(d - b'0'))?;
    }

    let mut frac = frac_digits.bytes();
    for _ in 0..2 {
        let d = frac.next().map_or(0, |d| i64::from(d - b'0'));
        cents = cents.checked_mul(10)?.checked_add(d)?;
    }
    if frac.next().is_some_and(|d| d >= b'5') {
        cents = cents.checked_add(1)?;
    }
    Some(cents)
}

impl From<Money> for String {
    fn from(money: Money) -> Self {
        money.to_string()
    }
}

impl TryFrom<String> for Money {
    type Error = ParseMoneyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    fn mul(self, quantity: i64) -> Money {
        Money(self.0 * quantity)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), Add::add)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseMoneyError {
    #[error("Amount is empty")]
    Empty,

    #[error("Not a number: {0}")]
    NotANumber(String),

    #[error("Amount out of range")]
    OutOfRange,
}
