use std::{
    fmt,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

use crate::{Currency, EngineError};

/// Signed money amount represented as an integer number of **minor units**.
///
/// Use this type for **all** monetary values in the engine (leg amounts,
/// totals, differences) to avoid floating-point drift. The currency is not
/// stored in the value: it belongs to the entry set the amount lives in.
///
/// # Examples
///
/// ```rust
/// use engine::{Currency, Money};
///
/// let amount = Money::new(12_34);
/// assert_eq!(amount.minor(), 1234);
/// assert_eq!(amount.format_major(Currency::Kes), "12.34");
/// ```
///
/// Parsing from user input (accepts `.` or `,` as decimal separator; rejects
/// more decimals than the currency has):
///
/// ```rust
/// use engine::{Currency, Money};
///
/// assert_eq!(Money::parse_major("10", Currency::Kes).unwrap().minor(), 1000);
/// assert_eq!(Money::parse_major("10,5", Currency::Kes).unwrap().minor(), 1050);
/// assert!(Money::parse_major("12.345", Currency::Kes).is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates a new amount from integer minor units.
    #[must_use]
    pub const fn new(minor: i64) -> Self {
        Self(minor)
    }

    /// Returns the raw value in minor units.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    #[must_use]
    pub const fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Checked subtraction (returns `None` on overflow).
    #[must_use]
    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    /// Formats the amount in major units with the currency's fraction digits,
    /// without the currency code (`-20.00`, `1500`).
    #[must_use]
    pub fn format_major(self, currency: Currency) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let digits = usize::from(currency.minor_units());
        if digits == 0 {
            return format!("{sign}{abs}");
        }
        let scale = currency.scale().unsigned_abs();
        let major = abs / scale;
        let minor = abs % scale;
        format!("{sign}{major}.{minor:0digits$}")
    }

    /// Returns a value that renders as `"<major> <CODE>"`.
    #[must_use]
    pub fn display(self, currency: Currency) -> MoneyDisplay {
        MoneyDisplay {
            amount: self,
            currency,
        }
    }

    /// Parses a decimal string in major units into minor units.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading `+`/`-`.
    ///
    /// Validation rules:
    /// - at most `currency.minor_units()` fractional digits
    /// - rejects empty/invalid strings
    pub fn parse_major(s: &str, currency: Currency) -> Result<Self, EngineError> {
        let invalid = || EngineError::InvalidAmount(format!("invalid amount: {}", s.trim()));
        let overflow = || EngineError::InvalidAmount("amount too large".to_string());

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(EngineError::InvalidAmount("empty amount".to_string()));
        }

        let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (true, stripped.trim_start())
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (false, stripped.trim_start())
        } else {
            (false, trimmed)
        };

        let rest = rest.replace(',', ".");
        let mut parts = rest.split('.');
        let major_str = parts.next().ok_or_else(invalid)?;
        let frac_str = parts.next().unwrap_or("");
        if parts.next().is_some() {
            return Err(invalid());
        }

        if major_str.is_empty() || !major_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        if !frac_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let digits = usize::from(currency.minor_units());
        if frac_str.len() > digits {
            return Err(EngineError::InvalidAmount(format!(
                "too many decimals for {}: at most {digits}",
                currency.code()
            )));
        }

        let major: i64 = major_str.parse().map_err(|_| overflow())?;
        let minor: i64 = if frac_str.is_empty() {
            0
        } else {
            let padded = format!("{frac_str:0<digits$}");
            padded.parse().map_err(|_| invalid())?
        };

        let total = major
            .checked_mul(currency.scale())
            .and_then(|v| v.checked_add(minor))
            .ok_or_else(overflow)?;

        if negative {
            total.checked_neg().map(Money).ok_or_else(overflow)
        } else {
            Ok(Money(total))
        }
    }
}

/// Formatting helper returned by [`Money::display`].
#[derive(Clone, Copy, Debug)]
pub struct MoneyDisplay {
    amount: Money,
    currency: Currency,
}

impl fmt::Display for MoneyDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            self.amount.format_major(self.currency),
            self.currency.code()
        )
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Money> for i64 {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Self::Output {
        Money(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}
