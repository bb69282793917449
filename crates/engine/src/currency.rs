use serde::{Deserialize, Serialize};

use crate::EngineError;

/// ISO currency code used by a teller session and its money values.
///
/// ## Minor units
///
/// The engine stores monetary values as an `i64` number of **minor units** (see `Money`).
/// `minor_units()` returns how many decimal digits are used when converting between:
/// - major units (human input/output, e.g. `10.50 KES`)
/// - minor units (stored integers, e.g. `1050`)
///
/// Example: KES has 2 minor units, so `10.50 KES` ⇄ `1050`. UGX has none.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Kes,
    Ugx,
    Tzs,
    Usd,
    Eur,
}

impl Currency {
    /// Canonical currency code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Kes => "KES",
            Currency::Ugx => "UGX",
            Currency::Tzs => "TZS",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
        }
    }

    /// Number of fraction digits used when formatting/parsing amounts.
    #[must_use]
    pub const fn minor_units(self) -> u8 {
        match self {
            Currency::Ugx => 0,
            Currency::Kes | Currency::Tzs | Currency::Usd | Currency::Eur => 2,
        }
    }

    /// `10^minor_units`, i.e. how many minor units make one major unit.
    #[must_use]
    pub const fn scale(self) -> i64 {
        10i64.pow(self.minor_units() as u32)
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Currency {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "KES" => Ok(Currency::Kes),
            "UGX" => Ok(Currency::Ugx),
            "TZS" => Ok(Currency::Tzs),
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            other => Err(EngineError::UnsupportedCurrency(other.to_string())),
        }
    }
}

impl core::str::FromStr for Currency {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::try_from(s)
    }
}
