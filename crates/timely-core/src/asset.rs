// crates/timely-core/src/asset.rs
//
// Fixed-point token quantities.
//
// An `Asset` is an integer count of minor units tagged with a `Symbol`
// (decimal precision + uppercase code). All arithmetic is integer arithmetic;
// nothing here ever touches floating point. Quantities with different symbols
// are incompatible and every binary operation rejects them.
//
// Textual forms:
//   - Symbol: `"<precision>,<CODE>"`, e.g. `"8,BTC"`
//   - Asset:  `"<amount> <CODE>"`, e.g. `"1000.00000000 BTC"`; the precision
//     is the number of fractional digits written.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::TimelyError;
use crate::time::SECONDS_PER_DAY;

/// Largest valid asset magnitude: 2^62 - 1 minor units.
pub const MAX_AMOUNT: i64 = (1 << 62) - 1;

/// Largest supported decimal precision.
pub const MAX_PRECISION: u8 = 18;

/// Maximum length of a symbol code.
pub const MAX_CODE_LEN: usize = 7;

/// Uppercase token code, 1 to 7 letters (e.g. `BTC`, `WAX`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SymbolCode(String);

impl SymbolCode {
    /// Validate and wrap a symbol code.
    pub fn new(code: &str) -> Result<Self, TimelyError> {
        if code.is_empty() || code.len() > MAX_CODE_LEN {
            return Err(TimelyError::MalformedSymbol(format!(
                "code {:?} must be 1 to {} characters",
                code, MAX_CODE_LEN
            )));
        }
        if !code.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(TimelyError::MalformedSymbol(format!(
                "code {:?} must be uppercase A-Z",
                code
            )));
        }
        Ok(Self(code.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SymbolCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for SymbolCode {
    type Error = TimelyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<SymbolCode> for String {
    fn from(code: SymbolCode) -> Self {
        code.0
    }
}

/// Token denomination: decimal precision plus code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol {
    precision: u8,
    code: SymbolCode,
}

impl Symbol {
    /// Build a symbol, rejecting precisions above [`MAX_PRECISION`].
    pub fn new(precision: u8, code: &str) -> Result<Self, TimelyError> {
        if precision > MAX_PRECISION {
            return Err(TimelyError::MalformedSymbol(format!(
                "precision {} exceeds {}",
                precision, MAX_PRECISION
            )));
        }
        Ok(Self {
            precision,
            code: SymbolCode::new(code)?,
        })
    }

    pub fn precision(&self) -> u8 {
        self.precision
    }

    pub fn code(&self) -> &SymbolCode {
        &self.code
    }

    /// Number of minor units in one whole token (10^precision).
    pub fn unit(&self) -> u64 {
        10u64.pow(self.precision as u32)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.precision, self.code)
    }
}

impl FromStr for Symbol {
    type Err = TimelyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (precision, code) = s
            .split_once(',')
            .ok_or_else(|| TimelyError::MalformedSymbol(format!("{:?} is not <precision>,<CODE>", s)))?;
        let precision: u8 = precision
            .trim()
            .parse()
            .map_err(|_| TimelyError::MalformedSymbol(format!("bad precision in {:?}", s)))?;
        Symbol::new(precision, code.trim())
    }
}

impl TryFrom<String> for Symbol {
    type Error = TimelyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.to_string()
    }
}

/// A token quantity in minor units.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Asset {
    /// Amount in minor units (10^-precision of one token).
    pub amount: i64,
    /// Denomination of the amount.
    pub symbol: Symbol,
}

impl Asset {
    pub fn new(amount: i64, symbol: Symbol) -> Self {
        Self { amount, symbol }
    }

    /// Zero of the given denomination.
    pub fn zero(symbol: Symbol) -> Self {
        Self { amount: 0, symbol }
    }

    /// Whether the magnitude is within [`MAX_AMOUNT`].
    pub fn is_valid(&self) -> bool {
        self.amount.unsigned_abs() <= MAX_AMOUNT as u64
    }

    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }

    pub fn is_same_denomination(&self, other: &Asset) -> bool {
        self.symbol == other.symbol
    }

    fn require_same_denomination(&self, other: &Asset) -> Result<(), TimelyError> {
        if self.is_same_denomination(other) {
            Ok(())
        } else {
            Err(TimelyError::IncompatibleDenomination {
                left: self.symbol.to_string(),
                right: other.symbol.to_string(),
            })
        }
    }

    /// Sum of two compatible quantities. Fails if the result leaves the valid range.
    pub fn checked_add(&self, other: &Asset) -> Result<Asset, TimelyError> {
        self.require_same_denomination(other)?;
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or(TimelyError::QuantityOverflow)?;
        let sum = Asset::new(amount, self.symbol.clone());
        if !sum.is_valid() {
            return Err(TimelyError::QuantityOverflow);
        }
        Ok(sum)
    }

    /// `max(self - other, 0)` for compatible quantities.
    pub fn saturating_sub(&self, other: &Asset) -> Result<Asset, TimelyError> {
        self.require_same_denomination(other)?;
        let amount = self.amount.saturating_sub(other.amount).max(0);
        Ok(Asset::new(amount, self.symbol.clone()))
    }

    /// The smaller of two compatible quantities.
    pub fn min(&self, other: &Asset) -> Result<Asset, TimelyError> {
        self.require_same_denomination(other)?;
        if other.amount < self.amount {
            Ok(other.clone())
        } else {
            Ok(self.clone())
        }
    }

    /// Split into `periods` equal parts, rounding down to the minor unit.
    ///
    /// Returns `None` when `periods` is zero.
    pub fn div_floor(&self, periods: u16) -> Option<Asset> {
        if periods == 0 {
            return None;
        }
        let amount = self.amount.div_euclid(periods as i64);
        Some(Asset::new(amount, self.symbol.clone()))
    }

    /// Accrual of a per-day `rate` over `elapsed_seconds`:
    /// `floor(rate * elapsed / 86400)` in the same minor units.
    ///
    /// Computed in 128-bit so the intermediate product cannot overflow.
    /// The result saturates at [`MAX_AMOUNT`]; a negative rate accrues nothing.
    pub fn scale_by_time_fraction(&self, elapsed_seconds: u64) -> Asset {
        if self.amount <= 0 {
            return Asset::zero(self.symbol.clone());
        }
        let scaled = (self.amount as i128 * elapsed_seconds as i128) / SECONDS_PER_DAY as i128;
        let amount = scaled.min(MAX_AMOUNT as i128) as i64;
        Asset::new(amount, self.symbol.clone())
    }
}

impl PartialOrd for Asset {
    /// Only compatible quantities are ordered.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.is_same_denomination(other) {
            Some(self.amount.cmp(&other.amount))
        } else {
            None
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.amount < 0 { "-" } else { "" };
        let magnitude = self.amount.unsigned_abs();
        let precision = self.symbol.precision() as usize;
        if precision == 0 {
            return write!(f, "{}{} {}", sign, magnitude, self.symbol.code());
        }
        let unit = self.symbol.unit();
        write!(
            f,
            "{}{}.{:0width$} {}",
            sign,
            magnitude / unit,
            magnitude % unit,
            self.symbol.code(),
            width = precision
        )
    }
}

impl FromStr for Asset {
    type Err = TimelyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = |why: &str| TimelyError::MalformedQuantity(format!("{:?}: {}", s, why));

        let (number, code) = s
            .trim()
            .split_once(' ')
            .ok_or_else(|| malformed("expected <amount> <CODE>"))?;
        let code = code.trim();

        let (negative, digits) = match number.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, number),
        };
        let (whole, fraction) = match digits.split_once('.') {
            Some((w, f)) => {
                if f.is_empty() {
                    return Err(malformed("decimal point without fractional digits"));
                }
                (w, f)
            }
            None => (digits, ""),
        };
        if whole.is_empty() {
            return Err(malformed("missing integer digits"));
        }
        if !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
            return Err(malformed("amount must be decimal digits"));
        }
        if fraction.len() > MAX_PRECISION as usize {
            return Err(malformed("too many fractional digits"));
        }

        let symbol = Symbol::new(fraction.len() as u8, code).map_err(|e| malformed(&e.to_string()))?;

        let mut amount: i64 = 0;
        for c in whole.chars().chain(fraction.chars()) {
            let digit = (c as u8 - b'0') as i64;
            amount = amount
                .checked_mul(10)
                .and_then(|a| a.checked_add(digit))
                .ok_or_else(|| malformed("amount out of range"))?;
        }
        if negative {
            amount = -amount;
        }

        Ok(Asset::new(amount, symbol))
    }
}

impl TryFrom<String> for Asset {
    type Error = TimelyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Asset> for String {
    fn from(asset: Asset) -> Self {
        asset.to_string()
    }
}
