//! Exact fixed-point numbers with two fractional digits.
//!
//! # Invariants
//! - Values are stored as a whole count of hundredths; no binary floating
//!   point is involved in arithmetic or formatting.
//! - Parsing never rounds: input that needs rounding to fit two fractional
//!   digits is rejected.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Number of fractional digits carried by [`Decimal`].
pub const DECIMAL_SCALE: u32 = 2;

const SCALE_FACTOR: i64 = 100;

/// Scale-2 decimal used for hour estimates and material cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Decimal(i64);

/// Reason a textual or floating value could not become a [`Decimal`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecimalParseError {
    Empty,
    InvalidDigits(String),
    /// More than two significant fractional digits.
    ScaleExceeded(String),
    OutOfRange(String),
}

impl Display for DecimalParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "decimal value is empty"),
            Self::InvalidDigits(value) => write!(f, "`{value}` is not a valid decimal number"),
            Self::ScaleExceeded(value) => write!(
                f,
                "`{value}` has more than {DECIMAL_SCALE} fractional digits"
            ),
            Self::OutOfRange(value) => write!(f, "`{value}` is out of decimal range"),
        }
    }
}

impl Error for DecimalParseError {}

impl Decimal {
    pub const ZERO: Decimal = Decimal(0);

    pub const fn from_hundredths(hundredths: i64) -> Self {
        Self(hundredths)
    }

    pub fn from_whole(whole: i64) -> Option<Self> {
        whole.checked_mul(SCALE_FACTOR).map(Self)
    }

    pub const fn hundredths(self) -> i64 {
        self.0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Converts a float read back from storage, rounding to the nearest
    /// hundredth.
    ///
    /// Storage engines with numeric affinity may hand back `12.5` for a value
    /// written as `12.50`; the rounding only absorbs binary representation
    /// noise.
    pub fn from_f64_rounded(value: f64) -> Result<Self, DecimalParseError> {
        let scaled = (value * SCALE_FACTOR as f64).round();
        if !scaled.is_finite() || scaled > i64::MAX as f64 || scaled < i64::MIN as f64 {
            return Err(DecimalParseError::OutOfRange(value.to_string()));
        }
        Ok(Self(scaled as i64))
    }
}

impl FromStr for Decimal {
    type Err = DecimalParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DecimalParseError::Empty);
        }

        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };

        let (whole_part, fraction_part) = match unsigned.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (unsigned, ""),
        };

        let all_digits = |part: &str| part.bytes().all(|byte| byte.is_ascii_digit());
        if (whole_part.is_empty() && fraction_part.is_empty())
            || !all_digits(whole_part)
            || !all_digits(fraction_part)
        {
            return Err(DecimalParseError::InvalidDigits(trimmed.to_string()));
        }

        let significant_fraction = fraction_part.trim_end_matches('0');
        if significant_fraction.len() > DECIMAL_SCALE as usize {
            return Err(DecimalParseError::ScaleExceeded(trimmed.to_string()));
        }

        let whole: i64 = if whole_part.is_empty() {
            0
        } else {
            whole_part
                .parse()
                .map_err(|_| DecimalParseError::OutOfRange(trimmed.to_string()))?
        };

        let mut fraction: i64 = 0;
        for (index, digit) in significant_fraction.bytes().enumerate() {
            let weight = if index == 0 { 10 } else { 1 };
            fraction += i64::from(digit - b'0') * weight;
        }

        let magnitude = whole
            .checked_mul(SCALE_FACTOR)
            .and_then(|value| value.checked_add(fraction))
            .ok_or_else(|| DecimalParseError::OutOfRange(trimmed.to_string()))?;

        Ok(Self(if negative { -magnitude } else { magnitude }))
    }
}

impl Display for Decimal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        let factor = SCALE_FACTOR as u64;
        write!(f, "{sign}{}.{:02}", magnitude / factor, magnitude % factor)
    }
}

impl Serialize for Decimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Decimal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
