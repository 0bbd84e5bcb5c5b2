//! Arbitrary-precision decimal.

use std::fmt::{self, Display};
use std::str::FromStr;

use num_bigint::{BigInt, Sign};
use thiserror::Error;

/// Largest scale the host numeric type can carry.
pub const NUMERIC_MAX_SCALE: u32 = 16_383;

/// Largest number of integer digits the host numeric type can carry.
pub const NUMERIC_MAX_WEIGHT: u32 = 131_072;

/// Arbitrary-precision decimal: `unscaled * 10^-scale`.
///
/// Equality is representational: `1.50` and `1.5` differ, which is what lets
/// a value survive decode/encode cycles digit-for-digit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Numeric {
    unscaled: BigInt,
    scale: u32,
}

/// Error returned when decimal text cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid numeric text: {0:?}")]
pub struct NumericParseError(pub String);

impl Numeric {
    /// Creates a decimal from an unscaled integer and a non-negative scale.
    pub fn new(unscaled: impl Into<BigInt>, scale: u32) -> Self {
        Self {
            unscaled: unscaled.into(),
            scale,
        }
    }

    /// Creates a decimal from a possibly negative scale.
    ///
    /// A negative scale means trailing zeros (`12` with scale `-2` is `1200`);
    /// it is folded into the unscaled value so the stored scale is never negative.
    pub fn from_signed_scale(unscaled: BigInt, scale: i32) -> Self {
        if scale >= 0 {
            return Self::new(unscaled, scale.unsigned_abs());
        }
        let factor = BigInt::from(10u32).pow(scale.unsigned_abs());
        Self::new(unscaled * factor, 0)
    }

    /// Whether a signed scale stays within the host numeric limits.
    ///
    /// Negative scales are trailing zeros and count against the weight.
    pub fn scale_in_range(scale: i32) -> bool {
        if scale >= 0 {
            scale.unsigned_abs() <= NUMERIC_MAX_SCALE
        } else {
            scale.unsigned_abs() <= NUMERIC_MAX_WEIGHT
        }
    }

    pub fn unscaled(&self) -> &BigInt {
        &self.unscaled
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn is_negative(&self) -> bool {
        self.unscaled.sign() == Sign::Minus
    }
}

impl Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.unscaled.magnitude().to_string();
        if self.is_negative() {
            write!(f, "-")?;
        }
        let scale = self.scale as usize;
        if scale == 0 {
            return write!(f, "{digits}");
        }
        let padded = if digits.len() <= scale {
            format!("{}{digits}", "0".repeat(scale + 1 - digits.len()))
        } else {
            digits
        };
        let (int_part, frac_part) = padded.split_at(padded.len() - scale);
        write!(f, "{int_part}.{frac_part}")
    }
}

impl FromStr for Numeric {
    type Err = NumericParseError;

    /// Parses plain (`-12.50`) or exponent (`1.25E+3`) notation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || NumericParseError(s.to_string());
        let text = s.trim();

        let (mantissa, exponent) = match text.find(['e', 'E']) {
            Some(pos) => {
                let exp: i64 = text[pos + 1..].parse().map_err(|_| err())?;
                (&text[..pos], exp)
            }
            None => (text, 0),
        };

        let (negative, unsigned) = match mantissa.as_bytes().first() {
            Some(b'-') => (true, &mantissa[1..]),
            Some(b'+') => (false, &mantissa[1..]),
            _ => (false, mantissa),
        };

        let (int_part, frac_part) = match unsigned.split_once('.') {
            Some((i, f)) => (i, f),
            None => (unsigned, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(err());
        }
        if !int_part
            .bytes()
            .chain(frac_part.bytes())
            .all(|b| b.is_ascii_digit())
        {
            return Err(err());
        }

        let digits = format!("{int_part}{frac_part}");
        let magnitude: BigInt = digits.parse().map_err(|_| err())?;
        let unscaled = if negative { -magnitude } else { magnitude };

        let frac_len = i64::try_from(frac_part.len()).map_err(|_| err())?;
        let scale = i32::try_from(frac_len - exponent).map_err(|_| err())?;
        if !Self::scale_in_range(scale) {
            return Err(err());
        }
        Ok(Self::from_signed_scale(unscaled, scale))
    }
}
