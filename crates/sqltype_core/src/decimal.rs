use std::fmt;

use num_bigint::{BigInt, Sign};
use num_traits::{ToPrimitive, Zero};
use serde::{Deserialize, Serialize};

/// Largest exponent magnitude we'll accept when parsing a number.
const MAX_EXPONENT: i64 = 4096;

/// An exact decimal value, `unscaled * 10^-scale`.
///
/// Always normalized: trailing zeros are stripped from the unscaled value so
/// that two decimals representing the same number compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Decimal {
    unscaled: BigInt,
    scale: u32,
}

impl Decimal {
    pub fn new(unscaled: impl Into<BigInt>, scale: u32) -> Self {
        let mut dec = Decimal {
            unscaled: unscaled.into(),
            scale,
        };
        dec.normalize();
        dec
    }

    /// Parse a numeric literal.
    ///
    /// Accepts an optional sign, digits with an optional fractional part, and
    /// an optional exponent (`1`, `-1.5`, `.5`, `2.`, `1e10`, `1.5E-3`).
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let (negative, body) = match s.as_bytes().first()? {
            b'-' => (true, &s[1..]),
            b'+' => (false, &s[1..]),
            _ => (false, s),
        };

        let (mantissa, exponent) = match body.find(['e', 'E']) {
            Some(idx) => {
                let exp: i64 = body[idx + 1..].parse().ok()?;
                if exp.abs() > MAX_EXPONENT {
                    return None;
                }
                (&body[..idx], exp)
            }
            None => (body, 0),
        };

        let (int_part, frac_part) = match mantissa.split_once('.') {
            Some((int_part, frac_part)) => (int_part, frac_part),
            None => (mantissa, ""),
        };

        if int_part.is_empty() && frac_part.is_empty() {
            return None;
        }
        if !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
            return None;
        }

        let digits = format!("{int_part}{frac_part}");
        let mut unscaled = BigInt::parse_bytes(digits.as_bytes(), 10)?;
        if negative {
            unscaled = -unscaled;
        }

        let scale = frac_part.len() as i64 - exponent;
        if scale < 0 {
            unscaled *= BigInt::from(10).pow(scale.unsigned_abs() as u32);
            Some(Decimal::new(unscaled, 0))
        } else {
            Some(Decimal::new(unscaled, scale as u32))
        }
    }

    pub fn unscaled(&self) -> &BigInt {
        &self.unscaled
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// If this value has no fractional part.
    pub fn is_integral(&self) -> bool {
        self.scale == 0
    }

    /// Convert to an i64 if integral and in range.
    pub fn to_i64(&self) -> Option<i64> {
        if !self.is_integral() {
            return None;
        }
        self.unscaled.to_i64()
    }

    /// Convert to the nearest f64, returning None if out of range.
    pub fn to_f64(&self) -> Option<f64> {
        let v: f64 = self.to_string().parse().ok()?;
        v.is_finite().then_some(v)
    }

    fn normalize(&mut self) {
        if self.unscaled.is_zero() {
            self.scale = 0;
            return;
        }
        let ten = BigInt::from(10);
        while self.scale > 0 && (&self.unscaled % &ten).is_zero() {
            self.unscaled /= &ten;
            self.scale -= 1;
        }
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scale == 0 {
            return write!(f, "{}", self.unscaled);
        }

        let digits = self.unscaled.magnitude().to_string();
        let scale = self.scale as usize;
        let padded = if digits.len() <= scale {
            format!("{}{digits}", "0".repeat(scale - digits.len() + 1))
        } else {
            digits
        };
        let (int_part, frac_part) = padded.split_at(padded.len() - scale);

        if self.unscaled.sign() == Sign::Minus {
            write!(f, "-")?;
        }
        write!(f, "{int_part}.{frac_part}")
    }
}
