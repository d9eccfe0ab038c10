// src/types.rs

//! Shared small types.
//!
//! The main resident is [`Cost`], an exact fixed-point money type. Schedule
//! costs are summed once per enumerated scenario, so they must not accumulate
//! floating-point drift; `Cost` stores hundredths in an `i64` and all
//! arithmetic stays in integers.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

use serde::Deserialize;

use crate::errors::{CrashdagError, Result};

/// Task names are plain strings, used as map keys throughout.
pub type TaskName = String;

/// Exact money amount, stored as hundredths (cents).
///
/// Deserializes from TOML integers (`1500`), floats (`1500.5`) and strings
/// (`"1500.50"`). Amounts with more than two fractional digits are rejected
/// rather than silently rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Cost(i64);

impl Cost {
    pub const ZERO: Cost = Cost(0);

    /// Build from a whole number of currency units.
    pub fn from_units(units: i64) -> Self {
        Cost(units * 100)
    }

    /// Build from raw hundredths.
    pub fn from_cents(cents: i64) -> Self {
        Cost(cents)
    }

    pub fn cents(self) -> i64 {
        self.0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Parse a decimal string like `"1500"`, `"1500.5"` or `"1500.50"`.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let (sign, digits) = match s.strip_prefix('-') {
            Some(rest) => (-1i64, rest),
            None => (1i64, s),
        };

        let (whole, frac) = match digits.split_once('.') {
            Some((w, f)) => (w, f),
            None => (digits, ""),
        };

        if whole.is_empty() && frac.is_empty() {
            return Err(CrashdagError::ConfigError(format!(
                "invalid cost value: {s:?}"
            )));
        }
        if frac.len() > 2 {
            return Err(CrashdagError::ConfigError(format!(
                "cost {s:?} has more than two fractional digits"
            )));
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| {
                CrashdagError::ConfigError(format!("invalid cost value: {s:?}"))
            })?
        };

        let mut frac_cents: i64 = 0;
        if !frac.is_empty() {
            let parsed: i64 = frac.parse().map_err(|_| {
                CrashdagError::ConfigError(format!("invalid cost value: {s:?}"))
            })?;
            frac_cents = if frac.len() == 1 { parsed * 10 } else { parsed };
        }

        Ok(Cost(sign * (whole * 100 + frac_cents)))
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        let whole = abs / 100;
        let cents = abs % 100;
        if cents == 0 {
            write!(f, "{sign}{whole}")
        } else if cents % 10 == 0 {
            write!(f, "{sign}{whole}.{}", cents / 10)
        } else {
            write!(f, "{sign}{whole}.{cents:02}")
        }
    }
}

impl Add for Cost {
    type Output = Cost;
    fn add(self, rhs: Cost) -> Cost {
        Cost(self.0 + rhs.0)
    }
}

impl AddAssign for Cost {
    fn add_assign(&mut self, rhs: Cost) {
        self.0 += rhs.0;
    }
}

impl Sub for Cost {
    type Output = Cost;
    fn sub(self, rhs: Cost) -> Cost {
        Cost(self.0 - rhs.0)
    }
}

impl Sum for Cost {
    fn sum<I: Iterator<Item = Cost>>(iter: I) -> Cost {
        iter.fold(Cost::ZERO, Add::add)
    }
}

impl<'de> Deserialize<'de> for Cost {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Float(f64),
            Str(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Int(n) => Ok(Cost::from_units(n)),
            Raw::Float(f) => {
                let cents = f * 100.0;
                let rounded = cents.round();
                if !f.is_finite() || (cents - rounded).abs() > 1e-6 {
                    return Err(D::Error::custom(format!(
                        "cost {f} is not representable in hundredths"
                    )));
                }
                Ok(Cost(rounded as i64))
            }
            Raw::Str(s) => Cost::parse(&s).map_err(D::Error::custom),
        }
    }
}
