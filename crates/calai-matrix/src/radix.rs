//! Integer formatting and parsing in bases 2, 8, 10 and 16.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MatrixError;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Radix {
    Binary,
    Octal,
    Decimal,
    Hexadecimal,
}

impl Radix {
    pub fn base(self) -> u32 {
        match self {
            Radix::Binary => 2,
            Radix::Octal => 8,
            Radix::Decimal => 10,
            Radix::Hexadecimal => 16,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Radix::Binary => "binary",
            Radix::Octal => "octal",
            Radix::Decimal => "decimal",
            Radix::Hexadecimal => "hexadecimal",
        }
    }
}

impl fmt::Display for Radix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Radix {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "binary" | "bin" | "2" => Ok(Radix::Binary),
            "octal" | "oct" | "8" => Ok(Radix::Octal),
            "decimal" | "dec" | "10" => Ok(Radix::Decimal),
            "hexadecimal" | "hex" | "16" => Ok(Radix::Hexadecimal),
            _ => Err(format!(
                "Unknown number base: {}. Expected binary, octal, decimal or hexadecimal",
                s
            )),
        }
    }
}

/// Render an integer in `radix`. Hexadecimal digits are upper case and
/// negative values carry a leading `-`.
pub fn format_integer(value: i64, radix: Radix) -> String {
    let sign = if value < 0 { "-" } else { "" };
    let magnitude = value.unsigned_abs();
    match radix {
        Radix::Binary => format!("{}{:b}", sign, magnitude),
        Radix::Octal => format!("{}{:o}", sign, magnitude),
        Radix::Decimal => format!("{}{}", sign, magnitude),
        Radix::Hexadecimal => format!("{}{:X}", sign, magnitude),
    }
}

/// Render the integer part of `value` (truncated toward zero) in `radix`.
pub fn format_radix(value: f64, radix: Radix) -> Result<String, MatrixError> {
    if !value.is_finite() {
        return Err(MatrixError::UnsupportedOperation(format!(
            "Cannot convert {} to {}",
            value, radix
        )));
    }
    let truncated = value.trunc();
    // i64::MAX is not representable as f64; 2^63 is the first value out of range.
    if truncated < i64::MIN as f64 || truncated >= 9_223_372_036_854_775_808.0 {
        return Err(MatrixError::UnsupportedOperation(format!(
            "{} is outside the 64-bit integer range for {} conversion",
            value, radix
        )));
    }
    Ok(format_integer(truncated as i64, radix))
}

/// Parse an optionally signed integer written in `radix`. Digits are
/// case-insensitive and surrounding whitespace is ignored.
pub fn parse_radix(text: &str, radix: Radix) -> Result<i64, MatrixError> {
    let trimmed = text.trim();
    i64::from_str_radix(trimmed, radix.base()).map_err(|_| {
        MatrixError::UnsupportedOperation(format!("`{}` is not a valid {} number", trimmed, radix))
    })
}

pub fn convert_radix(text: &str, from: Radix, to: Radix) -> Result<String, MatrixError> {
    let value = parse_radix(text, from)?;
    Ok(format_integer(value, to))
}
