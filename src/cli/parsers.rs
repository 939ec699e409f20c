// src/cli/parsers.rs
use chrono::NaiveDate;
use std::{fmt::Display, str::FromStr};

/// Wrapper type to parse range bounds (an integer like 2019, or an ISO
/// date like 2019-01-01).
///
/// Keeps the raw text: whether it is read as a number or a date is
/// decided later by the field it is paired with.
#[derive(Debug, Clone)]
pub struct BoundArg(pub String);

impl FromStr for BoundArg {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("bound must not be empty".to_string());
        }
        if looks_numeric(trimmed) || looks_like_date(trimmed) {
            Ok(BoundArg(trimmed.to_string()))
        } else {
            Err(format!("Cannot parse bound: {s}"))
        }
    }
}

fn looks_numeric(s: &str) -> bool {
    s.parse::<i64>().is_ok()
}

fn looks_like_date(s: &str) -> bool {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

fn parse_bounded_number<T>(s: &str, min: T, max: Option<T>) -> Result<T, String>
where
    T: Copy + PartialOrd + Display + FromStr,
    <T as FromStr>::Err: Display,
{
    let value = s
        .parse::<T>()
        .map_err(|err| format!("invalid number '{s}': {err}"))?;
    if value < min {
        return Err(format!("value must be at least {min}"));
    }
    if let Some(max_bound) = max
        && value > max_bound
    {
        return Err(format!("value must be at most {max_bound}"));
    }
    Ok(value)
}

/// Parse a positive `usize` (>= 1) from CLI input.
pub fn parse_positive_usize(s: &str) -> Result<usize, String> {
    parse_bounded_number(s, 1, None)
}
