//! Derived rating computation.

use chrono::{DateTime, Datelike};

use crate::error::{Result, StarportError};

/// The registry's fixed "current" year in the rating formula.
pub const CURRENT_YEAR: i32 = 3019;

/// UTC calendar year of an epoch-milliseconds production date.
pub fn prod_year(prod_date: i64) -> Result<i32> {
    let date = DateTime::from_timestamp_millis(prod_date).ok_or_else(|| {
        StarportError::Validation(format!("prodDate {prod_date} is not a valid timestamp"))
    })?;
    Ok(date.year())
}

/// Compute the rating from speed, usage flag and production date.
///
/// `80 * speed * k / (currentYear - prodYear + 1)`, with `k` halved for used
/// ships, rounded to two decimal places.
pub fn compute_rating(speed: f64, used: bool, prod_date: i64) -> Result<f64> {
    let k = if used { 0.5 } else { 1.0 };
    let year = prod_year(prod_date)?;
    let raw = (80.0 * speed * k) / f64::from(CURRENT_YEAR - year + 1);
    Ok(round2(raw))
}

/// Round to two decimal places via the decimal string representation.
pub fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}
