#![forbid(unsafe_code)]

//! Primitive record values and their text formatting.
//!
//! Two formatting rules apply across the dashboard:
//!
//! - Parameter values render **verbatim**: text as written, numbers with
//!   Rust's shortest round-trip representation (`100`, `0.9`, `8.5`).
//! - Measured statistics render with **fixed precision** via
//!   [`format_fixed`].
//!
//! Any value that should be numeric but is not (NaN, infinity) renders as
//! [`NOT_AVAILABLE`], and an absent value renders as an empty cell. Neither
//! case affects neighbouring cells.

use std::fmt;

/// Placeholder for a value that cannot be formatted as a number.
pub const NOT_AVAILABLE: &str = "N/A";

/// A primitive cell value in a record.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Free text, rendered as-is.
    Text(String),
    /// A number, rendered verbatim.
    Number(f64),
    /// No value; renders as a blank cell.
    #[default]
    Missing,
}

impl Value {
    /// Verbatim rendering used by parameter tables.
    pub fn render(&self) -> String {
        match self {
            Value::Text(text) => text.clone(),
            Value::Number(n) if n.is_finite() => format_verbatim(*n),
            Value::Number(_) => NOT_AVAILABLE.to_string(),
            Value::Missing => String::new(),
        }
    }

    /// The numeric value, if this is a finite number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }

    #[inline]
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Missing, Into::into)
    }
}

fn format_verbatim(n: f64) -> String {
    // -0.0 would print as "-0".
    if n == 0.0 {
        return "0".to_string();
    }
    format!("{n}")
}

/// Format a number with exactly `decimals` digits after the point.
///
/// Non-finite input yields [`NOT_AVAILABLE`]. Negative zero formats as zero.
///
/// ```
/// use mhviz_model::format_fixed;
///
/// assert_eq!(format_fixed(141278.0, 2), "141278.00");
/// assert_eq!(format_fixed(3.59, 2), "3.59");
/// assert_eq!(format_fixed(f64::NAN, 2), "N/A");
/// ```
pub fn format_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{value:.decimals$}")
}
