//! Input validation shared by the request layer and the accessors.

use crate::{Error, Result};

/// Require `value` to be present and contain something other than whitespace.
pub fn required(field: &str, value: Option<String>) -> Result<String> {
  match value {
    Some(v) if !v.trim().is_empty() => Ok(v),
    Some(_) => Err(Error::invalid(format!("{field} must not be empty"))),
    None => Err(Error::invalid(format!("missing required field {field}"))),
  }
}

/// Require an integer field to be present.
pub fn required_int(field: &str, value: Option<i64>) -> Result<i64> {
  value.ok_or_else(|| Error::invalid(format!("missing required field {field}")))
}

/// Parse an optional positive integer query parameter, falling back to
/// `default` when absent.
pub fn positive_or(field: &str, raw: Option<&str>, default: u32) -> Result<u32> {
  match raw {
    None => Ok(default),
    Some(s) => match s.parse::<u32>() {
      Ok(n) if n > 0 => Ok(n),
      _ => Err(Error::invalid(format!("{field} must be a positive integer, got {s:?}"))),
    },
  }
}
