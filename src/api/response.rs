//! Response validation
//!
//! Checks that a decoded homework API response has the expected shape and
//! extracts its pieces.

use serde_json::Value;

use crate::utils::error::ParseError;

/// Response key holding the list of homework entries
pub const HOMEWORKS_KEY: &str = "homeworks";

/// Response key holding the server timestamp
pub const CURRENT_DATE_KEY: &str = "current_date";

/// Validate a response and return its homework entries
///
/// The entries are returned in the order received; the list may be empty.
///
/// # Errors
///
/// - [`ParseError::NotAnObject`] if the response is not a JSON object
/// - [`ParseError::MissingField`] if `homeworks` is absent
/// - [`ParseError::NotAList`] if `homeworks` is present but not an array
pub fn check_response(response: &Value) -> Result<&[Value], ParseError> {
    let object = response.as_object().ok_or(ParseError::NotAnObject)?;

    let homeworks = object
        .get(HOMEWORKS_KEY)
        .ok_or(ParseError::MissingField(HOMEWORKS_KEY))?;

    homeworks
        .as_array()
        .map(Vec::as_slice)
        .ok_or(ParseError::NotAList(HOMEWORKS_KEY))
}

/// Server-reported timestamp of a response, if present and integral
pub fn current_date(response: &Value) -> Option<i64> {
    response.get(CURRENT_DATE_KEY).and_then(Value::as_i64)
}
