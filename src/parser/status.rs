//! Homework entry formatting
//!
//! Turns one homework entry from the API response into the notification text
//! announcing its review status.

use serde_json::Value;

use crate::models::{Homework, HomeworkStatus};
use crate::utils::error::ParseError;

/// Entry key holding the homework name
pub const NAME_KEY: &str = "homework_name";

/// Entry key holding the review status code
pub const STATUS_KEY: &str = "status";

/// Extract a typed [`Homework`] from a raw entry
///
/// # Errors
///
/// - [`ParseError::NotAnObject`] if the entry is not a JSON object
/// - [`ParseError::MissingField`] if `homework_name` or `status` is absent
/// - [`ParseError::InvalidField`] if either key does not hold a string
/// - [`ParseError::UnknownStatus`] if the status is not in the catalog
pub fn parse_homework(entry: &Value) -> Result<Homework, ParseError> {
    let object = entry.as_object().ok_or(ParseError::NotAnObject)?;

    let name = string_field(object, NAME_KEY)?;
    let code = string_field(object, STATUS_KEY)?;

    let status = HomeworkStatus::from_code(code)
        .ok_or_else(|| ParseError::UnknownStatus(code.to_string()))?;

    Ok(Homework {
        name: name.to_string(),
        status,
    })
}

/// Format the notification text for a homework entry
///
/// # Errors
///
/// Same as [`parse_homework`].
pub fn parse_status(entry: &Value) -> Result<String, ParseError> {
    parse_homework(entry).map(|homework| homework.status_message())
}

fn string_field<'a>(
    object: &'a serde_json::Map<String, Value>,
    key: &'static str,
) -> Result<&'a str, ParseError> {
    match object.get(key) {
        None => Err(ParseError::MissingField(key)),
        Some(value) => value.as_str().ok_or(ParseError::InvalidField(key)),
    }
}
