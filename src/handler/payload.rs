//! JSON syntax validation.

use serde::de::IgnoredAny;

use crate::error::SyntaxError;

/// Check that `body` is a single well-formed JSON value.
///
/// Only syntax is checked; nothing is materialized and the input is left
/// untouched. Surrounding whitespace is accepted, anything else after the
/// value is an error.
pub fn validate(body: &[u8]) -> Result<(), SyntaxError> {
    serde_json::from_slice::<IgnoredAny>(body)?;
    Ok(())
}
