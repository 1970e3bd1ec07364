//! Defensive per-field validators for untrusted JSON.
//!
//! Persisted blobs, broadcast messages and endpoint responses are never
//! trusted. Each field is checked on its own and yields a [`Field`]: either a
//! valid value or [`Field::UseDefault`]. One bad field never poisons the rest
//! of the object.
//!
//! Nested structures are only checked for their container shape (object or
//! array); their contents are handed to the caller as-is.

use crate::{ScopeMode, UpdatedAt};
use serde_json::{Map, Value};

/// Outcome of validating a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field<T> {
    /// The field was present and passed its check.
    Valid(T),
    /// The field was absent or failed its check.
    UseDefault,
}

impl<T> Field<T> {
    /// Returns the validated value or `default`.
    pub fn or(self, default: T) -> T {
        match self {
            Self::Valid(value) => value,
            Self::UseDefault => default,
        }
    }

    /// Returns the validated value or computes a default.
    pub fn or_else(self, default: impl FnOnce() -> T) -> T {
        match self {
            Self::Valid(value) => value,
            Self::UseDefault => default(),
        }
    }

    /// Converts into an `Option`, dropping the distinction to `None`.
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Valid(value) => Some(value),
            Self::UseDefault => None,
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// Maps the valid value.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Field<U> {
        match self {
            Self::Valid(value) => Field::Valid(f(value)),
            Self::UseDefault => Field::UseDefault,
        }
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::UseDefault, Self::Valid)
    }
}

/// A JSON boolean.
pub fn boolean(value: Option<&Value>) -> Field<bool> {
    value.and_then(Value::as_bool).into()
}

/// A JSON number that is finite.
pub fn finite_number(value: Option<&Value>) -> Field<f64> {
    value
        .and_then(Value::as_f64)
        .filter(|n| n.is_finite())
        .into()
}

/// A non-negative finite number, truncated to whole milliseconds.
pub fn timestamp(value: Option<&Value>) -> Field<UpdatedAt> {
    if let Some(millis) = value.and_then(Value::as_u64) {
        return Field::Valid(UpdatedAt::from_millis(millis));
    }
    match finite_number(value) {
        Field::Valid(n) if n >= 0.0 && n <= u64::MAX as f64 => {
            Field::Valid(UpdatedAt::from_millis(n.trunc() as u64))
        }
        _ => Field::UseDefault,
    }
}

/// A JSON string.
pub fn string(value: Option<&Value>) -> Field<String> {
    value.and_then(Value::as_str).map(str::to_owned).into()
}

/// A string whose trimmed form is non-empty.
pub fn non_empty_string(value: Option<&Value>) -> Field<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .into()
}

/// An identifier: a non-empty string, or an integer rendered as a string.
pub fn identifier(value: Option<&Value>) -> Field<String> {
    match value {
        Some(Value::Number(n)) if n.is_i64() || n.is_u64() => Field::Valid(n.to_string()),
        other => non_empty_string(other),
    }
}

/// A nullable string: `null` is a valid "no value".
pub fn optional_string(value: Option<&Value>) -> Field<Option<String>> {
    match value {
        Some(Value::Null) => Field::Valid(None),
        Some(Value::String(s)) => Field::Valid(Some(s.clone())),
        _ => Field::UseDefault,
    }
}

/// A string that names one member of an enum.
pub fn enum_member<T>(value: Option<&Value>, parse: impl Fn(&str) -> Option<T>) -> Field<T> {
    value.and_then(Value::as_str).and_then(parse).into()
}

/// A scope mode name.
pub fn scope_mode(value: Option<&Value>) -> Field<ScopeMode> {
    enum_member(value, ScopeMode::parse)
}

/// An array of strings. Non-string elements are skipped.
pub fn string_list(value: Option<&Value>) -> Field<Vec<String>> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect()
        })
        .into()
}

/// A JSON object.
pub fn object(value: Option<&Value>) -> Field<&Map<String, Value>> {
    value.and_then(Value::as_object).into()
}

/// A JSON array.
pub fn array(value: Option<&Value>) -> Field<&Vec<Value>> {
    value.and_then(Value::as_array).into()
}

/// Any JSON container (object or array), passed through untouched.
pub fn container(value: Option<&Value>) -> Field<&Value> {
    value
        .filter(|v| v.is_object() || v.is_array())
        .into()
}
