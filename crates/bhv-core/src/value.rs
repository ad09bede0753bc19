//! Key-value records and the truthiness rule used by [`Stream::get`].
//!
//! [`Stream::get`]: crate::stream::Stream::get

use serde_json::{Map, Value};

use crate::error::{BehaveError, Result};

/// A shallow key-value mapping. Stream input, stream output, and view
/// models are all records.
pub type Record = Map<String, Value>;

/// Whether `value` counts as present for [`Stream::get`].
///
/// `null`, `false`, numeric zero, and the empty string are falsy. Every
/// other value is truthy, including empty arrays and empty objects.
///
/// [`Stream::get`]: crate::stream::Stream::get
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Short name of a value's type, used in error messages.
#[must_use]
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Interpret `value` as an optional record.
///
/// Objects yield `Some`, `null` yields `None`, anything else is a type
/// error naming `what`.
pub fn as_record(value: Value, what: &'static str) -> Result<Option<Record>> {
    match value {
        Value::Object(map) => Ok(Some(map)),
        Value::Null => Ok(None),
        other => Err(BehaveError::NotAnObject {
            what,
            found: type_name(&other),
        }),
    }
}

/// Shallow merge: every key of `src` overwrites the same key in `dst`.
pub fn merge_into(dst: &mut Record, src: Record) {
    for (key, value) in src {
        dst.insert(key, value);
    }
}
