//! Shared validation helpers for inbound HTTP adapters.
//!
//! Query and path values arrive as raw strings so malformed input produces
//! the same `invalid_request` payload shape as domain validation failures.

use pagination::{Cursor, PageRequest};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::domain::Error;

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidId,
    InvalidOffset,
    InvalidCursor,
}

impl ErrorCode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidId => "invalid_id",
            Self::InvalidOffset => "invalid_offset",
            Self::InvalidCursor => "invalid_cursor",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    const fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(message: impl Into<String>, field: FieldName, code: ErrorCode, value: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code.as_str(),
    }))
}

/// Parse a positive integer identifier, reporting `message` on failure.
pub(crate) fn parse_positive_id(
    raw: Option<&str>,
    field: FieldName,
    message: &'static str,
) -> Result<i64, Error> {
    let value = raw.unwrap_or_default();
    match value.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(field_error(message, field, ErrorCode::InvalidId, value)),
    }
}

/// Decode a request body once the caller is known.
///
/// Bodies are read as raw bytes so authentication and role checks run
/// before any payload validation.
pub(crate) fn decode_json_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, Error> {
    serde_json::from_slice(bytes).map_err(|err| {
        Error::invalid_request("Invalid JSON body").with_details(json!({ "reason": err.to_string() }))
    })
}

/// Read a JSON number or numeric string as an integer id.
///
/// Integral floats such as `2.0` are accepted; fractions, booleans and
/// `null` are not.
pub(crate) fn id_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|raw| raw.fract() == 0.0 && raw.abs() < 9.0e15)
                .map(|raw| raw as i64)
        }),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// Field deserialisers that never fail; wrongly typed values read as absent.
pub(crate) mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use super::id_from_value;

    /// Keep strings, drop every other JSON type.
    pub(crate) fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(text) => Some(text),
            _ => None,
        })
    }

    /// A single id given as a number or numeric string.
    pub(crate) fn id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(id_from_value(&Value::deserialize(deserializer)?))
    }

    /// An id list; entries that are not ids are skipped and a non-array
    /// value reads as empty.
    pub(crate) fn id_list<'de, D>(deserializer: D) -> Result<Vec<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => items.iter().filter_map(id_from_value).collect(),
            _ => Vec::new(),
        })
    }
}

/// Resolve the feed window from the `offset` and `cursor` query values.
///
/// A cursor wins over an offset. Negative offsets clamp to the first row;
/// text that is not an integer is rejected.
pub(crate) fn parse_page(
    offset: Option<&str>,
    cursor: Option<&str>,
    limit: u64,
) -> Result<PageRequest, Error> {
    if let Some(raw) = cursor.filter(|value| !value.is_empty()) {
        let parsed: Cursor = raw.parse().map_err(|_| {
            field_error(
                "cursor must be a base36 offset",
                FieldName::new("cursor"),
                ErrorCode::InvalidCursor,
                raw,
            )
        })?;
        return Ok(parsed.page(limit));
    }

    match offset.map(str::trim).filter(|value| !value.is_empty()) {
        None => Ok(PageRequest::new(0, limit)),
        Some(raw) => raw
            .parse::<i64>()
            .map(|value| PageRequest::new(value, limit))
            .map_err(|_| {
                field_error(
                    "offset must be an integer",
                    FieldName::new("offset"),
                    ErrorCode::InvalidOffset,
                    raw,
                )
            }),
    }
}
