//! Coercion of loosely-typed JSON input into typed entity attributes.
//!
//! Entities are reconstructed from already-deserialized, untrusted
//! key/value structures. The rules here are deliberately lenient: an
//! attribute is only touched when the source defines it (even as `null`),
//! and invalid values coerce to a safe sentinel instead of failing.

use crate::ResourceId;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// Applies attributes from a raw JSON object onto typed targets.
///
/// Each method checks key presence first: an absent key leaves the target
/// untouched, a present key (including an explicit `null`) assigns the
/// coerced value. Nothing in here panics or errors on malformed input.
#[derive(Debug, Clone, Copy)]
pub struct Apply<'a> {
    src: Option<&'a Map<String, Value>>,
}

impl<'a> Apply<'a> {
    /// Wraps a raw value. Non-object values behave like an empty source.
    #[must_use]
    pub fn new(raw: &'a Value) -> Self {
        Self {
            src: raw.as_object(),
        }
    }

    /// Returns true when the source defines `key`, even as `null`.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.src.is_some_and(|m| m.contains_key(key))
    }

    /// Returns the raw value under `key`, when present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.src.and_then(|m| m.get(key))
    }

    /// Assigns the string coercion of `key` when present.
    pub fn string(&self, target: &mut String, key: &str) {
        if let Some(v) = self.get(key) {
            *target = coerce_string(v);
        }
    }

    /// Assigns the truthiness of `key` when present.
    pub fn bool(&self, target: &mut bool, key: &str) {
        if let Some(v) = self.get(key) {
            *target = coerce_bool(v);
        }
    }

    /// Assigns the parsed timestamp under `key` when present.
    ///
    /// A present-but-invalid value (including `null` and `0`) clears the
    /// target, matching the "unset" semantics of the date coercion.
    pub fn date(&self, target: &mut Option<DateTime<Utc>>, key: &str) {
        if let Some(v) = self.get(key) {
            *target = to_datetime(v);
        }
    }

    /// Assigns the identifier under `key` when present.
    pub fn id(&self, target: &mut ResourceId, key: &str) {
        if let Some(v) = self.get(key) {
            *target = to_id(v);
        }
    }

    /// Assigns the small unsigned number under `key` when present.
    ///
    /// Accepts integers and numeric strings; anything else coerces to 0.
    pub fn u16(&self, target: &mut u16, key: &str) {
        if let Some(v) = self.get(key) {
            *target = match v {
                Value::Number(n) => n.as_u64().map_or(0, |n| n.min(u16::MAX as u64) as u16),
                Value::String(s) => s.parse().unwrap_or(0),
                _ => 0,
            };
        }
    }

    /// Assigns the floating-point number under `key` when present.
    ///
    /// Accepts numbers and numeric strings; anything else coerces to 0.
    pub fn f64(&self, target: &mut f64, key: &str) {
        if let Some(v) = self.get(key) {
            *target = match v {
                Value::Number(n) => n.as_f64().unwrap_or(0.0),
                Value::String(s) => s.parse().unwrap_or(0.0),
                _ => 0.0,
            };
        }
    }
}

/// Renders a scalar JSON value as a string.
///
/// Strings pass through, numbers and booleans render to their display
/// form, everything else (null, arrays, objects) becomes the empty string.
#[must_use]
pub fn coerce_string(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

/// Truthiness cast over a JSON value.
///
/// `false`, `0`, the empty string and `null` are false; any other present
/// value (including the string `"false"`) is true.
#[must_use]
pub fn coerce_bool(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Parses a timestamp from an ISO-8601/RFC 3339 string or a Unix epoch
/// value in milliseconds.
///
/// `0`, `null`, absent and unparseable inputs all produce `None` — the
/// "unset" timestamp.
#[must_use]
pub fn to_datetime(v: &Value) -> Option<DateTime<Utc>> {
    match v {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => {
            let ms = n.as_i64()?;
            if ms == 0 {
                return None;
            }

            DateTime::<Utc>::from_timestamp_millis(ms)
        }
        _ => None,
    }
}

/// Casts a JSON value to a [`ResourceId`].
///
/// Accepts decimal strings and integers; `0`, the empty string, `null`,
/// and anything unparseable cast to [`ResourceId::NONE`].
#[must_use]
pub fn to_id(v: &Value) -> ResourceId {
    match v {
        Value::String(s) => s.parse().unwrap_or(ResourceId::NONE),
        Value::Number(n) => n.as_u64().map_or(ResourceId::NONE, ResourceId::new),
        _ => ResourceId::NONE,
    }
}

/// Returns true when `v` is an array whose elements are all JSON strings.
///
/// The empty array counts as all-strings.
#[must_use]
pub fn all_strings(v: &Value) -> bool {
    v.as_array().is_some_and(|a| a.iter().all(Value::is_string))
}
