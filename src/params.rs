//! Loosely-typed parameter bags and the numeric coercion rule applied to them.
//!
//! Parameters arrive from form fields, so numbers are often strings. Every
//! numeric read goes through [`ParameterBag::number`]: parse, or fall back
//! to zero. Nothing here returns an error.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Key/value parameters for one project, as submitted by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterBag(BTreeMap<String, Value>);

impl ParameterBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a bag from `key=value` pairs where every value is kept as a string.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), Value::String(v.into())))
                .collect(),
        )
    }

    /// Inserts or replaces a value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Merges `other` into `self`; keys in `other` win.
    pub fn extend(&mut self, other: ParameterBag) {
        self.0.extend(other.0);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.get(key).is_some_and(|v| !v.is_null())
    }

    /// Numeric value at `key`, or 0.0 when missing, malformed or not finite.
    pub fn number(&self, key: &str) -> f64 {
        self.0.get(key).and_then(coerce_number).unwrap_or(0.0)
    }

    /// Like [`number`](Self::number) but negative values clamp to 0.0.
    pub fn non_negative(&self, key: &str) -> f64 {
        self.number(key).max(0.0)
    }

    /// First key among `keys` that holds a value, read as a non-negative number.
    ///
    /// Lets one field accept the names used by different form flows.
    pub fn non_negative_any(&self, keys: &[&str]) -> f64 {
        keys.iter()
            .find(|k| self.contains(k))
            .map_or(0.0, |k| self.non_negative(k))
    }

    /// Positive value at `key`, or `None` when it is missing or coerces to <= 0.
    pub fn positive(&self, key: &str) -> Option<f64> {
        Some(self.number(key)).filter(|v| *v > 0.0)
    }

    /// Trimmed, non-empty string value at `key`.
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(Value::String(s)) => Some(s.trim()).filter(|s| !s.is_empty()),
            _ => None,
        }
    }

    /// Boolean flag: `true`, `"true"`, `"yes"`, `"on"`, or any nonzero number.
    pub fn flag(&self, key: &str) -> bool {
        match self.0.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => {
                let s = s.trim().to_ascii_lowercase();
                matches!(s.as_str(), "true" | "yes" | "on" | "sim" | "s")
                    || parse_number(&s).is_some_and(|n| n != 0.0)
            }
            Some(v) => coerce_number(v).is_some_and(|n| n != 0.0),
            None => false,
        }
    }
}

fn coerce_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_number(s),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

/// Parses a form-entered number: surrounding whitespace is ignored and a
/// single decimal comma (`"5,8"`) is accepted.
fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(n) = s.parse::<f64>() {
        return Some(n);
    }
    if s.matches(',').count() == 1 && !s.contains('.') {
        return s.replace(',', ".").parse::<f64>().ok();
    }
    None
}
