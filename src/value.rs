//! Schema-free value model for fixture contents.
//!
//! `FixtureValue` is the recursive tagged union the fixture is built from.
//! It only admits what the ragged fixture needs (integers, strings,
//! sequences, string-keyed mappings) and converts losslessly to and from
//! `serde_pickle::Value` so the pickle encoder never sees anything else.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_pickle::{HashableValue, Value};

use crate::error::FixtureError;

/// A heterogeneous, arbitrarily nested fixture value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FixtureValue {
    Int(i64),
    Str(String),
    List(Vec<FixtureValue>),
    Map(BTreeMap<String, FixtureValue>),
}

impl FixtureValue {
    /// Build a list of integers.
    pub fn ints<I: IntoIterator<Item = i64>>(items: I) -> Self {
        Self::List(items.into_iter().map(Self::Int).collect())
    }

    /// Build a list of strings.
    pub fn strs<'a, I: IntoIterator<Item = &'a str>>(items: I) -> Self {
        Self::List(items.into_iter().map(Self::from).collect())
    }

    /// Build a string-keyed mapping from `(key, value)` pairs.
    pub fn map<'a, I: IntoIterator<Item = (&'a str, FixtureValue)>>(entries: I) -> Self {
        Self::Map(
            entries
                .into_iter()
                .map(|(key, value)| (key.to_string(), value))
                .collect(),
        )
    }

    /// Short name of the variant, used in diff and error reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Str(_) => "str",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }

    pub fn as_list(&self) -> Option<&[FixtureValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, FixtureValue>> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Look up a mapping entry; `None` for missing keys or non-mappings.
    pub fn get(&self, key: &str) -> Option<&FixtureValue> {
        self.as_map().and_then(|entries| entries.get(key))
    }

    /// Convert into the pickle value model.
    pub fn to_pickle(&self) -> Value {
        match self {
            Self::Int(value) => Value::I64(*value),
            Self::Str(value) => Value::String(value.clone()),
            Self::List(items) => Value::List(items.iter().map(Self::to_pickle).collect()),
            Self::Map(entries) => Value::Dict(
                entries
                    .iter()
                    .map(|(key, value)| (HashableValue::String(key.clone()), value.to_pickle()))
                    .collect(),
            ),
        }
    }

    /// Convert a decoded pickle value back, rejecting anything outside the model.
    pub fn from_pickle(value: Value) -> Result<Self, FixtureError> {
        convert(value, &mut String::from("$"))
    }
}

fn convert(value: Value, path: &mut String) -> Result<FixtureValue, FixtureError> {
    match value {
        Value::I64(value) => Ok(FixtureValue::Int(value)),
        Value::String(value) => Ok(FixtureValue::Str(value)),
        // Tuples only differ from lists in mutability on the Python side.
        Value::List(items) | Value::Tuple(items) => {
            let mut converted = Vec::with_capacity(items.len());
            for (idx, item) in items.into_iter().enumerate() {
                let len = path.len();
                path.push_str(&format!("[{idx}]"));
                converted.push(convert(item, path)?);
                path.truncate(len);
            }
            Ok(FixtureValue::List(converted))
        }
        Value::Dict(entries) => {
            let mut converted = BTreeMap::new();
            for (key, item) in entries {
                let key = match key {
                    HashableValue::String(key) => key,
                    other => {
                        return Err(FixtureError::UnsupportedValue {
                            path: path.clone(),
                            found: format!("non-string key {other:?}"),
                        })
                    }
                };
                let len = path.len();
                path.push('.');
                path.push_str(&key);
                let item = convert(item, path)?;
                path.truncate(len);
                converted.insert(key, item);
            }
            Ok(FixtureValue::Map(converted))
        }
        other => Err(FixtureError::UnsupportedValue {
            path: path.clone(),
            found: pickle_kind(&other).to_string(),
        }),
    }
}

fn pickle_kind(value: &Value) -> &'static str {
    match value {
        Value::None => "None",
        Value::Bool(_) => "bool",
        Value::I64(_) => "int",
        Value::Int(_) => "bigint",
        Value::F64(_) => "float",
        Value::Bytes(_) => "bytes",
        Value::String(_) => "str",
        Value::List(_) => "list",
        Value::Tuple(_) => "tuple",
        Value::Set(_) => "set",
        Value::FrozenSet(_) => "frozenset",
        Value::Dict(_) => "dict",
    }
}

impl From<i64> for FixtureValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for FixtureValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<Vec<FixtureValue>> for FixtureValue {
    fn from(items: Vec<FixtureValue>) -> Self {
        Self::List(items)
    }
}

/// Python-literal rendering, handy for log lines.
impl fmt::Display for FixtureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Str(value) => write!(f, "'{value}'"),
            Self::List(items) => {
                write!(f, "[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Map(entries) => {
                write!(f, "{{")?;
                for (idx, (key, value)) in entries.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "'{key}': {value}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pickle_conversion_preserves_nesting() {
        let value = FixtureValue::map([
            ("a", FixtureValue::ints([1, 2])),
            ("b", FixtureValue::List(vec!["x".into(), FixtureValue::ints(Vec::new())])),
        ]);
        let back = FixtureValue::from_pickle(value.to_pickle()).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn tuples_decode_as_lists() {
        let decoded =
            FixtureValue::from_pickle(Value::Tuple(vec![Value::I64(1), Value::I64(2)])).unwrap();
        assert_eq!(decoded, FixtureValue::ints([1, 2]));
    }

    #[test]
    fn unsupported_values_report_their_path() {
        let mut dict = BTreeMap::new();
        dict.insert(
            HashableValue::String("items".into()),
            Value::List(vec![Value::I64(1), Value::F64(2.5)]),
        );
        let err = FixtureValue::from_pickle(Value::Dict(dict)).unwrap_err();
        assert_eq!(
            err,
            FixtureError::UnsupportedValue {
                path: "$.items[1]".into(),
                found: "float".into(),
            }
        );
    }

    #[test]
    fn non_string_keys_are_rejected() {
        let mut dict = BTreeMap::new();
        dict.insert(HashableValue::I64(7), Value::I64(1));
        let err = FixtureValue::from_pickle(Value::Dict(dict)).unwrap_err();
        assert!(matches!(err, FixtureError::UnsupportedValue { ref path, .. } if path == "$"));
    }

    #[test]
    fn display_uses_python_literal_syntax() {
        let value = FixtureValue::map([("key", "value".into())]);
        assert_eq!(value.to_string(), "{'key': 'value'}");
        assert_eq!(FixtureValue::ints([1, 2]).to_string(), "[1, 2]");
    }

    #[test]
    fn untagged_json_form_is_plain() {
        let value = FixtureValue::List(vec![FixtureValue::Int(1), "s".into()]);
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"[1,"s"]"#);
    }
}
