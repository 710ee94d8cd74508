use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use toml::{Table, Value};

/// Resolved, cast and validated configuration values.
///
/// Every schema field has an entry. Optional fields that were neither set
/// nor defaulted are present but absent-valued: [`contains_field`] is true
/// while [`get`] returns `None`.
///
/// [`contains_field`]: Config::contains_field
/// [`get`]: Config::get
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    values: BTreeMap<String, Option<Value>>,
}

impl Config {
    pub(crate) fn insert(&mut self, name: &str, value: Option<Value>) {
        self.values.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name).and_then(Option::as_ref)
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn contains_field(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    pub fn get_integer(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_integer)
    }

    /// Integers are widened to floats.
    pub fn get_float(&self, name: &str) -> Option<f64> {
        match self.get(name)? {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Collects the set values into a table, dropping absent ones.
    pub fn into_table(self) -> Table {
        self.values
            .into_iter()
            .filter_map(|(name, value)| value.map(|v| (name, v)))
            .collect()
    }

    /// Deserializes the set values into `T`.
    ///
    /// Keys are the schema's field names, so `T` usually needs
    /// `#[serde(rename_all = "SCREAMING_SNAKE_CASE")]` or per-field renames.
    /// Absent values deserialize as missing keys, which suits `Option` fields.
    pub fn deserialize<T: DeserializeOwned>(self) -> Result<T, toml::de::Error> {
        Value::Table(self.into_table()).try_into()
    }
}
