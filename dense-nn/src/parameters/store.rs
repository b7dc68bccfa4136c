use super::value::{ParameterTextError, ParameterType, ParameterValue};
use crate::errors::ConfigurationError;

use ahash::RandomState;
use serde::{Deserialize, Serialize};
use tracing::warn;

use std::collections::{BTreeMap, HashMap};

/// A declared parameter: its name and the value
/// used when a store holds nothing under that name.
///
/// # Examples
/// ```
/// use dense_nn::parameters::{Parameter, ParameterStore};
///
/// const MOMENTUM: Parameter<f64> = Parameter::new("momentum", 0.9);
///
/// let mut store = ParameterStore::new();
/// assert_eq!(store.get(&MOMENTUM), 0.9);
///
/// store.set(&MOMENTUM, 0.5);
/// assert_eq!(store.get(&MOMENTUM), 0.5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Parameter<T> {
    pub name: &'static str,
    pub default: T,
}

impl<T> Parameter<T> {
    pub const fn new(name: &'static str, default: T) -> Parameter<T> {
        Parameter { name, default }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Entry {
    // Spelling of the name as first set, kept for persistence.
    name: String,
    value: ParameterValue,
}

/// A case-insensitive map from parameter names to typed values.
///
/// Persisted as a map of names to the values' compact text
/// forms, so unknown keys written by newer versions survive
/// a load/save cycle untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "BTreeMap<String, String>", try_from = "BTreeMap<String, String>")]
pub struct ParameterStore {
    entries: HashMap<String, Entry, RandomState>,
}

fn key(name: &str) -> String {
    name.to_lowercase()
}

impl ParameterStore {
    pub fn new() -> ParameterStore {
        ParameterStore::default()
    }

    /// Returns the stored value coerced to `T`, or the parameter's
    /// default if it is absent or cannot be coerced.
    ///
    /// # Examples
    /// ```
    /// use dense_nn::parameters::{Parameter, ParameterStore, ParameterValue};
    ///
    /// const EPOCHS: Parameter<i64> = Parameter::new("Epochs", 10);
    ///
    /// let mut store = ParameterStore::new();
    /// store.set_value("EPOCHS", ParameterValue::Double(25.0));
    ///
    /// // Lookups ignore case, and integral doubles coerce to integers.
    /// assert_eq!(store.get(&EPOCHS), 25);
    /// ```
    pub fn get<T: ParameterType>(&self, parameter: &Parameter<T>) -> T {
        match self.try_get(parameter) {
            Ok(value) => value,
            Err(e) => {
                warn!(parameter = parameter.name, error = %e, "using parameter default");
                parameter.default
            }
        }
    }

    /// Returns the stored value coerced to `T`, or the parameter's
    /// default if it is absent.
    ///
    /// # Errors
    /// Returns an error if a value is stored but cannot be coerced to `T`.
    pub fn try_get<T: ParameterType>(
        &self,
        parameter: &Parameter<T>,
    ) -> Result<T, ConfigurationError> {
        match self.entries.get(&key(parameter.name)) {
            None => Ok(parameter.default),
            Some(entry) => T::from_value(&entry.value).ok_or_else(|| {
                ConfigurationError::parameter(
                    parameter.name,
                    format!(
                        "expected {}, found {} {}",
                        T::TYPE_NAME,
                        entry.value.type_name(),
                        entry.value
                    ),
                )
            }),
        }
    }

    pub fn set<T: ParameterType>(&mut self, parameter: &Parameter<T>, value: T) {
        self.set_value(parameter.name, value.into_value());
    }

    /// Stores a value under `name`, replacing any value
    /// stored under the same name in any letter case.
    pub fn set_value(&mut self, name: &str, value: ParameterValue) {
        self.entries
            .entry(key(name))
            .and_modify(|entry| entry.value = value)
            .or_insert_with(|| Entry {
                name: name.to_owned(),
                value,
            });
    }

    /// Parses `text` in the compact text form and stores the result.
    ///
    /// # Examples
    /// ```
    /// use dense_nn::parameters::{NumericRange, Parameter, ParameterStore};
    ///
    /// const RANGE: Parameter<NumericRange> =
    ///     Parameter::new("range", NumericRange::new(-1.0, 1.0));
    ///
    /// let mut store = ParameterStore::new();
    /// store.set_text("range", "0.0..6.0").unwrap();
    /// assert_eq!(store.get(&RANGE), NumericRange::new(0.0, 6.0));
    ///
    /// assert!(store.set_text("range", "wide").is_err());
    /// ```
    pub fn set_text(&mut self, name: &str, text: &str) -> Result<(), ParameterTextError> {
        let value = text.parse()?;
        self.set_value(name, value);
        Ok(())
    }

    /// Removes the value stored under `name`,
    /// returning it if one was present.
    pub fn remove(&mut self, name: &str) -> Option<ParameterValue> {
        self.entries.remove(&key(name)).map(|entry| entry.value)
    }

    pub fn value(&self, name: &str) -> Option<ParameterValue> {
        self.entries.get(&key(name)).map(|entry| entry.value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&key(name))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the stored names and values.
    /// No ordering is guaranteed.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParameterValue)> {
        self.entries
            .values()
            .map(|entry| (entry.name.as_str(), &entry.value))
    }
}

impl From<ParameterStore> for BTreeMap<String, String> {
    fn from(store: ParameterStore) -> BTreeMap<String, String> {
        store
            .entries
            .into_values()
            .map(|entry| (entry.name, entry.value.to_string()))
            .collect()
    }
}

impl TryFrom<BTreeMap<String, String>> for ParameterStore {
    type Error = ParameterTextError;

    fn try_from(texts: BTreeMap<String, String>) -> Result<ParameterStore, ParameterTextError> {
        let mut store = ParameterStore::new();
        for (name, text) in texts {
            store.set_text(&name, &text)?;
        }
        Ok(store)
    }
}
