//! Sparse update bags and logical-to-storage field maps.

use crate::error::{JoblyError, JoblyResult};
use crate::value::Value;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Ordered set of field changes for a partial update.
///
/// Entries keep the order in which they were first inserted, including when
/// decoded from a JSON object, so the generated `SET` clause numbers its
/// placeholders in the caller's order. Setting an existing key replaces its
/// value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateBag {
    entries: Vec<(String, Value)>,
}

impl UpdateBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field to a new value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    /// Chainable form of [`UpdateBag::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Reject any field outside `allowed`.
    pub fn ensure_only(&self, allowed: &[&str]) -> JoblyResult<()> {
        match self.keys().find(|k| !allowed.contains(k)) {
            Some(key) => Err(JoblyError::validation(format!(
                "field '{key}' cannot be updated"
            ))),
            None => Ok(()),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for UpdateBag
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut bag = UpdateBag::new();
        for (k, v) in iter {
            bag.set(k, v);
        }
        bag
    }
}

impl Serialize for UpdateBag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

struct UpdateBagVisitor;

impl<'de> Visitor<'de> for UpdateBagVisitor {
    type Value = UpdateBag;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object of field updates")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut bag = UpdateBag {
            entries: Vec::with_capacity(access.size_hint().unwrap_or(0)),
        };
        while let Some((key, value)) = access.next_entry::<String, Value>()? {
            bag.set(key, value);
        }
        Ok(bag)
    }
}

impl<'de> Deserialize<'de> for UpdateBag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(UpdateBagVisitor)
    }
}

/// Logical field name -> storage column lookup.
///
/// Fields without an entry map to themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    columns: BTreeMap<String, String>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `field` to `column`.
    pub fn rename(mut self, field: impl Into<String>, column: impl Into<String>) -> Self {
        self.columns.insert(field.into(), column.into());
        self
    }

    /// Storage column for `field`, or `field` itself when unmapped.
    pub fn column<'a>(&'a self, field: &'a str) -> &'a str {
        self.columns.get(field).map_or(field, String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for FieldMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            columns: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
