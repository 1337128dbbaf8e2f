// (C) Copyright IBM Corp. 2025.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::BTreeSet;

use serde_json::{Map, Value};

use crate::errors::{Error, Result};
use crate::models::Nullable;

/// Mutable state of one resource instance, as exchanged with the
/// orchestrator on every lifecycle call.
///
/// A key that is missing from the attributes was not configured; a key
/// holding `null` was explicitly cleared. Any other value counts as set,
/// including `false` and `""`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceData {
    id: Option<String>,
    attributes: Map<String, Value>,
}

impl ResourceData {
    pub fn new() -> Self {
        Self::default()
    }

    /// State that only knows the identifier, as seen on import.
    pub fn with_id(id: impl Into<String>) -> Self {
        let mut data = Self::new();
        data.set_id(id);
        data
    }

    pub fn with_attribute(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Setting an empty id marks the resource as not existing.
    pub fn set_id(&mut self, id: impl Into<String>) {
        let id = id.into();
        self.id = if id.is_empty() { None } else { Some(id) };
    }

    pub fn clear_id(&mut self) {
        self.id = None;
    }

    /// Parses the identifier as the integer id used by the remote API.
    pub fn numeric_id(&self) -> Result<i64> {
        let id = self
            .id()
            .ok_or_else(|| Error::MissingAttribute("id".to_string()))?;
        id.parse().map_err(|e| Error::invalid_id(id, e))
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Returns the value only when the attribute is present and not null.
    pub fn get_ok(&self, name: &str) -> Option<&Value> {
        self.get(name).filter(|value| !value.is_null())
    }

    pub fn set(&mut self, name: &str, value: impl Into<Value>) {
        self.attributes.insert(name.to_string(), value.into());
    }

    pub fn get_string(&self, name: &str) -> Result<Option<String>> {
        self.get_ok(name)
            .map(|value| {
                value
                    .as_str()
                    .map(str::to_string)
                    .ok_or_else(|| type_error(name, "string"))
            })
            .transpose()
    }

    pub fn get_bool(&self, name: &str) -> Result<Option<bool>> {
        self.get_ok(name)
            .map(|value| value.as_bool().ok_or_else(|| type_error(name, "bool")))
            .transpose()
    }

    pub fn get_string_set(&self, name: &str) -> Result<Option<BTreeSet<String>>> {
        self.get_ok(name)
            .map(|value| -> Result<BTreeSet<String>> {
                value
                    .as_array()
                    .ok_or_else(|| type_error(name, "set of strings"))?
                    .iter()
                    .map(|item| {
                        item.as_str()
                            .map(str::to_string)
                            .ok_or_else(|| type_error(name, "set of strings"))
                    })
                    .collect()
            })
            .transpose()
    }

    pub fn require_string(&self, name: &str) -> Result<String> {
        self.get_string(name)?
            .ok_or_else(|| Error::MissingAttribute(name.to_string()))
    }

    pub fn require_string_set(&self, name: &str) -> Result<BTreeSet<String>> {
        self.get_string_set(name)?
            .ok_or_else(|| Error::MissingAttribute(name.to_string()))
    }

    pub fn nullable_string(&self, name: &str) -> Result<Nullable<String>> {
        match self.get(name) {
            None => Ok(Nullable::Absent),
            Some(_) => self.get_string(name).map(Nullable::from),
        }
    }

    pub fn nullable_bool(&self, name: &str) -> Result<Nullable<bool>> {
        match self.get(name) {
            None => Ok(Nullable::Absent),
            Some(_) => self.get_bool(name).map(Nullable::from),
        }
    }

    /// Stores a set attribute, sorted so that equal sets compare equal.
    pub fn set_string_set<I, S>(&mut self, name: &str, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items: BTreeSet<String> = items.into_iter().map(Into::into).collect();
        self.set(name, items.into_iter().map(Value::from).collect::<Vec<_>>());
    }

    /// Copies a setting into the state only when the server sent a value.
    pub(crate) fn set_if_value<T>(&mut self, name: &str, value: &Nullable<T>)
    where
        T: Clone + Into<Value>,
    {
        if let Some(value) = value.as_value() {
            self.set(name, value.clone());
        }
    }
}

fn type_error(name: &str, expected: &str) -> Error {
    Error::AttributeType {
        name: name.to_string(),
        expected: expected.to_string(),
    }
}
