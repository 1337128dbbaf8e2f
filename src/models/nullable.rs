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

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An optional field that tells apart "not given" from "explicitly null".
///
/// Serialized as part of a struct with
/// `#[serde(default, skip_serializing_if = "Nullable::is_absent")]`, an
/// [`Nullable::Absent`] field is left out of the payload so the server keeps
/// its own value, while [`Nullable::Null`] is sent as `null` to clear it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Nullable<T> {
    Absent,
    Null,
    Value(T),
}

impl<T> Nullable<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Nullable::Absent)
    }

    pub fn as_value(&self) -> Option<&T> {
        match self {
            Nullable::Value(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> Default for Nullable<T> {
    fn default() -> Self {
        Nullable::Absent
    }
}

impl<T> From<Option<T>> for Nullable<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Nullable::Value(value),
            None => Nullable::Null,
        }
    }
}

impl<T: Serialize> Serialize for Nullable<T> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Nullable::Value(value) => value.serialize(serializer),
            Nullable::Absent | Nullable::Null => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Nullable<T> {
    // Only called when the key is present, missing keys fall back to `Default`.
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Nullable::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, Serialize, Deserialize)]
    struct Payload {
        #[serde(default, skip_serializing_if = "Nullable::is_absent")]
        color: Nullable<String>,
    }

    #[test]
    fn test_absent_is_skipped() {
        let payload = Payload::default();
        assert_eq!(serde_json::to_value(&payload).unwrap(), json!({}));
    }

    #[test]
    fn test_null_is_sent() {
        let payload = Payload {
            color: Nullable::Null,
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"color": null})
        );
    }

    #[test]
    fn test_three_states_on_deserialize() {
        let absent: Payload = serde_json::from_value(json!({})).unwrap();
        assert_eq!(absent.color, Nullable::Absent);

        let null: Payload = serde_json::from_value(json!({"color": null})).unwrap();
        assert_eq!(null.color, Nullable::Null);

        let value: Payload = serde_json::from_value(json!({"color": "#000"})).unwrap();
        assert_eq!(value.color, Nullable::Value("#000".to_string()));
    }
}
