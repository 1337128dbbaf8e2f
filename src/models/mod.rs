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

//! Wire models exchanged with the Looker REST API.
//!
//! Write models only carry what the resource configuration sets, read models
//! mirror what the server answers. Identifiers are integers on our side even
//! though newer API versions encode them as JSON strings.

mod nullable;
mod permission_set;
mod theme;

pub use nullable::Nullable;
pub use permission_set::{PermissionSet, WritePermissionSet};
pub use theme::{Theme, ThemeSettings, WriteTheme};

use serde::{Deserialize, Deserializer};

/// Accepts an entity id sent either as a JSON number or a numeric string.
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Number(id) => Ok(id),
        RawId::Text(id) => id.parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!({"id": 42, "name": "viewer_perms"}))]
    #[case(json!({"id": "42", "name": "viewer_perms"}))]
    fn test_id_as_number_or_string(#[case] payload: serde_json::Value) {
        let permission_set: PermissionSet = serde_json::from_value(payload).unwrap();
        assert_eq!(permission_set.id, 42);
    }

    #[test]
    fn test_id_not_numeric() {
        let result = serde_json::from_value::<PermissionSet>(json!({"id": "forty-two"}));
        assert!(result.is_err());
    }
}
