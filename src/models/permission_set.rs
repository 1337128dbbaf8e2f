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

use serde::{Deserialize, Serialize};

use super::deserialize_id;

/// Permission set as returned by the server.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PermissionSet {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub permissions: Option<Vec<String>>,
    #[serde(default)]
    pub built_in: Option<bool>,
    #[serde(default)]
    pub all_access: Option<bool>,
}

/// Payload used to create or fully replace a permission set.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WritePermissionSet {
    pub name: String,
    pub permissions: Vec<String>,
}
