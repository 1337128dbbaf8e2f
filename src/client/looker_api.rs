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

use chrono::{DateTime, Utc};

use crate::errors::Result;
use crate::models::{PermissionSet, Theme, WritePermissionSet, WriteTheme};

/// The subset of the Looker REST API the resources are built on.
///
/// Every call is a single blocking round trip. Failures are returned as they
/// come, a missing entity is reported as [`Error::NotFound`](crate::Error::NotFound).
pub trait LookerApi: Send + Sync {
    fn create_permission_set(&self, body: &WritePermissionSet) -> Result<PermissionSet>;

    fn permission_set(&self, id: i64) -> Result<PermissionSet>;

    /// Replaces name and permissions of an existing permission set.
    fn update_permission_set(&self, id: i64, body: &WritePermissionSet) -> Result<PermissionSet>;

    fn delete_permission_set(&self, id: i64) -> Result<()>;

    fn create_theme(&self, body: &WriteTheme) -> Result<Theme>;

    fn theme(&self, id: i64) -> Result<Theme>;

    /// Settings left out of `body` keep their stored value.
    fn update_theme(&self, id: i64, body: &WriteTheme) -> Result<Theme>;

    fn delete_theme(&self, id: i64) -> Result<()>;

    /// The theme that is the tenant default at the given time.
    fn default_theme(&self, ts: DateTime<Utc>) -> Result<Theme>;

    /// Makes the theme with this name the tenant default. Idempotent.
    fn set_default_theme(&self, name: &str) -> Result<Theme>;
}
