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

//! Terraform resources and the lifecycle contract they fulfil.

mod permission_set;
mod theme;

pub use permission_set::PermissionSetResource;
pub use theme::ThemeResource;

use crate::client::LookerApi;
use crate::errors::Result;
use crate::schema::Schema;
use crate::ResourceData;

/// Lifecycle of one resource type.
///
/// The orchestrator calls at most one of these at a time for a given
/// resource instance. Every call receives the instance state and the typed
/// client it must use; nothing is kept between calls.
pub trait Resource: Send + Sync {
    /// Terraform type name, e.g. `looker_theme`.
    fn type_name(&self) -> &'static str;

    fn schema(&self) -> Schema;

    /// Creates the remote entity from the configuration in `data`, records
    /// its id and refreshes `data` from the server.
    fn create(&self, data: &mut ResourceData, client: &dyn LookerApi) -> Result<()>;

    /// Refreshes `data` from the entity identified by `data.id()`.
    fn read(&self, data: &mut ResourceData, client: &dyn LookerApi) -> Result<()>;

    fn update(&self, data: &mut ResourceData, client: &dyn LookerApi) -> Result<()>;

    fn delete(&self, data: &mut ResourceData, client: &dyn LookerApi) -> Result<()>;

    /// Imports an existing entity. `data` only needs to carry the id.
    fn import(&self, data: &mut ResourceData, client: &dyn LookerApi) -> Result<Vec<ResourceData>> {
        self.read(data, client)?;
        Ok(vec![data.clone()])
    }
}
