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

use log::{debug, info};

use super::Resource;
use crate::client::LookerApi;
use crate::errors::Result;
use crate::models::WritePermissionSet;
use crate::schema::{Attribute, AttributeType, Schema};
use crate::ResourceData;

/// `looker_permission_set`: a named set of permission strings.
#[derive(Debug, Default, Clone)]
pub struct PermissionSetResource;

impl PermissionSetResource {
    fn write_permission_set(&self, data: &ResourceData) -> Result<WritePermissionSet> {
        self.schema().validate(data)?;
        Ok(WritePermissionSet {
            name: data.require_string("name")?,
            permissions: data.require_string_set("permissions")?.into_iter().collect(),
        })
    }
}

impl Resource for PermissionSetResource {
    fn type_name(&self) -> &'static str {
        "looker_permission_set"
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .with_attribute(
                "name",
                Attribute::required(AttributeType::String)
                    .with_description("Name of the permission set"),
            )
            .with_attribute(
                "permissions",
                Attribute::required(AttributeType::StringSet)
                    .with_description("Permissions granted by this set"),
            )
    }

    fn create(&self, data: &mut ResourceData, client: &dyn LookerApi) -> Result<()> {
        let body = self.write_permission_set(data)?;
        debug!("Creating permission set '{}'", body.name);

        let permission_set = client.create_permission_set(&body)?;
        data.set_id(permission_set.id.to_string());
        info!(
            "Created permission set '{}' with id {}",
            body.name, permission_set.id
        );

        self.read(data, client)
    }

    fn read(&self, data: &mut ResourceData, client: &dyn LookerApi) -> Result<()> {
        let id = data.numeric_id()?;
        debug!("Reading permission set {id}");

        let permission_set = client.permission_set(id)?;
        data.set("name", permission_set.name.unwrap_or_default());
        data.set_string_set("permissions", permission_set.permissions.unwrap_or_default());
        Ok(())
    }

    fn update(&self, data: &mut ResourceData, client: &dyn LookerApi) -> Result<()> {
        let id = data.numeric_id()?;
        let body = self.write_permission_set(data)?;
        debug!("Updating permission set {id}");

        client.update_permission_set(id, &body)?;
        self.read(data, client)
    }

    fn delete(&self, data: &mut ResourceData, client: &dyn LookerApi) -> Result<()> {
        let id = data.numeric_id()?;
        client.delete_permission_set(id)?;
        data.clear_id();
        info!("Deleted permission set {id}");
        Ok(())
    }
}
