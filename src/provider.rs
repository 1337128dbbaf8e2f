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

use std::collections::BTreeMap;

use log::debug;

use crate::client::LookerApi;
use crate::errors::{Error, Result};
use crate::network::{LookerClientHttp, StaticTokenProvider};
use crate::resources::{PermissionSetResource, Resource, ThemeResource};
use crate::schema::Schema;
use crate::{ProviderConfig, ResourceData};

/// Entry point for the orchestrator: owns the API client and routes
/// lifecycle calls to the resource registered under a type name.
pub struct LookerProvider {
    client: Box<dyn LookerApi>,
    resources: BTreeMap<&'static str, Box<dyn Resource>>,
}

impl std::fmt::Debug for LookerProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookerProvider")
            .field("resources", &self.resources.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl LookerProvider {
    /// Creates a provider connected to the Looker instance described by `config`.
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let token_provider = Box::new(StaticTokenProvider::new(&config.access_token));
        let client = LookerClientHttp::from_config(config, token_provider)?;
        Ok(Self::with_client(config, Box::new(client)))
    }

    /// Creates a provider on top of any [`LookerApi`] implementation.
    pub fn with_client(config: &ProviderConfig, client: Box<dyn LookerApi>) -> Self {
        let resources: [Box<dyn Resource>; 2] = [
            Box::new(PermissionSetResource),
            Box::new(ThemeResource::new(config.theme_default_on_update)),
        ];
        Self {
            client,
            resources: resources
                .into_iter()
                .map(|resource| (resource.type_name(), resource))
                .collect(),
        }
    }

    pub fn resource_types(&self) -> Vec<&'static str> {
        self.resources.keys().copied().collect()
    }

    pub fn schemas(&self) -> BTreeMap<&'static str, Schema> {
        self.resources
            .iter()
            .map(|(name, resource)| (*name, resource.schema()))
            .collect()
    }

    pub fn resource(&self, type_name: &str) -> Result<&dyn Resource> {
        self.resources
            .get(type_name)
            .map(|resource| resource.as_ref())
            .ok_or_else(|| Error::UnknownResourceType(type_name.to_string()))
    }

    pub fn create(&self, type_name: &str, data: &mut ResourceData) -> Result<()> {
        debug!("create {type_name}");
        self.resource(type_name)?.create(data, self.client.as_ref())
    }

    pub fn read(&self, type_name: &str, data: &mut ResourceData) -> Result<()> {
        debug!("read {type_name} {:?}", data.id());
        self.resource(type_name)?.read(data, self.client.as_ref())
    }

    pub fn update(&self, type_name: &str, data: &mut ResourceData) -> Result<()> {
        debug!("update {type_name} {:?}", data.id());
        self.resource(type_name)?.update(data, self.client.as_ref())
    }

    pub fn delete(&self, type_name: &str, data: &mut ResourceData) -> Result<()> {
        debug!("delete {type_name} {:?}", data.id());
        self.resource(type_name)?.delete(data, self.client.as_ref())
    }

    pub fn import(&self, type_name: &str, id: &str) -> Result<Vec<ResourceData>> {
        debug!("import {type_name} {id}");
        let mut data = ResourceData::with_id(id);
        self.resource(type_name)?
            .import(&mut data, self.client.as_ref())
    }
}
