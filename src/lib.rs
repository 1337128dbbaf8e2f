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

//! Terraform resources for Looker.
//!
//! Two resource types are provided, `looker_permission_set` and
//! `looker_theme`. Each one translates the declarative configuration held in
//! a [`ResourceData`] into calls against the Looker REST API and copies the
//! answer of the server back into the state.
//!
//! The remote API is consumed through the [`LookerApi`] trait.
//! [`LookerClientHttp`] implements it over HTTP; with the `test_utils`
//! feature, `test_utils::InMemoryLooker` implements it in memory.
//!
//! ```no_run
//! use looker_provider::{LookerProvider, ProviderConfig, ResourceData};
//!
//! # fn main() -> looker_provider::Result<()> {
//! let config = ProviderConfig::from_env()?;
//! let provider = LookerProvider::new(&config)?;
//!
//! let mut data = ResourceData::new()
//!     .with_attribute("name", "viewer_perms")
//!     .with_attribute("permissions", vec!["see_looks", "see_dashboards"]);
//! provider.create("looker_permission_set", &mut data)?;
//! println!("Created permission set {:?}", data.id());
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod errors;
mod models;
mod network;
mod provider;
mod resource_data;
pub mod resources;
pub mod schema;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;

pub use client::LookerApi;
pub use config::{ProviderConfig, DEFAULT_API_VERSION, DEFAULT_TIMEOUT};
pub use errors::{
    DeserializationError, DeserializationErrorKind, EntityKind, Error, Result,
};
pub use models::{
    Nullable, PermissionSet, Theme, ThemeSettings, WritePermissionSet, WriteTheme,
};
pub use network::{LookerClientHttp, ServiceAddress, StaticTokenProvider, TokenProvider};
pub use provider::LookerProvider;
pub use resource_data::ResourceData;
