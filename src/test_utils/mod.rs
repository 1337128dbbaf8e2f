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

//! In-memory stand-in for a Looker instance, for tests.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};

use crate::client::LookerApi;
use crate::errors::{EntityKind, Error, Result};
use crate::models::{PermissionSet, Theme, ThemeSettings, WritePermissionSet, WriteTheme};

/// Id of the built-in theme that is the default of a fresh instance.
pub const BUILT_IN_THEME_ID: i64 = 1;

#[derive(Debug)]
struct State {
    next_id: i64,
    permission_sets: BTreeMap<i64, PermissionSet>,
    themes: BTreeMap<i64, Theme>,
    default_theme_id: i64,
    fail_set_default: bool,
    calls: Vec<String>,
}

/// A [`LookerApi`] that keeps entities in memory and behaves like the
/// server for the calls the resources make:
/// - names are unique per entity type,
/// - updating a theme keeps the settings the payload leaves out,
/// - the default theme cannot be deleted and must not expire.
#[derive(Debug)]
pub struct InMemoryLooker {
    state: Mutex<State>,
}

impl Default for InMemoryLooker {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryLooker {
    pub fn new() -> Self {
        let built_in = Theme {
            id: BUILT_IN_THEME_ID,
            name: Some("Looker".to_string()),
            begin_at: None,
            end_at: None,
            settings: ThemeSettings::default(),
        };
        Self {
            state: Mutex::new(State {
                next_id: BUILT_IN_THEME_ID + 1,
                permission_sets: BTreeMap::new(),
                themes: BTreeMap::from([(BUILT_IN_THEME_ID, built_in)]),
                default_theme_id: BUILT_IN_THEME_ID,
                fail_set_default: false,
                calls: Vec::new(),
            }),
        }
    }

    /// Makes every following `set_default_theme` call fail with a server error.
    pub fn fail_set_default(&self, fail: bool) {
        self.lock().fail_set_default = fail;
    }

    /// Gives a theme an expiration date, as if it was set from the UI.
    pub fn expire_theme(&self, id: i64, end_at: DateTime<Utc>) {
        if let Some(theme) = self.lock().themes.get_mut(&id) {
            theme.end_at = Some(end_at);
        }
    }

    /// Calls received so far, as `"<method> <argument>"`.
    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, call: String) -> MutexGuard<'_, State> {
        let mut state = self.lock();
        state.calls.push(call);
        state
    }
}

impl State {
    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn ensure_unique_permission_set(&self, name: &str, except: Option<i64>) -> Result<()> {
        let taken = self
            .permission_sets
            .values()
            .any(|p| p.name.as_deref() == Some(name) && Some(p.id) != except);
        if taken {
            return Err(already_exists(name));
        }
        Ok(())
    }

    fn ensure_unique_theme(&self, name: &str, except: Option<i64>) -> Result<()> {
        let taken = self
            .themes
            .values()
            .any(|t| t.name.as_deref() == Some(name) && Some(t.id) != except);
        if taken {
            return Err(already_exists(name));
        }
        Ok(())
    }
}

fn already_exists(name: &str) -> Error {
    Error::Api {
        status: 422,
        message: format!("'{name}' already exists"),
    }
}

fn not_found(kind: EntityKind, id: impl ToString) -> Error {
    Error::NotFound {
        kind,
        id: id.to_string(),
    }
}

impl LookerApi for InMemoryLooker {
    fn create_permission_set(&self, body: &WritePermissionSet) -> Result<PermissionSet> {
        let mut state = self.record(format!("create_permission_set {}", body.name));
        state.ensure_unique_permission_set(&body.name, None)?;
        let permission_set = PermissionSet {
            id: state.allocate_id(),
            name: Some(body.name.clone()),
            permissions: Some(body.permissions.clone()),
            built_in: Some(false),
            all_access: Some(false),
        };
        state
            .permission_sets
            .insert(permission_set.id, permission_set.clone());
        Ok(permission_set)
    }

    fn permission_set(&self, id: i64) -> Result<PermissionSet> {
        let state = self.record(format!("permission_set {id}"));
        state
            .permission_sets
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(EntityKind::PermissionSet, id))
    }

    fn update_permission_set(&self, id: i64, body: &WritePermissionSet) -> Result<PermissionSet> {
        let mut state = self.record(format!("update_permission_set {id}"));
        state.ensure_unique_permission_set(&body.name, Some(id))?;
        let permission_set = state
            .permission_sets
            .get_mut(&id)
            .ok_or_else(|| not_found(EntityKind::PermissionSet, id))?;
        permission_set.name = Some(body.name.clone());
        permission_set.permissions = Some(body.permissions.clone());
        Ok(permission_set.clone())
    }

    fn delete_permission_set(&self, id: i64) -> Result<()> {
        let mut state = self.record(format!("delete_permission_set {id}"));
        state
            .permission_sets
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found(EntityKind::PermissionSet, id))
    }

    fn create_theme(&self, body: &WriteTheme) -> Result<Theme> {
        let mut state = self.record(format!("create_theme {}", body.name));
        state.ensure_unique_theme(&body.name, None)?;
        let mut settings = ThemeSettings::default();
        settings.merge(body.settings.clone());
        let theme = Theme {
            id: state.allocate_id(),
            name: Some(body.name.clone()),
            begin_at: Some(Utc::now()),
            end_at: None,
            settings,
        };
        state.themes.insert(theme.id, theme.clone());
        Ok(theme)
    }

    fn theme(&self, id: i64) -> Result<Theme> {
        let state = self.record(format!("theme {id}"));
        state
            .themes
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(EntityKind::Theme, id))
    }

    fn update_theme(&self, id: i64, body: &WriteTheme) -> Result<Theme> {
        let mut state = self.record(format!("update_theme {id}"));
        state.ensure_unique_theme(&body.name, Some(id))?;
        let theme = state
            .themes
            .get_mut(&id)
            .ok_or_else(|| not_found(EntityKind::Theme, id))?;
        theme.name = Some(body.name.clone());
        theme.settings.merge(body.settings.clone());
        Ok(theme.clone())
    }

    fn delete_theme(&self, id: i64) -> Result<()> {
        let mut state = self.record(format!("delete_theme {id}"));
        if state.default_theme_id == id {
            return Err(Error::Api {
                status: 422,
                message: "The default theme cannot be deleted".to_string(),
            });
        }
        state
            .themes
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found(EntityKind::Theme, id))
    }

    fn default_theme(&self, ts: DateTime<Utc>) -> Result<Theme> {
        let state = self.record(format!("default_theme {}", ts.to_rfc3339()));
        state
            .themes
            .get(&state.default_theme_id)
            .cloned()
            .ok_or_else(|| not_found(EntityKind::Theme, "default"))
    }

    fn set_default_theme(&self, name: &str) -> Result<Theme> {
        let mut state = self.record(format!("set_default_theme {name}"));
        if state.fail_set_default {
            return Err(Error::Api {
                status: 500,
                message: "Internal server error".to_string(),
            });
        }
        let theme = state
            .themes
            .values()
            .find(|t| t.name.as_deref() == Some(name))
            .cloned()
            .ok_or_else(|| not_found(EntityKind::Theme, name))?;
        if theme.end_at.is_some() {
            return Err(Error::Api {
                status: 422,
                message: format!("Theme '{name}' has an expiration and cannot be the default"),
            });
        }
        state.default_theme_id = theme.id;
        Ok(theme)
    }
}
