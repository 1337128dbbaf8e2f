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

use std::error::Error;

use dotenvy::dotenv;
use looker_provider::{LookerProvider, ProviderConfig, ResourceData};

fn main() -> std::result::Result<(), Box<dyn Error>> {
    dotenv().ok();
    env_logger::init();

    let config = ProviderConfig::from_env()?;
    let provider = LookerProvider::new(&config)?;

    let mut permission_set = ResourceData::new()
        .with_attribute("name", "demo_viewer_perms")
        .with_attribute("permissions", vec!["see_looks", "see_dashboards"]);
    provider.create("looker_permission_set", &mut permission_set)?;
    println!("Permission set: {:?}", permission_set);

    let mut theme = ResourceData::new()
        .with_attribute("name", "demo_dark")
        .with_attribute("background_color", "#000000")
        .with_attribute("show_filters_bar", false);
    provider.create("looker_theme", &mut theme)?;
    println!("Theme: {:?}", theme);

    provider.delete("looker_theme", &mut theme)?;
    provider.delete("looker_permission_set", &mut permission_set)?;
    println!("Cleaned up");
    Ok(())
}
