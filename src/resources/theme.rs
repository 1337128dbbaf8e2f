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

use chrono::Utc;
use log::{debug, info, warn};

use super::Resource;
use crate::client::LookerApi;
use crate::errors::{Error, Result};
use crate::models::{Theme, ThemeSettings, WriteTheme};
use crate::schema::{Attribute, AttributeType, Schema};
use crate::ResourceData;

const DESCRIPTION: &str = "Further documentation can be found here: \
    https://docs.looker.com/reference/api-and-integration/api-reference/v4.0/theme";

const SETTINGS: [(&str, AttributeType, &str); 17] = [
    ("background_color", AttributeType::String, "Default background color"),
    ("base_font_size", AttributeType::String, "Base font size for scaling fonts"),
    (
        "color_collection_id",
        AttributeType::String,
        "Optional. ID of color collection to use with the theme. Use an empty string for none.",
    ),
    ("font_color", AttributeType::String, "Default font color"),
    ("font_family", AttributeType::String, "Primary font family"),
    ("font_source", AttributeType::String, "Source specification for font"),
    ("info_button_color", AttributeType::String, "Info button color"),
    ("primary_button_color", AttributeType::String, "Primary button color"),
    ("show_filters_bar", AttributeType::Bool, "Toggle to show filters. Defaults to true"),
    ("show_title", AttributeType::Bool, "Toggle to show the title. Defaults to true"),
    ("text_tile_text_color", AttributeType::String, "Text color for the text tiles"),
    ("tile_background_color", AttributeType::String, "Background color for tiles"),
    ("tile_text_color", AttributeType::String, "Text color for tiles"),
    ("title_color", AttributeType::String, "Color for titles"),
    ("warn_button_color", AttributeType::String, "Warning button color"),
    (
        "tile_title_alignment",
        AttributeType::String,
        "The text alignment of tile titles (New Dashboards)",
    ),
    ("tile_shadow", AttributeType::Bool, "Toggles the tile shadow (New Dashboards)"),
];

/// `looker_theme`: display settings, optionally promoted to the tenant default.
#[derive(Debug, Clone)]
pub struct ThemeResource {
    default_on_update: bool,
}

impl Default for ThemeResource {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ThemeResource {
    /// With `default_on_update` unset, `default = true` only takes effect
    /// when the theme is created.
    pub fn new(default_on_update: bool) -> Self {
        Self { default_on_update }
    }

    fn write_theme(&self, data: &ResourceData) -> Result<WriteTheme> {
        self.schema().validate(data)?;
        let name = data.require_string("name")?;
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(Error::InvalidAttribute {
                name: "name".to_string(),
                reason: format!("'{name}' can only contain alphanumerics and underscores"),
            });
        }
        Ok(WriteTheme {
            name,
            settings: settings_from(data)?,
        })
    }

    fn make_default(&self, theme: &Theme, name: &str, client: &dyn LookerApi) -> Result<()> {
        if let Some(end_at) = theme.end_at {
            return Err(Error::InvalidAttribute {
                name: "default".to_string(),
                reason: format!("theme '{name}' expires at {end_at} and cannot be the default"),
            });
        }
        client.set_default_theme(name)?;
        info!("Theme '{name}' is now the default theme");
        Ok(())
    }
}

impl Resource for ThemeResource {
    fn type_name(&self) -> &'static str {
        "looker_theme"
    }

    fn schema(&self) -> Schema {
        let schema = Schema::new()
            .with_description(DESCRIPTION)
            .with_attribute(
                "name",
                Attribute::required(AttributeType::String)
                    .with_description("Name of theme. Can only be alphanumeric and underscores"),
            )
            .with_attribute(
                "default",
                Attribute::optional(AttributeType::Bool)
                    .with_computed()
                    .with_description(
                        "Only an active theme with no expiration (end_at not set) can be \
                         assigned as the default theme. As long as a theme has an active record \
                         with no expiration, it can be set as the default.",
                    ),
            );
        SETTINGS.iter().fold(schema, |schema, (name, kind, description)| {
            let attribute = Attribute::optional(*kind).with_description(description);
            schema.with_attribute(name, attribute)
        })
    }

    fn create(&self, data: &mut ResourceData, client: &dyn LookerApi) -> Result<()> {
        let body = self.write_theme(data)?;
        debug!("Creating theme '{}'", body.name);

        let theme = client.create_theme(&body)?;
        data.set_id(theme.id.to_string());
        info!("Created theme '{}' with id {}", body.name, theme.id);

        if data.get_bool("default")? == Some(true) {
            // The theme exists from here on, a failure leaves it non-default.
            if let Err(e) = self.make_default(&theme, &body.name, client) {
                warn!("Theme {} was created but could not be made default: {e}", theme.id);
                return Err(e);
            }
        }

        self.read(data, client)
    }

    fn read(&self, data: &mut ResourceData, client: &dyn LookerApi) -> Result<()> {
        let id = data.numeric_id()?;
        debug!("Reading theme {id}");

        let theme = client.theme(id)?;
        if let Some(name) = theme.name {
            data.set("name", name);
        }
        write_settings(data, &theme.settings);

        let default_theme = client.default_theme(Utc::now())?;
        data.set("default", default_theme.id == id);
        Ok(())
    }

    fn update(&self, data: &mut ResourceData, client: &dyn LookerApi) -> Result<()> {
        let id = data.numeric_id()?;
        let body = self.write_theme(data)?;
        debug!("Updating theme {id}");

        let theme = client.update_theme(id, &body)?;

        if self.default_on_update && data.get_bool("default")? == Some(true) {
            let current = client.default_theme(Utc::now())?;
            if current.id != id {
                self.make_default(&theme, &body.name, client)?;
            }
        }

        self.read(data, client)
    }

    fn delete(&self, data: &mut ResourceData, client: &dyn LookerApi) -> Result<()> {
        let id = data.numeric_id()?;
        client.delete_theme(id)?;
        data.clear_id();
        info!("Deleted theme {id}");
        Ok(())
    }
}

fn settings_from(data: &ResourceData) -> Result<ThemeSettings> {
    Ok(ThemeSettings {
        background_color: data.nullable_string("background_color")?,
        base_font_size: data.nullable_string("base_font_size")?,
        color_collection_id: data.nullable_string("color_collection_id")?,
        font_color: data.nullable_string("font_color")?,
        font_family: data.nullable_string("font_family")?,
        font_source: data.nullable_string("font_source")?,
        info_button_color: data.nullable_string("info_button_color")?,
        primary_button_color: data.nullable_string("primary_button_color")?,
        show_filters_bar: data.nullable_bool("show_filters_bar")?,
        show_title: data.nullable_bool("show_title")?,
        text_tile_text_color: data.nullable_string("text_tile_text_color")?,
        tile_background_color: data.nullable_string("tile_background_color")?,
        tile_text_color: data.nullable_string("tile_text_color")?,
        title_color: data.nullable_string("title_color")?,
        warn_button_color: data.nullable_string("warn_button_color")?,
        tile_title_alignment: data.nullable_string("tile_title_alignment")?,
        tile_shadow: data.nullable_bool("tile_shadow")?,
    })
}

// Settings the server did not send are left as they are in the state.
fn write_settings(data: &mut ResourceData, settings: &ThemeSettings) {
    data.set_if_value("background_color", &settings.background_color);
    data.set_if_value("base_font_size", &settings.base_font_size);
    data.set_if_value("color_collection_id", &settings.color_collection_id);
    data.set_if_value("font_color", &settings.font_color);
    data.set_if_value("font_family", &settings.font_family);
    data.set_if_value("font_source", &settings.font_source);
    data.set_if_value("info_button_color", &settings.info_button_color);
    data.set_if_value("primary_button_color", &settings.primary_button_color);
    data.set_if_value("show_filters_bar", &settings.show_filters_bar);
    data.set_if_value("show_title", &settings.show_title);
    data.set_if_value("text_tile_text_color", &settings.text_tile_text_color);
    data.set_if_value("tile_background_color", &settings.tile_background_color);
    data.set_if_value("tile_text_color", &settings.tile_text_color);
    data.set_if_value("title_color", &settings.title_color);
    data.set_if_value("warn_button_color", &settings.warn_button_color);
    data.set_if_value("tile_title_alignment", &settings.tile_title_alignment);
    data.set_if_value("tile_shadow", &settings.tile_shadow);
}
