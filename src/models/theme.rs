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
use serde::{Deserialize, Serialize};

use super::{deserialize_id, Nullable};

/// Theme as returned by the server.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Theme {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub begin_at: Option<DateTime<Utc>>,
    /// A theme with an expiration cannot become the default theme.
    #[serde(default)]
    pub end_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub settings: ThemeSettings,
}

/// Payload used to create or fully replace a theme.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WriteTheme {
    pub name: String,
    pub settings: ThemeSettings,
}

/// Display settings of a theme. Every field is independent and optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ThemeSettings {
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub background_color: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub base_font_size: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub color_collection_id: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub font_color: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub font_family: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub font_source: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub info_button_color: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub primary_button_color: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub show_filters_bar: Nullable<bool>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub show_title: Nullable<bool>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub text_tile_text_color: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub tile_background_color: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub tile_text_color: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub title_color: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub warn_button_color: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub tile_title_alignment: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub tile_shadow: Nullable<bool>,
}

impl ThemeSettings {
    /// Overlays every field `other` carries (set or cleared) on top of `self`.
    pub fn merge(&mut self, other: ThemeSettings) {
        fn overlay<T>(target: &mut Nullable<T>, source: Nullable<T>) {
            if !source.is_absent() {
                *target = source;
            }
        }

        overlay(&mut self.background_color, other.background_color);
        overlay(&mut self.base_font_size, other.base_font_size);
        overlay(&mut self.color_collection_id, other.color_collection_id);
        overlay(&mut self.font_color, other.font_color);
        overlay(&mut self.font_family, other.font_family);
        overlay(&mut self.font_source, other.font_source);
        overlay(&mut self.info_button_color, other.info_button_color);
        overlay(&mut self.primary_button_color, other.primary_button_color);
        overlay(&mut self.show_filters_bar, other.show_filters_bar);
        overlay(&mut self.show_title, other.show_title);
        overlay(&mut self.text_tile_text_color, other.text_tile_text_color);
        overlay(&mut self.tile_background_color, other.tile_background_color);
        overlay(&mut self.tile_text_color, other.tile_text_color);
        overlay(&mut self.title_color, other.title_color);
        overlay(&mut self.warn_button_color, other.warn_button_color);
        overlay(&mut self.tile_title_alignment, other.tile_title_alignment);
        overlay(&mut self.tile_shadow, other.tile_shadow);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_write_theme_only_sends_given_settings() {
        let theme = WriteTheme {
            name: "dark".to_string(),
            settings: ThemeSettings {
                background_color: Nullable::Value("#000".to_string()),
                show_title: Nullable::Value(false),
                font_source: Nullable::Null,
                ..Default::default()
            },
        };

        assert_eq!(
            serde_json::to_value(&theme).unwrap(),
            json!({
                "name": "dark",
                "settings": {
                    "background_color": "#000",
                    "show_title": false,
                    "font_source": null
                }
            })
        );
    }

    #[test]
    fn test_theme_from_server() {
        let theme: Theme = serde_json::from_value(json!({
            "id": "3",
            "name": "dark",
            "begin_at": "2024-05-01T00:00:00.000+00:00",
            "end_at": null,
            "settings": {
                "background_color": "#000",
                "tile_shadow": true,
                "font_family": null
            }
        }))
        .unwrap();

        assert_eq!(theme.id, 3);
        assert!(theme.begin_at.is_some());
        assert!(theme.end_at.is_none());
        assert_eq!(
            theme.settings.background_color,
            Nullable::Value("#000".to_string())
        );
        assert_eq!(theme.settings.tile_shadow, Nullable::Value(true));
        assert_eq!(theme.settings.font_family, Nullable::Null);
        assert_eq!(theme.settings.title_color, Nullable::Absent);
    }

    #[test]
    fn test_merge_keeps_untouched_fields() {
        let mut stored = ThemeSettings {
            background_color: Nullable::Value("#000".to_string()),
            title_color: Nullable::Value("#fff".to_string()),
            ..Default::default()
        };
        stored.merge(ThemeSettings {
            background_color: Nullable::Value("#111".to_string()),
            title_color: Nullable::Null,
            ..Default::default()
        });

        assert_eq!(stored.background_color, Nullable::Value("#111".to_string()));
        assert_eq!(stored.title_color, Nullable::Null);
        assert_eq!(stored.font_color, Nullable::Absent);
    }
}
