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

//! Declarative description of the attributes a resource accepts.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::errors::{Error, Result};
use crate::ResourceData;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AttributeType {
    String,
    Bool,
    /// Unordered collection of unique strings.
    StringSet,
}

impl AttributeType {
    fn accepts(&self, value: &Value) -> bool {
        match self {
            AttributeType::String => value.is_string(),
            AttributeType::Bool => value.is_boolean(),
            AttributeType::StringSet => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
        }
    }
}

impl std::fmt::Display for AttributeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::String => "string",
            Self::Bool => "bool",
            Self::StringSet => "set of strings",
        };
        write!(f, "{label}")
    }
}

/// Declaration of one attribute.
///
/// `computed` marks attributes the provider fills in on read, whether or
/// not the user configured them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub kind: AttributeType,
    pub required: bool,
    pub optional: bool,
    pub computed: bool,
    pub description: Option<String>,
}

impl Attribute {
    pub fn required(kind: AttributeType) -> Self {
        Self {
            kind,
            required: true,
            optional: false,
            computed: false,
            description: None,
        }
    }

    pub fn optional(kind: AttributeType) -> Self {
        Self {
            kind,
            required: false,
            optional: true,
            computed: false,
            description: None,
        }
    }

    pub fn with_computed(mut self) -> Self {
        self.computed = true;
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

/// Schema of a single resource type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Schema {
    pub description: Option<String>,
    pub attributes: BTreeMap<String, Attribute>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_attribute(mut self, name: &str, attribute: Attribute) -> Self {
        self.attributes.insert(name.to_string(), attribute);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Checks the configured attributes against this schema.
    ///
    /// Required attributes must be present and non-null, every present
    /// attribute must be declared and hold a value of the declared type.
    /// `null` is accepted for optional attributes.
    pub fn validate(&self, data: &ResourceData) -> Result<()> {
        for (name, attribute) in &self.attributes {
            if attribute.required && data.get_ok(name).is_none() {
                return Err(Error::MissingAttribute(name.clone()));
            }
        }

        for (name, value) in data.attributes() {
            let attribute = self.attribute(name).ok_or_else(|| Error::InvalidAttribute {
                name: name.clone(),
                reason: "attribute is not declared in the schema".to_string(),
            })?;
            if !value.is_null() && !attribute.kind.accepts(value) {
                return Err(Error::AttributeType {
                    name: name.clone(),
                    expected: attribute.kind.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn schema() -> Schema {
        Schema::new()
            .with_attribute("name", Attribute::required(AttributeType::String))
            .with_attribute("permissions", Attribute::required(AttributeType::StringSet))
            .with_attribute("enabled", Attribute::optional(AttributeType::Bool))
    }

    #[rstest]
    fn test_valid_configuration(schema: Schema) {
        let data = ResourceData::new()
            .with_attribute("name", json!("viewer_perms"))
            .with_attribute("permissions", json!(["see_looks"]))
            .with_attribute("enabled", Value::Null);
        assert!(schema.validate(&data).is_ok());
    }

    #[rstest]
    fn test_missing_required(schema: Schema) {
        let data = ResourceData::new().with_attribute("name", json!("viewer_perms"));
        assert!(matches!(
            schema.validate(&data),
            Err(Error::MissingAttribute(name)) if name == "permissions"
        ));
    }

    #[rstest]
    #[case("enabled", json!("yes"))]
    #[case("permissions", json!(["see_looks", 3]))]
    #[case("name", json!(12))]
    fn test_wrong_type(schema: Schema, #[case] name: &str, #[case] value: Value) {
        let data = ResourceData::new()
            .with_attribute("name", json!("viewer_perms"))
            .with_attribute("permissions", json!(["see_looks"]))
            .with_attribute(name, value);
        assert!(matches!(
            schema.validate(&data),
            Err(Error::AttributeType { name: n, .. }) if n == name
        ));
    }

    #[rstest]
    fn test_undeclared_attribute(schema: Schema) {
        let data = ResourceData::new()
            .with_attribute("name", json!("viewer_perms"))
            .with_attribute("permissions", json!([]))
            .with_attribute("colour", json!("red"));
        assert!(matches!(
            schema.validate(&data),
            Err(Error::InvalidAttribute { name, .. }) if name == "colour"
        ));
    }
}
