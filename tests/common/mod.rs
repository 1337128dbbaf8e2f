use looker_provider::ResourceData;
use serde_json::Value;

pub fn permission_set_config(name: &str, permissions: &[&str]) -> ResourceData {
    ResourceData::new()
        .with_attribute("name", name)
        .with_attribute("permissions", permissions.to_vec())
}

pub fn theme_config(name: &str, settings: &[(&str, Value)]) -> ResourceData {
    settings
        .iter()
        .fold(ResourceData::new().with_attribute("name", name), |data, (k, v)| {
            data.with_attribute(k, v.clone())
        })
}

/// Reads a fresh state that only knows the id, as an import or refresh would.
pub fn state_for(data: &ResourceData) -> ResourceData {
    ResourceData::with_id(data.id().expect("resource should have an id"))
}
