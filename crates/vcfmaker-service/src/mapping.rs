//! Saved column mappings, reusable across runs.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::convert::ConvertOptions;
use crate::error::{ServiceError, ServiceResult};

/// A stored selection. Every key is optional so a partial file still
/// applies what it has.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_fields: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_labels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postfix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

impl MappingProfile {
    /// Captures a complete selection for saving.
    #[must_use]
    pub fn from_options(options: &ConvertOptions, output: &Path) -> Self {
        Self {
            name_field: Some(options.name_field.clone()),
            phone_fields: Some(options.phone_fields.clone()),
            phone_labels: options.phone_labels.clone(),
            prefix: Some(options.prefix.clone()),
            postfix: Some(options.postfix.clone()),
            output: Some(output.display().to_string()),
        }
    }

    /// Reads a profile, keeping every key that parses and dropping the rest.
    ///
    /// A missing, unreadable, or malformed file gives an empty profile.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_json(&text),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Could not read mapping file");
                Self::default()
            }
        }
    }

    /// Parses a profile key by key; see [`MappingProfile::load`].
    #[must_use]
    pub fn from_json(text: &str) -> Self {
        let object = match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(object)) => object,
            Ok(_) => {
                tracing::warn!("Mapping file is not a JSON object");
                return Self::default();
            }
            Err(e) => {
                tracing::warn!(error = %e, "Mapping file is not valid JSON");
                return Self::default();
            }
        };

        Self {
            name_field: key(&object, "name_field"),
            phone_fields: key(&object, "phone_fields"),
            phone_labels: key(&object, "phone_labels"),
            prefix: key(&object, "prefix"),
            postfix: key(&object, "postfix"),
            output: key(&object, "output"),
        }
    }

    /// ## Summary
    /// Writes the profile as pretty-printed JSON.
    ///
    /// ## Errors
    /// Returns `WriteError` if serialization or the file write fails.
    pub fn save(&self, path: &Path) -> ServiceResult<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ServiceError::write("mapping", e.into()))?;
        std::fs::write(path, json + "\n")
            .map_err(|e| ServiceError::write(path.display().to_string(), e))?;

        tracing::debug!(path = %path.display(), "Mapping saved");
        Ok(())
    }

    /// Overwrites the fields of `options` that this profile has.
    pub fn apply_to(&self, options: &mut ConvertOptions) {
        if let Some(name_field) = &self.name_field {
            options.name_field.clone_from(name_field);
        }
        if let Some(phone_fields) = &self.phone_fields {
            options.phone_fields.clone_from(phone_fields);
        }
        if let Some(phone_labels) = &self.phone_labels {
            options.phone_labels = Some(phone_labels.clone());
        }
        if let Some(prefix) = &self.prefix {
            options.prefix.clone_from(prefix);
        }
        if let Some(postfix) = &self.postfix {
            options.postfix.clone_from(postfix);
        }
    }
}

fn key<T: DeserializeOwned>(object: &Map<String, Value>, name: &str) -> Option<T> {
    let value = object.get(name)?;
    match serde_json::from_value(value.clone()) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::warn!(key = name, error = %e, "Ignoring mapping key");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_profile_applies_only_present_keys() {
        let profile = MappingProfile::from_json(r#"{"name_field": "Full Name", "postfix": "Work"}"#);
        let mut options = ConvertOptions::new("name", vec!["phone".into()]).with_prefix("Dr.");
        profile.apply_to(&mut options);

        assert_eq!(options.name_field, "Full Name");
        assert_eq!(options.postfix, "Work");
        assert_eq!(options.prefix, "Dr.");
        assert_eq!(options.phone_fields, ["phone"]);
    }

    #[test_log::test]
    fn wrongly_typed_keys_are_ignored() {
        let profile = MappingProfile::from_json(
            r#"{"name_field": 7, "phone_fields": ["Mobile", "Home"], "phone_labels": "CELL"}"#,
        );
        assert_eq!(profile.name_field, None);
        assert_eq!(
            profile.phone_fields,
            Some(vec!["Mobile".to_string(), "Home".to_string()])
        );
        assert_eq!(profile.phone_labels, None);
    }

    #[test]
    fn malformed_json_is_empty() {
        assert_eq!(MappingProfile::from_json("{not json"), MappingProfile::default());
        assert_eq!(MappingProfile::from_json("[1, 2]"), MappingProfile::default());
    }

    #[test]
    fn missing_file_is_empty() {
        let profile = MappingProfile::load(Path::new("/nonexistent/mapping.json"));
        assert_eq!(profile, MappingProfile::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("mapping.json");
        let options = ConvertOptions::new("Name", vec!["Mobile".into(), "Home".into()])
            .with_labels(vec!["CELL".into(), "HOME".into()])
            .with_postfix("Office");

        let saved = MappingProfile::from_options(&options, Path::new("out.vcf"));
        saved.save(&path).expect("save");

        let loaded = MappingProfile::load(&path);
        assert_eq!(loaded, saved);
        assert_eq!(loaded.output.as_deref(), Some("out.vcf"));

        let mut restored = ConvertOptions::default();
        loaded.apply_to(&mut restored);
        assert_eq!(restored, options);
    }
}
