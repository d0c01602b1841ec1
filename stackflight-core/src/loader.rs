//! Template and parameter file loading.

use crate::error::{FlightError, Result};
use crate::provider::StackProvider;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Read a template body and validate it against the provider.
///
/// Runs before any worker is spawned; an unreadable or invalid template is a
/// fatal configuration error.
pub async fn load_template(provider: &dyn StackProvider, path: &Path) -> Result<String> {
    let template_body = std::fs::read_to_string(path)
        .map_err(|source| FlightError::FileRead { path: path.to_path_buf(), source })?;
    provider.validate_template(&template_body).await?;
    Ok(template_body)
}

/// Accepted parameter file shapes: a flat `{"Key": "Value"}` object or the
/// provider-native `[{"ParameterKey": ..., "ParameterValue": ...}]` list.
#[derive(Deserialize)]
#[serde(untagged)]
enum ParameterFile {
    Map(BTreeMap<String, String>),
    List(Vec<ParameterEntry>),
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ParameterEntry {
    parameter_key: String,
    parameter_value: String,
}

/// Load template parameters from a JSON file.
pub fn load_parameters(path: &Path) -> Result<BTreeMap<String, String>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|source| FlightError::FileRead { path: path.to_path_buf(), source })?;

    let parsed: ParameterFile = serde_json::from_str(&raw).map_err(|err| {
        FlightError::InvalidParameters { path: path.to_path_buf(), reason: err.to_string() }
    })?;

    Ok(match parsed {
        ParameterFile::Map(map) => map,
        ParameterFile::List(entries) => entries
            .into_iter()
            .map(|entry| (entry.parameter_key, entry.parameter_value))
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(contents.as_bytes()).expect("Failed to write temp file");
        file
    }

    #[test]
    fn test_load_parameters_flat_object() {
        let file = write_file(r#"{"Env": "test", "InstanceType": "t3.micro"}"#);
        let params = load_parameters(file.path()).unwrap();
        assert_eq!(params.get("Env").map(String::as_str), Some("test"));
        assert_eq!(params.get("InstanceType").map(String::as_str), Some("t3.micro"));
    }

    #[test]
    fn test_load_parameters_provider_list() {
        let file = write_file(
            r#"[
                {"ParameterKey": "Env", "ParameterValue": "test"},
                {"ParameterKey": "InstanceType", "ParameterValue": "t3.micro"}
            ]"#,
        );
        let params = load_parameters(file.path()).unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("Env").map(String::as_str), Some("test"));
    }

    #[test]
    fn test_load_parameters_invalid_json() {
        let file = write_file("not json");
        let err = load_parameters(file.path()).unwrap_err();
        assert!(matches!(err, FlightError::InvalidParameters { .. }));
    }

    #[test]
    fn test_load_parameters_missing_file() {
        let err = load_parameters(Path::new("/nonexistent/params.json")).unwrap_err();
        assert!(matches!(err, FlightError::FileRead { .. }));
    }
}
