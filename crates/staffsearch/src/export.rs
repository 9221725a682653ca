use anyhow::{Context, Result};
use serde_json::Value;
use staffsearch_common::AppConfig;
use staffsearch_server::routes::openapi::openapi_document;
use std::path::Path;

/// Write the OpenAPI document as JSON, and as YAML when a path is given
pub fn write_openapi(
    config: &AppConfig,
    server_url: Option<&str>,
    json_path: &Path,
    yaml_path: Option<&Path>,
) -> Result<()> {
    let server_url = server_url
        .map(str::to_string)
        .unwrap_or_else(|| config.advertised_url());
    let document = openapi_document(&server_url);

    write_json(&document, json_path)?;
    println!("OpenAPI JSON saved to: {}", json_path.display());

    if let Some(yaml_path) = yaml_path {
        write_yaml(&document, yaml_path)?;
        println!("OpenAPI YAML saved to: {}", yaml_path.display());
    }

    Ok(())
}

fn write_json(document: &Value, path: &Path) -> Result<()> {
    let data = serde_json::to_string_pretty(document)?;
    std::fs::write(path, data).with_context(|| format!("failed to write {}", path.display()))
}

fn write_yaml(document: &Value, path: &Path) -> Result<()> {
    let data = serde_yaml::to_string(document)?;
    std::fs::write(path, data).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_json_and_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("openapi.json");
        let yaml_path = dir.path().join("openapi.yaml");

        write_openapi(
            &AppConfig::default(),
            Some("https://staffsearch.example.com"),
            &json_path,
            Some(&yaml_path),
        )
        .unwrap();

        let json: Value = serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(json["openapi"], "3.0.1");
        assert_eq!(json["servers"][0]["url"], "https://staffsearch.example.com");

        let yaml: Value = serde_yaml::from_str(&std::fs::read_to_string(&yaml_path).unwrap()).unwrap();
        assert_eq!(yaml, json);
    }

    #[test]
    fn test_defaults_to_advertised_url() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("openapi.json");

        let mut config = AppConfig::default();
        config.public_url = Some("https://public.example.com".to_string());
        write_openapi(&config, None, &json_path, None).unwrap();

        let json: Value = serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(json["servers"][0]["url"], "https://public.example.com");
        assert!(!dir.path().join("openapi.yaml").exists());
    }

    #[test]
    fn test_unwritable_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("missing").join("openapi.json");
        assert!(write_openapi(&AppConfig::default(), None, &json_path, None).is_err());
    }
}
