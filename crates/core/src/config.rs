use mapperlens_api::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = ".mapperlens.json";

/// Project conventions used to recognise mapper classes and find their XML.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct LensConfig {
    /// Java source roots, as `/`-separated relative paths.
    pub source_roots: Vec<String>,
    /// When non-empty, a mapper interface must extend one of these
    /// (or be annotated `@Mapper`).
    pub base_interfaces: Vec<String>,
    /// Directory names never descended into when looking for XML.
    pub exclude_dirs: Vec<String>,
    /// XML files larger than this many bytes are not parsed.
    pub max_xml_file_size: u64,
}

impl Default for LensConfig {
    fn default() -> Self {
        Self {
            source_roots: vec!["src/main/java".to_string()],
            base_interfaces: Vec::new(),
            exclude_dirs: ["target", "build", "out", "node_modules", ".git"]
                .into_iter()
                .map(String::from)
                .collect(),
            max_xml_file_size: 2 * 1024 * 1024,
        }
    }
}

impl LensConfig {
    /// Reads `.mapperlens.json` from `root`, falling back to defaults when absent.
    pub fn load(root: &Path) -> ApiResult<Self> {
        let path = root.join(CONFIG_FILE_NAME);
        if !path.is_file() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)?;
        serde_json::from_str(&content)
            .map_err(|e| ApiError::InvalidArgument(format!("{}: {}", path.display(), e)))
    }

    /// Accepts LSP `initializationOptions`, either bare or nested under `mapperlens`.
    pub fn from_json(value: serde_json::Value) -> ApiResult<Self> {
        let value = match value {
            serde_json::Value::Object(mut map) if map.contains_key("mapperlens") => map
                .remove("mapperlens")
                .unwrap_or(serde_json::Value::Null),
            other => other,
        };
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(value).map_err(|e| ApiError::InvalidArgument(e.to_string()))
    }

    /// Source roots split into path components.
    pub fn source_root_components(&self) -> Vec<Vec<&str>> {
        self.source_roots
            .iter()
            .map(|root| root.split(['/', '\\']).filter(|s| !s.is_empty()).collect::<Vec<_>>())
            .filter(|parts| !parts.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partial_options_keep_defaults() {
        let config = LensConfig::from_json(json!({ "baseInterfaces": ["BaseMapper"] })).unwrap();
        assert_eq!(config.base_interfaces, vec!["BaseMapper"]);
        assert_eq!(config.source_roots, vec!["src/main/java"]);
    }

    #[test]
    fn test_nested_options() {
        let config =
            LensConfig::from_json(json!({ "mapperlens": { "sourceRoots": ["java"] } })).unwrap();
        assert_eq!(config.source_roots, vec!["java"]);
        assert_eq!(LensConfig::from_json(serde_json::Value::Null).unwrap(), LensConfig::default());
    }

    #[test]
    fn test_load_from_workspace_root() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(LensConfig::load(dir.path()).unwrap(), LensConfig::default());

        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{ "excludeDirs": ["generated"], "maxXmlFileSize": 10 }"#,
        )
        .unwrap();
        let config = LensConfig::load(dir.path()).unwrap();
        assert_eq!(config.exclude_dirs, vec!["generated"]);
        assert_eq!(config.max_xml_file_size, 10);

        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "{ not json").unwrap();
        assert!(LensConfig::load(dir.path()).is_err());
    }

    #[test]
    fn test_source_root_components() {
        let config = LensConfig {
            source_roots: vec!["src/main/java".into(), "/".into(), "app\\src".into()],
            ..LensConfig::default()
        };
        assert_eq!(
            config.source_root_components(),
            vec![vec!["src", "main", "java"], vec!["app", "src"]]
        );
    }
}
