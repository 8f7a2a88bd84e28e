use crate::parser::parse_mapper_xml;
use crate::scanner::find_xml_files;
use async_trait::async_trait;
use mapperlens_api::{
    ApiError, ApiResult, HostDocument, MapperXmlService, ParsedJavaMapper, TextSource,
    WorkspaceResolver, XmlMapper,
};
use mapperlens_core::LensConfig;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Finds mapper XML files on disk (or in open buffers) and matches them to
/// Java mappers by `namespace`.
pub struct MybatisXmlService {
    config: Arc<LensConfig>,
    workspace: Arc<dyn WorkspaceResolver>,
    source: Arc<dyn TextSource>,
}

impl MybatisXmlService {
    pub fn new(
        config: Arc<LensConfig>,
        workspace: Arc<dyn WorkspaceResolver>,
        source: Arc<dyn TextSource>,
    ) -> Self {
        Self {
            config,
            workspace,
            source,
        }
    }

    /// Directory searched for the XML of a Java file: its workspace folder,
    /// or else the project directory in front of its source root.
    pub fn search_root(&self, java_path: &Path) -> Option<PathBuf> {
        if let Some(folder) = self.workspace.workspace_folder(java_path) {
            return Some(folder);
        }
        let components = normal_components(java_path);
        let start = find_source_root(&components, &self.config)?;
        let mut root = PathBuf::new();
        let mut seen = 0;
        for component in java_path.components() {
            if let Component::Normal(_) = component {
                if seen == start {
                    break;
                }
                seen += 1;
            }
            root.push(component);
        }
        if root.as_os_str().is_empty() {
            return None;
        }
        Some(root)
    }

    /// Whether `path` follows the `<project>/.../<source root>/...` layout.
    pub fn is_mapper_path(&self, path: &Path, project_folder_name: &str) -> bool {
        if path.extension().is_none_or(|ext| ext != "java") {
            return false;
        }
        let components = normal_components(path);
        let Some(start) = find_source_root(&components, &self.config) else {
            return false;
        };
        project_folder_name.is_empty()
            || components[..start]
                .iter()
                .any(|name| name == project_folder_name)
    }
}

fn normal_components(path: &Path) -> Vec<String> {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}

/// Index of the first component where any configured source root begins.
/// The file name itself never counts.
fn find_source_root(components: &[String], config: &LensConfig) -> Option<usize> {
    let dirs = &components[..components.len().saturating_sub(1)];
    let roots = config.source_root_components();
    (0..dirs.len()).find_map(|start| {
        roots.iter().find_map(|root| {
            let end = start + root.len();
            let matches = end <= dirs.len()
                && dirs[start..end].iter().zip(root).all(|(a, b)| a == b);
            matches.then_some(start)
        })
    })
}

fn scan_for_namespace(
    root: &Path,
    namespace: &str,
    config: &LensConfig,
    source: &dyn TextSource,
) -> Option<XmlMapper> {
    for path in find_xml_files(root, config) {
        let Some(text) = source.read(&path) else {
            tracing::debug!("Unreadable XML file {}", path.display());
            continue;
        };
        if !text.contains("<mapper") || !text.contains(namespace) {
            continue;
        }
        let Ok(uri) = url::Url::from_file_path(&path) else {
            continue;
        };
        match parse_mapper_xml(uri.as_str(), &text) {
            Ok(Some(mapper)) if mapper.namespace == namespace => return Some(mapper),
            Ok(_) => {}
            Err(e) => tracing::debug!("Skipping malformed mapper XML: {}", e),
        }
    }
    None
}

#[async_trait]
impl MapperXmlService for MybatisXmlService {
    async fn is_mapper_class(
        &self,
        document: &dyn HostDocument,
        project_folder_name: &str,
    ) -> ApiResult<bool> {
        Ok(document
            .path()
            .is_some_and(|path| self.is_mapper_path(&path, project_folder_name)))
    }

    async fn find_xml_mapper_by_java_mapper(
        &self,
        mapper: &ParsedJavaMapper,
    ) -> ApiResult<Option<XmlMapper>> {
        let Some(java_path) = url::Url::parse(&mapper.uri)
            .ok()
            .and_then(|uri| uri.to_file_path().ok())
        else {
            return Ok(None);
        };
        let Some(root) = self.search_root(&java_path) else {
            return Ok(None);
        };

        let namespace = mapper.qualified_name();
        let config = Arc::clone(&self.config);
        let source = Arc::clone(&self.source);
        let found = tokio::task::spawn_blocking(move || {
            scan_for_namespace(&root, &namespace, &config, source.as_ref())
        })
        .await
        .map_err(|e| ApiError::Internal(format!("XML scan failed: {}", e)))?;

        if let Some(xml) = &found {
            tracing::debug!("{} -> {}", mapper.qualified_name(), xml.uri);
        }
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::FsTextSource;
    use mapperlens_core::WorkspaceFolders;

    fn service(folders: Vec<PathBuf>) -> MybatisXmlService {
        MybatisXmlService::new(
            Arc::new(LensConfig::default()),
            Arc::new(WorkspaceFolders::new(folders)),
            Arc::new(FsTextSource),
        )
    }

    #[test]
    fn test_mapper_path_convention() {
        let svc = service(vec![]);
        let path = Path::new("/work/shop/orders/src/main/java/com/shop/OrderMapper.java");

        assert!(svc.is_mapper_path(path, ""));
        assert!(svc.is_mapper_path(path, "shop"));
        assert!(svc.is_mapper_path(path, "orders"));
        assert!(!svc.is_mapper_path(path, "billing"));
        // The folder must come before the source root
        assert!(!svc.is_mapper_path(path, "com"));

        assert!(!svc.is_mapper_path(Path::new("/work/shop/src/test/java/A.java"), ""));
        assert!(!svc.is_mapper_path(Path::new("/work/shop/src/main/java/A.kt"), ""));
        assert!(!svc.is_mapper_path(Path::new("/work/shop/src/main/java.java"), ""));
    }

    #[test]
    fn test_search_root_prefers_workspace_folder() {
        let java = Path::new("/work/shop/orders/src/main/java/com/shop/OrderMapper.java");

        let svc = service(vec![PathBuf::from("/work/shop")]);
        assert_eq!(svc.search_root(java), Some(PathBuf::from("/work/shop")));

        let svc = service(vec![]);
        assert_eq!(svc.search_root(java), Some(PathBuf::from("/work/shop/orders")));
        assert_eq!(svc.search_root(Path::new("/tmp/Scratch.java")), None);
    }
}
