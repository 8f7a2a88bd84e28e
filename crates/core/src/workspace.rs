use mapperlens_api::WorkspaceResolver;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// The set of folders open in the editor. Shared with the LSP layer, which
/// updates it when the client adds or removes folders.
#[derive(Debug, Default)]
pub struct WorkspaceFolders {
    folders: RwLock<Vec<PathBuf>>,
}

impl WorkspaceFolders {
    pub fn new(folders: Vec<PathBuf>) -> Self {
        Self {
            folders: RwLock::new(folders),
        }
    }

    pub fn folders(&self) -> Vec<PathBuf> {
        self.folders
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn add(&self, folder: PathBuf) {
        let mut guard = self
            .folders
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if !guard.contains(&folder) {
            guard.push(folder);
        }
    }

    pub fn remove(&self, folder: &Path) {
        self.folders
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .retain(|f| f != folder);
    }
}

impl WorkspaceResolver for WorkspaceFolders {
    /// Innermost folder containing `path`.
    fn workspace_folder(&self, path: &Path) -> Option<PathBuf> {
        self.folders
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .filter(|folder| path.starts_with(folder))
            .max_by_key(|folder| folder.components().count())
            .cloned()
    }
}

/// Base name of a folder, or empty when it has none (e.g. `/`).
pub fn folder_name(folder: &Path) -> String {
    folder
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_innermost_folder_wins() {
        let folders = WorkspaceFolders::new(vec![
            PathBuf::from("/work/shop"),
            PathBuf::from("/work/shop/orders"),
        ]);
        let file = Path::new("/work/shop/orders/src/main/java/OrderMapper.java");
        assert_eq!(
            folders.workspace_folder(file),
            Some(PathBuf::from("/work/shop/orders"))
        );
        assert_eq!(folders.workspace_folder(Path::new("/elsewhere/A.java")), None);
        // Component-wise prefix, not string prefix
        assert_eq!(folders.workspace_folder(Path::new("/work/shopping/A.java")), None);
    }

    #[test]
    fn test_add_and_remove() {
        let folders = WorkspaceFolders::default();
        folders.add(PathBuf::from("/a"));
        folders.add(PathBuf::from("/a"));
        assert_eq!(folders.folders().len(), 1);
        folders.remove(Path::new("/a"));
        assert!(folders.folders().is_empty());
    }

    #[test]
    fn test_folder_name() {
        assert_eq!(folder_name(Path::new("/work/shop")), "shop");
        assert_eq!(folder_name(Path::new("/")), "");
    }
}
