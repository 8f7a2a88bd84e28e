use ignore::WalkBuilder;
use mapperlens_api::TextSource;
use mapperlens_core::LensConfig;
use std::path::{Path, PathBuf};

/// Reads straight from disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsTextSource;

impl TextSource for FsTextSource {
    fn read(&self, path: &Path) -> Option<String> {
        std::fs::read_to_string(path).ok()
    }
}

/// All `.xml` files under `root`, in a stable order.
///
/// Honors `.gitignore` and skips hidden entries, the configured excluded
/// directories, and files above the configured size.
pub fn find_xml_files(root: &Path, config: &LensConfig) -> Vec<PathBuf> {
    let exclude = config.exclude_dirs.clone();
    let max_size = config.max_xml_file_size;

    WalkBuilder::new(root)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(move |entry| {
            let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
            !(is_dir && exclude.iter().any(|name| entry.file_name() == name.as_str()))
        })
        .build()
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();
            if !entry.file_type()?.is_file() || path.extension()? != "xml" {
                return None;
            }
            let size = entry.metadata().ok()?.len();
            if size > max_size {
                tracing::debug!("Skipping {} ({} bytes)", path.display(), size);
                return None;
            }
            Some(path.to_path_buf())
        })
        .collect()
}
