mod logging;

use mapperlens_api::{ApiResult, TextSource};
use mapperlens_core::{LensConfig, MapperCorrelator, WorkspaceFolders};
use std::sync::Arc;

/// Assembles a correlator from the tree-sitter Java parser and the
/// file-system XML mapper service.
///
/// `source` decides where XML text comes from; the LSP server passes one
/// that prefers open editor buffers.
pub fn build_correlator(
    config: LensConfig,
    folders: Arc<WorkspaceFolders>,
    source: Arc<dyn TextSource>,
) -> ApiResult<MapperCorrelator> {
    let config = Arc::new(config);
    let java = Arc::new(mapperlens_java::JavaParser::new(&config)?);
    let xml = Arc::new(mapperlens_xml::MybatisXmlService::new(
        Arc::clone(&config),
        folders.clone(),
        source,
    ));
    tracing::debug!(
        "Correlator ready (source roots: {:?}, base interfaces: {:?})",
        config.source_roots,
        config.base_interfaces
    );
    Ok(MapperCorrelator::new(java, xml, folders))
}

/// Correlator reading everything from disk.
pub fn build_default_correlator(
    config: LensConfig,
    folders: Arc<WorkspaceFolders>,
) -> ApiResult<MapperCorrelator> {
    build_correlator(config, folders, Arc::new(mapperlens_xml::FsTextSource))
}

pub use logging::{LogSink, init_logging, log_dir};
pub use mapperlens_xml::FsTextSource;
