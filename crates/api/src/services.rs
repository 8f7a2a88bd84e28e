use crate::error::ApiResult;
use crate::models::{ParsedJavaMapper, TextPosition, TextRange, XmlMapper};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// The editor's view of an open source file.
pub trait HostDocument: Send + Sync {
    fn uri(&self) -> &str;

    /// Local file path, when the uri has one.
    fn path(&self) -> Option<PathBuf>;

    fn text(&self) -> &str;

    /// Range of the identifier enclosing `position`, if any.
    fn word_range_at(&self, position: TextPosition) -> Option<TextRange>;
}

/// Maps a document to the workspace folder that owns it.
pub trait WorkspaceResolver: Send + Sync {
    fn workspace_folder(&self, path: &Path) -> Option<PathBuf>;
}

/// Reads file contents, letting unsaved editor buffers shadow the disk.
pub trait TextSource: Send + Sync {
    fn read(&self, path: &Path) -> Option<String>;
}

/// Java side of the correlation.
#[async_trait]
pub trait JavaMapperParser: Send + Sync {
    /// Whether the document is a mapper interface. Malformed or non-Java
    /// input yields `false`, never an error.
    async fn is_valid(&self, document: &dyn HostDocument) -> ApiResult<bool>;

    async fn parse(&self, document: &dyn HostDocument) -> ApiResult<Option<ParsedJavaMapper>>;
}

/// XML side of the correlation.
#[async_trait]
pub trait MapperXmlService: Send + Sync {
    /// Whether the document sits where the project keeps mapper classes.
    async fn is_mapper_class(
        &self,
        document: &dyn HostDocument,
        project_folder_name: &str,
    ) -> ApiResult<bool>;

    /// The XML mapper whose `namespace` is this interface, if one exists.
    async fn find_xml_mapper_by_java_mapper(
        &self,
        mapper: &ParsedJavaMapper,
    ) -> ApiResult<Option<XmlMapper>>;
}
