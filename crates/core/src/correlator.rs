use crate::action::resolve_action;
use crate::workspace::folder_name;
use mapperlens_api::{
    ApiResult, Hint, HostDocument, JavaMapperParser, MapperXmlService, WorkspaceResolver,
};
use std::sync::Arc;

/// Links the methods of a Java mapper interface to statements in its XML
/// mapper and produces one hint per method.
///
/// Every call is independent: nothing is cached between calls and no state is
/// shared, so concurrent requests for the same document are safe and a stale
/// result can simply be dropped by the caller.
#[derive(Clone)]
pub struct MapperCorrelator {
    java: Arc<dyn JavaMapperParser>,
    xml: Arc<dyn MapperXmlService>,
    workspace: Arc<dyn WorkspaceResolver>,
}

impl MapperCorrelator {
    pub fn new(
        java: Arc<dyn JavaMapperParser>,
        xml: Arc<dyn MapperXmlService>,
        workspace: Arc<dyn WorkspaceResolver>,
    ) -> Self {
        Self {
            java,
            xml,
            workspace,
        }
    }

    /// Hints for `document`, in method order.
    ///
    /// Documents that are not mappers, mappers without XML and methods whose
    /// name cannot be located all yield fewer (or no) hints rather than errors.
    /// Errors from the underlying services are passed through.
    pub async fn compute_hints(&self, document: &dyn HostDocument) -> ApiResult<Vec<Hint>> {
        if !self.java.is_valid(document).await? {
            tracing::trace!("{} is not a mapper interface", document.uri());
            return Ok(Vec::new());
        }

        let project_folder = document
            .path()
            .and_then(|path| self.workspace.workspace_folder(&path))
            .map(|folder| folder_name(&folder))
            .unwrap_or_default();

        if !self.xml.is_mapper_class(document, &project_folder).await? {
            tracing::debug!(
                "{} is not a mapper class of project '{}'",
                document.uri(),
                project_folder
            );
            return Ok(Vec::new());
        }

        let Some(java_mapper) = self.java.parse(document).await? else {
            return Ok(Vec::new());
        };

        if java_mapper.methods.is_empty() {
            return Ok(Vec::new());
        }

        // One lookup per call; the answer depends only on the parsed mapper
        let Some(xml) = self.xml.find_xml_mapper_by_java_mapper(&java_mapper).await? else {
            tracing::trace!("No XML mapper for {}", java_mapper.qualified_name());
            return Ok(Vec::new());
        };

        let mut hints = Vec::with_capacity(java_mapper.methods.len());

        for method in &java_mapper.methods {
            let Some(range) = document.word_range_at(method.start_position) else {
                tracing::trace!("No word at {:?} for method {}", method.start_position, method.name);
                continue;
            };

            hints.push(Hint {
                range,
                command: resolve_action(&xml, method),
            });
        }

        tracing::debug!("{} hints for {}", hints.len(), document.uri());
        Ok(hints)
    }
}
