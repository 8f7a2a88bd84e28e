use super::JavaParser;
use async_trait::async_trait;
use mapperlens_api::{ApiResult, HostDocument, JavaMapperParser, ParsedJavaMapper};

fn is_java_document(document: &dyn HostDocument) -> bool {
    match document.path() {
        Some(path) => path.extension().is_some_and(|ext| ext == "java"),
        // Unsaved buffers have no path; let the grammar decide
        None => true,
    }
}

#[async_trait]
impl JavaMapperParser for JavaParser {
    async fn is_valid(&self, document: &dyn HostDocument) -> ApiResult<bool> {
        Ok(is_java_document(document) && self.is_valid_source(document.text()))
    }

    async fn parse(&self, document: &dyn HostDocument) -> ApiResult<Option<ParsedJavaMapper>> {
        if !is_java_document(document) {
            return Ok(None);
        }
        let parsed = self.parse_source(document.uri(), document.text());
        if let Some(mapper) = &parsed {
            tracing::trace!(
                "Parsed {} with {} methods",
                mapper.qualified_name(),
                mapper.methods.len()
            );
        }
        Ok(parsed)
    }
}
