use crate::util::to_code_lens;
use crate::LspServer;
use tower_lsp::jsonrpc::{Error, Result};
use tower_lsp::lsp_types::*;

pub async fn code_lens(server: &LspServer, params: CodeLensParams) -> Result<Option<Vec<CodeLens>>> {
    let uri = params.text_document.uri;

    let doc = match server.documents.get(&uri) {
        Some(d) => d.clone(),
        None => return Ok(None),
    };

    // Clone out so the lock is not held across the computation
    let correlator = match server.correlator.read().await.as_ref() {
        Some(c) => c.clone(),
        None => return Ok(None),
    };

    let hints = correlator.compute_hints(&doc.source).await.map_err(|e| {
        tracing::error!("Code lens failed for {}: {}", uri, e);
        let mut err = Error::internal_error();
        err.message = e.to_string().into();
        err
    })?;

    Ok(Some(hints.iter().map(to_code_lens).collect()))
}
