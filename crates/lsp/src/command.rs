use crate::util::cursor_in_section;
use crate::LspServer;
use mapperlens_api::models::command::ADD_SECTION_COMMAND;
use serde_json::Value;
use std::collections::HashMap;
use tower_lsp::jsonrpc::{Error, Result};
use tower_lsp::lsp_types::*;

pub async fn execute_command(
    server: &LspServer,
    params: ExecuteCommandParams,
) -> Result<Option<Value>> {
    match params.command.as_str() {
        ADD_SECTION_COMMAND => add_section(server, params.arguments).await,
        other => Err(Error::invalid_params(format!("Unknown command: {}", other))),
    }
}

/// Arguments of the add-section command: `[uri, position, text]`.
pub fn parse_add_section_args(arguments: Vec<Value>) -> Result<(Url, Position, String)> {
    let [uri, position, text]: [Value; 3] = arguments
        .try_into()
        .map_err(|_| Error::invalid_params("expected [uri, position, text]"))?;
    let invalid = |e: serde_json::Error| Error::invalid_params(e.to_string());
    Ok((
        serde_json::from_value(uri).map_err(invalid)?,
        serde_json::from_value(position).map_err(invalid)?,
        serde_json::from_value(text).map_err(invalid)?,
    ))
}

/// Inserts a statement skeleton into the XML mapper and reveals it.
async fn add_section(server: &LspServer, arguments: Vec<Value>) -> Result<Option<Value>> {
    let (uri, position, text) = parse_add_section_args(arguments)?;

    let edit = WorkspaceEdit {
        changes: Some(HashMap::from([(
            uri.clone(),
            vec![TextEdit {
                range: Range::new(position, position),
                new_text: text.clone(),
            }],
        )])),
        ..Default::default()
    };

    let response = server.client.apply_edit(edit).await?;
    if !response.applied {
        let reason = response.failure_reason.unwrap_or_default();
        tracing::warn!("Client rejected edit to {}: {}", uri, reason);
        server
            .client
            .log_message(
                MessageType::WARNING,
                format!("Could not add section to {}: {}", uri, reason),
            )
            .await;
        return Ok(None);
    }

    let cursor = cursor_in_section(position, &text);
    let shown = server
        .client
        .show_document(ShowDocumentParams {
            uri,
            external: Some(false),
            take_focus: Some(true),
            selection: Some(Range::new(cursor, cursor)),
        })
        .await
        .unwrap_or(false);

    Ok(Some(Value::Bool(shown)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_add_section_args() {
        let (uri, position, text) = parse_add_section_args(vec![
            json!("file:///work/UserMapper.xml"),
            json!({ "line": 12, "character": 0 }),
            json!("\n    <sql id=\"x\">\n          \n    </sql>\n\n"),
        ])
        .unwrap();
        assert_eq!(uri.path(), "/work/UserMapper.xml");
        assert_eq!(position, Position::new(12, 0));
        assert!(text.contains("<sql id=\"x\">"));
    }

    #[test]
    fn test_parse_add_section_args_rejects_bad_shape() {
        assert!(parse_add_section_args(vec![json!("file:///a.xml")]).is_err());
        assert!(parse_add_section_args(vec![
            json!("file:///a.xml"),
            json!("not a position"),
            json!("text"),
        ])
        .is_err());
    }
}
