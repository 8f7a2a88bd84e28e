use dashmap::DashMap;
use mapperlens_api::{Hint, HostDocument, LensCommand, TextPosition, TextRange, TextSource};
use mapperlens_core::SourceDocument;
use std::path::Path;
use std::sync::Arc;
use tower_lsp::lsp_types::{
    CodeLens, Command, Position, Range, TextDocumentContentChangeEvent, Url,
};

/// Lightweight container for document state
pub struct Document {
    pub source: SourceDocument,
    pub version: i32,
}

impl Document {
    pub fn new(uri: &Url, content: String, version: i32) -> Self {
        Self {
            source: SourceDocument::new(uri.as_str(), content),
            version,
        }
    }
}

pub fn is_xml_uri(uri: &Url) -> bool {
    uri.path().ends_with(".xml")
}

/// Applies `didChange` events in order; a change without a range replaces everything.
pub fn apply_changes(doc: &SourceDocument, changes: Vec<TextDocumentContentChangeEvent>) -> String {
    let mut content = doc.text().to_string();
    for change in changes {
        match change.range {
            Some(range) => {
                let index = mapperlens_core::LineIndex::new(&content);
                let start = index.offset_at(&content, from_lsp_position(range.start));
                let end = index.offset_at(&content, from_lsp_position(range.end));
                content.replace_range(start..end.max(start), &change.text);
            }
            None => content = change.text,
        }
    }
    content
}

/// Open documents as a text source: editor buffers win over disk.
pub struct OpenDocuments {
    documents: Arc<DashMap<Url, Arc<Document>>>,
}

impl OpenDocuments {
    pub fn new(documents: Arc<DashMap<Url, Arc<Document>>>) -> Self {
        Self { documents }
    }
}

impl TextSource for OpenDocuments {
    fn read(&self, path: &Path) -> Option<String> {
        if let Ok(uri) = Url::from_file_path(path) {
            if let Some(doc) = self.documents.get(&uri) {
                return Some(doc.source.text().to_string());
            }
        }
        mapperlens_runtime::FsTextSource.read(path)
    }
}

pub fn to_lsp_position(pos: TextPosition) -> Position {
    Position::new(pos.line, pos.character)
}

pub fn from_lsp_position(pos: Position) -> TextPosition {
    TextPosition::new(pos.line, pos.character)
}

pub fn to_lsp_range(range: TextRange) -> Range {
    Range::new(to_lsp_position(range.start), to_lsp_position(range.end))
}

/// LSP commands have no tooltip, so only id, title and arguments carry over.
pub fn to_lsp_command(command: &LensCommand) -> Command {
    Command {
        title: command.title().to_string(),
        command: command.id().to_string(),
        arguments: Some(command.arguments()),
    }
}

pub fn to_code_lens(hint: &Hint) -> CodeLens {
    CodeLens {
        range: to_lsp_range(hint.range),
        command: Some(to_lsp_command(&hint.command)),
        data: None,
    }
}

/// Where the cursor goes after inserting a statement skeleton at `at`: the
/// end of its blank body line.
pub fn cursor_in_section(at: Position, skeleton: &str) -> Position {
    match skeleton.split('\n').nth(2) {
        Some(body) => Position::new(at.line + 2, body.encode_utf16().count() as u32),
        None => at,
    }
}
