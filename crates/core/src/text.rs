use mapperlens_api::{HostDocument, TextPosition, TextRange};
use std::path::PathBuf;

/// Byte offsets of line starts, for converting between byte offsets and
/// UTF-16 line/character positions.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(text.match_indices('\n').map(|(i, _)| i + 1));
        Self { line_starts }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    pub fn position_at(&self, text: &str, offset: usize) -> TextPosition {
        let mut offset = offset.min(text.len());
        while !text.is_char_boundary(offset) {
            offset -= 1;
        }
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let start = self.line_starts[line];
        let character = text[start..offset].encode_utf16().count();
        TextPosition::new(line as u32, character as u32)
    }

    /// Byte offset of `position`. Columns past the end of a line clamp to the
    /// line end; lines past the end of the text clamp to the text end.
    pub fn offset_at(&self, text: &str, position: TextPosition) -> usize {
        let (start, end) = match self.line_bounds(text, position.line as usize) {
            Some(bounds) => bounds,
            None => return text.len(),
        };

        let mut offset = start;
        let mut utf16_count = 0;
        for c in text[start..end].chars() {
            if utf16_count >= position.character as usize {
                break;
            }
            utf16_count += c.len_utf16();
            offset += c.len_utf8();
        }
        offset
    }

    /// Byte bounds of a line, without its terminator.
    pub fn line_bounds(&self, text: &str, line: usize) -> Option<(usize, usize)> {
        let start = *self.line_starts.get(line)?;
        let mut end = self
            .line_starts
            .get(line + 1)
            .map(|next| next - 1)
            .unwrap_or(text.len());
        if end > start && text.as_bytes()[end - 1] == b'\r' {
            end -= 1;
        }
        Some((start, end))
    }

    pub fn range_of(&self, text: &str, start: usize, end: usize) -> TextRange {
        TextRange::new(self.position_at(text, start), self.position_at(text, end))
    }
}

fn is_ident(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Range of the identifier touching `position`, including when the position
/// sits just past its last character.
pub fn word_range_at(text: &str, index: &LineIndex, position: TextPosition) -> Option<TextRange> {
    let (line_start, line_end) = index.line_bounds(text, position.line as usize)?;
    let offset = index.offset_at(text, position);
    let line = &text[line_start..line_end];
    let col = offset - line_start;

    let start = line[..col]
        .rfind(|c| !is_ident(c))
        .map(|i| i + line[i..].chars().next().map_or(1, char::len_utf8))
        .unwrap_or(0);
    let end = line[col..]
        .find(|c| !is_ident(c))
        .map(|i| i + col)
        .unwrap_or(line.len());

    if start < end {
        Some(index.range_of(text, line_start + start, line_start + end))
    } else {
        None
    }
}

/// An in-memory document addressed by uri.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    uri: String,
    text: String,
    index: LineIndex,
}

impl SourceDocument {
    pub fn new(uri: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let index = LineIndex::new(&text);
        Self {
            uri: uri.into(),
            text,
            index,
        }
    }

    /// Reads a file from disk and addresses it by its `file://` uri.
    pub fn from_path(path: &std::path::Path) -> std::io::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let uri = url::Url::from_file_path(path)
            .map(|u| u.to_string())
            .map_err(|_| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("not an absolute path: {}", path.display()),
                )
            })?;
        Ok(Self::new(uri, text))
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.index
    }
}

impl HostDocument for SourceDocument {
    fn uri(&self) -> &str {
        &self.uri
    }

    fn path(&self) -> Option<PathBuf> {
        url::Url::parse(&self.uri).ok()?.to_file_path().ok()
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn word_range_at(&self, position: TextPosition) -> Option<TextRange> {
        word_range_at(&self.text, &self.index, position)
    }
}
