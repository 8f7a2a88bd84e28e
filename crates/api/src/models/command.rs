use super::position::{TextPosition, TextRange};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

pub const OPEN_COMMAND: &str = "vscode.open";
pub const OPEN_TITLE: &str = "Go to Mapper xml";
pub const OPEN_TOOLTIP: &str = "will open specific .xml file";

pub const ADD_SECTION_COMMAND: &str = "mybatisx.open_and_add_new_section";
pub const ADD_SECTION_TITLE: &str = "Create in Mapper xml";

/// Host-agnostic command descriptor attached to a hint.
///
/// The descriptor only says what should happen; opening files and editing
/// text is left to whoever executes the command.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LensCommand {
    /// Open the XML mapper with the statement selected.
    Navigate { uri: String, selection: TextRange },
    /// Open the XML mapper and insert `skeleton` at `position`.
    Generate {
        uri: String,
        position: TextPosition,
        skeleton: String,
    },
}

impl LensCommand {
    pub fn id(&self) -> &'static str {
        match self {
            LensCommand::Navigate { .. } => OPEN_COMMAND,
            LensCommand::Generate { .. } => ADD_SECTION_COMMAND,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            LensCommand::Navigate { .. } => OPEN_TITLE,
            LensCommand::Generate { .. } => ADD_SECTION_TITLE,
        }
    }

    pub fn tooltip(&self) -> Option<&'static str> {
        match self {
            LensCommand::Navigate { .. } => Some(OPEN_TOOLTIP),
            LensCommand::Generate { .. } => None,
        }
    }

    pub fn uri(&self) -> &str {
        match self {
            LensCommand::Navigate { uri, .. } | LensCommand::Generate { uri, .. } => uri,
        }
    }

    /// Positional arguments in the shape the editor commands expect.
    pub fn arguments(&self) -> Vec<Value> {
        match self {
            LensCommand::Navigate { uri, selection } => {
                vec![json!(uri), json!({ "selection": selection })]
            }
            LensCommand::Generate {
                uri,
                position,
                skeleton,
            } => vec![json!(uri), json!(position), json!(skeleton)],
        }
    }
}

/// An inline affordance anchored to a method name.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Hint {
    pub range: TextRange,
    pub command: LensCommand,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigate_arguments() {
        let cmd = LensCommand::Navigate {
            uri: "file:///m.xml".to_string(),
            selection: TextRange::new(TextPosition::new(4, 4), TextPosition::new(6, 13)),
        };
        assert_eq!(cmd.id(), "vscode.open");
        assert_eq!(cmd.tooltip(), Some("will open specific .xml file"));
        assert_eq!(
            cmd.arguments(),
            vec![
                json!("file:///m.xml"),
                json!({
                    "selection": {
                        "start": { "line": 4, "character": 4 },
                        "end": { "line": 6, "character": 13 }
                    }
                }),
            ]
        );
    }

    #[test]
    fn test_generate_arguments() {
        let cmd = LensCommand::Generate {
            uri: "file:///m.xml".to_string(),
            position: TextPosition::new(10, 0),
            skeleton: "<sql/>".to_string(),
        };
        assert_eq!(cmd.id(), "mybatisx.open_and_add_new_section");
        assert_eq!(cmd.title(), "Create in Mapper xml");
        assert_eq!(cmd.tooltip(), None);
        let args = cmd.arguments();
        assert_eq!(args[1], json!({ "line": 10, "character": 0 }));
        assert_eq!(args[2], json!("<sql/>"));
    }
}
