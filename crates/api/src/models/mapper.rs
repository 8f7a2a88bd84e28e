use super::position::TextPosition;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One abstract method of a Java mapper interface.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MapperMethod {
    pub name: String,
    /// Start of the method name identifier.
    pub start_position: TextPosition,
}

/// Structured view of a Java mapper interface, produced fresh per request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ParsedJavaMapper {
    pub uri: String,
    pub package: Option<String>,
    pub name: String,
    /// Parse order is preserved; names are not required to be unique.
    pub methods: Vec<MapperMethod>,
}

impl ParsedJavaMapper {
    /// The fully qualified interface name, which MyBatis uses as the XML `namespace`.
    pub fn qualified_name(&self) -> String {
        match &self.package {
            Some(pkg) if !pkg.is_empty() => format!("{}.{}", pkg, self.name),
            _ => self.name.clone(),
        }
    }
}

/// Statement element names in a MyBatis mapper XML.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SqlTag {
    Select,
    Insert,
    Delete,
    Update,
    Sql,
}

impl SqlTag {
    pub const ALL: [SqlTag; 5] = [
        SqlTag::Select,
        SqlTag::Insert,
        SqlTag::Delete,
        SqlTag::Update,
        SqlTag::Sql,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SqlTag::Select => "select",
            SqlTag::Insert => "insert",
            SqlTag::Delete => "delete",
            SqlTag::Update => "update",
            SqlTag::Sql => "sql",
        }
    }

    pub fn from_element_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.as_str() == name)
    }
}

impl fmt::Display for SqlTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `<select|insert|update|delete|sql>` element; `name` is its `id`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct XmlStatement {
    pub name: String,
    pub kind: SqlTag,
    pub start_position: TextPosition,
    pub end_position: TextPosition,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct XmlMapper {
    pub uri: String,
    pub namespace: String,
    /// Statements in document order.
    pub methods: Vec<XmlStatement>,
    /// Where new statement blocks are inserted: the start of `</mapper>`.
    pub available_insert_position: TextPosition,
}

impl XmlMapper {
    /// First statement with exactly this id. Later duplicates are unreachable.
    pub fn find_statement(&self, name: &str) -> Option<&XmlStatement> {
        self.methods.iter().find(|m| m.name == name)
    }
}
