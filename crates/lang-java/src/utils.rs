use mapperlens_api::{ApiError, ApiResult};
use tree_sitter::{Language, Node, Query};

/// Loads a Tree-sitter query from an SCM string.
pub fn load_query(language: &Language, scm: &str) -> ApiResult<Query> {
    Query::new(language, scm).map_err(|e| ApiError::Parse(format!("Invalid query: {:?}", e)))
}

/// Gets the index of a capture name in a query.
pub fn get_capture_index(query: &Query, name: &str) -> ApiResult<u32> {
    query
        .capture_index_for_name(name)
        .ok_or_else(|| ApiError::Parse(format!("Capture name '{}' not found in SCM", name)))
}

/// Macro to define a struct for capture indices and a `new` method to initialize it from a query.
#[macro_export]
macro_rules! decl_indices {
    ($name:ident, { $($field:ident => $capture:expr),+ $(,)? }) => {
        #[derive(Debug, Clone)]
        pub struct $name {
            $(pub $field: u32,)+
        }

        impl $name {
            pub fn new(query: &tree_sitter::Query) -> mapperlens_api::ApiResult<Self> {
                Ok(Self {
                    $($field: $crate::utils::get_capture_index(query, $capture)?,)+
                })
            }
        }
    };
}

pub fn node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    node.utf8_text(source.as_bytes()).unwrap_or_default()
}

/// First direct child of the given kind (for children without a field name).
pub fn child_of_kind<'t>(node: &Node<'t>, kind: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).find(|c| c.kind() == kind)
}

/// Last segment of a dotted name, with any type arguments dropped.
pub fn simple_name(name: &str) -> &str {
    let name = name.split('<').next().unwrap_or(name).trim();
    name.rsplit('.').next().unwrap_or(name).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_name() {
        assert_eq!(simple_name("BaseMapper<User>"), "BaseMapper");
        assert_eq!(simple_name("com.example.BaseMapper<User, Long>"), "BaseMapper");
        assert_eq!(simple_name("Mapper"), "Mapper");
    }
}
