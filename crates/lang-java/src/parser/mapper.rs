use super::{JavaParser, MapperUnit};
use crate::constants::*;
use crate::utils::{child_of_kind, node_text, simple_name};
use mapperlens_api::{MapperMethod, ParsedJavaMapper};
use mapperlens_core::LineIndex;
use tree_sitter::Node;

impl JavaParser {
    /// A syntactically clean file declaring a top-level interface that meets
    /// the configured base-interface contract.
    pub fn is_valid_source(&self, source: &str) -> bool {
        let Some(tree) = self.parse_tree(source) else {
            return false;
        };
        if tree.root_node().has_error() {
            return false;
        }
        let Some(unit) = self.locate_mapper(&tree, source) else {
            return false;
        };
        self.meets_contract(&unit.interface, source)
    }

    pub fn parse_source(&self, uri: &str, source: &str) -> Option<ParsedJavaMapper> {
        let tree = self.parse_tree(source)?;
        let MapperUnit {
            package,
            interface,
            name,
        } = self.locate_mapper(&tree, source)?;

        let index = LineIndex::new(source);
        let body = interface.child_by_field_name(FIELD_BODY)?;
        let mut cursor = body.walk();
        let methods = body
            .named_children(&mut cursor)
            .filter(|member| member.kind() == KIND_METHOD)
            .filter(|method| is_xml_candidate(method, source))
            .filter_map(|method| {
                let name_node = method.child_by_field_name(FIELD_NAME)?;
                Some(MapperMethod {
                    name: node_text(&name_node, source).to_string(),
                    start_position: index.position_at(source, name_node.start_byte()),
                })
            })
            .collect();

        Some(ParsedJavaMapper {
            uri: uri.to_string(),
            package,
            name,
            methods,
        })
    }

    fn meets_contract(&self, interface: &Node, source: &str) -> bool {
        if self.base_interfaces.is_empty() {
            return true;
        }
        if annotation_names(interface, source).contains(&MAPPER_ANNOTATION) {
            return true;
        }
        extended_interfaces(interface, source)
            .iter()
            .any(|ext| self.base_interfaces.iter().any(|base| base == ext))
    }
}

/// Abstract methods not already bound to SQL by an annotation.
fn is_xml_candidate(method: &Node, source: &str) -> bool {
    if method.child_by_field_name(FIELD_BODY).is_some() {
        return false;
    }
    !annotation_names(method, source)
        .iter()
        .any(|name| STATEMENT_ANNOTATIONS.contains(name))
}

/// Simple names of the annotations in a declaration's modifiers.
fn annotation_names<'a>(decl: &Node, source: &'a str) -> Vec<&'a str> {
    let mut names = Vec::new();
    if let Some(modifiers) = child_of_kind(decl, KIND_MODIFIERS) {
        let mut cursor = modifiers.walk();
        for child in modifiers.named_children(&mut cursor) {
            if child.kind() == KIND_MARKER_ANNOTATION || child.kind() == KIND_ANNOTATION {
                if let Some(name) = child.child_by_field_name(FIELD_NAME) {
                    names.push(simple_name(node_text(&name, source)));
                }
            }
        }
    }
    names
}

fn extended_interfaces<'a>(interface: &Node, source: &'a str) -> Vec<&'a str> {
    let Some(type_list) = child_of_kind(interface, KIND_EXTENDS_INTERFACES)
        .and_then(|ext| child_of_kind(&ext, KIND_TYPE_LIST))
    else {
        return Vec::new();
    };
    let mut cursor = type_list.walk();
    type_list
        .named_children(&mut cursor)
        .map(|ty| simple_name(node_text(&ty, source)))
        .collect()
}
