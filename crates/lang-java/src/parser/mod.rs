use mapperlens_api::ApiResult;
use mapperlens_core::LensConfig;
use std::sync::Arc;
use tree_sitter::{Node, Query, StreamingIterator, Tree};

mod mapper;
mod service;

use crate::queries::java_mapper::{JAVA_MAPPER_SCM, MapperIndices};
use crate::utils::node_text;

/// Tree-sitter backed reader for MyBatis mapper interfaces.
pub struct JavaParser {
    pub language: tree_sitter::Language,
    pub(crate) mapper_query: Arc<Query>,
    pub(crate) indices: MapperIndices,
    /// Simple names of accepted base interfaces; empty accepts any interface.
    pub(crate) base_interfaces: Vec<String>,
}

impl Clone for JavaParser {
    fn clone(&self) -> Self {
        Self {
            language: self.language.clone(),
            mapper_query: Arc::clone(&self.mapper_query),
            indices: self.indices.clone(),
            base_interfaces: self.base_interfaces.clone(),
        }
    }
}

/// The parts of a compilation unit a mapper is built from.
pub(crate) struct MapperUnit<'t> {
    pub package: Option<String>,
    pub interface: Node<'t>,
    pub name: String,
}

impl JavaParser {
    pub fn new(config: &LensConfig) -> ApiResult<Self> {
        let language: tree_sitter::Language = tree_sitter_java::LANGUAGE.into();

        let mapper_query = crate::utils::load_query(&language, JAVA_MAPPER_SCM)?;
        let indices = MapperIndices::new(&mapper_query)?;

        let base_interfaces = config
            .base_interfaces
            .iter()
            .map(|name| crate::utils::simple_name(name).to_string())
            .filter(|name| !name.is_empty())
            .collect();

        Ok(Self {
            language,
            mapper_query: Arc::new(mapper_query),
            indices,
            base_interfaces,
        })
    }

    pub fn parse_tree(&self, source: &str) -> Option<Tree> {
        let mut parser = tree_sitter::Parser::new();
        parser.set_language(&self.language).ok()?;
        parser.parse(source, None)
    }

    /// Package and first top-level interface of a parsed file.
    pub(crate) fn locate_mapper<'t>(&self, tree: &'t Tree, source: &str) -> Option<MapperUnit<'t>> {
        let mut package = None;
        let mut interface = None;

        let mut cursor = tree_sitter::QueryCursor::new();
        let mut matches = cursor.matches(&self.mapper_query, tree.root_node(), source.as_bytes());
        while let Some(mat) = matches.next() {
            if let Some(cap) = mat.captures.iter().find(|c| c.index == self.indices.pkg) {
                package.get_or_insert_with(|| node_text(&cap.node, source).to_string());
            } else if interface.is_none() {
                let def = mat.captures.iter().find(|c| c.index == self.indices.inter_def);
                let name = mat.captures.iter().find(|c| c.index == self.indices.inter_name);
                if let (Some(def), Some(name)) = (def, name) {
                    interface = Some((def.node, node_text(&name.node, source).to_string()));
                }
            }
        }

        let (interface, name) = interface?;
        Some(MapperUnit {
            package,
            interface,
            name,
        })
    }
}
