use mapperlens_api::{ApiError, ApiResult, SqlTag, XmlMapper, XmlStatement};
use mapperlens_core::LineIndex;

pub const MAPPER_ELEMENT: &str = "mapper";

/// Reads the statements of a MyBatis mapper XML.
///
/// Returns `Ok(None)` for well-formed XML that is not a mapper (other root
/// element, or no `namespace`), and an error for malformed XML.
pub fn parse_mapper_xml(uri: &str, text: &str) -> ApiResult<Option<XmlMapper>> {
    // Mapper files carry a DOCTYPE; it is read but never resolved
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    let doc = roxmltree::Document::parse_with_options(text, options)
        .map_err(|e| ApiError::Parse(format!("{}: {}", uri, e)))?;

    let root = doc.root_element();
    if root.tag_name().name() != MAPPER_ELEMENT {
        return Ok(None);
    }
    let Some(namespace) = root
        .attribute("namespace")
        .map(str::trim)
        .filter(|ns| !ns.is_empty())
    else {
        return Ok(None);
    };

    let index = LineIndex::new(text);
    let methods = root
        .children()
        .filter(|n| n.is_element())
        .filter_map(|node| {
            let kind = SqlTag::from_element_name(node.tag_name().name())?;
            let id = node.attribute("id")?;
            let range = node.range();
            Some(XmlStatement {
                name: id.to_string(),
                kind,
                start_position: index.position_at(text, range.start),
                end_position: index.position_at(text, range.end),
            })
        })
        .collect();

    Ok(Some(XmlMapper {
        uri: uri.to_string(),
        namespace: namespace.to_string(),
        methods,
        available_insert_position: index.position_at(text, insert_offset(text, root.range())),
    }))
}

/// Start of the closing root tag; a self-closing root has none, so its end is used.
fn insert_offset(text: &str, root: std::ops::Range<usize>) -> usize {
    let element = &text[root.clone()];
    if element.ends_with("/>") && !element.contains("</") {
        return root.end;
    }
    element
        .rfind("</")
        .map(|i| root.start + i)
        .unwrap_or(root.end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapperlens_api::TextPosition;

    const USER_MAPPER_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE mapper PUBLIC "-//mybatis.org//DTD Mapper 3.0//EN" "http://mybatis.org/dtd/mybatis-3-mapper.dtd">
<mapper namespace="com.example.mapper.UserMapper">
    <resultMap id="userMap" type="User"/>
    <select id="getUser" resultMap="userMap">
        SELECT * FROM users WHERE id = #{id} AND age &gt; 0
    </select>
    <sql id="columns">id, name</sql>
</mapper>
"#;

    #[test]
    fn test_parse_statements() {
        let mapper = parse_mapper_xml("file:///UserMapper.xml", USER_MAPPER_XML)
            .unwrap()
            .unwrap();

        assert_eq!(mapper.namespace, "com.example.mapper.UserMapper");
        assert_eq!(mapper.methods.len(), 2);

        let select = &mapper.methods[0];
        assert_eq!(select.name, "getUser");
        assert_eq!(select.kind, SqlTag::Select);
        assert_eq!(select.start_position, TextPosition::new(4, 4));
        assert_eq!(select.end_position, TextPosition::new(6, 13));

        let sql = &mapper.methods[1];
        assert_eq!(sql.kind, SqlTag::Sql);
        assert_eq!(sql.start_position, TextPosition::new(7, 4));
        assert_eq!(sql.end_position, TextPosition::new(7, 36));

        assert_eq!(mapper.available_insert_position, TextPosition::new(8, 0));
    }

    #[test]
    fn test_not_a_mapper() {
        let config = "<configuration><mappers/></configuration>";
        assert!(parse_mapper_xml("file:///c.xml", config).unwrap().is_none());

        let no_namespace = "<mapper><select id=\"a\"/></mapper>";
        assert!(parse_mapper_xml("file:///m.xml", no_namespace).unwrap().is_none());
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        let broken = "<mapper namespace=\"a.B\"><select id=\"x\"></mapper>";
        assert!(matches!(
            parse_mapper_xml("file:///m.xml", broken),
            Err(ApiError::Parse(_))
        ));
    }

    #[test]
    fn test_insert_position_of_self_closing_root() {
        let text = "<mapper namespace=\"a.B\"/>";
        let mapper = parse_mapper_xml("file:///m.xml", text).unwrap().unwrap();
        assert!(mapper.methods.is_empty());
        assert_eq!(mapper.available_insert_position, TextPosition::new(0, 25));
    }

    #[test]
    fn test_statement_without_id_is_skipped() {
        let text = "<mapper namespace=\"a.B\"><select>1</select><update id=\"u\"/></mapper>";
        let mapper = parse_mapper_xml("file:///m.xml", text).unwrap().unwrap();
        assert_eq!(mapper.methods.len(), 1);
        assert_eq!(mapper.methods[0].name, "u");
        assert_eq!(mapper.available_insert_position, TextPosition::new(0, 58));
    }
}
