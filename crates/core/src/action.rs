use crate::tag::infer_tag;
use mapperlens_api::{LensCommand, MapperMethod, SqlTag, TextRange, XmlMapper};

/// Empty statement block inserted verbatim before `</mapper>`.
pub fn skeleton(tag: SqlTag, method_name: &str) -> String {
    format!("\n    <{tag} id=\"{method_name}\">\n          \n    </{tag}>\n\n")
}

/// Navigate to the statement named like `method`, or offer to create one.
pub fn resolve_action(xml_mapper: &XmlMapper, method: &MapperMethod) -> LensCommand {
    match xml_mapper.find_statement(&method.name) {
        Some(statement) => LensCommand::Navigate {
            uri: xml_mapper.uri.clone(),
            selection: TextRange::new(statement.start_position, statement.end_position),
        },
        None => LensCommand::Generate {
            uri: xml_mapper.uri.clone(),
            position: xml_mapper.available_insert_position,
            skeleton: skeleton(infer_tag(&method.name), &method.name),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapperlens_api::{TextPosition, XmlStatement};

    fn xml_mapper() -> XmlMapper {
        XmlMapper {
            uri: "file:///project/UserMapper.xml".to_string(),
            namespace: "com.example.UserMapper".to_string(),
            methods: vec![XmlStatement {
                name: "getUser".to_string(),
                kind: SqlTag::Select,
                start_position: TextPosition::new(5, 4),
                end_position: TextPosition::new(7, 13),
            }],
            available_insert_position: TextPosition::new(8, 0),
        }
    }

    fn method(name: &str) -> MapperMethod {
        MapperMethod {
            name: name.to_string(),
            start_position: TextPosition::new(3, 9),
        }
    }

    #[test]
    fn test_existing_statement_navigates() {
        let cmd = resolve_action(&xml_mapper(), &method("getUser"));
        assert_eq!(
            cmd,
            LensCommand::Navigate {
                uri: "file:///project/UserMapper.xml".to_string(),
                selection: TextRange::new(TextPosition::new(5, 4), TextPosition::new(7, 13)),
            }
        );
    }

    #[test]
    fn test_missing_statement_generates() {
        let cmd = resolve_action(&xml_mapper(), &method("deleteUser"));
        match cmd {
            LensCommand::Generate {
                uri,
                position,
                skeleton,
            } => {
                assert_eq!(uri, "file:///project/UserMapper.xml");
                assert_eq!(position, TextPosition::new(8, 0));
                assert!(skeleton.contains("<delete id=\"deleteUser\">"));
                assert!(skeleton.contains("</delete>"));
            }
            other => panic!("expected generate command, got {:?}", other),
        }
    }

    #[test]
    fn test_name_match_is_case_sensitive() {
        let cmd = resolve_action(&xml_mapper(), &method("GetUser"));
        assert_eq!(cmd.id(), "mybatisx.open_and_add_new_section");
    }

    #[test]
    fn test_skeleton_layout() {
        assert_eq!(
            skeleton(SqlTag::Sql, "archiveOldRecords"),
            "\n    <sql id=\"archiveOldRecords\">\n          \n    </sql>\n\n"
        );
    }
}
