use mapperlens_api::{HostDocument, JavaMapperParser, TextPosition};
use mapperlens_core::{LensConfig, SourceDocument};
use mapperlens_java::JavaParser;

const USER_MAPPER: &str = r#"package com.example.mapper;

import com.example.model.User;
import org.apache.ibatis.annotations.Param;
import org.apache.ibatis.annotations.Select;

public interface UserMapper {
    User getUser(@Param("id") long id);

    List<User> selectAll();

    @Select("SELECT count(*) FROM users")
    int countUsers();

    int deleteUser(long id);

    default User getOrNull(long id) {
        return getUser(id);
    }

    interface Nested {
        void ignored();
    }
}
"#;

fn parser() -> JavaParser {
    JavaParser::new(&LensConfig::default()).unwrap()
}

fn doc(name: &str, text: &str) -> SourceDocument {
    SourceDocument::new(format!("file:///work/shop/src/main/java/{}", name), text)
}

#[tokio::test]
async fn test_parse_mapper_methods() {
    let document = doc("com/example/mapper/UserMapper.java", USER_MAPPER);
    let parser = parser();

    assert!(parser.is_valid(&document).await.unwrap());
    let mapper = parser.parse(&document).await.unwrap().unwrap();

    assert_eq!(mapper.uri, document.uri());
    assert_eq!(mapper.qualified_name(), "com.example.mapper.UserMapper");

    let names: Vec<_> = mapper.methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["getUser", "selectAll", "deleteUser"]);

    assert_eq!(mapper.methods[0].start_position, TextPosition::new(7, 9));
    assert_eq!(mapper.methods[1].start_position, TextPosition::new(9, 15));
    assert_eq!(mapper.methods[2].start_position, TextPosition::new(14, 8));

    // The start position lands on the method name
    let range = document
        .word_range_at(mapper.methods[0].start_position)
        .unwrap();
    assert_eq!(range.end, TextPosition::new(7, 16));
}

#[tokio::test]
async fn test_syntax_errors_are_not_valid() {
    let document = doc("Broken.java", "public interface Broken { void oops( }");
    assert!(!parser().is_valid(&document).await.unwrap());
}

#[tokio::test]
async fn test_non_java_content_is_not_valid() {
    let parser = parser();

    let yaml = doc("application.yml", "spring:\n  datasource: {}\n");
    assert!(!parser.is_valid(&yaml).await.unwrap());
    assert!(parser.parse(&yaml).await.unwrap().is_none());

    let prose = doc("README.java", "This is not Java at all.");
    assert!(!parser.is_valid(&prose).await.unwrap());
}

#[tokio::test]
async fn test_class_is_not_a_mapper() {
    let document = doc(
        "UserService.java",
        "package com.example;\npublic class UserService { void run() {} }\n",
    );
    let parser = parser();
    assert!(!parser.is_valid(&document).await.unwrap());
    assert!(parser.parse(&document).await.unwrap().is_none());
}

#[tokio::test]
async fn test_default_package() {
    let document = doc("OrderMapper.java", "interface OrderMapper { void insertOrder(); }");
    let mapper = parser().parse(&document).await.unwrap().unwrap();
    assert_eq!(mapper.package, None);
    assert_eq!(mapper.qualified_name(), "OrderMapper");
    assert_eq!(mapper.methods[0].start_position, TextPosition::new(0, 29));
}

#[tokio::test]
async fn test_base_interface_contract() {
    let config = LensConfig {
        base_interfaces: vec!["BaseMapper".to_string()],
        ..LensConfig::default()
    };
    let parser = JavaParser::new(&config).unwrap();

    let plain = doc("UserMapper.java", USER_MAPPER);
    assert!(!parser.is_valid(&plain).await.unwrap());

    let extending = doc(
        "UserMapper.java",
        "package a;\npublic interface UserMapper extends BaseMapper<User> {\n    User getUser();\n}\n",
    );
    assert!(parser.is_valid(&extending).await.unwrap());
}

#[tokio::test]
async fn test_unsaved_buffer_is_parsed() {
    let document = SourceDocument::new("untitled:Untitled-1", "interface Scratch { int selectOne(); }");
    let parser = parser();
    assert!(parser.is_valid(&document).await.unwrap());
    assert_eq!(parser.parse(&document).await.unwrap().unwrap().methods.len(), 1);
}
