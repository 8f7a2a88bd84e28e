// Node kinds
pub const KIND_INTERFACE_BODY: &str = "interface_body";
pub const KIND_METHOD: &str = "method_declaration";
pub const KIND_MODIFIERS: &str = "modifiers";
pub const KIND_MARKER_ANNOTATION: &str = "marker_annotation";
pub const KIND_ANNOTATION: &str = "annotation";
pub const KIND_EXTENDS_INTERFACES: &str = "extends_interfaces";
pub const KIND_TYPE_LIST: &str = "type_list";

// Field names
pub const FIELD_NAME: &str = "name";
pub const FIELD_BODY: &str = "body";

/// `org.apache.ibatis.annotations.Mapper`
pub const MAPPER_ANNOTATION: &str = "Mapper";

/// Annotations that bind SQL in Java, leaving nothing for the XML mapper.
pub const STATEMENT_ANNOTATIONS: &[&str] = &[
    "Select",
    "Insert",
    "Update",
    "Delete",
    "SelectProvider",
    "InsertProvider",
    "UpdateProvider",
    "DeleteProvider",
];
