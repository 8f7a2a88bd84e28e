crate::decl_indices!(MapperIndices, {
    pkg => "package",
    inter_def => "interface.def",
    inter_name => "interface.name",
});

pub const JAVA_MAPPER_SCM: &str = include_str!("java_mapper.scm");
