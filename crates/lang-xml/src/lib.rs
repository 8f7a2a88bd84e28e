pub mod parser;
pub mod scanner;
pub mod service;

pub use parser::parse_mapper_xml;
pub use scanner::FsTextSource;
pub use service::MybatisXmlService;
