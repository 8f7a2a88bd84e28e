pub mod command;
pub mod mapper;
pub mod position;

pub use command::{Hint, LensCommand};
pub use mapper::{MapperMethod, ParsedJavaMapper, SqlTag, XmlMapper, XmlStatement};
pub use position::{TextPosition, TextRange};
