pub mod constants;
pub mod parser;
pub mod queries;
pub mod utils;

pub use parser::JavaParser;
