pub mod action;
pub mod config;
pub mod correlator;
pub mod tag;
pub mod text;
pub mod workspace;

pub use action::resolve_action;
pub use config::LensConfig;
pub use correlator::MapperCorrelator;
pub use tag::infer_tag;
pub use text::{LineIndex, SourceDocument};
pub use workspace::WorkspaceFolders;
