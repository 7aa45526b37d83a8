mod chunker;
mod patterns;

pub use chunker::chunk_file;
pub use patterns::{captured_name, patterns_for, DefinitionPattern};
