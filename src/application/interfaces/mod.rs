mod completion_backend;
mod embedding_backend;

pub use completion_backend::*;
pub use embedding_backend::*;
