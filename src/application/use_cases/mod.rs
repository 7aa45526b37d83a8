mod build_context;

pub use build_context::ContextBuilder;
