//! # CodeCtx
//!
//! Assembles a token-bounded, query-relevant code context from a repository
//! (local directory or remote Git hosting URL) suitable for submission to a
//! large language model.
//!
//! ## Architecture
//!
//! The crate is organized following Domain-Driven Design principles:
//!
//! - `domain`: core models, the error taxonomy, and configuration
//! - `application`: the pipeline use case and the backend interfaces it calls
//! - `connector`: scanning, chunking, dependency analysis, ranking, and output rendering

pub mod application;
pub mod connector;
pub mod domain;

pub use application::*;
pub use connector::*;
pub use domain::*;
