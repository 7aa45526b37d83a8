//! # Domain Layer
//!
//! Core models, the error taxonomy, and configuration. Independent of
//! external frameworks and infrastructure.

mod error;
pub mod models;

pub use error::*;
pub use models::*;
