//! # Application Layer
//!
//! The pipeline use case and the backend interfaces it depends on.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
