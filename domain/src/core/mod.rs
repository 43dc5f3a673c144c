//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`]: domain-level errors
//! - [`output_format::OutputFormat`]: how results are rendered
//! - [`text`]: character-based length and preview helpers

pub mod error;
pub mod output_format;
pub mod text;
