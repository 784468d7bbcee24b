//! # Arman Common Library
//!
//! Shared code for the Arman CMS:
//! - Content types and their validation rules
//! - The intent protocol used to resolve embedded sub-resources
//! - Error taxonomy
//! - Bootstrap configuration loading
//! - Database initialization

pub mod config;
pub mod content;
pub mod db;
pub mod error;
pub mod intent;

pub use error::{Error, Result};
pub use intent::{Intent, Operation};
