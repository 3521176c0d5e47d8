//! # chatline-core
//!
//! Core crate for Chatline. Contains configuration schemas, typed
//! identifiers, the media host trait, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Chatline crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
