//! # chatline-storage
//!
//! Media host implementations for Chatline. Profile pictures are handed to
//! an external image host and only the URL it returns is persisted.

pub mod manager;
pub mod payload;
pub mod providers;

pub use manager::connect_media_host;
pub use providers::{CloudinaryMediaHost, DisabledMediaHost};
