//! Core traits defined in `chatline-core` and implemented by other crates.

pub mod media;

pub use media::MediaHost;
