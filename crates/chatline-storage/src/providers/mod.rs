//! Media host provider implementations.

pub mod cloudinary;
pub mod disabled;

pub use cloudinary::CloudinaryMediaHost;
pub use disabled::DisabledMediaHost;
