//! # chatline-auth
//!
//! Credential primitives for Chatline.
//!
//! ## Modules
//!
//! - `jwt`: session token issuing and verification
//! - `password`: Argon2id password hashing

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::PasswordHasher;
