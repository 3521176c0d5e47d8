//! Signup, login, token verification and profile updates.

pub mod input;
pub mod service;

pub use input::{Credentials, ProfileUpdate, Registration};
pub use service::{IdentityService, SessionGrant};
