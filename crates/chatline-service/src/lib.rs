//! # chatline-service
//!
//! Business logic service layer for Chatline. Services orchestrate the user
//! store, the media host and the credential primitives to implement the
//! application-level use cases.
//!
//! Services follow constructor injection: all dependencies are provided at
//! construction time via `Arc` references.

pub mod identity;

pub use identity::{Credentials, IdentityService, ProfileUpdate, Registration, SessionGrant};
