//! # chatline-database
//!
//! User datastore adapters for Chatline. The [`UserStore`] trait is the
//! seam the identity service talks to; [`PgUserStore`] backs it with
//! PostgreSQL and [`MemoryUserStore`] keeps everything in process memory.

pub mod repositories;

pub use repositories::{
    DUPLICATE_EMAIL_MESSAGE, MemoryUserStore, PgUserStore, UserStore, connect_user_store,
};
