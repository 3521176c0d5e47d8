//! # chatline-entity
//!
//! Domain entity models for Chatline. Database rows derive
//! `sqlx::FromRow`; the public projections are what leaves the process.

pub mod user;
