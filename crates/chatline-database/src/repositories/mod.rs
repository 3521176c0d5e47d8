//! User store trait and its implementations.

pub mod memory;
pub mod user;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use chatline_core::config::DatabaseConfig;
use chatline_core::error::AppError;
use chatline_core::result::AppResult;
use chatline_core::types::UserId;
use chatline_entity::user::{NewUser, ProfileChanges, User};

pub use memory::MemoryUserStore;
pub use user::PgUserStore;

/// Message carried by every `DuplicateUser` error.
pub const DUPLICATE_EMAIL_MESSAGE: &str = "User already exists";

/// Persistence operations the identity service needs.
///
/// Email lookups are case-insensitive and email uniqueness is enforced by
/// the store: `create` fails with a `DuplicateUser` error on collision.
/// Every other failure is a `Service` error.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Find a user by email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Insert a new user and return the stored record.
    async fn create(&self, data: &NewUser) -> AppResult<User>;

    /// Apply a partial profile update. Returns `None` if the user is gone.
    async fn update_profile(&self, id: UserId, changes: &ProfileChanges)
    -> AppResult<Option<User>>;
}

/// Build the user store selected by `database.provider`.
pub async fn connect_user_store(config: &DatabaseConfig) -> AppResult<Arc<dyn UserStore>> {
    let store: Arc<dyn UserStore> = match config.provider.as_str() {
        "postgres" => Arc::new(PgUserStore::connect(config).await?),
        "memory" => {
            info!("Using in-memory user store; users are lost on restart");
            Arc::new(MemoryUserStore::new())
        }
        other => {
            return Err(AppError::configuration(format!(
                "Unknown database provider: '{other}'. Supported: postgres, memory"
            )));
        }
    };

    Ok(store)
}
