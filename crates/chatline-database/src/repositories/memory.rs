//! In-process user store.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use chatline_core::error::AppError;
use chatline_core::result::AppResult;
use chatline_core::types::UserId;
use chatline_entity::user::{NewUser, ProfileChanges, User};

use super::{DUPLICATE_EMAIL_MESSAGE, UserStore};

/// User store that keeps every record in a map guarded by one lock.
///
/// Mirrors the PostgreSQL store's contract: ids are generated here, and
/// emails are unique case-insensitively.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<UserId, User>>,
}

impl MemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Returns `true` if no user has signed up.
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

fn same_email(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| same_email(&u.email, email))
            .cloned())
    }

    async fn create(&self, data: &NewUser) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| same_email(&u.email, &data.email)) {
            return Err(AppError::duplicate_user(DUPLICATE_EMAIL_MESSAGE));
        }

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            email: data.email.clone(),
            full_name: data.full_name.clone(),
            password_hash: data.password_hash.clone(),
            profile_pic: data.profile_pic.clone(),
            bio: data.bio.clone(),
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_profile(
        &self,
        id: UserId,
        changes: &ProfileChanges,
    ) -> AppResult<Option<User>> {
        let mut users = self.users.write().await;
        Ok(users.get_mut(&id).map(|user| {
            user.apply(changes);
            user.clone()
        }))
    }
}
