//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use chatline_core::types::UserId;

/// A registered user as stored in the datastore.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    /// Unique user identifier (generated by the datastore).
    pub id: UserId,
    /// Email address, unique across users.
    pub email: String,
    /// Full display name.
    pub full_name: String,
    /// Argon2 password hash. Never leaves the process.
    pub password_hash: String,
    /// Canonical URL of the profile picture on the media host.
    pub profile_pic: Option<String>,
    /// Free-form biography.
    pub bio: Option<String>,
    /// When the user signed up.
    pub created_at: DateTime<Utc>,
    /// When the profile last changed.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Apply profile changes in place. `None` fields are left untouched.
    pub fn apply(&mut self, changes: &ProfileChanges) {
        if let Some(full_name) = &changes.full_name {
            self.full_name = full_name.clone();
        }
        if let Some(bio) = &changes.bio {
            self.bio = Some(bio.clone());
        }
        if let Some(profile_pic) = &changes.profile_pic {
            self.profile_pic = Some(profile_pic.clone());
        }
        self.updated_at = Utc::now();
    }
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            profile_pic: user.profile_pic,
            bio: user.bio,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// User record as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// User identifier.
    #[serde(rename = "_id")]
    pub id: UserId,
    /// Email address.
    pub email: String,
    /// Full display name.
    pub full_name: String,
    /// Profile picture URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_pic: Option<String>,
    /// Biography.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Signup time.
    pub created_at: DateTime<Utc>,
    /// Last profile change.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Email address.
    pub email: String,
    /// Full display name.
    pub full_name: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Hosted profile picture URL.
    pub profile_pic: Option<String>,
    /// Biography.
    pub bio: Option<String>,
}

/// A partial profile update. Only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileChanges {
    /// New full name.
    pub full_name: Option<String>,
    /// New biography.
    pub bio: Option<String>,
    /// New hosted picture URL (already uploaded).
    pub profile_pic: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        let now = Utc::now();
        User {
            id: UserId::new(),
            email: "ada@example.com".to_string(),
            full_name: "Ada Lovelace".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
            profile_pic: Some("https://img.example.com/ada.png".to_string()),
            bio: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_profile_json_omits_password_hash() {
        let json = serde_json::to_value(UserProfile::from(sample_user())).expect("serialize");
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["fullName"], "Ada Lovelace");
        assert!(json.get("_id").is_some());
    }

    #[test]
    fn test_apply_leaves_absent_fields_untouched() {
        let mut user = sample_user();
        user.apply(&ProfileChanges {
            bio: Some("Analyst".to_string()),
            ..Default::default()
        });
        assert_eq!(user.bio.as_deref(), Some("Analyst"));
        assert_eq!(user.full_name, "Ada Lovelace");
        assert_eq!(
            user.profile_pic.as_deref(),
            Some("https://img.example.com/ada.png")
        );
    }
}
