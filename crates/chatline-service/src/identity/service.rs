//! Identity service: the only place credentials are checked and tokens issued.

use std::sync::{Arc, LazyLock};

use tracing::{debug, info, warn};

use chatline_auth::jwt::{JwtDecoder, JwtEncoder};
use chatline_auth::password::PasswordHasher;
use chatline_core::config::AuthConfig;
use chatline_core::error::AppError;
use chatline_core::result::AppResult;
use chatline_core::traits::media::MediaHost;
use chatline_core::types::UserId;
use chatline_database::{DUPLICATE_EMAIL_MESSAGE, UserStore};
use chatline_entity::user::{NewUser, ProfileChanges, UserProfile};

use super::input::{Credentials, ProfileUpdate, Registration, present, required, secret};

/// The single error every failed login returns, whichever check failed.
static INVALID_CREDENTIALS: LazyLock<AppError> =
    LazyLock::new(|| AppError::invalid_credentials("Invalid email or password"));

/// A user together with a freshly issued session token.
#[derive(Debug, Clone)]
pub struct SessionGrant {
    /// Public profile of the user.
    pub profile: UserProfile,
    /// Signed session token.
    pub token: String,
}

/// Handles signup, login, token verification and profile updates.
#[derive(Debug, Clone)]
pub struct IdentityService {
    /// User persistence.
    store: Arc<dyn UserStore>,
    /// Profile picture host.
    media: Arc<dyn MediaHost>,
    /// Password hasher.
    hasher: PasswordHasher,
    /// Token issuer.
    encoder: JwtEncoder,
    /// Token verifier.
    decoder: JwtDecoder,
    /// Hash verified against when the email is unknown, so both login
    /// failures cost one password verification.
    decoy_hash: String,
}

impl IdentityService {
    /// Creates a new identity service.
    pub fn new(
        store: Arc<dyn UserStore>,
        media: Arc<dyn MediaHost>,
        config: &AuthConfig,
    ) -> AppResult<Self> {
        let hasher = PasswordHasher::new();
        let decoy_hash = hasher.hash_password("decoy password for unknown accounts")?;

        Ok(Self {
            store,
            media,
            hasher,
            encoder: JwtEncoder::new(config)?,
            decoder: JwtDecoder::new(config),
            decoy_hash,
        })
    }

    /// Creates an account and signs the new user in.
    pub async fn register(&self, form: Registration) -> AppResult<SessionGrant> {
        let email = required(&form.email, "email")?;
        let full_name = required(&form.full_name, "fullName")?;
        let password = secret(&form.password, "password")?;

        if self.store.find_by_email(email).await?.is_some() {
            return Err(AppError::duplicate_user(DUPLICATE_EMAIL_MESSAGE));
        }

        let password_hash = self.hasher.hash_password(password)?;

        let profile_pic = match present(&form.profile_pic) {
            Some(payload) => Some(self.media.upload_image(payload).await?.secure_url),
            None => None,
        };

        let user = self
            .store
            .create(&NewUser {
                email: email.to_string(),
                full_name: full_name.to_string(),
                password_hash,
                profile_pic,
                bio: form.bio.clone(),
            })
            .await?;

        info!(user_id = %user.id, "User registered");

        let token = self.encoder.issue(user.id)?;
        Ok(SessionGrant {
            profile: user.into(),
            token,
        })
    }

    /// Checks credentials and issues a session token.
    pub async fn authenticate(&self, form: Credentials) -> AppResult<SessionGrant> {
        let email = required(&form.email, "email")?;
        let password = secret(&form.password, "password")?;

        let Some(user) = self.store.find_by_email(email).await? else {
            self.hasher.verify_password(password, &self.decoy_hash)?;
            debug!("Login for unknown email");
            return Err(INVALID_CREDENTIALS.clone());
        };

        if !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login with wrong password");
            return Err(INVALID_CREDENTIALS.clone());
        }

        info!(user_id = %user.id, "User logged in");

        let token = self.encoder.issue(user.id)?;
        Ok(SessionGrant {
            profile: user.into(),
            token,
        })
    }

    /// Resolves a session token to the user it was issued for.
    pub async fn verify_token(&self, token: Option<&str>) -> AppResult<UserProfile> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::unauthenticated("Not authorized: no token provided"))?;

        let claims = self.decoder.decode(token)?;

        self.store
            .find_by_id(claims.user_id)
            .await?
            .map(UserProfile::from)
            .ok_or_else(|| AppError::unauthenticated("Not authorized: user no longer exists"))
    }

    /// Applies a partial profile update for `user_id`.
    pub async fn update_profile(
        &self,
        user_id: UserId,
        form: ProfileUpdate,
    ) -> AppResult<UserProfile> {
        let full_name = match &form.full_name {
            Some(_) => Some(required(&form.full_name, "fullName")?.to_string()),
            None => None,
        };

        let profile_pic = match present(&form.profile_pic) {
            Some(payload) => Some(self.media.upload_image(payload).await?.secure_url),
            None => None,
        };

        let changes = ProfileChanges {
            full_name,
            bio: form.bio,
            profile_pic,
        };

        let user = self
            .store
            .update_profile(user_id, &changes)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        info!(%user_id, picture = changes.profile_pic.is_some(), "Profile updated");

        Ok(user.into())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use chatline_core::error::ErrorKind;
    use chatline_core::traits::media::UploadedMedia;
    use chatline_database::MemoryUserStore;

    use super::*;

    /// Records payloads and hands back predictable URLs.
    #[derive(Debug, Default)]
    struct FakeMediaHost {
        uploads: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl MediaHost for FakeMediaHost {
        fn provider_type(&self) -> &str {
            "fake"
        }

        async fn upload_image(&self, payload: &str) -> AppResult<UploadedMedia> {
            let mut uploads = self.uploads.lock().unwrap();
            uploads.push(payload.to_string());
            Ok(UploadedMedia {
                secure_url: format!("https://media.test/{}.png", uploads.len()),
            })
        }
    }

    struct Fixture {
        service: IdentityService,
        store: Arc<MemoryUserStore>,
        media: Arc<FakeMediaHost>,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(MemoryUserStore::new());
        let media = Arc::new(FakeMediaHost::default());
        let config = AuthConfig {
            jwt_secret: "test-secret".to_string(),
            ..Default::default()
        };
        let service = IdentityService::new(store.clone(), media.clone(), &config).unwrap();
        Fixture {
            service,
            store,
            media,
        }
    }

    fn registration(email: &str) -> Registration {
        Registration {
            email: Some(email.to_string()),
            full_name: Some("Ada Lovelace".to_string()),
            password: Some("correct horse".to_string()),
            profile_pic: None,
            bio: Some("Analyst".to_string()),
        }
    }

    fn credentials(email: &str, password: &str) -> Credentials {
        Credentials {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_does_not_create_second_record() {
        let fx = fixture();
        fx.service.register(registration("ada@example.com")).await.unwrap();

        let err = fx
            .service
            .register(registration("ada@example.com"))
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::DuplicateUser));
        assert_eq!(err.message, DUPLICATE_EMAIL_MESSAGE);
        assert_eq!(fx.store.len().await, 1);
    }

    #[tokio::test]
    async fn test_missing_fields_rejected_before_persistence() {
        let fx = fixture();
        let cases = [
            Registration {
                email: None,
                ..registration("x@example.com")
            },
            Registration {
                full_name: Some("   ".to_string()),
                ..registration("x@example.com")
            },
            Registration {
                password: None,
                profile_pic: Some("data:image/png;base64,AA".to_string()),
                ..registration("x@example.com")
            },
        ];

        for form in cases {
            let err = fx.service.register(form).await.unwrap_err();
            assert!(err.is(ErrorKind::Validation));
        }
        assert!(fx.store.is_empty().await);
        assert!(fx.media.uploads.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let fx = fixture();
        fx.service.register(registration("ada@example.com")).await.unwrap();

        let wrong_password = fx
            .service
            .authenticate(credentials("ada@example.com", "wrong"))
            .await
            .unwrap_err();
        let unknown_email = fx
            .service
            .authenticate(credentials("nobody@example.com", "correct horse"))
            .await
            .unwrap_err();

        assert_eq!(wrong_password.kind, ErrorKind::InvalidCredentials);
        assert_eq!(wrong_password.kind, unknown_email.kind);
        assert_eq!(wrong_password.message, unknown_email.message);
    }

    #[tokio::test]
    async fn test_password_is_not_trimmed() {
        let fx = fixture();
        fx.service
            .register(Registration {
                password: Some("  pw with spaces  ".to_string()),
                ..registration("ada@example.com")
            })
            .await
            .unwrap();

        let err = fx
            .service
            .authenticate(credentials("ada@example.com", "pw with spaces"))
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::InvalidCredentials));

        fx.service
            .authenticate(credentials("ada@example.com", "  pw with spaces  "))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_login_requires_both_fields() {
        let fx = fixture();
        let err = fx
            .service
            .authenticate(Credentials {
                email: Some("ada@example.com".to_string()),
                password: None,
            })
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Validation));
    }

    #[tokio::test]
    async fn test_issued_tokens_resolve_to_same_user() {
        let fx = fixture();
        let signup = fx.service.register(registration("ada@example.com")).await.unwrap();
        let login = fx
            .service
            .authenticate(credentials("ADA@example.com", "correct horse"))
            .await
            .unwrap();

        for grant in [&signup, &login] {
            let profile = fx.service.verify_token(Some(&grant.token)).await.unwrap();
            assert_eq!(profile.id, signup.profile.id);
        }
    }

    #[tokio::test]
    async fn test_tampered_token_is_rejected() {
        let fx = fixture();
        let grant = fx.service.register(registration("ada@example.com")).await.unwrap();

        let mut bytes = grant.token.into_bytes();
        let mid = bytes.iter().position(|b| *b == b'.').unwrap() + 3;
        bytes[mid] = if bytes[mid] == b'x' { b'y' } else { b'x' };
        let tampered = String::from_utf8(bytes).unwrap();

        let err = fx.service.verify_token(Some(&tampered)).await.unwrap_err();
        assert!(err.is(ErrorKind::Unauthenticated));
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthenticated() {
        let fx = fixture();
        for token in [None, Some(""), Some("  ")] {
            let err = fx.service.verify_token(token).await.unwrap_err();
            assert!(err.is(ErrorKind::Unauthenticated));
        }
    }

    #[tokio::test]
    async fn test_signup_picture_is_uploaded() {
        let fx = fixture();
        let grant = fx
            .service
            .register(Registration {
                profile_pic: Some("data:image/png;base64,AAAA".to_string()),
                ..registration("ada@example.com")
            })
            .await
            .unwrap();

        assert_eq!(
            grant.profile.profile_pic.as_deref(),
            Some("https://media.test/1.png")
        );
    }

    #[tokio::test]
    async fn test_update_without_picture_keeps_stored_url() {
        let fx = fixture();
        let grant = fx
            .service
            .register(Registration {
                profile_pic: Some("data:image/png;base64,AAAA".to_string()),
                ..registration("ada@example.com")
            })
            .await
            .unwrap();

        let updated = fx
            .service
            .update_profile(
                grant.profile.id,
                ProfileUpdate {
                    bio: Some("Mathematician".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.bio.as_deref(), Some("Mathematician"));
        assert_eq!(updated.full_name, "Ada Lovelace");
        assert_eq!(updated.profile_pic, grant.profile.profile_pic);
        assert_eq!(fx.media.uploads.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_with_picture_stores_uploaded_url() {
        let fx = fixture();
        let grant = fx.service.register(registration("ada@example.com")).await.unwrap();
        let payload = "data:image/jpeg;base64,/9j/4AAQ";

        let updated = fx
            .service
            .update_profile(
                grant.profile.id,
                ProfileUpdate {
                    profile_pic: Some(payload.to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(
            updated.profile_pic.as_deref(),
            Some("https://media.test/1.png")
        );
        assert_ne!(updated.profile_pic.as_deref(), Some(payload));
        assert_eq!(fx.media.uploads.lock().unwrap().as_slice(), [payload]);
    }

    #[tokio::test]
    async fn test_update_rejects_blank_name() {
        let fx = fixture();
        let grant = fx.service.register(registration("ada@example.com")).await.unwrap();
        let err = fx
            .service
            .update_profile(
                grant.profile.id,
                ProfileUpdate {
                    full_name: Some(" ".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Validation));
    }

    #[tokio::test]
    async fn test_update_unknown_user_is_not_found() {
        let fx = fixture();
        let err = fx
            .service
            .update_profile(UserId::new(), ProfileUpdate::default())
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::NotFound));
    }
}
