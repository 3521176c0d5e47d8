//! PostgreSQL user repository.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use tracing::info;

use chatline_core::config::DatabaseConfig;
use chatline_core::error::{AppError, ErrorKind};
use chatline_core::result::AppResult;
use chatline_core::types::UserId;
use chatline_entity::user::{NewUser, ProfileChanges, User};

use super::{DUPLICATE_EMAIL_MESSAGE, UserStore};

/// User store backed by the `users` table.
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    /// Create a new user repository on an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect, bring the `users` table up to date and check that email
    /// uniqueness is enforced by the database.
    ///
    /// Each failure names the setup step that broke.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let options = connect_options(&config.url)?;
        info!(
            host = options.get_host(),
            port = options.get_port(),
            database = options.get_database().unwrap_or("<default>"),
            max_connections = config.max_connections,
            "Connecting user store to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .connect_with(options)
            .await
            .map_err(|e| setup_error("connecting to PostgreSQL", e))?;

        sqlx::migrate!("../../migrations")
            .run(&pool)
            .await
            .map_err(|e| setup_error("applying the users table migrations", e))?;

        let unique_email: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM pg_indexes \
             WHERE tablename = 'users' AND indexname = 'users_email_key')",
        )
        .fetch_one(&pool)
        .await
        .map_err(|e| setup_error("inspecting the users table", e))?;
        if !unique_email {
            return Err(AppError::configuration(
                "User store setup failed: users table has no users_email_key unique index",
            ));
        }

        info!("User store ready");
        Ok(Self::new(pool))
    }
}

/// Parse the connection URL. The password never reaches the logs because
/// only host, port and database name are read back out.
fn connect_options(url: &str) -> AppResult<PgConnectOptions> {
    PgConnectOptions::from_str(url).map_err(|e| {
        AppError::with_source(
            ErrorKind::Configuration,
            "User store setup failed: database.url is not a valid PostgreSQL URL",
            e,
        )
    })
}

fn setup_error(step: &str, e: impl std::error::Error + Send + Sync + 'static) -> AppError {
    AppError::with_source(
        ErrorKind::Service,
        format!("User store setup failed while {step}: {e}"),
        e,
    )
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Service, "Failed to find user by id", e))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Service, "Failed to find user by email", e)
            })
    }

    async fn create(&self, data: &NewUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (email, full_name, password_hash, profile_pic, bio) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING *",
        )
        .bind(&data.email)
        .bind(&data.full_name)
        .bind(&data.password_hash)
        .bind(&data.profile_pic)
        .bind(&data.bio)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::duplicate_user(DUPLICATE_EMAIL_MESSAGE)
            }
            _ => AppError::with_source(ErrorKind::Service, "Failed to create user", e),
        })
    }

    async fn update_profile(
        &self,
        id: UserId,
        changes: &ProfileChanges,
    ) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET \
                full_name = COALESCE($2, full_name), \
                bio = COALESCE($3, bio), \
                profile_pic = COALESCE($4, profile_pic), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(id)
        .bind(&changes.full_name)
        .bind(&changes.bio)
        .bind(&changes.profile_pic)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Service, "Failed to update user profile", e))
    }
}
