use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use sqlx::{FromRow, PgPool, migrate::Migrator};
use uuid::Uuid;
use warden_core::{Email, PageRequest, Password, User, UserId, UserStore, UserStoreError};

/// Schema migrations for the `users` table.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

#[derive(FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    is_active: bool,
}

impl TryFrom<UserRow> for User {
    type Error = UserStoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email =
            Email::parse(&row.email).map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        Ok(User::reconstruct(
            UserId::from(row.id),
            email,
            Password::from_hash(Secret::new(row.password_hash)),
            row.created_at,
            row.updated_at,
            row.is_active,
        ))
    }
}

#[derive(Clone)]
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        PostgresUserStore { pool }
    }
}

fn map_write_error(e: sqlx::Error) -> UserStoreError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return UserStoreError::UserAlreadyExists;
        }
    }
    UserStoreError::UnexpectedError(e.to_string())
}

fn unexpected(e: sqlx::Error) -> UserStoreError {
    UserStoreError::UnexpectedError(e.to_string())
}

const SELECT_USER: &str =
    "SELECT id, email, password_hash, created_at, updated_at, is_active FROM users";

#[async_trait::async_trait]
impl UserStore for PostgresUserStore {
    #[tracing::instrument(name = "Adding user to PostgreSQL", skip_all)]
    async fn create(&self, user: &User) -> Result<(), UserStoreError> {
        sqlx::query(
            r#"
                INSERT INTO users (id, email, password_hash, created_at, updated_at, is_active)
                VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id().as_uuid())
        .bind(user.email().as_str())
        .bind(user.password().as_ref().expose_secret())
        .bind(user.created_at())
        .bind(user.updated_at())
        .bind(user.is_active())
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(())
    }

    #[tracing::instrument(name = "Retrieving user by id from PostgreSQL", skip_all)]
    async fn find_by_id(&self, id: &UserId) -> Result<User, UserStoreError> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?;

        let Some(row) = row else {
            return Err(UserStoreError::UserNotFound);
        };

        row.try_into()
    }

    #[tracing::instrument(name = "Retrieving user by email from PostgreSQL", skip_all)]
    async fn find_by_email(&self, email: &Email) -> Result<User, UserStoreError> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} WHERE email = $1"))
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?;

        let Some(row) = row else {
            return Err(UserStoreError::UserNotFound);
        };

        row.try_into()
    }

    #[tracing::instrument(name = "Updating user in PostgreSQL", skip_all)]
    async fn update(&self, user: &User) -> Result<(), UserStoreError> {
        let result = sqlx::query(
            r#"
                UPDATE users
                SET email = $2, password_hash = $3, updated_at = $4, is_active = $5
                WHERE id = $1
            "#,
        )
        .bind(user.id().as_uuid())
        .bind(user.email().as_str())
        .bind(user.password().as_ref().expose_secret())
        .bind(user.updated_at())
        .bind(user.is_active())
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Delete user from PostgreSQL", skip_all)]
    async fn delete(&self, id: &UserId) -> Result<(), UserStoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Checking email in PostgreSQL", skip_all)]
    async fn exists_by_email(&self, email: &Email) -> Result<bool, UserStoreError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(unexpected)
    }

    #[tracing::instrument(name = "Listing users from PostgreSQL", skip_all)]
    async fn list(&self, page: PageRequest) -> Result<Vec<User>, UserStoreError> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "{SELECT_USER} ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        rows.into_iter().map(User::try_from).collect()
    }

    #[tracing::instrument(name = "Counting users in PostgreSQL", skip_all)]
    async fn count(&self) -> Result<i64, UserStoreError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(unexpected)
    }
}
