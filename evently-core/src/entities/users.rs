use crate::entities::Role;
use sqlx::PgPool;
use time::PrimitiveDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub second_name: String,
    /// Argon2 PHC string. `None` for OAuth-only accounts.
    pub password_hash: Option<String>,
    pub role: Role,
    pub google_id: Option<String>,
    pub password_changed_at: Option<PrimitiveDateTime>,
    /// Hex SHA-256 digest of the raw reset token. The raw token is never stored.
    pub password_reset_token: Option<String>,
    pub password_reset_expires: Option<PrimitiveDateTime>,
    pub active: bool,
    pub created_at: PrimitiveDateTime,
    pub updated_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInsert {
    pub email: String,
    pub first_name: String,
    pub second_name: String,
    pub password_hash: Option<String>,
    pub role: Role,
    pub google_id: Option<String>,
}

/// Profile fields updatable through `PATCH /users/{id}`. `None` leaves the
/// column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserProfileUpdate {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub second_name: Option<String>,
}

const USER_COLUMNS: &str = "id, email, first_name, second_name, password_hash, \
     role, google_id, password_changed_at, password_reset_token, \
     password_reset_expires, active, created_at, updated_at";

impl User {
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(pool)
        .await
    }

    pub async fn find_by_google_id(
        pool: &PgPool,
        google_id: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE google_id = $1"
        ))
        .bind(google_id)
        .fetch_optional(pool)
        .await
    }

    pub async fn find_by_reset_digest(
        pool: &PgPool,
        digest: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE password_reset_token = $1"
        ))
        .bind(digest)
        .fetch_optional(pool)
        .await
    }

    pub async fn list_all(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC"
        ))
        .fetch_all(pool)
        .await
    }

    pub async fn insert_new(pool: &PgPool, insert: UserInsert) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (email, first_name, second_name, password_hash, role, google_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(insert.email)
        .bind(insert.first_name)
        .bind(insert.second_name)
        .bind(insert.password_hash)
        .bind(insert.role)
        .bind(insert.google_id)
        .fetch_one(pool)
        .await
    }

    pub async fn update_profile(
        pool: &PgPool,
        id: Uuid,
        update: UserProfileUpdate,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET \
                email = COALESCE($2, email), \
                first_name = COALESCE($3, first_name), \
                second_name = COALESCE($4, second_name), \
                updated_at = (now() AT TIME ZONE 'utc') \
             WHERE id = $1 \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(update.email)
        .bind(update.first_name)
        .bind(update.second_name)
        .fetch_optional(pool)
        .await
    }

    /// Store a reset-token digest and its expiry against the account.
    pub async fn set_reset_token(
        pool: &PgPool,
        id: Uuid,
        digest: &str,
        expires: PrimitiveDateTime,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET \
                password_reset_token = $2, \
                password_reset_expires = $3, \
                updated_at = (now() AT TIME ZONE 'utc') \
             WHERE id = $1",
        )
        .bind(id)
        .bind(digest)
        .bind(expires)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Drop any outstanding reset token (used when the reset mail fails to send).
    pub async fn clear_reset_token(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET \
                password_reset_token = NULL, \
                password_reset_expires = NULL, \
                updated_at = (now() AT TIME ZONE 'utc') \
             WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Store a new password hash, clear reset-token state, and stamp
    /// `password_changed_at` so previously issued tokens stop verifying.
    pub async fn complete_password_reset(
        pool: &PgPool,
        id: Uuid,
        new_hash: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET \
                password_hash = $2, \
                password_reset_token = NULL, \
                password_reset_expires = NULL, \
                password_changed_at = (now() AT TIME ZONE 'utc'), \
                updated_at = (now() AT TIME ZONE 'utc') \
             WHERE id = $1 \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(new_hash)
        .fetch_optional(pool)
        .await
    }

    /// Store a new password hash and stamp `password_changed_at`.
    pub async fn update_password(
        pool: &PgPool,
        id: Uuid,
        new_hash: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET \
                password_hash = $2, \
                password_changed_at = (now() AT TIME ZONE 'utc'), \
                updated_at = (now() AT TIME ZONE 'utc') \
             WHERE id = $1 \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(new_hash)
        .fetch_optional(pool)
        .await
    }
}
