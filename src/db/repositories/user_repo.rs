//! User repository

use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::{
    constants::{ban_request_statuses, ban_statuses},
    error::AppResult,
    models::User,
};

/// Repository for user database operations
pub struct UserRepository;

impl UserRepository {
    /// Create a new user
    pub async fn create(
        pool: &PgPool,
        name: &str,
        ff_uid: &str,
        email: &str,
        password_hash: &str,
        role: &str,
    ) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, ff_uid, email, password_hash, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(ff_uid)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Find user by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(r#"SELECT * FROM users WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(user)
    }

    /// Find user by email (for login)
    pub async fn find_by_email(pool: &PgPool, email: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(r#"SELECT * FROM users WHERE email = $1"#)
            .bind(email)
            .fetch_optional(pool)
            .await?;

        Ok(user)
    }

    /// Find user by external player id
    pub async fn find_by_ff_uid(pool: &PgPool, ff_uid: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(r#"SELECT * FROM users WHERE ff_uid = $1"#)
            .bind(ff_uid)
            .fetch_optional(pool)
            .await?;

        Ok(user)
    }

    /// List users, newest first.
    ///
    /// Super-admin accounts are hidden from viewers below super-admin rank.
    pub async fn list(pool: &PgPool, include_super_admins: bool) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT * FROM users
            WHERE ($1 OR role <> 'super-admin')
            ORDER BY created_at DESC
            "#,
        )
        .bind(include_super_admins)
        .fetch_all(pool)
        .await?;

        Ok(users)
    }

    /// Update user role
    pub async fn update_role(pool: &PgPool, id: &Uuid, role: &str) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET role = $2
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(role)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Apply a ban directly, clearing any pending ban request
    pub async fn apply_ban(
        pool: &PgPool,
        id: &Uuid,
        ban_status: &str,
        ban_expires: Option<DateTime<Utc>>,
    ) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET ban_status = $2,
                ban_expires = $3,
                ban_request_status = $4,
                ban_requested_by = NULL,
                ban_requested_at = NULL
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(ban_status)
        .bind(ban_expires)
        .bind(ban_request_statuses::NONE)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Record a pending ban request for super-admin review
    pub async fn request_ban(pool: &PgPool, id: &Uuid, requested_by: &Uuid) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET ban_request_status = $2,
                ban_requested_by = $3,
                ban_requested_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(ban_request_statuses::PENDING)
        .bind(requested_by)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Clear a pending ban request without applying a ban
    pub async fn clear_ban_request(pool: &PgPool, id: &Uuid) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET ban_request_status = $2,
                ban_requested_by = NULL,
                ban_requested_at = NULL
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(ban_request_statuses::NONE)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Lift a ban: clears status, expiry, and any pending request
    pub async fn clear_ban(pool: &PgPool, id: &Uuid) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET ban_status = $2,
                ban_expires = NULL,
                ban_request_status = $3,
                ban_requested_by = NULL,
                ban_requested_at = NULL
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(ban_statuses::NONE)
        .bind(ban_request_statuses::NONE)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Credit a wallet by an atomic increment.
    ///
    /// Takes a connection so settlement can run it inside its transaction.
    /// Returns the number of rows touched; 0 means the user no longer
    /// exists and the caller must abort.
    pub async fn credit_wallet(conn: &mut PgConnection, id: &Uuid, amount: f64) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET wallet_balance = wallet_balance + $2
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(amount)
        .execute(conn)
        .await?;

        Ok(result.rows_affected())
    }

    /// Count total users
    pub async fn count(pool: &PgPool) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM users"#)
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
