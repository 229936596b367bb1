//! Admin account lookups.
//!
//! Admins live in `shop.users` with role `admin`; every query here filters on
//! that role so a customer account can never be loaded as an admin.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use storehaus_core::{Email, UserId, UserRole};

use super::RepositoryError;
use crate::models::Admin;

#[derive(Debug, sqlx::FromRow)]
struct AdminRow {
    id: UserId,
    email: String,
    name: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<AdminRow> for Admin {
    type Error = RepositoryError;

    fn try_from(row: AdminRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;
        Ok(Self {
            id: row.id,
            email,
            name: row.name,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AdminWithPasswordRow {
    #[sqlx(flatten)]
    admin: AdminRow,
    password_hash: Option<String>,
}

/// Repository for admin accounts.
pub struct AdminRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AdminRepository<'a> {
    /// Create a new admin repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get an admin by user ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<Admin>, RepositoryError> {
        sqlx::query_as::<_, AdminRow>(
            r"
            SELECT id, email, name, created_at
            FROM shop.users
            WHERE id = $1 AND role = $2
            ",
        )
        .bind(id)
        .bind(UserRole::Admin)
        .fetch_optional(self.pool)
        .await?
        .map(Admin::try_from)
        .transpose()
    }

    /// Get an admin and their password hash by email.
    ///
    /// Returns `None` for unknown emails, non-admin accounts, and admins
    /// without a password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(Admin, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, AdminWithPasswordRow>(
            r"
            SELECT u.id, u.email, u.name, u.created_at, p.password_hash
            FROM shop.users u
            LEFT JOIN shop.user_passwords p ON u.id = p.user_id
            WHERE u.email = $1 AND u.role = $2
            ",
        )
        .bind(email.as_str())
        .bind(UserRole::Admin)
        .fetch_optional(self.pool)
        .await?;

        let Some(AdminWithPasswordRow {
            admin,
            password_hash: Some(hash),
        }) = row
        else {
            return Ok(None);
        };

        Ok(Some((Admin::try_from(admin)?, hash)))
    }

    /// Create an admin account with a password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is already registered.
    pub async fn create(
        &self,
        email: &Email,
        name: Option<&str>,
        password_hash: &str,
    ) -> Result<Admin, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, AdminRow>(
            r"
            INSERT INTO shop.users (email, name, role)
            VALUES ($1, $2, $3)
            RETURNING id, email, name, created_at
            ",
        )
        .bind(email.as_str())
        .bind(name)
        .bind(UserRole::Admin)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| super::map_insert_error(e, "email already exists", "user"))?;

        sqlx::query(
            r"
            INSERT INTO shop.user_passwords (user_id, password_hash)
            VALUES ($1, $2)
            ",
        )
        .bind(row.id)
        .bind(password_hash)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Admin::try_from(row)
    }
}
