//! Admin user management commands.
//!
//! Accounts are created through the admin crate's auth service, so the CLI
//! applies the same email and password rules as the API.

use storehaus_admin::services::AdminAuthService;

use super::{CommandError, connect};

/// Create a new admin user and return its id.
///
/// # Errors
///
/// Returns `CommandError::Admin` for an invalid email, a short password or an
/// existing account.
pub async fn create_user(
    email: &str,
    name: Option<&str>,
    password: &str,
) -> Result<i32, CommandError> {
    let pool = connect().await?;

    tracing::info!("Creating admin user: {}", email);
    let admin = AdminAuthService::new(&pool)
        .create_admin(email, name, password)
        .await?;

    tracing::info!(
        "Admin user created successfully! ID: {}, Email: {}",
        admin.id,
        admin.email
    );
    Ok(admin.id.as_i32())
}
