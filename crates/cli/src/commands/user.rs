//! User management commands.
//!
//! Users are created through the same validation and hashing as web signup.

use grocery_core::{UserId, Username};
use grocery_web::services::auth::{AuthError, AuthService};

use super::{CliError, connect};

/// Create a new user.
///
/// # Returns
///
/// The ID of the created user.
pub async fn create(username: &str, password: &str) -> Result<UserId, CliError> {
    let username = Username::parse(username).map_err(AuthError::from)?;
    let pool = connect().await?;

    let user = AuthService::new(&pool).signup(&username, password).await?;

    tracing::info!(
        "User created successfully! ID: {}, Username: {}",
        user.id,
        user.username
    );
    Ok(user.id)
}
