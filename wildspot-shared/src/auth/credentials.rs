/// Credential verification
///
/// Implements the login contract: a username and password either resolve to
/// a user or fail. Unknown username and wrong password collapse into the
/// same [`CredentialError::InvalidCredentials`] so the client cannot
/// enumerate accounts.

use sqlx::PgPool;

use super::password;
use crate::models::user::User;

/// Error type for credential checks
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// Unknown username or wrong password — deliberately indistinguishable
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Stored hash could not be processed
    #[error("Password verification failed: {0}")]
    Password(#[from] password::PasswordError),

    /// Database lookup failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Authenticates a username + password pair
///
/// # Returns
///
/// The matching user on success.
///
/// # Errors
///
/// [`CredentialError::InvalidCredentials`] for both unknown users and wrong
/// passwords; other variants only for infrastructure failures.
///
/// # Example
///
/// ```no_run
/// use wildspot_shared::auth::credentials::{authenticate, CredentialError};
/// # use sqlx::PgPool;
/// # async fn example(pool: PgPool) {
/// match authenticate(&pool, "ranger", "wrong-password").await {
///     Ok(user) => println!("signed in {}", user.username),
///     Err(CredentialError::InvalidCredentials) => println!("try again"),
///     Err(e) => eprintln!("login unavailable: {}", e),
/// }
/// # }
/// ```
pub async fn authenticate(
    pool: &PgPool,
    username: &str,
    password: &str,
) -> Result<User, CredentialError> {
    let user = User::find_by_username(pool, username)
        .await?
        .ok_or(CredentialError::InvalidCredentials)?;

    let valid = password::verify_password(password, &user.password_hash)?;
    if !valid {
        return Err(CredentialError::InvalidCredentials);
    }

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_credentials_message_is_generic() {
        // The message must not reveal whether the username exists
        let msg = CredentialError::InvalidCredentials.to_string();
        assert_eq!(msg, "Invalid username or password");
        assert!(!msg.to_lowercase().contains("unknown"));
        assert!(!msg.to_lowercase().contains("not found"));
    }
}
