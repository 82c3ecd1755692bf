/// Authentication and authorization utilities
///
/// This module provides the security primitives for Wildspot:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and validation
/// - [`token`]: Session token generation and keyed hashing
/// - [`credentials`]: Username + password verification
/// - [`authorization`]: Ownership rules for campgrounds and reviews
///
/// # Security Features
///
/// - **Password Hashing**: Argon2id with 64 MB memory, 3 iterations
/// - **Session Tokens**: 32-char random tokens, stored only as a keyed
///   SHA-256 digest
/// - **Credential Failures**: unknown user and wrong password are
///   indistinguishable to the client
///
/// # Example
///
/// ```no_run
/// use wildspot_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
/// # Ok(())
/// # }
/// ```

pub mod authorization;
pub mod credentials;
pub mod password;
pub mod token;
