/// Authentication utilities
///
/// TaskLink has no login flow; this module only guarantees that user
/// passwords never reach the database in plaintext.
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing
///
/// # Example
///
/// ```
/// use tasklink_shared::auth::password::hash_password;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("Abcdef1!")?;
/// assert_ne!(hash, "Abcdef1!");
/// # Ok(())
/// # }
/// ```

pub mod password;
