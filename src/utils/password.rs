use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

/// Upper bound on accepted password length, in bytes.
const MAX_LEN: usize = 64;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password length must be between 1 and {MAX_LEN} bytes")]
    InvalidLength,

    #[error("password hashing failed: {0}")]
    Hashing(argon2::password_hash::Error),

    /// The stored credential is not a valid PHC string.
    #[error("malformed stored hash: {0}")]
    MalformedHash(argon2::password_hash::Error),
}

fn check_length(password: &str) -> Result<(), PasswordError> {
    if password.is_empty() || password.len() > MAX_LEN {
        return Err(PasswordError::InvalidLength);
    }
    Ok(())
}

/// Hashes a password with a fresh per-hash salt into a PHC string.
pub fn hash(password: &str) -> Result<String, PasswordError> {
    check_length(password)?;
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hashed| hashed.to_string())
        .map_err(PasswordError::Hashing)
}

/// Checks a candidate password against a stored PHC string.
pub fn verify(password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
    check_length(password)?;
    let parsed = PasswordHash::new(stored_hash).map_err(PasswordError::MalformedHash)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let hashed = hash("secret123").unwrap();
        assert!(verify("secret123", &hashed).unwrap());
        assert!(!verify("wrong-password", &hashed).unwrap());
    }

    #[test]
    fn repeated_hashes_use_fresh_salts() {
        assert_ne!(hash("secret123").unwrap(), hash("secret123").unwrap());
    }

    #[test]
    fn out_of_range_lengths_are_rejected() {
        assert!(matches!(hash(""), Err(PasswordError::InvalidLength)));
        let long = "x".repeat(MAX_LEN + 1);
        assert!(matches!(hash(&long), Err(PasswordError::InvalidLength)));
        assert!(matches!(
            verify("", "whatever"),
            Err(PasswordError::InvalidLength)
        ));
    }

    #[test]
    fn malformed_stored_hash_is_an_error() {
        assert!(matches!(
            verify("secret123", "not-a-phc-string"),
            Err(PasswordError::MalformedHash(_))
        ));
    }
}
