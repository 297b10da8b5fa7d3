//! Argon2 password hashing.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

/// Hash a plaintext password with a fresh random salt.
pub fn hash(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored hash.
///
/// Malformed stored hashes count as a failed verification.
pub fn verify(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify() {
        let hashed = hash("s3cret").expect("hash");
        assert!(verify("s3cret", &hashed));
        assert!(!verify("wrong", &hashed));
    }

    #[test]
    fn same_password_hashes_differently() {
        let a = hash("s3cret").expect("hash");
        let b = hash("s3cret").expect("hash");
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_hash_fails_verification() {
        assert!(!verify("s3cret", "not-a-phc-string"));
    }
}
