use crate::{Result, CONFIG};
use bcrypt::{hash, verify};

/// Hashes a plaintext password with the configured bcrypt cost
pub fn hash_password(password: &str) -> Result<String> {
    hash_password_with_cost(password, CONFIG.bcrypt_cost)
}

/// Checks a plaintext password against a stored bcrypt hash
pub fn verify_password(password: &str, hashed: &str) -> Result<bool> {
    verify(password, hashed).map_err(Into::into)
}

fn hash_password_with_cost(password: &str, cost: u32) -> Result<String> {
    hash(password, cost).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Low cost keeps the test fast; production cost comes from config
    const TEST_COST: u32 = 4;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hashed = hash_password_with_cost("correct horse battery", TEST_COST).unwrap();
        assert_ne!(hashed, "correct horse battery");
        assert!(verify_password("correct horse battery", &hashed).unwrap());
        assert!(!verify_password("wrong password", &hashed).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password_with_cost("same password", TEST_COST).unwrap();
        let second = hash_password_with_cost("same password", TEST_COST).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        assert!(verify_password("anything", "not-a-bcrypt-hash").is_err());
    }
}
