use rand::Rng;

use crate::errors::ApiError;

/// Fixed bcrypt work factor. Kept constant so hashing cost is reproducible
/// across environments.
const BCRYPT_COST: u32 = 10;

/// Hash a plaintext password with bcrypt. Each call salts independently, so
/// hashing the same password twice yields different strings.
pub fn hash_password(plain: &str) -> Result<String, ApiError> {
    bcrypt::hash(plain, BCRYPT_COST)
        .map_err(|e| ApiError::internal(format!("password hashing failed: {}", e)))
}

/// Verify a plaintext password against a stored bcrypt hash.
///
/// Returns false for a mismatch or an unparseable hash; a legitimate bad
/// password is never an error.
pub fn verify_password(plain: &str, hash: &str) -> bool {
    bcrypt::verify(plain, hash).unwrap_or(false)
}

/// Generate a random password for accounts created through federated login.
///
/// 20 characters drawn from upper/lower case letters, digits and symbols.
/// The plaintext is hashed and discarded, so these accounts have no usable
/// local-login password until one is explicitly set.
pub fn generate_random_password() -> String {
    const PASSWORD_LENGTH: usize = 20;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                             abcdefghijklmnopqrstuvwxyz\
                             0123456789\
                             !@#$%^&*()_+-=[]{}|;:,.<>?";

    let mut rng = rand::rng();
    (0..PASSWORD_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_never_returns_plaintext() {
        let hash = hash_password("secret1").unwrap();

        assert_ne!(hash, "secret1");
        assert!(hash.starts_with("$2"));
    }

    #[test]
    fn test_hash_password_salts_every_call() {
        let first = hash_password("secret1").unwrap();
        let second = hash_password("secret1").unwrap();

        assert_ne!(first, second);
        assert!(verify_password("secret1", &first));
        assert!(verify_password("secret1", &second));
    }

    #[test]
    fn test_verify_password_rejects_wrong_password() {
        let hash = hash_password("secret1").unwrap();

        assert!(!verify_password("secret2", &hash));
    }

    #[test]
    fn test_verify_password_rejects_malformed_hash() {
        assert!(!verify_password("secret1", "not-a-bcrypt-hash"));
    }

    #[test]
    fn test_generate_random_password_length() {
        let password = generate_random_password();
        assert_eq!(password.len(), 20);
    }

    #[test]
    fn test_generate_random_password_contains_valid_characters() {
        let password = generate_random_password();

        assert!(password.chars().all(|c| {
            c.is_ascii_alphanumeric() || "!@#$%^&*()_+-=[]{}|;:,.<>?".contains(c)
        }));
    }

    #[test]
    fn test_generate_random_password_uniqueness() {
        let password1 = generate_random_password();
        let password2 = generate_random_password();

        assert_ne!(password1, password2);
    }
}
