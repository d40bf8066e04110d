use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use std::sync::OnceLock;
use uuid::Uuid;

use super::AuthError;

/// Hash a password into an argon2 PHC string.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::encode_b64(Uuid::new_v4().as_bytes())
        .map_err(|e| AuthError::Hash(e.to_string()))?;
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hash(e.to_string()))
}

/// Check a password against a stored PHC string.
pub fn verify_password(password: &str, phc: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(phc).map_err(|e| AuthError::Hash(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();

/// Verify `password` against a throwaway hash, so a login for an unknown
/// email costs the same argon2 work as one for a known email.
pub fn verify_against_dummy(password: &str) {
    let dummy = DUMMY_HASH.get_or_init(|| hash_password("reservas-unknown-account").ok());
    if let Some(phc) = dummy {
        let _ = verify_password(password, phc);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let phc = hash_password("segredo123").unwrap();
        assert!(phc.starts_with("$argon2"));
        assert!(verify_password("segredo123", &phc).unwrap());
        assert!(!verify_password("segredo124", &phc).unwrap());
    }

    #[test]
    fn salts_differ() {
        assert_ne!(hash_password("x").unwrap(), hash_password("x").unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(matches!(
            verify_password("x", "not-a-hash"),
            Err(AuthError::Hash(_))
        ));
    }

    #[test]
    fn dummy_verification_hashes_once() {
        verify_against_dummy("qualquer");
        let phc = DUMMY_HASH.get().cloned().flatten().unwrap();
        assert!(phc.starts_with("$argon2"));

        verify_against_dummy("outra");
        assert_eq!(DUMMY_HASH.get().cloned().flatten(), Some(phc));
    }
}
