use bcrypt::{hash, verify, DEFAULT_COST};
use tracing::error;

/// Hash a plaintext password with bcrypt at cost 12. The random salt lives
/// inside the returned hash string, so two calls over the same input differ.
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let hashed = hash(plain, DEFAULT_COST).map_err(|e| {
        error!(error = %e, "bcrypt hash error");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(hashed)
}

/// Check a plaintext password against a stored hash. A wrong password is
/// `Ok(false)`; only a malformed stored hash is an error.
pub fn verify_password(plain: &str, hashed: &str) -> anyhow::Result<bool> {
    let ok = verify(plain, hashed).map_err(|e| {
        error!(error = %e, "bcrypt verify error");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(ok)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let password = "Secur3P@ssw0rd!";
        let hash = hash_password(password).expect("hashing should succeed");
        assert!(verify_password(password, &hash).expect("verify should succeed"));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let password = "correct-horse-battery-staple";
        let hash = hash_password(password).expect("hashing should succeed");
        assert!(!verify_password("wrong-password", &hash).expect("verify should not error"));
    }

    #[test]
    fn hashes_are_salted_per_call() {
        let first = hash_password("same-input").expect("hashing should succeed");
        let second = hash_password("same-input").expect("hashing should succeed");
        assert_ne!(first, second);
        assert!(verify_password("same-input", &first).unwrap());
        assert!(verify_password("same-input", &second).unwrap());
    }

    #[test]
    fn hash_uses_cost_factor_12() {
        let hash = hash_password("anything").expect("hashing should succeed");
        // bcrypt output embeds the cost: $2b$12$...
        assert!(hash.starts_with("$2b$12$"), "unexpected hash prefix: {hash}");
    }

    #[test]
    fn verify_errors_on_malformed_hash() {
        let err = verify_password("anything", "not-a-valid-hash").unwrap_err();
        assert!(!err.to_string().is_empty());
    }
}
