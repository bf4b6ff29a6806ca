use pbkdf2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Pbkdf2,
};
use sha2::{Digest, Sha256};

/// Function to pre-hash a password with SHA-256 before the slow hash step
/// The fixed-length hex digest keeps arbitrarily long passwords within the
/// input limits of the underlying KDF
pub fn prepare_password(password: &str) -> String {
    let digest = Sha256::digest(password.as_bytes());
    hex::encode(digest)
}

/// Function to hash a password for storage
/// Returns a self-describing PHC string carrying the algorithm parameters,
/// salt and hash, ready for direct insertion into the user table
pub fn hash_password(password: &str) -> Result<String, String> {
    let prepared = prepare_password(password);
    let salt = SaltString::generate(&mut OsRng);

    Pbkdf2
        .hash_password(prepared.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| format!("Failed to hash password: {}", e))
}

/// Function to verify a password against a stored PHC string
/// Returns false on any mismatch, including a malformed stored value; the
/// underlying comparison is constant-time
pub fn verify_password(password: &str, stored: &str) -> bool {
    let parsed = match PasswordHash::new(stored) {
        Ok(parsed) => parsed,
        Err(_) => return false,
    };

    let prepared = prepare_password(password);
    Pbkdf2.verify_password(prepared.as_bytes(), &parsed).is_ok()
}
