//! Redaction of secret credential parameters.
//!
//! Secrets are replaced by salted Argon2id hashes in PHC string format, so an
//! operator holding the expected value can still confirm what was sent with
//! [`verify`] without the plaintext ever reaching an error or a log.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use tracing::warn;

use crate::parameters::{Parameters, CLIENT_SECRET, PASSWORD};

/// Parameters whose values are hashed by [`obfuscate`].
pub const OBFUSCATED_PARAMETERS: &[&str] = &[CLIENT_SECRET, PASSWORD];

pub(crate) const REDACTED: &str = "[REDACTED]";

/// Return a copy of `parameters` with `client_secret` and `password` hashed.
///
/// All other entries are copied unchanged.
pub fn obfuscate(parameters: &Parameters) -> Parameters {
    let mut obfuscated = parameters.clone();
    for key in OBFUSCATED_PARAMETERS {
        if let Some(value) = obfuscated.get_mut(*key) {
            *value = hash_secret(value);
        }
    }
    obfuscated
}

/// Check a plaintext against a value produced by [`obfuscate`].
///
/// Comparison is constant-time. Returns false for anything that is not a
/// valid hash, including the `[REDACTED]` placeholder.
pub fn verify(plaintext: &str, obfuscated: &str) -> bool {
    match PasswordHash::new(obfuscated) {
        Ok(hash) => Argon2::default()
            .verify_password(plaintext.as_bytes(), &hash)
            .is_ok(),
        Err(_) => false,
    }
}

fn hash_secret(secret: &str) -> String {
    let salt = SaltString::generate(&mut OsRng);
    match Argon2::default().hash_password(secret.as_bytes(), &salt) {
        Ok(hash) => hash.to_string(),
        Err(e) => {
            warn!(error = %e, "Failed to hash secret parameter, redacting");
            REDACTED.to_string()
        }
    }
}
