use argon2::{
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use lazy_static::lazy_static;
use rand::rngs::OsRng;
use tracing::error;

lazy_static! {
    /// Stand-in hash checked when no account matches, so a login for an
    /// unknown email costs the same argon2 run as a wrong password.
    static ref DECOY_HASH: Option<String> = hash_password("decoy-senha-para-email-desconhecido").ok();
}

/// Salted Argon2 hash in PHC string format, stored in `usuarios.senha`.
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            error!(error = %e, "could not hash account password");
            anyhow::anyhow!("could not hash account password: {e}")
        })
}

/// `Ok(false)` on mismatch; `Err` if the stored hash is unreadable.
pub fn verify_password(plain: &str, stored: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(stored).map_err(|e| {
        error!(error = %e, "stored account hash is not a PHC string");
        anyhow::anyhow!("stored account hash is not a PHC string: {e}")
    })?;
    match Argon2::default().verify_password(plain.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => {
            error!(error = %e, "could not verify account password");
            Err(anyhow::anyhow!("could not verify account password: {e}"))
        }
    }
}

#[cfg(test)]
pub static DECOY_CHECKS: std::sync::atomic::AtomicUsize = std::sync::atomic::AtomicUsize::new(0);

/// Burns one verification against the decoy hash. Always mismatches.
pub fn verify_decoy(plain: &str) {
    if let Some(decoy) = DECOY_HASH.as_deref() {
        let _ = verify_password(plain, decoy);
        #[cfg(test)]
        DECOY_CHECKS.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }
}
