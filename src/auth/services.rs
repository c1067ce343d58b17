use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, warn};

use crate::{
    accounts::{Account, AccountStore},
    auth::password::{verify_decoy, verify_password},
    error::ApiError,
};

pub fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// The account owning `email`, if `plain` is its password.
///
/// Unknown email and wrong password both give `Ok(None)` so callers
/// cannot tell them apart.
pub async fn authenticate(
    store: &dyn AccountStore,
    email: &str,
    plain: &str,
) -> Result<Option<Account>, ApiError> {
    let email = normalize_email(email);
    let Some(account) = store.find_by_email(&email).await? else {
        verify_decoy(plain);
        warn!(email = %email, "login unknown email");
        return Ok(None);
    };

    if !verify_password(plain, &account.password_hash)? {
        warn!(account_id = account.id, "login invalid password");
        return Ok(None);
    }

    debug!(account_id = account.id, "credentials accepted");
    Ok(Some(account))
}
