use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use tracing::debug;

use crate::config::JwtConfig;

pub const ACCESS_TOKEN_TYPE: &str = "access_token";

/// JWT payload. `sub` is the account id as a decimal string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "type")]
    pub kind: String,
    pub exp: i64,
    pub iat: i64,
    pub sub: String,
}

/// Signing and verification keys plus the configured lifetime.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

impl JwtKeys {
    pub fn new(cfg: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            algorithm: cfg.algorithm,
            ttl: Duration::minutes(cfg.ttl_minutes),
        }
    }

    /// Token for `account_id` with the configured lifetime.
    pub fn issue_access_token(&self, account_id: i32) -> anyhow::Result<String> {
        self.issue_token(account_id, self.ttl)
    }

    pub fn issue_token(&self, account_id: i32, expiry: Duration) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let expires_at = now
            .checked_add(expiry)
            .ok_or_else(|| anyhow::anyhow!("token expiry {expiry} is out of range"))?;
        let claims = Claims {
            kind: ACCESS_TOKEN_TYPE.to_string(),
            exp: expires_at.unix_timestamp(),
            iat: now.unix_timestamp(),
            sub: account_id.to_string(),
        };
        let token = encode(&Header::new(self.algorithm), &claims, &self.encoding)?;
        debug!(account_id, "jwt signed");
        Ok(token)
    }

    /// Checks signature, algorithm, expiry and token type; returns the account id.
    pub fn resolve_token(&self, token: &str) -> anyhow::Result<i32> {
        let validation = Validation::new(self.algorithm);
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        if data.claims.kind != ACCESS_TOKEN_TYPE {
            anyhow::bail!("not an access token");
        }
        let account_id = data
            .claims
            .sub
            .parse::<i32>()
            .map_err(|_| anyhow::anyhow!("subject is not an account id"))?;
        debug!(account_id, "jwt verified");
        Ok(account_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_keys(secret: &str) -> JwtKeys {
        JwtKeys::new(&JwtConfig {
            secret: secret.into(),
            algorithm: Algorithm::HS256,
            ttl_minutes: crate::config::DEFAULT_TOKEN_TTL_MINUTES,
        })
    }

    #[test]
    fn issue_and_resolve_access_token() {
        let keys = make_keys("dev-secret");
        let token = keys.issue_access_token(42).expect("sign");
        assert_eq!(keys.resolve_token(&token).expect("verify"), 42);
    }

    #[test]
    fn claims_carry_type_subject_and_week_long_expiry() {
        let keys = make_keys("dev-secret");
        let token = keys.issue_access_token(1).expect("sign");

        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        let claims = decode::<Claims>(&token, &DecodingKey::from_secret(b""), &validation)
            .expect("decode")
            .claims;

        assert_eq!(claims.kind, "access_token");
        assert_eq!(claims.sub, "1");
        assert_eq!(claims.exp - claims.iat, 60 * 60 * 24 * 7);
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = make_keys("dev-secret");
        let token = keys.issue_token(7, Duration::minutes(-10)).expect("sign");
        assert!(keys.resolve_token(&token).is_err());
    }

    #[test]
    fn out_of_range_expiry_is_an_error() {
        let err = make_keys("dev-secret")
            .issue_token(7, Duration::MAX)
            .unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = make_keys("secret-a").issue_access_token(7).expect("sign");
        assert!(make_keys("secret-b").resolve_token(&token).is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(make_keys("dev-secret").resolve_token("not.a.jwt").is_err());
    }

    #[test]
    fn wrong_token_type_is_rejected() {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let claims = Claims {
            kind: "refresh_token".into(),
            exp: now + 600,
            iat: now,
            sub: "7".into(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"dev-secret"),
        )
        .expect("sign");
        let err = make_keys("dev-secret").resolve_token(&token).unwrap_err();
        assert!(err.to_string().contains("not an access token"));
    }
}
