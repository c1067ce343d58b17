use std::str::FromStr;

use jsonwebtoken::Algorithm;

/// 60 minutes * 24 hours * 7 days => one week
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 60 * 24 * 7;

/// Ten years. Keeps `iat + ttl` inside the range of a token timestamp.
pub const MAX_TOKEN_TTL_MINUTES: i64 = 60 * 24 * 365 * 10;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub algorithm: Algorithm,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub db_max_connections: u32,
    pub api_prefix: String,
    pub host: String,
    pub port: u16,
    pub jwt: JwtConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source; `from_env` passes the process environment.
    pub fn from_lookup<F>(get: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url =
            get("DATABASE_URL").ok_or_else(|| anyhow::anyhow!("DATABASE_URL is not set"))?;
        let secret = get("JWT_SECRET").ok_or_else(|| anyhow::anyhow!("JWT_SECRET is not set"))?;
        if secret.is_empty() {
            anyhow::bail!("JWT_SECRET must not be empty");
        }

        let algorithm = match get("JWT_ALGORITHM") {
            Some(name) => parse_hmac_algorithm(&name)?,
            None => Algorithm::HS256,
        };

        let ttl_minutes = parse_or("ACCESS_TOKEN_EXPIRE_MINUTES", &get, DEFAULT_TOKEN_TTL_MINUTES)?;
        if ttl_minutes <= 0 {
            anyhow::bail!("ACCESS_TOKEN_EXPIRE_MINUTES must be positive");
        }
        if ttl_minutes > MAX_TOKEN_TTL_MINUTES {
            anyhow::bail!(
                "ACCESS_TOKEN_EXPIRE_MINUTES={ttl_minutes} exceeds the {MAX_TOKEN_TTL_MINUTES} minute limit"
            );
        }

        let mut api_prefix = get("API_V1_STR").unwrap_or_else(|| "/api/v1".into());
        while api_prefix.ends_with('/') {
            api_prefix.pop();
        }
        if !api_prefix.is_empty() && !api_prefix.starts_with('/') {
            api_prefix.insert(0, '/');
        }

        Ok(Self {
            database_url,
            db_max_connections: parse_or("DB_MAX_CONNECTIONS", &get, 10)?,
            api_prefix,
            host: get("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_or("APP_PORT", &get, 8080)?,
            jwt: JwtConfig {
                secret,
                algorithm,
                ttl_minutes,
            },
        })
    }
}

fn parse_or<T, F>(key: &str, get: &F, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("invalid {key}={raw:?}: {e}")),
        None => Ok(default),
    }
}

/// Only shared-secret algorithms make sense for a single symmetric key.
fn parse_hmac_algorithm(name: &str) -> anyhow::Result<Algorithm> {
    let algorithm = Algorithm::from_str(name.trim())
        .map_err(|e| anyhow::anyhow!("invalid JWT_ALGORITHM {name:?}: {e}"))?;
    match algorithm {
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Ok(algorithm),
        other => anyhow::bail!("JWT_ALGORITHM {other:?} needs a key pair, only HS256/HS384/HS512 are supported"),
    }
}
