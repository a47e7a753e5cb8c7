use anyhow::Context;
use serde::Deserialize;

/// Upper bound for token lifetimes (ten years).
pub const MAX_TTL_MINUTES: i64 = 60 * 24 * 365 * 10;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub refresh_ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub jwt: JwtConfig,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

/// Parses a token lifetime in minutes; must be in `1..=MAX_TTL_MINUTES`.
fn ttl_minutes(key: &str, raw: Option<String>, default: i64) -> anyhow::Result<i64> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    let minutes = raw
        .trim()
        .parse::<i64>()
        .with_context(|| format!("{key} must be an integer, got {raw:?}"))?;
    anyhow::ensure!(
        (1..=MAX_TTL_MINUTES).contains(&minutes),
        "{key} must be between 1 and {MAX_TTL_MINUTES}, got {minutes}"
    );
    Ok(minutes)
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "questboard".into()),
            audience: std::env::var("JWT_AUDIENCE")
                .unwrap_or_else(|_| "questboard-users".into()),
            ttl_minutes: ttl_minutes(
                "JWT_TTL_MINUTES",
                std::env::var("JWT_TTL_MINUTES").ok(),
                60,
            )?,
            refresh_ttl_minutes: ttl_minutes(
                "JWT_REFRESH_TTL_MINUTES",
                std::env::var("JWT_REFRESH_TTL_MINUTES").ok(),
                60 * 24 * 14,
            )?,
        };
        Ok(Self {
            database_url,
            database_max_connections: env_or("DATABASE_MAX_CONNECTIONS", 10),
            jwt,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ttl_defaults_when_unset() {
        assert_eq!(ttl_minutes("JWT_TTL_MINUTES", None, 60).unwrap(), 60);
    }

    #[test]
    fn ttl_accepts_positive_minutes() {
        assert_eq!(
            ttl_minutes("JWT_TTL_MINUTES", Some(" 15 ".into()), 60).unwrap(),
            15
        );
    }

    #[test]
    fn ttl_rejects_non_positive_or_garbage() {
        for raw in ["0", "-5", "abc", "99999999999999"] {
            let err = ttl_minutes("JWT_TTL_MINUTES", Some(raw.into()), 60).unwrap_err();
            assert!(err.to_string().contains("JWT_TTL_MINUTES"), "{raw}: {err}");
        }
    }
}
