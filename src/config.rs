use serde::Deserialize;
use tracing::warn;

/// Built-in fallback used when JWT_SECRET is absent. Kept so the process
/// still boots without configuration; any real deployment must set its own
/// secret, since tokens signed with this one can be forged by anyone.
const INSECURE_DEFAULT_SECRET: &str = "secret";

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_hours: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;

        let secret = match std::env::var("JWT_SECRET") {
            Ok(s) if !s.is_empty() => s,
            _ => {
                warn!("JWT_SECRET is not set; falling back to the insecure built-in default");
                INSECURE_DEFAULT_SECRET.to_string()
            }
        };

        let jwt = JwtConfig {
            secret,
            ttl_hours: std::env::var("JWT_TTL_HOURS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(24),
        };
        Ok(Self { database_url, jwt })
    }
}
