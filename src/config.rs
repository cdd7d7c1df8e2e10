//! Gateway configuration parsed from environment variables.

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5151";
pub const DEFAULT_SITE_DIR: &str = "site";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env var {var}")]
    MissingVar { var: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Port the gateway binds on.
    pub port: u16,
    /// Base URL of the remote marketplace API, without a trailing slash.
    pub api_base_url: String,
    /// HMAC secret shared with the API that signs session tokens.
    pub jwt_secret: String,
    /// Directory the static site (landing, auth and dashboard shells) is served from.
    pub site_dir: String,
}

impl GatewayConfig {
    /// Build typed gateway config from environment variables.
    ///
    /// Required:
    /// - `JWT_SECRET`
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `API_BASE_URL`: default `http://localhost:5151`
    /// - `SITE_DIR`: default `site`
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret =
            std::env::var("JWT_SECRET").map_err(|_| ConfigError::MissingVar { var: "JWT_SECRET" })?;

        Ok(Self {
            port: env_parse("PORT", DEFAULT_PORT),
            api_base_url: std::env::var("API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            jwt_secret,
            site_dir: std::env::var("SITE_DIR").unwrap_or_else(|_| DEFAULT_SITE_DIR.to_string()),
        })
    }
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
