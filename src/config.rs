/*
 * Responsibility
 * - 環境変数や設定の読み込み (DATABASE_URL, JWT/Auth 設定, CORS 許可など)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use jsonwebtoken::Algorithm;

// Development fallback only. Production requires SECRET_KEY via env.
const DEV_SECRET_KEY: &str = "dev-only-secret-key-do-not-use-in-prod";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub secret_key: String,
    pub algorithm: Algorithm,
    pub access_token_ttl_minutes: u64,
    pub access_token_leeway_seconds: u64,
    pub issuer: String,
    pub audience: String,

    // Paths exempt from the authorization gate (exact or prefix match)
    pub public_paths: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let app_env = AppEnv::from_env();

        let cors_allowed_origins = csv_env("CORS_ALLOWED_ORIGINS");

        let secret_key = match std::env::var("SECRET_KEY") {
            Ok(s) => s,
            Err(_) if !app_env.is_production() => DEV_SECRET_KEY.to_string(),
            Err(_) => return Err(ConfigError::Missing("SECRET_KEY")),
        };
        // Symmetric HMAC key must not be guessable in production.
        if app_env.is_production() && secret_key.len() < 32 {
            return Err(ConfigError::Invalid("SECRET_KEY"));
        }

        let algorithm = std::env::var("JWT_ALGORITHM")
            .unwrap_or_else(|_| "HS256".to_string())
            .parse::<Algorithm>()
            .map_err(|_| ConfigError::Invalid("JWT_ALGORITHM"))?;

        let access_token_ttl_minutes = std::env::var("ACCESS_TOKEN_EXPIRE_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        let access_token_leeway_seconds = std::env::var("ACCESS_TOKEN_LEEWAY_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);

        let issuer = std::env::var("JWT_ISSUER").unwrap_or_else(|_| "app".to_string());
        let audience = std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "app".to_string());

        let mut public_paths = csv_env("PUBLIC_PATHS");
        if public_paths.is_empty() {
            public_paths = vec!["/health".to_string(), "/api/auth".to_string()];
        }

        Ok(Self {
            addr,
            database_url,
            app_env,
            cors_allowed_origins,
            secret_key,
            algorithm,
            access_token_ttl_minutes,
            access_token_leeway_seconds,
            issuer,
            audience,
            public_paths,
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print the secret key
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("algorithm", &self.algorithm)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("access_token_ttl_minutes", &self.access_token_ttl_minutes)
            .field("public_paths", &self.public_paths)
            .finish()
    }
}

fn csv_env(key: &str) -> Vec<String> {
    std::env::var(key)
        .unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
