use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, bail, Result};
use chrono::Duration;

use crate::tokenize::TokenSigner;

pub const DEFAULT_TOKENIZE_SECRET: &str = "agrirecords-dev-tokenize-secret";
pub const DEFAULT_APP_SECRET: &str = "agrirecords-dev-app-secret";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" | "local" | "test" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(anyhow!("Unknown environment '{}'", other)),
        }
    }
}

/// Bootstrap administrator created by `seed-admin`.
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub username: String,
    pub email: String,
    pub password: Option<String>,
    pub role_name: String,
}

impl Default for AdminSeed {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            email: "admin@agrirecords.local".to_string(),
            password: None,
            role_name: "Administrator".to_string(),
        }
    }
}

/// Runtime configuration, built once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    /// Key for tokenized request/response payloads.
    pub tokenize_secret: String,
    /// Key for session tokens handed out by `logIn`.
    pub app_secret: String,
    /// Lifetime of tokenized payloads; `None` disables the `exp` claim.
    pub token_ttl: Option<Duration>,
    pub session_ttl: Duration,
    /// Where exported workbooks are also written, one file per table.
    pub export_dir: Option<PathBuf>,
    pub admin: AdminSeed,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            tokenize_secret: DEFAULT_TOKENIZE_SECRET.to_string(),
            app_secret: DEFAULT_APP_SECRET.to_string(),
            token_ttl: Some(Duration::hours(1)),
            session_ttl: Duration::hours(24),
            export_dir: None,
            admin: AdminSeed::default(),
        }
    }
}

impl AppConfig {
    /// Read `AGRIRECORDS_*` variables over the defaults.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(value) = std::env::var("AGRIRECORDS_ENV") {
            config.environment = value.parse()?;
        }
        if let Ok(value) = std::env::var("AGRIRECORDS_TOKENIZE_SECRET") {
            config.tokenize_secret = value;
        }
        if let Ok(value) = std::env::var("AGRIRECORDS_APP_SECRET") {
            config.app_secret = value;
        }
        if let Ok(value) = std::env::var("AGRIRECORDS_TOKEN_TTL_SECS") {
            let secs: i64 = value
                .trim()
                .parse()
                .map_err(|e| anyhow!("Invalid AGRIRECORDS_TOKEN_TTL_SECS: {}", e))?;
            // 0 turns expiry off
            config.token_ttl = (secs > 0).then(|| Duration::seconds(secs));
        }
        if let Ok(value) = std::env::var("AGRIRECORDS_SESSION_TTL_HOURS") {
            let hours: i64 = value
                .trim()
                .parse()
                .map_err(|e| anyhow!("Invalid AGRIRECORDS_SESSION_TTL_HOURS: {}", e))?;
            config.session_ttl = Duration::hours(hours.max(1));
        }
        config.export_dir = std::env::var("AGRIRECORDS_EXPORT_DIR")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        if let Ok(value) = std::env::var("AGRIRECORDS_ADMIN_USERNAME") {
            config.admin.username = value;
        }
        if let Ok(value) = std::env::var("AGRIRECORDS_ADMIN_EMAIL") {
            config.admin.email = value;
        }
        config.admin.password = std::env::var("AGRIRECORDS_ADMIN_PASSWORD").ok();

        Ok(config)
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Reject configurations that must never reach production.
    pub fn validate(&self) -> Result<()> {
        if self.tokenize_secret.is_empty() || self.app_secret.is_empty() {
            bail!("Signing secrets must not be empty");
        }
        if self.is_production() {
            if self.tokenize_secret == DEFAULT_TOKENIZE_SECRET {
                bail!("AGRIRECORDS_TOKENIZE_SECRET must be set in production");
            }
            if self.app_secret == DEFAULT_APP_SECRET {
                bail!("AGRIRECORDS_APP_SECRET must be set in production");
            }
            if self.tokenize_secret == self.app_secret {
                bail!("Tokenize and app secrets must differ in production");
            }
        }
        Ok(())
    }

    pub fn tokenize_signer(&self) -> TokenSigner {
        TokenSigner::new(&self.tokenize_secret, self.token_ttl)
    }

    pub fn session_signer(&self) -> TokenSigner {
        TokenSigner::new(&self.app_secret, Some(self.session_ttl))
    }
}
