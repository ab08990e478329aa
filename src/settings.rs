use config::{Config, ConfigError, Environment, File};
use derive_more::Display;
use serde::Deserialize;
use dotenv::dotenv;
use jsonwebtoken::{DecodingKey, EncodingKey};
use std::{env, fmt, str::FromStr};
use zeroize::Zeroizing;

#[derive(Debug, Display, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    #[display("development")]
    Development,
    #[display("production")]
    Production,
    #[display("testing")]
    Testing,
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(AppEnvironment::Development),
            "production" => Ok(AppEnvironment::Production),
            "testing" => Ok(AppEnvironment::Testing),
            _ => Err(ConfigError::Message(format!("Invalid environment: {}", s))),
        }
    }
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: AppEnvironment,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    #[serde(default)]
    pub database_url: String,

    /// Public base URL used when building signed self-service links.
    #[serde(default = "default_base_url")]
    pub public_base_url: String,

    /// HMAC secret for signed update-form links.
    #[serde(default)]
    pub link_signing_secret: String,

    /// How long an emailed update link stays valid.
    #[serde(default = "default_link_expiry")]
    pub link_expiry_days: i64,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_name() -> String {
    "Alumni-Tracker-API".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_worker_count() -> usize {
    num_cpus::get()
}
fn default_base_url() -> String {
    "http://127.0.0.1:8080".to_string()
}
fn default_link_expiry() -> i64 {
    14
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let raw_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let env_name = AppEnvironment::from_str(&raw_env)
            .map_err(|_| ConfigError::Message(format!("Invalid APP_ENV value: {}", raw_env)))?;

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{env_name}")).required(false))
            // Nesting separator must not collide with the snake_case field
            // names, or APP_PUBLIC_BASE_URL would map to `public.base.url`.
            .add_source(Environment::with_prefix("APP").separator("__").ignore_empty(true));

        let mut config: Self = builder.build()?.try_deserialize()?;

        config.env = env_name;

        // Inject critical env values if missing
        config.database_url = fill_or_env(config.database_url, "APP_DATABASE_URL")?;
        config.link_signing_secret = fill_or_env(config.link_signing_secret, "APP_LINK_SIGNING_SECRET")?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.database_url.trim().is_empty() {
            errors.push("DATABASE_URL cannot be empty");
        }
        if self.link_signing_secret.len() < 32 {
            errors.push("LINK_SIGNING_SECRET must be at least 32 characters");
        }
        if self.link_expiry_days <= 0 {
            errors.push("LINK_EXPIRY_DAYS must be positive");
        }
        if url::Url::parse(&self.public_base_url).is_err() {
            errors.push("PUBLIC_BASE_URL must be a valid URL");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnvironment::Production
    }
}

fn fill_or_env(current: String, env_key: &str) -> Result<String, ConfigError> {
    if current.trim().is_empty() {
        env::var(env_key).map_err(|_| ConfigError::Message(format!("{env_key} must be set")))
    } else {
        Ok(current)
    }
}

trait Redact {
    fn redact(&self) -> &str;
}

impl Redact for str {
    fn redact(&self) -> &str {
        if self.is_empty() {
            "[MISSING]"
        } else if self.len() < 32 {
            "[TOO_SHORT]"
        } else {
            "[REDACTED]"
        }
    }
}

impl Redact for String {
    fn redact(&self) -> &str {
        self.as_str().redact()
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("name", &self.name)
            .field("port", &self.port)
            .field("host", &self.host)
            .field("worker_count", &self.worker_count)
            .field("database_url", &self.database_url.redact())
            .field("public_base_url", &self.public_base_url)
            .field("link_signing_secret", &self.link_signing_secret.redact())
            .field("link_expiry_days", &self.link_expiry_days)
            .finish()
    }
}

#[derive(Clone)]
pub struct LinkKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
}

impl From<&AppConfig> for LinkKeys {
    fn from(config: &AppConfig) -> Self {
        let secret = Zeroizing::new(config.link_signing_secret.clone());

        LinkKeys {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

impl fmt::Debug for LinkKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkKeys")
            .field("encoding", &"[REDACTED]")
            .field("decoding", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_env_vars_populate_every_setting() {
        unsafe {
            env::set_var("APP_DATABASE_URL", "postgres://localhost/alumni");
            env::set_var("APP_LINK_SIGNING_SECRET", "0123456789abcdef0123456789abcdef");
            env::set_var("APP_PUBLIC_BASE_URL", "https://alumni.example.edu");
            env::set_var("APP_LINK_EXPIRY_DAYS", "7");
            env::set_var("APP_PORT", "9090");
        }

        let config = AppConfig::new().expect("config loads from flat env vars");

        assert_eq!(config.database_url, "postgres://localhost/alumni");
        assert_eq!(config.public_base_url, "https://alumni.example.edu");
        assert_eq!(config.link_expiry_days, 7);
        assert_eq!(config.port, 9090);
    }
}
