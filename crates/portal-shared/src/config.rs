//! Configuration management

use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

use crate::error::AppError;
use crate::types::RoleId;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub redis: Option<RedisSettings>,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
    #[serde(default)]
    pub menu: MenuSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RedisSettings {
    pub url: String,
    pub max_connections: usize,
    #[serde(default = "default_cache_ttl")]
    pub ttl_seconds: u64,
}

fn default_cache_ttl() -> u64 {
    crate::constants::DEFAULT_MENU_CACHE_TTL_SECONDS
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct TelemetrySettings {
    #[serde(default)]
    pub format: LogFormat,
    /// Directory for daily rolling log files. Stdout only when unset.
    #[serde(default)]
    pub log_dir: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct MenuSettings {
    #[serde(default)]
    pub fallback: FallbackSettings,
}

/// Static menu served while the permission store is unreachable.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct FallbackSettings {
    /// Entries for any role without its own table.
    #[serde(default)]
    pub default: Vec<FallbackEntrySettings>,
    #[serde(default)]
    pub roles: Vec<RoleFallbackSettings>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RoleFallbackSettings {
    pub role_id: RoleId,
    pub entries: Vec<FallbackEntrySettings>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FallbackEntrySettings {
    pub key: String,
    pub label: String,
    pub path: String,
    #[serde(default)]
    pub icon: Option<String>,
    /// Key of the parent entry, if nested.
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub can_view: bool,
    #[serde(default)]
    pub can_create: bool,
    #[serde(default)]
    pub can_update: bool,
    #[serde(default)]
    pub can_delete: bool,
}

impl AppConfig {
    pub fn load() -> Result<Self, AppError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Builds a configuration from an inline TOML document on top of the defaults.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Self::defaults()?
            .add_source(File::from_str(contents, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 8080)?
            .set_default("app.name", "portal-server")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)
    }
}
