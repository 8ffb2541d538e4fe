use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Front-end origin allowed by CORS (credentials included)
    pub cors_origin: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://database.db".to_string(),
            max_connections: 5,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
    /// Create the `admin` and `editor` accounts on startup if missing
    #[serde(default)]
    pub seed_default_users: bool,
}

fn default_token_ttl_hours() -> i64 {
    24
}

impl AppConfig {
    /// Load `config/<env>.yaml`, then apply environment overrides.
    pub fn load(env: &str) -> Result<Self> {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path))?;
        let mut config = Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path))?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Override selected settings from a key lookup (normally the process environment).
    ///
    /// Recognised keys: `PORT`, `DATABASE_URL`, `JWT_SECRET`, `CORS_ORIGIN`.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            match port.parse() {
                Ok(p) => self.server.port = p,
                Err(_) => tracing::warn!("Ignoring invalid PORT override: {}", port),
            }
        }
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(secret) = lookup("JWT_SECRET") {
            self.auth.jwt_secret = secret;
        }
        if let Some(origin) = lookup("CORS_ORIGIN") {
            self.server.cors_origin = origin;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SAMPLE: &str = r#"
log_level: info
log_dir: ./logs
log_file: storefront.log
use_json: false
rotation: daily
server:
  host: 0.0.0.0
  port: 3000
  cors_origin: http://localhost:5173
auth:
  jwt_secret: change-me
"#;

    #[test]
    fn test_parse_with_defaults() {
        let config = AppConfig::from_yaml(SAMPLE).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.url, "sqlite://database.db");
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.auth.token_ttl_hours, 24);
        assert!(!config.auth.seed_default_users);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::from_yaml(SAMPLE).unwrap();
        let env: HashMap<&str, &str> = [
            ("PORT", "8081"),
            ("JWT_SECRET", "s3cret"),
            ("DATABASE_URL", "sqlite::memory:"),
        ]
        .into_iter()
        .collect();

        config.apply_overrides(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.server.port, 8081);
        assert_eq!(config.auth.jwt_secret, "s3cret");
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.server.cors_origin, "http://localhost:5173");
    }

    #[test]
    fn test_invalid_port_override_is_ignored() {
        let mut config = AppConfig::from_yaml(SAMPLE).unwrap();
        config.apply_overrides(|k| (k == "PORT").then(|| "not-a-port".to_string()));
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_missing_section_fails() {
        assert!(AppConfig::from_yaml("log_level: info").is_err());
    }
}
