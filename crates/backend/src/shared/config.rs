use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct UpstreamConfig {
    pub api_url: String,
    #[serde(default = "default_marketplace_url")]
    pub marketplace_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_static_dir() -> String {
    "dist".to_string()
}

fn default_marketplace_url() -> String {
    "https://api.mercadolibre.com".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 3000
static_dir = "dist"

[upstream]
api_url = "http://127.0.0.1:8000/api"
marketplace_url = "https://api.mercadolibre.com"
timeout_secs = 30
"#;

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: default_host(),
                port: default_port(),
                static_dir: default_static_dir(),
            },
            upstream: UpstreamConfig {
                api_url: "http://127.0.0.1:8000/api".to_string(),
                marketplace_url: default_marketplace_url(),
                timeout_secs: default_timeout_secs(),
            },
        }
    }
}

static CONFIG: OnceCell<Config> = OnceCell::new();

/// Load configuration from config.toml
///
/// Search order:
/// 1. Next to the executable
/// 2. Falls back to the embedded default
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

/// Stores the loaded configuration for the handlers. Only the first call wins.
pub fn init_config(config: Config) {
    if CONFIG.set(config).is_err() {
        tracing::warn!("configuration already initialized");
    }
}

pub fn config() -> &'static Config {
    CONFIG.get_or_init(Config::default)
}

/// Static files directory; relative paths resolve against the executable directory.
pub fn static_dir_path(config: &Config) -> PathBuf {
    let dir = Path::new(&config.server.static_dir);
    if dir.is_absolute() {
        return dir.to_path_buf();
    }
    match std::env::current_exe() {
        Ok(exe_path) => match exe_path.parent() {
            Some(exe_dir) if exe_dir.join(dir).exists() => exe_dir.join(dir),
            _ => dir.to_path_buf(),
        },
        Err(_) => dir.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.upstream.marketplace_url, "https://api.mercadolibre.com");
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config: Config = toml::from_str(
            r#"
            [server]
            [upstream]
            api_url = "https://sync.example.cl/api"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.static_dir, "dist");
        assert_eq!(config.upstream.timeout_secs, 30);
    }

    #[test]
    fn absolute_static_dir_is_kept() {
        let mut config = Config::default();
        config.server.static_dir = "/srv/multistock/dist".to_string();
        assert_eq!(static_dir_path(&config), PathBuf::from("/srv/multistock/dist"));
    }
}
