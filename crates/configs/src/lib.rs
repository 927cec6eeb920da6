use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

/// In-memory deal store settings.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Install the five sample deals at startup.
    #[serde(default = "default_seed")]
    pub seed: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { seed: default_seed() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `compact` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { format: default_log_format() }
    }
}

fn default_seed() -> bool { true }
fn default_log_format() -> String { "compact".into() }

const LOG_FORMATS: [&str; 3] = ["compact", "text", "json"];

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

/// Build a config purely from environment variables.
///
/// Used when no config file is present: `SERVER_HOST`, `SERVER_PORT`,
/// `TOKIO_WORKER_THREADS`, `DEALS_SEED`, `LOG_FORMAT`.
pub fn from_env() -> AppConfig {
    let host = std::env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("SERVER_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8081);
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|v| v.parse::<usize>().ok());
    let seed = std::env::var("DEALS_SEED")
        .ok()
        .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off"))
        .unwrap_or_else(default_seed);
    let format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| default_log_format());
    AppConfig {
        server: ServerConfig { host, port, worker_threads },
        store: StoreConfig { seed },
        logging: LoggingConfig { format },
    }
}

impl AppConfig {
    /// File config if readable, otherwise environment; normalized either way.
    pub fn load_or_env() -> Result<Self> {
        let mut cfg = load_default().unwrap_or_else(|_| from_env());
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.logging.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(4),
        }
        Ok(())
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<()> {
        let format = self.format.trim().to_ascii_lowercase();
        if !LOG_FORMATS.contains(&format.as_str()) {
            return Err(anyhow!("logging.format must be one of {:?}, got `{}`", LOG_FORMATS, self.format));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_file() {
        let cfg = parse(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000
            worker_threads = 2

            [store]
            seed = false

            [logging]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.server.worker_threads, Some(2));
        assert!(!cfg.store.seed);
        assert_eq!(cfg.logging.format, "json");
    }

    #[test]
    fn missing_sections_take_defaults() {
        let cfg = parse("").unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert!(cfg.store.seed);
        assert_eq!(cfg.logging.format, "compact");
    }

    #[test]
    fn normalize_fills_host_and_threads() {
        let mut cfg = parse("[server]\nhost = \"  \"\nport = 8080\nworker_threads = 0\n").unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.worker_threads, Some(4));
    }

    #[test]
    fn zero_port_is_rejected() {
        let mut cfg = parse("[server]\nhost = \"127.0.0.1\"\nport = 0\n").unwrap();
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        let mut cfg = parse("[logging]\nformat = \"pretty\"\n").unwrap();
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn load_or_env_reads_config_path_and_normalizes() {
        let path = std::env::temp_dir().join(format!("deals-config-{}.toml", std::process::id()));
        std::fs::write(&path, "[server]\nhost = \"\"\nport = 9300\n\n[store]\nseed = false\n").unwrap();
        std::env::set_var("CONFIG_PATH", &path);
        let cfg = AppConfig::load_or_env();
        std::env::remove_var("CONFIG_PATH");
        let _ = std::fs::remove_file(&path);

        let cfg = cfg.unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 9300);
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert!(!cfg.store.seed);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_from_file("/nonexistent/deals-config.toml").is_err());
    }
}
