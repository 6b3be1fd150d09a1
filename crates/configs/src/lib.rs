use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use service::storage::device_store::DEFAULT_CAPACITY;

const DEFAULT_CONFIG_PATH: &str = "config.toml";

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
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            worker_threads: Some(4),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    /// Reject inserts whose id is already stored instead of overwriting.
    #[serde(default)]
    pub reject_duplicate_ids: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { capacity: default_capacity(), reject_duplicate_ids: false }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 8080 }
fn default_request_timeout() -> u64 { 10 }
fn default_capacity() -> usize { DEFAULT_CAPACITY }

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load configuration for the binary from the process environment.
    ///
    /// An explicit path or a set `CONFIG_PATH` must point at a readable file.
    /// Only the implicit `config.toml` may be absent, in which case defaults
    /// are used. Environment overrides are applied before validation.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        Self::load_with(explicit, |key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::load`] with variables read through `env`.
    pub fn load_with<F>(explicit: Option<&Path>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = explicit
            .map(|p| p.to_string_lossy().into_owned())
            .or_else(|| env("CONFIG_PATH"));
        let mut cfg = match required {
            Some(path) => {
                load_from_file(&path).with_context(|| format!("reading config file {path}"))?
            }
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => load_from_file(DEFAULT_CONFIG_PATH)
                .with_context(|| format!("reading config file {DEFAULT_CONFIG_PATH}"))?,
            None => AppConfig::default(),
        };
        cfg.apply_overrides(env)?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Apply `SERVER_HOST`, `SERVER_PORT` and `STORE_CAPACITY` from `env`.
    pub fn apply_overrides<F>(&mut self, env: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = env("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = env("SERVER_PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| anyhow!("SERVER_PORT must be a port number, got {port:?}"))?;
        }
        if let Some(capacity) = env("STORE_CAPACITY") {
            self.store.capacity = capacity
                .parse()
                .map_err(|_| anyhow!("STORE_CAPACITY must be a positive integer, got {capacity:?}"))?;
        }
        Ok(())
    }

    /// Replace the configured port (the `--port` flag) and revalidate.
    pub fn override_port(&mut self, port: Option<u16>) -> Result<()> {
        if let Some(port) = port {
            self.server.port = port;
            self.normalize_and_validate()?;
        }
        Ok(())
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.store.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        if self.request_timeout_secs == 0 {
            return Err(anyhow!("server.request_timeout_secs must be a positive number of seconds"));
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(4),
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl StoreConfig {
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(anyhow!("store.capacity must be >= 1"));
        }
        Ok(())
    }
}
