use anyhow::{Context, Result, anyhow, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::{Path, PathBuf},
    time::Duration,
};

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
pub const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Environment variable overriding `server.port`.
pub const PORT_ENV: &str = "PORT";

/// Where the web server listens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
        }
    }
}

/// Open-Meteo endpoints and the per-request timeout applied to both calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub geocoding_url: String,
    pub forecast_url: String,
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            geocoding_url: GEOCODING_URL.to_string(),
            forecast_url: FORECAST_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Top-level configuration, optionally stored on disk.
///
/// Example TOML:
/// ```toml
/// log_level = "debug"
///
/// [server]
/// port = 8080
///
/// [upstream]
/// timeout_secs = 3
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `tracing` filter directive for the server and CLI.
    pub log_level: String,
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            server: ServerConfig::default(),
            upstream: UpstreamConfig::default(),
        }
    }
}

impl Config {
    /// Load the config file from the platform config directory (defaults if it
    /// doesn't exist yet) and apply environment overrides.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_with_env(&path)
    }

    /// Same as [`Config::load`] but reading an explicit file.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let mut cfg = Self::load_from(path)?;
        cfg.apply_env_with(|key| std::env::var(key))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read a config file without looking at the environment.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, use defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Apply environment overrides using `lookup` instead of the process
    /// environment, so tests don't need to mutate global state.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Result<String, std::env::VarError>,
    {
        if let Ok(raw) = lookup(PORT_ENV) {
            self.server.port = raw
                .trim()
                .parse()
                .with_context(|| format!("Invalid {PORT_ENV} value '{raw}'"))?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.upstream.timeout_secs == 0 {
            bail!("upstream.timeout_secs must be greater than zero");
        }
        for (name, url) in [
            ("upstream.geocoding_url", &self.upstream.geocoding_url),
            ("upstream.forecast_url", &self.upstream.forecast_url),
        ] {
            reqwest::Url::parse(url).with_context(|| format!("Invalid {name} '{url}'"))?;
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.server.host, self.server.port)
    }

    /// Save config to the platform config directory.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-lookup", "weather-web")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
