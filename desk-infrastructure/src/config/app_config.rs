use std::env;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use desk_domain::{RuntimeConfig, StorageBackend};

use crate::config::validation::{validate_bind_addr, validate_gateway_url, validate_pin_hash};

const CONFIG_ENV: &str = "CHECKIN_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "./config.toml";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    pub data_dir: String,
    pub storage_backend: StorageBackend,
    pub gateway_url: Option<String>,
    pub request_timeout_seconds: u64,
    pub sync_interval_seconds: u64,
    pub sync_retry_cap: u32,
    pub volunteer_pin_hash: Option<String>,
    pub volunteer_pin: Option<String>,
    pub max_body_bytes: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        let runtime = RuntimeConfig::default();
        Self {
            bind_addr: runtime.bind_addr,
            api_token: runtime.api_token,
            data_dir: runtime.data_dir,
            storage_backend: runtime.storage_backend,
            gateway_url: runtime.gateway_url,
            request_timeout_seconds: runtime.request_timeout_seconds,
            sync_interval_seconds: runtime.sync_interval_seconds,
            sync_retry_cap: runtime.sync_retry_cap,
            volunteer_pin_hash: runtime.volunteer_pin_hash,
            volunteer_pin: runtime.volunteer_pin,
            max_body_bytes: runtime.max_body_bytes,
        }
    }
}

impl AppConfig {
    /// Loads from `path`, or from `CHECKIN_CONFIG` / `./config.toml` when
    /// no path is given. A missing file yields the defaults.
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => env::var(CONFIG_ENV)
                .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
                .into(),
        };
        let base_dir = path.parent();
        let mut config = if path.exists() {
            let content = fs::read_to_string(&path)
                .await
                .with_context(|| format!("failed to read {}", path.display()))?;
            Self::from_toml_str(&content)?
        } else {
            warn!("{} not found, using defaults", path.display());
            AppConfig::default()
        };
        config.apply_env_overrides();
        config.finalize(base_dir)?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("invalid config file")
    }

    /// Resolves relative paths against the config file's directory, then
    /// normalizes and validates.
    pub fn finalize(&mut self, base_dir: Option<&Path>) -> Result<()> {
        self.resolve_paths(base_dir);
        self.normalize();
        self.validate()
    }

    pub fn normalize(&mut self) {
        self.api_token = blank_to_none(self.api_token.take());
        self.gateway_url = blank_to_none(self.gateway_url.take());
        self.volunteer_pin = blank_to_none(self.volunteer_pin.take());
        self.volunteer_pin_hash =
            blank_to_none(self.volunteer_pin_hash.take()).map(|hash| hash.to_lowercase());
        self.data_dir = self.data_dir.trim().to_string();
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        self.data_dir = resolve_path(base, &self.data_dir);
    }

    pub fn validate(&self) -> Result<()> {
        validate_bind_addr(&self.bind_addr)?;
        if let Some(url) = &self.gateway_url {
            validate_gateway_url(url)?;
        }
        if let Some(hash) = &self.volunteer_pin_hash {
            validate_pin_hash(hash)?;
        }
        if self.storage_backend == StorageBackend::File && self.data_dir.is_empty() {
            anyhow::bail!("data_dir must not be empty for the file storage backend");
        }
        if self.max_body_bytes == 0 {
            anyhow::bail!("max_body_bytes must be greater than 0");
        }
        if self.request_timeout_seconds == 0 {
            anyhow::bail!("request_timeout_seconds must be greater than 0");
        }
        if self.sync_interval_seconds == 0 {
            anyhow::bail!("sync_interval_seconds must be greater than 0");
        }
        Ok(())
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            api_token: self.api_token.clone(),
            data_dir: self.data_dir.clone(),
            storage_backend: self.storage_backend,
            gateway_url: self.gateway_url.clone(),
            request_timeout_seconds: self.request_timeout_seconds,
            sync_interval_seconds: self.sync_interval_seconds,
            sync_retry_cap: self.sync_retry_cap,
            volunteer_pin_hash: self.volunteer_pin_hash.clone(),
            volunteer_pin: self.volunteer_pin.clone(),
            max_body_bytes: self.max_body_bytes,
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("CHECKIN_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Ok(value) = env::var("CHECKIN_API_TOKEN") {
            self.api_token = Some(value);
        }
        if let Ok(value) = env::var("CHECKIN_DATA_DIR") {
            self.data_dir = value;
        }
        if let Ok(value) = env::var("CHECKIN_STORAGE_BACKEND") {
            match value.trim().to_lowercase().as_str() {
                "file" => self.storage_backend = StorageBackend::File,
                "memory" => self.storage_backend = StorageBackend::Memory,
                other => warn!("ignoring unknown CHECKIN_STORAGE_BACKEND '{}'", other),
            }
        }
        if let Ok(value) = env::var("CHECKIN_GATEWAY_URL") {
            self.gateway_url = Some(value);
        }
        if let Ok(value) = env::var("CHECKIN_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.parse().unwrap_or(self.request_timeout_seconds);
        }
        if let Ok(value) = env::var("CHECKIN_SYNC_INTERVAL_SECONDS") {
            self.sync_interval_seconds = value.parse().unwrap_or(self.sync_interval_seconds);
        }
        if let Ok(value) = env::var("CHECKIN_SYNC_RETRY_CAP") {
            self.sync_retry_cap = value.parse().unwrap_or(self.sync_retry_cap);
        }
        if let Ok(value) = env::var("CHECKIN_VOLUNTEER_PIN_HASH") {
            self.volunteer_pin_hash = Some(value);
        }
        if let Ok(value) = env::var("CHECKIN_VOLUNTEER_PIN") {
            self.volunteer_pin = Some(value);
        }
        if let Ok(value) = env::var("CHECKIN_MAX_BODY_BYTES") {
            self.max_body_bytes = value.parse().unwrap_or(self.max_body_bytes);
        }
    }
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}

fn resolve_path(base: &Path, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return trimmed.to_string();
    }
    let path = Path::new(trimmed);
    if path.is_absolute() {
        trimmed.to_string()
    } else {
        base.join(path).to_string_lossy().to_string()
    }
}
