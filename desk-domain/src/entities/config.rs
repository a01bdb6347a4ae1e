// Runtime configuration shared across layers

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    File,
    Memory,
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
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

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3240".to_string(),
            api_token: None,
            data_dir: "./data".to_string(),
            storage_backend: StorageBackend::File,
            gateway_url: None,
            request_timeout_seconds: 15,
            sync_interval_seconds: 30,
            sync_retry_cap: 5,
            volunteer_pin_hash: None,
            volunteer_pin: None,
            max_body_bytes: 1024 * 1024,
        }
    }
}
