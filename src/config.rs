use crate::constants::{
    DEFAULT_DOWNLOAD_BUFFER_SIZE, DEFAULT_HOST, DEFAULT_MAX_SESSIONS, DEFAULT_PORT,
};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// How the end of a file payload is signalled to the client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TransferFraming {
    /// Payload followed by the literal `DONE` marker.
    #[default]
    Sentinel,
    /// 8-byte big-endian length, then exactly that many payload bytes.
    LengthPrefixed,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub listen_port: u16,
    pub root_folder: PathBuf,
    pub max_sessions: usize,
    /// Refuse navigation and downloads that resolve outside `root_folder`.
    pub confine_to_root: bool,
    pub transfer_framing: TransferFraming,
    pub download_buffer_size: Option<usize>, // Optional to allow default value
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from(DEFAULT_HOST),
            listen_port: DEFAULT_PORT,
            root_folder: PathBuf::from("."),
            max_sessions: DEFAULT_MAX_SESSIONS,
            confine_to_root: true,
            transfer_framing: TransferFraming::Sentinel,
            download_buffer_size: Some(DEFAULT_DOWNLOAD_BUFFER_SIZE),
        }
    }
}

impl ServerConfig {
    pub fn download_buffer_size(&self) -> usize {
        self.download_buffer_size
            .unwrap_or(DEFAULT_DOWNLOAD_BUFFER_SIZE)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.listen_port)
    }

    /// Checks the settings that cannot be expressed in the TOML schema and
    /// returns the canonical shared root.
    pub fn validate(&self) -> Result<PathBuf> {
        if self.max_sessions == 0 {
            bail!("max_sessions must be at least 1");
        }
        if self.download_buffer_size() == 0 {
            bail!("download_buffer_size must be at least 1 byte");
        }

        let root = self
            .root_folder
            .canonicalize()
            .with_context(|| format!("Shared root folder not found: {:?}", self.root_folder))?;
        if !root.is_dir() {
            bail!("Shared root is not a directory: {:?}", root);
        }
        Ok(root)
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
        let config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))?;
        Ok(config)
    }
}
