//! # Configuration
//!
//! Configuration is managed by [`confique`], layered in priority order:
//! 1. **Command-line flags** (applied by the binary after loading).
//! 2. **Environment variables**: `IDEABOX_PORT`, `IDEABOX_API_URL`, etc.
//! 3. **Config file**: an optional TOML file passed with `--config`.
//! 4. **Compiled defaults**: via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Env | Default |
//! |-----|-----|---------|
//! | `server.host` | `IDEABOX_HOST` | `0.0.0.0` |
//! | `server.port` | `IDEABOX_PORT` | `3001` |
//! | `server.data_file` | `IDEABOX_DATA_FILE` | `data/ideas.json` |
//! | `client.api_url` | `IDEABOX_API_URL` | `http://localhost:3001` |
//! | `client.local_dir` | `IDEABOX_LOCAL_DIR` | OS data dir |
//! | `client.timeout_secs` | `IDEABOX_TIMEOUT_SECS` | none |
//! | `log.filter` | `IDEABOX_LOG` | `info` |
//! | `log.json` | `IDEABOX_LOG_JSON` | `false` |

use crate::error::Result;
use confique::Config;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Config, Debug, Clone)]
pub struct IdeaboxConfig {
    #[config(nested)]
    pub server: ServerConfig,

    #[config(nested)]
    pub client: ClientConfig,

    #[config(nested)]
    pub log: LogConfig,
}

#[derive(Config, Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind.
    #[config(env = "IDEABOX_HOST", default = "0.0.0.0")]
    pub host: String,

    #[config(env = "IDEABOX_PORT", default = 3001)]
    pub port: u16,

    /// The JSON document holding every idea.
    #[config(env = "IDEABOX_DATA_FILE", default = "data/ideas.json")]
    pub data_file: PathBuf,
}

#[derive(Config, Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the ideabox service, without the `/api` suffix.
    #[config(env = "IDEABOX_API_URL", default = "http://localhost:3001")]
    pub api_url: String,

    /// Where offline copies are kept. Defaults to the OS data directory.
    #[config(env = "IDEABOX_LOCAL_DIR")]
    pub local_dir: Option<PathBuf>,

    /// Request timeout. Unset means the transport's own behavior.
    #[config(env = "IDEABOX_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,
}

impl ClientConfig {
    pub fn local_dir(&self) -> PathBuf {
        self.local_dir.clone().unwrap_or_else(default_local_dir)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Config, Debug, Clone)]
pub struct LogConfig {
    /// `tracing` filter directive; `RUST_LOG` wins when set.
    #[config(env = "IDEABOX_LOG", default = "info")]
    pub filter: String,

    #[config(env = "IDEABOX_LOG_JSON", default = false)]
    pub json: bool,
}

fn default_local_dir() -> PathBuf {
    ProjectDirs::from("com", "ideabox", "ideabox")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".ideabox"))
}

impl IdeaboxConfig {
    /// Load from the environment, then the optional TOML file, then defaults.
    /// A missing file is skipped.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = file {
            builder = builder.file(path);
        }
        Ok(builder.load()?)
    }
}
