use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::tools::LinkFilter;

pub const DEFAULT_SOURCES_VAR: &str = "LLMS_SOURCES";
pub const DEFAULT_FALLBACK_PATH: &str = "../llms.txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TransportKind {
    #[default]
    Sse,
    Stdio,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// Environment variable holding the comma-separated default sources.
    pub env_var: String,
    /// Local manifest appended to the listing when it exists. Relative paths
    /// resolve against the working directory.
    pub fallback_path: Option<PathBuf>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            env_var: DEFAULT_SOURCES_VAR.to_string(),
            fallback_path: Some(PathBuf::from(DEFAULT_FALLBACK_PATH)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub timeout_secs: u64,
    pub max_response_size: usize,
    pub user_agent: String,
    pub link_filter: LinkFilter,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            max_response_size: 5 * 1024 * 1024,
            user_agent: format!("llms-txt-mcp/{}", env!("CARGO_PKG_VERSION")),
            link_filter: LinkFilter::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    pub max_chars: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self { max_chars: 300 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub transport: TransportKind,
    pub bind: SocketAddr,
    pub sse_path: String,
    pub post_path: String,
    pub max_concurrent_calls: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            transport: TransportKind::Sse,
            bind: SocketAddr::from(([127, 0, 0, 1], 8082)),
            sse_path: "/sse".to_string(),
            post_path: "/messages/".to_string(),
            max_concurrent_calls: 1,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub features: HashMap<String, bool>,
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub summary: SummaryConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents).unwrap_or_else(|err| {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to parse config, using defaults"
                );
                Self::default()
            }),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "config not readable, using defaults");
                Self::default()
            }
        }
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<Config>(contents)
    }

    pub fn load_default() -> Self {
        if let Ok(mut exe_path) = std::env::current_exe() {
            exe_path.pop();
            let exe_cfg = exe_path.join("config.toml");
            if exe_cfg.exists() {
                tracing::info!(path = %exe_cfg.display(), "using config next to executable");
                return Self::load_from_path(exe_cfg);
            }
        }

        tracing::info!("no config.toml found, using defaults (all tools enabled)");
        Self::default()
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.features.get(name).copied().unwrap_or(true)
    }
}
