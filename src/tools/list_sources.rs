use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use super::handler::{ToolHandler, ToolOutput};
use super::meta::{ToolInputSchema, ToolMeta};
use crate::config::SourcesConfig;
use crate::environment;
use crate::error::ToolResult;

pub const TOOL_NAME: &str = "list_llms_sources";
/// Name the first deployments registered the same tool under.
pub const LEGACY_TOOL_NAME: &str = "list_something";

static META: OnceLock<ToolMeta> = OnceLock::new();

pub fn meta() -> ToolMeta {
    META.get_or_init(|| {
        ToolMeta::new(
            TOOL_NAME,
            "List llms.txt Sources",
            "Return discoverable llms.txt locations. Call this first, then pass one of the \
             returned sources to fetch_llms_txt. Reads the comma-separated LLMS_SOURCES \
             variable and appends the local fallback manifest when it exists.",
            ToolInputSchema::empty(),
        )
    })
    .clone()
}

/// Split a comma-separated source list, trimming entries and dropping empty ones.
pub fn parse_source_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Configured sources followed by the fallback manifest, if it exists.
pub fn list_sources(configured: Option<&str>, fallback: Option<&Path>) -> Vec<String> {
    let mut sources = configured.map(parse_source_list).unwrap_or_default();
    if let Some(path) = fallback.filter(|p| p.exists()) {
        sources.push(path.display().to_string());
    }
    sources
}

pub struct ListSourcesHandler {
    pub env_var: String,
    pub fallback_path: Option<PathBuf>,
}

impl ListSourcesHandler {
    pub fn from_config(cfg: &SourcesConfig) -> Self {
        Self {
            env_var: cfg.env_var.clone(),
            fallback_path: cfg.fallback_path.clone(),
        }
    }

    pub fn sources(&self) -> Vec<String> {
        let configured = environment::var(&self.env_var);
        list_sources(configured.as_deref(), self.fallback_path.as_deref())
    }
}

#[async_trait]
impl ToolHandler for ListSourcesHandler {
    async fn call(&self, _arguments: HashMap<String, Value>) -> ToolResult<ToolOutput> {
        let sources = self.sources();
        tracing::debug!(count = sources.len(), env_var = %self.env_var, "listed sources");
        Ok(ToolOutput::List(sources))
    }
}
