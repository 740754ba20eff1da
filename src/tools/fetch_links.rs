use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::OnceLock;

use super::handler::{ToolHandler, ToolOutput};
use super::meta::{ToolInputSchema, ToolMeta};
use super::source::Source;
use super::utils::required_str_arg;
use crate::config::FetchConfig;
use crate::error::{FetchError, ToolResult};

pub const TOOL_NAME: &str = "fetch_llms_txt";
pub const HOSTNAME_TOOL_NAME: &str = "fetch_llm_txt";

/// Which manifest lines count as links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkFilter {
    /// Only lines starting with `https://`.
    #[default]
    #[serde(alias = "https")]
    HttpsOnly,
    /// Every line with non-whitespace content.
    NonEmpty,
}

impl LinkFilter {
    fn accepts(self, line: &str) -> bool {
        match self {
            LinkFilter::HttpsOnly => line.starts_with("https://"),
            LinkFilter::NonEmpty => !line.trim().is_empty(),
        }
    }
}

/// First whitespace-delimited token of every qualifying line, in manifest order.
pub fn extract_links(text: &str, filter: LinkFilter) -> Vec<String> {
    text.lines()
        .filter(|line| filter.accepts(line))
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_string)
        .collect()
}

static META: OnceLock<ToolMeta> = OnceLock::new();
static HOSTNAME_META: OnceLock<ToolMeta> = OnceLock::new();

pub fn meta() -> ToolMeta {
    META.get_or_init(|| {
        let schema = ToolInputSchema::new(
            "object",
            serde_json::json!({
                "source": {
                    "type": "string",
                    "description": "URL, file:// URI, local path or bare hostname of an llms.txt manifest. Site roots get /llms.txt appended."
                }
            }),
            vec!["source".to_string()],
        );
        ToolMeta::new(
            TOOL_NAME,
            "Fetch llms.txt",
            "Download or read an llms.txt manifest and return the links it lists, in order.",
            schema,
        )
    })
    .clone()
}

pub fn hostname_meta() -> ToolMeta {
    HOSTNAME_META
        .get_or_init(|| {
            let schema = ToolInputSchema::new(
                "object",
                serde_json::json!({
                    "hostname": {
                        "type": "string",
                        "description": "Hostname (docs.example.com) or site root (https://docs.example.com)."
                    }
                }),
                vec!["hostname".to_string()],
            );
            ToolMeta::new(
                HOSTNAME_TOOL_NAME,
                "Fetch llms.txt by Host",
                "Fetch https://<hostname>/llms.txt and return the links it lists.",
                schema,
            )
        })
        .clone()
}

/// Resolves manifests and pulls their links. Shared by both fetch tools.
#[derive(Debug, Clone)]
pub struct LinkFetcher {
    pub client: Client,
    pub link_filter: LinkFilter,
    pub max_response_size: usize,
}

impl LinkFetcher {
    pub fn new(client: Client, cfg: &FetchConfig) -> Self {
        Self {
            client,
            link_filter: cfg.link_filter,
            max_response_size: cfg.max_response_size,
        }
    }

    pub async fn fetch_links(&self, source: &Source) -> Result<Vec<String>, FetchError> {
        let text = source.read(&self.client, self.max_response_size).await?;
        let links = extract_links(&text, self.link_filter);
        if links.is_empty() {
            return Err(FetchError::NoLinksFound { location: source.to_string() });
        }
        tracing::info!(source = %source, links = links.len(), "extracted manifest links");
        Ok(links)
    }
}

pub struct FetchLinksHandler {
    pub fetcher: LinkFetcher,
}

#[async_trait]
impl ToolHandler for FetchLinksHandler {
    async fn call(&self, arguments: HashMap<String, Value>) -> ToolResult<ToolOutput> {
        let raw = required_str_arg(&arguments, "source")?;
        let source = Source::parse(&raw)?;
        tracing::debug!(raw = %raw, source = %source, "resolved source");
        let links = self.fetcher.fetch_links(&source).await?;
        Ok(ToolOutput::List(links))
    }
}

pub struct FetchByHostnameHandler {
    pub fetcher: LinkFetcher,
}

#[async_trait]
impl ToolHandler for FetchByHostnameHandler {
    async fn call(&self, arguments: HashMap<String, Value>) -> ToolResult<ToolOutput> {
        let hostname = required_str_arg(&arguments, "hostname")?;
        let source = Source::from_hostname(&hostname)?;
        let links = self.fetcher.fetch_links(&source).await?;
        Ok(ToolOutput::List(links))
    }
}
